//! Consultation workflow configuration.

use serde::{Deserialize, Serialize};

/// Settings for the consultation lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// How concurrent or out-of-order transitions are treated:
    /// `"strict"` (guarded compare-and-set) or `"last_writer_wins"`.
    #[serde(default = "default_policy")]
    pub transition_policy: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            transition_policy: default_policy(),
        }
    }
}

fn default_policy() -> String {
    "strict".to_string()
}
