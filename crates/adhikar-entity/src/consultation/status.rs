//! Consultation lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a consultation.
///
/// `pending → assigned → responded → closed`. `InProgress` is declared for
/// compatibility with stored data but no transition enters it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "consultation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    /// Submitted, waiting for a lawyer.
    #[default]
    Pending,
    /// Claimed by a lawyer.
    Assigned,
    /// Reserved; unreachable.
    InProgress,
    /// The assigned lawyer has answered.
    Responded,
    /// Terminal.
    Closed,
}

impl ConsultationStatus {
    /// Check if no transition may leave this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Check if the assigned lawyer may (re)submit a response in this state.
    pub fn accepts_response(&self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress | Self::Responded)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Responded => "responded",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConsultationStatus {
    type Err = adhikar_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "responded" => Ok(Self::Responded),
            "closed" => Ok(Self::Closed),
            _ => Err(adhikar_core::AppError::validation(format!(
                "Invalid consultation status: '{s}'"
            ))),
        }
    }
}
