//! Per-request identity passed into every authenticated service call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adhikar_auth::Claims;
use adhikar_core::types::UserId;
use adhikar_entity::user::UserRole;

/// The authenticated caller of the current request.
///
/// Built by the access gate from a verified token and handed to service
/// methods explicitly; nothing about the caller is cached across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's id.
    pub user_id: UserId,
    /// Role recorded in the token.
    pub role: UserRole,
    /// Username recorded in the token.
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Create a context for the given identity.
    pub fn new(user_id: UserId, role: UserRole, username: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            username: username.into(),
            request_time: Utc::now(),
        }
    }
}

impl From<Claims> for RequestContext {
    fn from(claims: Claims) -> Self {
        Self::new(claims.sub, claims.role, claims.username)
    }
}
