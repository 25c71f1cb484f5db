//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use adhikar_core::types::UserId;

use super::role::UserRole;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Email address (absent for the bootstrap admin).
    pub email: Option<String>,
    /// Argon2id password hash. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Full name shown to other parties.
    pub full_name: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Area of practice, lawyers only.
    pub specialization: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if this user is a lawyer.
    pub fn is_lawyer(&self) -> bool {
        self.role.is_lawyer()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Full name.
    pub full_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Area of practice (kept for lawyers only).
    pub specialization: Option<String>,
}

impl CreateUser {
    /// Materialize the record a store will persist.
    pub fn into_user(self, id: UserId, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            full_name: self.full_name,
            role: self.role,
            specialization: self.specialization,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public identity of a user, embedded in consultation responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Full name.
    pub full_name: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Role.
    pub role: UserRole,
    /// Area of practice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            specialization: user.specialization.clone(),
        }
    }
}
