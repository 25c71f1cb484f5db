//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user account can hold. Roles never change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// The single bootstrap administrator.
    Admin,
    /// A citizen submitting consultations.
    User,
    /// A lawyer who claims and answers consultations.
    Lawyer,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role is a lawyer.
    pub fn is_lawyer(&self) -> bool {
        matches!(self, Self::Lawyer)
    }

    /// Whether an account with this role may be created through public registration.
    pub fn is_self_registrable(&self) -> bool {
        matches!(self, Self::User | Self::Lawyer)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Lawyer => "lawyer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = adhikar_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "lawyer" => Ok(Self::Lawyer),
            _ => Err(adhikar_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, user, lawyer"
            ))),
        }
    }
}
