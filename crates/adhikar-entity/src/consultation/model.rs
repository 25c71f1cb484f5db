//! Consultation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use adhikar_core::types::{ConsultationId, UserId};

use super::attributes::{
    ConsultationCategory, ConsultationLanguage, ContactPreference, UrgencyLevel,
};
use super::status::ConsultationStatus;
use crate::user::UserRole;

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 200;
/// Maximum question length, in characters.
pub const MAX_QUESTION_CHARS: usize = 2000;
/// Maximum location length, in characters.
pub const MAX_LOCATION_CHARS: usize = 255;

/// A legal query submitted by a citizen and tracked until closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Consultation {
    /// Unique consultation identifier.
    pub id: ConsultationId,
    /// Owning citizen. Never changes.
    pub user_id: UserId,
    /// Short summary of the query.
    pub title: String,
    /// Full description of the problem.
    pub question: String,
    /// Area of law.
    pub category: ConsultationCategory,
    /// How urgent the query is.
    pub urgency: UrgencyLevel,
    /// Free-text location of the citizen.
    pub location: Option<String>,
    /// Preferred contact channel.
    pub contact_preference: ContactPreference,
    /// Preferred answer language.
    pub language: ConsultationLanguage,
    /// Hide the owner's identity from other parties.
    pub is_anonymous: bool,
    /// Lifecycle status.
    pub status: ConsultationStatus,
    /// Lawyer that claimed the consultation.
    pub assigned_lawyer_id: Option<UserId>,
    /// Lawyer's answer; empty until responded.
    #[serde(default)]
    pub response: String,
    /// When the answer was submitted.
    pub response_date: Option<DateTime<Utc>>,
    /// When the consultation was submitted.
    pub created_at: DateTime<Utc>,
    /// When the consultation last changed.
    pub updated_at: DateTime<Utc>,
}

impl Consultation {
    /// Check whether `user_id` owns this consultation.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Check whether `user_id` is the assigned lawyer.
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assigned_lawyer_id == Some(user_id)
    }

    /// Check whether the consultation is still waiting in the open queue.
    pub fn is_unclaimed(&self) -> bool {
        self.status == ConsultationStatus::Pending && self.assigned_lawyer_id.is_none()
    }

    /// Read access: owner, assigned lawyer, admins, and any lawyer while
    /// the consultation is still unclaimed.
    pub fn is_visible_to(&self, user_id: UserId, role: UserRole) -> bool {
        self.is_owned_by(user_id)
            || self.is_assigned_to(user_id)
            || role.is_admin()
            || (role.is_lawyer() && self.is_unclaimed())
    }
}

/// Validated data for a new consultation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConsultation {
    /// Owning citizen.
    pub user_id: UserId,
    /// Trimmed title.
    pub title: String,
    /// Trimmed question.
    pub question: String,
    /// Area of law.
    pub category: ConsultationCategory,
    /// Urgency.
    pub urgency: UrgencyLevel,
    /// Trimmed location.
    pub location: Option<String>,
    /// Contact channel.
    pub contact_preference: ContactPreference,
    /// Answer language.
    pub language: ConsultationLanguage,
    /// Anonymity flag.
    pub is_anonymous: bool,
}

impl NewConsultation {
    /// Materialize the pending record a store will persist.
    pub fn into_consultation(self, id: ConsultationId, now: DateTime<Utc>) -> Consultation {
        Consultation {
            id,
            user_id: self.user_id,
            title: self.title,
            question: self.question,
            category: self.category,
            urgency: self.urgency,
            location: self.location,
            contact_preference: self.contact_preference,
            language: self.language,
            is_anonymous: self.is_anonymous,
            status: ConsultationStatus::Pending,
            assigned_lawyer_id: None,
            response: String::new(),
            response_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}
