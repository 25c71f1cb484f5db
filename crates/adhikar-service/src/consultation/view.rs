//! Read model returned to clients.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use adhikar_core::types::{ConsultationId, UserId};
use adhikar_entity::consultation::{
    Consultation, ConsultationCategory, ConsultationLanguage, ConsultationStatus,
    ContactPreference, UrgencyLevel,
};
use adhikar_entity::user::UserSummary;

/// A consultation with its owner and assigned lawyer denormalized.
#[derive(Debug, Clone)]
pub struct ConsultationView {
    /// The stored record.
    pub consultation: Consultation,
    /// Owner summary; `None` when the owner is hidden or no longer exists.
    pub user: Option<UserSummary>,
    /// Assigned lawyer summary.
    pub assigned_lawyer: Option<UserSummary>,
    /// Leave every trace of the owner out of the serialized form.
    pub owner_hidden: bool,
}

impl ConsultationView {
    /// Build a view as seen by `viewer`.
    ///
    /// An anonymous consultation hides its owner from everyone but the owner.
    pub fn for_viewer(
        consultation: Consultation,
        viewer: UserId,
        user: Option<UserSummary>,
        assigned_lawyer: Option<UserSummary>,
    ) -> Self {
        let owner_hidden = consultation.is_anonymous && !consultation.is_owned_by(viewer);
        Self {
            user: if owner_hidden { None } else { user },
            consultation,
            assigned_lawyer,
            owner_hidden,
        }
    }
}

#[derive(Serialize)]
struct WireView<'a> {
    id: ConsultationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,
    title: &'a str,
    question: &'a str,
    category: ConsultationCategory,
    urgency: UrgencyLevel,
    location: Option<&'a str>,
    contact_preference: ContactPreference,
    language: ConsultationLanguage,
    is_anonymous: bool,
    status: ConsultationStatus,
    assigned_lawyer_id: Option<UserId>,
    response: &'a str,
    response_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a UserSummary>,
    assigned_lawyer: Option<&'a UserSummary>,
}

impl Serialize for ConsultationView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let c = &self.consultation;
        WireView {
            id: c.id,
            user_id: (!self.owner_hidden).then_some(c.user_id),
            title: &c.title,
            question: &c.question,
            category: c.category,
            urgency: c.urgency,
            location: c.location.as_deref(),
            contact_preference: c.contact_preference,
            language: c.language,
            is_anonymous: c.is_anonymous,
            status: c.status,
            assigned_lawyer_id: c.assigned_lawyer_id,
            response: &c.response,
            response_date: c.response_date,
            created_at: c.created_at,
            updated_at: c.updated_at,
            user: if self.owner_hidden { None } else { self.user.as_ref() },
            assigned_lawyer: self.assigned_lawyer.as_ref(),
        }
        .serialize(serializer)
    }
}
