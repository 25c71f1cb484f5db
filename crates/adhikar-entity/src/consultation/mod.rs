//! Consultation domain entities and lifecycle rules.

pub mod attributes;
pub mod model;
pub mod status;
pub mod transition;

pub use attributes::{ConsultationCategory, ConsultationLanguage, ContactPreference, UrgencyLevel};
pub use model::{
    Consultation, NewConsultation, MAX_LOCATION_CHARS, MAX_QUESTION_CHARS, MAX_TITLE_CHARS,
};
pub use status::ConsultationStatus;
pub use transition::{Transition, TransitionPolicy};
