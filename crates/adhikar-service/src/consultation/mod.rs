//! Consultation workflow.

pub mod service;
pub mod view;

pub use service::{ConsultationService, CreateConsultationRequest};
pub use view::ConsultationView;
