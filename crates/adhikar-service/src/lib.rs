//! # adhikar-service
//!
//! Business logic for the Jan Adhikar backend. Services receive their
//! stores and credential primitives through constructor injection and take
//! an explicit [`RequestContext`] for every authenticated call.

pub mod auth;
pub mod consultation;
pub mod context;

pub use auth::AuthService;
pub use consultation::{ConsultationService, ConsultationView};
pub use context::RequestContext;
