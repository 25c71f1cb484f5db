//! Core type definitions used across the Adhikar workspace.

pub mod id;

pub use id::{ConsultationId, UserId};
