//! # adhikar-api
//!
//! HTTP API layer for Jan Adhikar built on Axum.
//!
//! Provides the REST endpoints under `/api`, the bearer-token access gate,
//! request validation at the boundary, the `{success, message, data}`
//! response envelope, and the mapping from `AppError` to HTTP status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
