//! Response envelope and small response bodies.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// The `{success, message, data}` envelope every endpoint answers with.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Payload; `null` on errors and for message-only responses.
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// A failed response with no payload.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// A failed response that still carries `data`.
    pub fn failure(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// A successful response with `data: null`.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Success with `200 OK`.
pub type Reply<T> = Json<ApiResponse<T>>;

/// Success with `201 Created`.
pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);

/// Wrap `data` in a `201 Created` envelope.
pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> Created<T> {
    (StatusCode::CREATED, Json(ApiResponse::ok(message, data)))
}

/// Health check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active store backend.
    pub store: String,
}
