//! Health and root handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, HealthResponse, Reply};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Reply<HealthResponse>) {
    let healthy = match state.stores.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            false
        }
    };

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.config.store.backend.clone(),
    };

    if healthy {
        (StatusCode::OK, Json(ApiResponse::ok("Server is running", body)))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::failure("Store unavailable", body)),
        )
    }
}

/// GET /
pub async fn root(State(state): State<AppState>) -> Reply<()> {
    Json(ApiResponse::message(format!(
        "Server is running on port {}",
        state.config.server.port
    )))
}

/// Any unmatched route.
pub async fn not_found() -> (StatusCode, Reply<()>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Route not found")))
}
