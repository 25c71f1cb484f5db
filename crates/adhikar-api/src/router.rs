//! Route definitions for the Jan Adhikar HTTP API.
//!
//! All endpoints are mounted under `/api`. The router receives `AppState`
//! and passes it to every handler via Axum's `State` extractor.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let server = &config.server;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(consultation_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .route("/", get(handlers::health::root))
        .nest("/api", api_routes)
        .fallback(handlers::health::not_found)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&server.cors))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Credential endpoints.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/init", post(handlers::auth::init))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// Consultation workflow endpoints.
fn consultation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/consultations",
            post(handlers::consultation::create).get(handlers::consultation::list_mine),
        )
        .route(
            "/consultations/lawyer/pending",
            get(handlers::consultation::list_pending),
        )
        .route(
            "/consultations/lawyer/assigned",
            get(handlers::consultation::list_assigned),
        )
        .route("/consultations/{id}", get(handlers::consultation::get))
        .route(
            "/consultations/{id}/assign",
            put(handlers::consultation::assign),
        )
        .route(
            "/consultations/{id}/respond",
            put(handlers::consultation::respond),
        )
        .route(
            "/consultations/{id}/close",
            put(handlers::consultation::close),
        )
}
