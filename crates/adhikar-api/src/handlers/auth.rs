//! Auth handlers: init, register, login, me, logout.

use axum::extract::State;
use axum::Json;

use adhikar_entity::user::{User, UserRole};
use adhikar_service::auth::AuthSession;

use crate::dto::request::{InitBody, LoginBody, RegisterBody};
use crate::dto::response::{ApiResponse, Created, Reply, created};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

fn registered_message(role: UserRole) -> &'static str {
    match role {
        UserRole::Lawyer => "Lawyer registered successfully",
        UserRole::Admin => "Admin registered successfully",
        UserRole::User => "User registered successfully",
    }
}

/// POST /api/auth/init
pub async fn init(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<InitBody>,
) -> Result<Created<AuthSession>, ApiError> {
    let session = state.auth_service.bootstrap_admin(body.into()).await?;
    Ok(created("Admin user created successfully", session))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterBody>,
) -> Result<Created<AuthSession>, ApiError> {
    let session = state.auth_service.register(body.into()).await?;
    let message = registered_message(session.user.role);
    Ok(created(message, session))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginBody>,
) -> Result<Reply<AuthSession>, ApiError> {
    let session = state.auth_service.login(body.into()).await?;
    Ok(Json(ApiResponse::ok("User logged in successfully", session)))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Reply<User>, ApiError> {
    let user = state.auth_service.current_user(&auth).await?;
    Ok(Json(ApiResponse::ok("User fetched successfully", user)))
}

/// POST /api/auth/logout
///
/// Tokens are not revoked server-side; the client discards its copy.
pub async fn logout(auth: AuthUser) -> Reply<()> {
    tracing::info!(user_id = %auth.user_id, "User logged out");
    Json(ApiResponse::message("User logged out successfully"))
}
