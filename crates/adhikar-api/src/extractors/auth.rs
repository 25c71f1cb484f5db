//! Access gate: resolves the bearer token to a [`RequestContext`].
//!
//! The gate only authenticates. Role and ownership checks happen in the
//! workflow for each operation.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use adhikar_core::error::AppError;
use adhikar_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

const NOT_AUTHORIZED: &str = "Not authorized to access this route";

/// The authenticated caller, available to handlers as an extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| AppError::authentication(NOT_AUTHORIZED))?;

        let ctx = state.auth_service.authenticate(token)?;
        Ok(AuthUser(ctx))
    }
}
