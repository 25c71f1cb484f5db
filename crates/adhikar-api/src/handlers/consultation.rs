//! Consultation handlers.

use axum::Json;
use axum::extract::{Path, State};

use adhikar_service::ConsultationView;

use crate::dto::request::{CreateConsultationBody, RespondBody};
use crate::dto::response::{ApiResponse, Created, Reply, created};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_consultation_id};
use crate::state::AppState;

/// POST /api/consultations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateConsultationBody>,
) -> Result<Created<ConsultationView>, ApiError> {
    let view = state
        .consultation_service
        .create(&auth, body.into())
        .await?;
    Ok(created("Consultation submitted successfully", view))
}

/// GET /api/consultations
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Reply<Vec<ConsultationView>>, ApiError> {
    let views = state.consultation_service.list_mine(&auth).await?;
    Ok(Json(ApiResponse::ok(
        "Consultations fetched successfully",
        views,
    )))
}

/// GET /api/consultations/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Reply<ConsultationView>, ApiError> {
    let id = parse_consultation_id(&id)?;
    let view = state.consultation_service.get_by_id(&auth, id).await?;
    Ok(Json(ApiResponse::ok("Consultation fetched successfully", view)))
}

/// GET /api/consultations/lawyer/pending
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Reply<Vec<ConsultationView>>, ApiError> {
    let views = state.consultation_service.list_pending(&auth).await?;
    Ok(Json(ApiResponse::ok(
        "Pending consultations fetched successfully",
        views,
    )))
}

/// GET /api/consultations/lawyer/assigned
pub async fn list_assigned(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Reply<Vec<ConsultationView>>, ApiError> {
    let views = state.consultation_service.list_assigned(&auth).await?;
    Ok(Json(ApiResponse::ok(
        "Lawyer consultations fetched successfully",
        views,
    )))
}

/// PUT /api/consultations/{id}/assign
pub async fn assign(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Reply<ConsultationView>, ApiError> {
    let id = parse_consultation_id(&id)?;
    let view = state.consultation_service.assign(&auth, id).await?;
    Ok(Json(ApiResponse::ok("Consultation assigned successfully", view)))
}

/// PUT /api/consultations/{id}/respond
pub async fn respond(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RespondBody>,
) -> Result<Reply<ConsultationView>, ApiError> {
    let id = parse_consultation_id(&id)?;
    let view = state
        .consultation_service
        .respond(&auth, id, &body.response)
        .await?;
    Ok(Json(ApiResponse::ok("Response submitted successfully", view)))
}

/// PUT /api/consultations/{id}/close
pub async fn close(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Reply<ConsultationView>, ApiError> {
    let id = parse_consultation_id(&id)?;
    let view = state.consultation_service.close(&auth, id).await?;
    Ok(Json(ApiResponse::ok("Consultation closed successfully", view)))
}
