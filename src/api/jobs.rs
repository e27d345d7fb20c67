use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, ApplyRequest, AuthUser};
use crate::api::validation::validate_job_id;
use crate::models::application::Application;
use crate::models::job::Job;

/// GET /jobs
/// Open jobs, served from cache when a live entry exists
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Job>>>, ApiError> {
    let jobs = state.listing_service().get_open_jobs().await?;
    Ok(Json(ApiResponse::success(jobs)))
}

/// GET /jobs/{id}
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Job>>, ApiError> {
    let id = validate_job_id(id)?;
    let job = state.listing_service().get_job(id).await?;
    Ok(Json(ApiResponse::success(job)))
}

/// POST /jobs/{id}/apply
/// Body: `{"reason": "..."}`; requires authentication
pub async fn apply_to_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Application>>), ApiError> {
    let job_id = validate_job_id(id)?;
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    let reason = payload.reason.unwrap_or_default();

    let application = state
        .application_service()
        .apply(user_id, job_id, &reason)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(application))))
}
