use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, AuthUser};
use crate::models::application::UserApplication;

/// GET /applications
/// The caller's applications, each joined with its job
pub async fn list_applications(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<UserApplication>>>, ApiError> {
    let applications = state.application_service().list_for_user(user_id).await?;
    Ok(Json(ApiResponse::success(applications)))
}
