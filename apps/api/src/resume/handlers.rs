//! Axum route handlers for the Resume API.

use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::profile::users::load_user;
use crate::resume::improver::{
    get_resume, improve_section, save_resume, ImproveRequest, ImproveResponse, SaveResumeRequest,
};
use crate::state::AppState;

/// GET /api/v1/resume
///
/// `null` when the user has not saved a resume yet.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Option<ResumeRow>>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(get_resume(&state.db, &user).await?))
}

/// PUT /api/v1/resume
pub async fn handle_save_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<SaveResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(save_resume(&state.db, &user, request).await?))
}

/// POST /api/v1/resume/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(improve_section(&state.ai, &user, request).await?))
}
