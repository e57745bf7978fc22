//! Axum route handlers for the Cover Letter API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::cover_letter::generator::{
    delete_cover_letter, generate_cover_letter, get_cover_letter, list_cover_letters,
    GenerateCoverLetterRequest, GenerateCoverLetterResponse,
};
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::profile::users::load_user;
use crate::state::AppState;

/// POST /api/v1/cover-letters
pub async fn handle_generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<GenerateCoverLetterRequest>,
) -> Result<Json<GenerateCoverLetterResponse>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    let response = generate_cover_letter(&state.db, &state.ai, &user, request).await?;
    Ok(Json(response))
}

/// GET /api/v1/cover-letters
pub async fn handle_list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(list_cover_letters(&state.db, &user).await?))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(get_cover_letter(&state.db, &user, id).await?))
}

/// DELETE /api/v1/cover-letters/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    delete_cover_letter(&state.db, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
