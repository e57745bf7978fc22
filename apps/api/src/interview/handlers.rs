//! Axum route handlers for the Interview API.

use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interview::quiz::{
    generate_quiz, list_assessments, save_quiz_result, QuizResponse, SaveQuizRequest,
};
use crate::models::assessment::AssessmentRow;
use crate::profile::users::load_user;
use crate::state::AppState;

/// POST /api/v1/interview/quiz
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<QuizResponse>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(generate_quiz(&state.ai, &user).await?))
}

/// POST /api/v1/interview/assessments
///
/// Scores the submitted answers and stores the assessment.
pub async fn handle_save_result(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<SaveQuizRequest>,
) -> Result<Json<AssessmentRow>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(
        save_quiz_result(&state.db, &state.ai, &user, request).await?,
    ))
}

/// GET /api/v1/interview/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(list_assessments(&state.db, &user).await?))
}
