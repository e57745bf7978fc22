use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::profile::users::{
    is_onboarded, load_user, update_profile, UpdateProfileRequest, UpdateProfileResponse,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatusResponse {
    pub is_onboarded: bool,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserRow>, AppError> {
    Ok(Json(load_user(&state.db, &auth.external_id).await?))
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    let response = update_profile(&state.db, &state.ai, &user, request).await?;
    Ok(Json(response))
}

/// GET /api/v1/profile/onboarding
pub async fn handle_onboarding_status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<OnboardingStatusResponse>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(OnboardingStatusResponse {
        is_onboarded: is_onboarded(&user),
    }))
}
