use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::insights::generator::get_insights;
use crate::models::user::IndustryInsightRow;
use crate::profile::users::load_user;
use crate::state::AppState;

/// GET /api/v1/insights
pub async fn handle_get_insights(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<IndustryInsightRow>, AppError> {
    let user = load_user(&state.db, &auth.external_id).await?;
    Ok(Json(get_insights(&state.db, &state.ai, &user).await?))
}
