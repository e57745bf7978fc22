//! Diagnostics: who the API thinks the caller is, and what is configured.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::resilience::fallback::FallbackResult;
use crate::resilience::{generate_named, FallbackContext};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevStatusResponse {
    pub env: EnvFlags,
    pub db: DbStatus,
    pub fallback_policy: &'static str,
    pub max_retries: u32,
}

/// Presence flags only; values are never echoed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFlags {
    pub openai_api_key: bool,
    pub gemini_api_key: bool,
    pub dev_user_id: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbStatus {
    pub ok: bool,
    pub message: Option<String>,
}

/// GET /api/auth/status
pub async fn handle_auth_status(auth: Option<AuthUser>) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        authenticated: auth.is_some(),
        user_id: auth.map(|a| a.external_id),
    })
}

/// GET /api/dev/status
pub async fn handle_dev_status(State(state): State<AppState>) -> Json<DevStatusResponse> {
    let db = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => DbStatus {
            ok: true,
            message: None,
        },
        Err(e) => DbStatus {
            ok: false,
            message: Some(e.to_string()),
        },
    };

    Json(DevStatusResponse {
        env: EnvFlags {
            openai_api_key: state.config.ai.openai_api_key.is_some(),
            gemini_api_key: state.config.ai.gemini_api_key.is_some(),
            dev_user_id: state.config.dev_user_id.is_some(),
        },
        db,
        fallback_policy: state.ai.fallback.as_str(),
        max_retries: state.ai.retry.max_retries(),
    })
}

/// POST /api/dev/fallback/:category
///
/// Renders the template a workflow would serve for `category` with the given context.
pub async fn handle_fallback_preview(
    Path(category): Path<String>,
    Json(context): Json<FallbackContext>,
) -> Result<Json<FallbackResult>, AppError> {
    generate_named(&category, &context)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No template for category '{category}'")))
}
