pub mod health;
pub mod status;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers as cover_letter;
use crate::insights::handlers as insights;
use crate::interview::handlers as interview;
use crate::profile::handlers as profile;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/auth/status", get(status::handle_auth_status))
        .route("/api/dev/status", get(status::handle_dev_status))
        .route(
            "/api/dev/fallback/:category",
            post(status::handle_fallback_preview),
        )
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_update_profile),
        )
        .route(
            "/api/v1/profile/onboarding",
            get(profile::handle_onboarding_status),
        )
        .route("/api/v1/insights", get(insights::handle_get_insights))
        // Resume
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume).put(resume::handle_save_resume),
        )
        .route("/api/v1/resume/improve", post(resume::handle_improve))
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            get(cover_letter::handle_list).post(cover_letter::handle_generate),
        )
        .route(
            "/api/v1/cover-letters/:id",
            get(cover_letter::handle_get).delete(cover_letter::handle_delete),
        )
        // Interview
        .route("/api/v1/interview/quiz", post(interview::handle_generate_quiz))
        .route(
            "/api/v1/interview/assessments",
            get(interview::handle_list_assessments).post(interview::handle_save_result),
        )
        .with_state(state)
}
