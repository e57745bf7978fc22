//! Resume storage and AI-assisted section rewrites.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::RESUME_WRITER_SYSTEM;
use crate::llm_client::{AiProvider, CompletionRequest};
use crate::models::resume::ResumeRow;
use crate::models::user::UserRow;
use crate::profile::users::fallback_context;
use crate::resilience::{
    generate, invoke_or_template, CallError, ContentSource, FallbackCategory, FallbackPolicy,
    Generated, RetryPolicy,
};
use crate::resume::prompts::{build_improve_prompt, IMPROVE_MAX_TOKENS, IMPROVE_TEMPERATURE};
use crate::state::AiServices;

/// Longest section text accepted for a rewrite.
const MAX_SECTION_CHARS: usize = 4000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    pub current: String,
    /// Section kind, e.g. "experience", "summary", "project".
    #[serde(rename = "type")]
    pub section: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveResponse {
    pub improved: String,
    pub source: ContentSource,
}

/// One resume per user; saving replaces the content.
pub async fn save_resume(
    pool: &PgPool,
    user: &UserRow,
    request: SaveResumeRequest,
) -> Result<ResumeRow, AppError> {
    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, content)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE SET content = EXCLUDED.content, updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&request.content)
    .fetch_one(pool)
    .await?;

    info!("Saved resume {} for user {}", resume.id, user.id);
    Ok(resume)
}

pub async fn get_resume(pool: &PgPool, user: &UserRow) -> Result<Option<ResumeRow>, AppError> {
    let resume = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(pool)
        .await?;
    Ok(resume)
}

/// Rewrites one resume section, degrading to the achievement template when admitted.
pub async fn rewrite_section(
    provider: &dyn AiProvider,
    retry: &RetryPolicy,
    fallback: FallbackPolicy,
    user: &UserRow,
    request: &ImproveRequest,
) -> Result<Generated<String>, CallError> {
    let industry = user.industry.as_deref().unwrap_or("technology");
    let prompt = build_improve_prompt(&request.section, industry, &request.current);
    let completion = CompletionRequest {
        system: Some(RESUME_WRITER_SYSTEM),
        prompt: &prompt,
        temperature: IMPROVE_TEMPERATURE,
        max_tokens: IMPROVE_MAX_TOKENS,
    };

    invoke_or_template(
        retry,
        fallback,
        || provider.generate(&completion),
        || generate(FallbackCategory::ResumeImprovement, &fallback_context(user)).into_text(),
    )
    .await
}

pub async fn improve_section(
    ai: &AiServices,
    user: &UserRow,
    request: ImproveRequest,
) -> Result<ImproveResponse, AppError> {
    if request.current.trim().is_empty() {
        return Err(AppError::Validation("current cannot be empty".to_string()));
    }
    if request.current.chars().count() > MAX_SECTION_CHARS {
        return Err(AppError::Validation(format!(
            "current must be at most {MAX_SECTION_CHARS} characters"
        )));
    }

    let provider = ai.writer()?;
    info!(
        "Improving {} section for user {} via {}",
        request.section,
        user.id,
        provider.name()
    );

    let improved = rewrite_section(provider, &ai.retry, ai.fallback, user, &request).await?;

    Ok(ImproveResponse {
        improved: improved.value,
        source: improved.source,
    })
}
