//! Cover letter generation.
//!
//! Flow: load profile → build prompt → writer model (retried) → template on an
//! admitted failure → persist verbatim. Templated letters are stored exactly
//! like generated ones.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cover_letter::prompts::{
    build_cover_letter_prompt, COVER_LETTER_MAX_TOKENS, COVER_LETTER_TEMPERATURE,
};
use crate::errors::AppError;
use crate::llm_client::prompts::COVER_LETTER_SYSTEM;
use crate::llm_client::{AiProvider, CompletionRequest};
use crate::models::cover_letter::CoverLetterRow;
use crate::models::user::UserRow;
use crate::profile::users::fallback_context;
use crate::resilience::{
    generate, invoke_or_template, CallError, ContentSource, FallbackCategory, FallbackPolicy,
    Generated, RetryPolicy,
};
use crate::state::AiServices;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCoverLetterRequest {
    pub job_title: String,
    pub company_name: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCoverLetterResponse {
    pub cover_letter: CoverLetterRow,
    pub source: ContentSource,
}

/// Produces the letter text, degrading to the template when `fallback` admits the failure.
pub async fn write_cover_letter(
    provider: &dyn AiProvider,
    retry: &RetryPolicy,
    fallback: FallbackPolicy,
    user: &UserRow,
    request: &GenerateCoverLetterRequest,
) -> Result<Generated<String>, CallError> {
    let prompt = build_cover_letter_prompt(
        user,
        &request.job_title,
        &request.company_name,
        &request.job_description,
    );
    let completion = CompletionRequest {
        system: Some(COVER_LETTER_SYSTEM),
        prompt: &prompt,
        temperature: COVER_LETTER_TEMPERATURE,
        max_tokens: COVER_LETTER_MAX_TOKENS,
    };

    invoke_or_template(
        retry,
        fallback,
        || provider.generate(&completion),
        || {
            let mut context = fallback_context(user);
            context.job_title = Some(request.job_title.clone());
            context.company_name = Some(request.company_name.clone());
            generate(FallbackCategory::CoverLetter, &context).into_text()
        },
    )
    .await
}

pub async fn generate_cover_letter(
    pool: &PgPool,
    ai: &AiServices,
    user: &UserRow,
    request: GenerateCoverLetterRequest,
) -> Result<GenerateCoverLetterResponse, AppError> {
    if request.job_title.trim().is_empty() || request.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "jobTitle and companyName are required".to_string(),
        ));
    }

    let provider = ai.writer()?;
    info!(
        "Generating cover letter for user {} via {}",
        user.id,
        provider.name()
    );

    let letter = write_cover_letter(provider, &ai.retry, ai.fallback, user, &request).await?;
    info!("Cover letter content ready (source: {:?})", letter.source);

    let cover_letter = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters
            (id, user_id, content, job_description, company_name, job_title, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'completed')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&letter.value)
    .bind(&request.job_description)
    .bind(&request.company_name)
    .bind(&request.job_title)
    .fetch_one(pool)
    .await?;

    Ok(GenerateCoverLetterResponse {
        cover_letter,
        source: letter.source,
    })
}

/// Newest first.
pub async fn list_cover_letters(
    pool: &PgPool,
    user: &UserRow,
) -> Result<Vec<CoverLetterRow>, AppError> {
    let letters = sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(pool)
    .await?;
    Ok(letters)
}

pub async fn get_cover_letter(
    pool: &PgPool,
    user: &UserRow,
    id: Uuid,
) -> Result<CoverLetterRow, AppError> {
    sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user.id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))
}

pub async fn delete_cover_letter(pool: &PgPool, user: &UserRow, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Cover letter {id} not found")));
    }
    info!("Deleted cover letter {id} for user {}", user.id);
    Ok(())
}
