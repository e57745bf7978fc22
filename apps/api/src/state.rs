use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::AiProvider;
use crate::resilience::{FallbackPolicy, RetryPolicy};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub ai: AiServices,
    pub config: Config,
}

/// The AI providers plus the resilience policy every workflow applies to them.
#[derive(Clone)]
pub struct AiServices {
    /// Long-form writing: cover letters and resume rewrites.
    pub writer: Option<Arc<dyn AiProvider>>,
    /// Structured output: interview quizzes, improvement tips and industry insights.
    pub quiz: Option<Arc<dyn AiProvider>>,
    pub retry: RetryPolicy,
    pub fallback: FallbackPolicy,
}

impl AiServices {
    pub fn writer(&self) -> Result<&dyn AiProvider, AppError> {
        self.writer
            .as_deref()
            .ok_or(AppError::AiNotConfigured("OPENAI_API_KEY"))
    }

    pub fn quiz(&self) -> Result<&dyn AiProvider, AppError> {
        self.quiz
            .as_deref()
            .ok_or(AppError::AiNotConfigured("GEMINI_API_KEY"))
    }
}
