mod auth;
mod config;
mod cover_letter;
mod db;
mod errors;
mod insights;
mod interview;
mod llm_client;
mod models;
mod profile;
mod resilience;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AiConfig, Config};
use crate::db::create_pool;
use crate::llm_client::{AiProvider, GeminiClient, OpenAiClient};
use crate::routes::build_router;
use crate::state::{AiServices, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize AI providers
    let ai = build_ai_services(&config.ai)?;
    info!(
        "AI resilience: max_retries={}, initial_delay={}ms, fallback={}",
        ai.retry.max_retries(),
        ai.retry.initial_delay().as_millis(),
        ai.fallback.as_str()
    );

    // Build app state
    let state = AppState {
        db,
        ai,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds a client for every provider that has a key. Missing keys leave the
/// slot empty; the matching workflows then answer `AI_NOT_CONFIGURED`.
fn build_ai_services(config: &AiConfig) -> Result<AiServices> {
    let writer: Option<Arc<dyn AiProvider>> = match &config.openai_api_key {
        Some(key) => {
            let client = OpenAiClient::new(
                key.clone(),
                config.openai_model.clone(),
                config.openai_base_url.clone(),
            )
            .context("Failed to build OpenAI HTTP client")?;
            info!("OpenAI client initialized (model: {})", config.openai_model);
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY not set; cover letters and resume rewrites disabled");
            None
        }
    };

    let quiz: Option<Arc<dyn AiProvider>> = match &config.gemini_api_key {
        Some(key) => {
            let client = GeminiClient::new(
                key.clone(),
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
            )
            .context("Failed to build Gemini HTTP client")?;
            info!("Gemini client initialized (model: {})", config.gemini_model);
            Some(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY not set; interview quizzes disabled, industry insights use placeholders");
            None
        }
    };

    Ok(AiServices {
        writer,
        quiz,
        retry: config.retry,
        fallback: config.fallback,
    })
}
