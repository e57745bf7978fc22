use anyhow::{Context, Result};

use crate::resilience::{FallbackPolicy, RetryPolicy};
use crate::resilience::retry::{DEFAULT_INITIAL_DELAY_MS, DEFAULT_MAX_RETRIES};

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Identity used when a request carries no `x-user-id` header. Local development only.
    pub dev_user_id: Option<String>,
    pub ai: AiConfig,
}

/// Provider credentials and the resilience knobs handed to every workflow.
/// Keys are optional: a workflow whose provider has no key reports it as not configured.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub retry: RetryPolicy,
    pub fallback: FallbackPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            dev_user_id: optional_env("DEV_USER_ID"),
            ai: AiConfig::from_env()?,
        })
    }
}

impl AiConfig {
    fn from_env() -> Result<Self> {
        let max_retries = match optional_env("AI_MAX_RETRIES") {
            Some(v) => v
                .parse::<u32>()
                .context("AI_MAX_RETRIES must be a non-negative integer")?,
            None => DEFAULT_MAX_RETRIES,
        };

        let initial_delay_ms = match optional_env("AI_INITIAL_DELAY_MS") {
            Some(v) => {
                let ms = v
                    .parse::<u64>()
                    .context("AI_INITIAL_DELAY_MS must be a positive integer")?;
                anyhow::ensure!(ms > 0, "AI_INITIAL_DELAY_MS must be a positive integer");
                ms
            }
            None => DEFAULT_INITIAL_DELAY_MS,
        };

        let fallback = match optional_env("AI_FALLBACK_POLICY") {
            Some(v) => v.parse::<FallbackPolicy>().map_err(anyhow::Error::msg)?,
            None => FallbackPolicy::default(),
        };

        Ok(AiConfig {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_model: optional_env("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: optional_env("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            retry: RetryPolicy::new(max_retries, initial_delay_ms),
            fallback,
        })
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            fallback: FallbackPolicy::default(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are the same thing.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
