/// LLM Client: the provider boundary for every generative-AI call.
///
/// ARCHITECTURAL RULE: workflows never talk to a provider API directly. They
/// hold an `Arc<dyn AiProvider>` and wrap each call in `resilience::invoke`.
/// Providers do not retry on their own; one `generate` is one HTTP request.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::resilience::CallError;

pub mod gemini;
pub mod openai;
pub mod prompts;
#[cfg(test)]
pub(crate) mod testing;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// One text-generation request, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: Option<&'a str>,
    pub prompt: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Short provider label for logs.
    fn name(&self) -> &'static str;

    /// Returns the generated text, or a classified failure.
    async fn generate(&self, request: &CompletionRequest<'_>) -> Result<String, CallError>;
}

pub(crate) fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().timeout(HTTP_TIMEOUT).build()
}

pub(crate) fn transport_error(e: reqwest::Error) -> CallError {
    CallError::Transport(e.to_string())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
