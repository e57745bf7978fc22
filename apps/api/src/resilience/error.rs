//! Failure taxonomy for remote AI calls.
//!
//! Providers report failures as an HTTP status plus an optional provider code.
//! `CallError::from_response` folds those loose fields into a closed set so that
//! retryability and fallback eligibility are total matches, not field probing.

use thiserror::Error;

/// Provider codes that mean the account has run out of quota.
/// A quota error is terminal even when the provider reports it as a 429.
const QUOTA_CODES: &[&str] = &["insufficient_quota", "quota_exceeded"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("AI provider rate limited the request (429)")]
    RateLimited,

    #[error("AI provider internal error (500)")]
    ServerError,

    #[error("AI provider unavailable (503)")]
    ServiceUnavailable,

    #[error("AI provider quota exhausted")]
    QuotaExceeded,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("AI call cancelled")]
    Cancelled,

    #[error("AI provider error (status {status:?}, code {code:?}): {message}")]
    Other {
        status: Option<u16>,
        code: Option<String>,
        message: String,
    },
}

impl CallError {
    /// Classifies a failed provider response.
    ///
    /// Quota codes win over the status; then 429/500/503 map to the transient
    /// variants and everything else lands in `Other`.
    pub fn from_response(status: u16, code: Option<&str>, message: impl Into<String>) -> Self {
        if code.is_some_and(|c| QUOTA_CODES.contains(&c)) {
            return CallError::QuotaExceeded;
        }

        match status {
            429 => CallError::RateLimited,
            500 => CallError::ServerError,
            503 => CallError::ServiceUnavailable,
            _ => CallError::Other {
                status: Some(status),
                code: code.map(str::to_string),
                message: message.into(),
            },
        }
    }

    /// The HTTP-like status this error corresponds to, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CallError::RateLimited | CallError::QuotaExceeded => Some(429),
            CallError::ServerError => Some(500),
            CallError::ServiceUnavailable => Some(503),
            CallError::Other { status, .. } => *status,
            CallError::Transport(_) | CallError::MalformedResponse(_) | CallError::Cancelled => {
                None
            }
        }
    }
}

/// True for transient failures worth another attempt: 429, 500 and 503.
///
/// Quota exhaustion, cancellation and every other failure are terminal.
pub fn is_retryable(error: &CallError) -> bool {
    match error {
        CallError::RateLimited | CallError::ServerError | CallError::ServiceUnavailable => true,
        CallError::QuotaExceeded
        | CallError::Transport(_)
        | CallError::MalformedResponse(_)
        | CallError::Cancelled
        | CallError::Other { .. } => false,
    }
}
