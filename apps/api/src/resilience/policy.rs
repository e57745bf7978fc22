//! Fallback policy: decides which terminal AI failures may be answered with a
//! template instead of an error.

use std::str::FromStr;

use crate::resilience::error::CallError;

/// Which terminal AI failures a workflow may answer with template content.
///
/// Anything the policy does not admit is surfaced to the user as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Only quota exhaustion degrades to a template.
    #[default]
    QuotaOnly,
    /// Quota exhaustion, or a rate limit that outlasted every retry.
    RateLimitOrQuota,
    /// Every failure except cancellation, malformed responses included.
    Always,
}

impl FallbackPolicy {
    pub fn permits(&self, error: &CallError) -> bool {
        match self {
            FallbackPolicy::QuotaOnly => matches!(error, CallError::QuotaExceeded),
            FallbackPolicy::RateLimitOrQuota => {
                matches!(error, CallError::QuotaExceeded | CallError::RateLimited)
            }
            FallbackPolicy::Always => !matches!(error, CallError::Cancelled),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackPolicy::QuotaOnly => "quota",
            FallbackPolicy::RateLimitOrQuota => "rate-limit",
            FallbackPolicy::Always => "always",
        }
    }
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quota" => Ok(FallbackPolicy::QuotaOnly),
            "rate-limit" | "rate_limit" => Ok(FallbackPolicy::RateLimitOrQuota),
            "always" => Ok(FallbackPolicy::Always),
            other => Err(format!(
                "unknown fallback policy '{other}' (expected quota, rate-limit or always)"
            )),
        }
    }
}
