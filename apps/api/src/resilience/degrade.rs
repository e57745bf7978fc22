//! Glue between the invoker and the templates, driven by the caller's policy.

use std::future::Future;

use serde::Serialize;
use tracing::warn;

use crate::resilience::error::CallError;
use crate::resilience::policy::FallbackPolicy;
use crate::resilience::retry::{invoke, RetryPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Ai,
    Template,
}

/// Content plus where it came from. Only logs and API responses look at `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated<T> {
    pub value: T,
    pub source: ContentSource,
}

/// Invokes `call` under `retry`. When the final error is one `policy` admits,
/// `template` supplies the content instead; a `None` template means there is
/// nothing to degrade to and the error is returned as is.
pub async fn invoke_or_template<T, F, Fut, G>(
    retry: &RetryPolicy,
    policy: FallbackPolicy,
    call: F,
    template: G,
) -> Result<Generated<T>, CallError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CallError>>,
    G: FnOnce() -> Option<T>,
{
    match invoke(retry, call).await {
        Ok(value) => Ok(Generated {
            value,
            source: ContentSource::Ai,
        }),
        Err(error) if policy.permits(&error) => match template() {
            Some(value) => {
                warn!("AI call failed ({error}); serving template content");
                Ok(Generated {
                    value,
                    source: ContentSource::Template,
                })
            }
            None => Err(error),
        },
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_success_is_marked_ai() {
        let result = invoke_or_template(
            &RetryPolicy::new(0, 1),
            FallbackPolicy::QuotaOnly,
            || ready(Ok("real".to_string())),
            || Some("template".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(result.value, "real");
        assert_eq!(result.source, ContentSource::Ai);
    }

    #[tokio::test]
    async fn test_quota_error_serves_template_without_retrying() {
        let attempts = AtomicU32::new(0);
        let result = invoke_or_template(
            &RetryPolicy::new(3, 1),
            FallbackPolicy::QuotaOnly,
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                ready(Err::<String, _>(CallError::QuotaExceeded))
            },
            || Some("template".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(result.value, "template");
        assert_eq!(result.source, ContentSource::Template);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unadmitted_error_propagates() {
        let err = invoke_or_template(
            &RetryPolicy::new(0, 1),
            FallbackPolicy::QuotaOnly,
            || ready(Err::<String, _>(CallError::ServerError)),
            || Some("template".to_string()),
        )
        .await
        .unwrap_err();
        assert_eq!(err, CallError::ServerError);
    }

    #[tokio::test]
    async fn test_missing_template_returns_original_error() {
        let err = invoke_or_template(
            &RetryPolicy::new(0, 1),
            FallbackPolicy::Always,
            || ready(Err::<String, _>(CallError::QuotaExceeded)),
            || None,
        )
        .await
        .unwrap_err();
        assert_eq!(err, CallError::QuotaExceeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_policy_degrades_after_retries_run_out() {
        let attempts = AtomicU32::new(0);
        let result = invoke_or_template(
            &RetryPolicy::new(2, 1000),
            FallbackPolicy::RateLimitOrQuota,
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                ready(Err::<String, _>(CallError::RateLimited))
            },
            || Some("template".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(result.source, ContentSource::Template);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
