//! Resilient invoker: retries transient AI failures with exponential backoff.
//!
//! Attempts run strictly one after another. The backoff sleep is the only
//! suspension point besides the call itself; nothing is shared between
//! invocations, so concurrent requests never see each other's counters.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::resilience::error::{is_retryable, CallError};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;

/// Per-invocation retry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_delay: Duration,
}

impl RetryPolicy {
    /// A zero delay is clamped to 1ms; the base delay must be positive.
    pub fn new(max_retries: u32, initial_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms.max(1)),
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Same base delay, one attempt. For best-effort calls nobody waits on.
    pub fn without_retries(&self) -> Self {
        Self {
            max_retries: 0,
            ..*self
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_INITIAL_DELAY_MS)
    }
}

/// Wait before the retry that follows failed attempt `attempt` (0-based):
/// `initial_delay * 2^attempt`, saturating instead of overflowing.
pub fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    policy.initial_delay.saturating_mul(factor)
}

/// Runs `call` until it succeeds, fails terminally, or exhausts
/// `policy.max_retries` retries. The last error is returned unchanged.
pub async fn invoke<T, F, Fut>(policy: &RetryPolicy, call: F) -> Result<T, CallError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CallError>>,
{
    invoke_with(policy, call, tokio::time::sleep).await
}

/// `invoke` with an injectable sleep, so callers can observe the exact waits.
pub(crate) async fn invoke_with<T, F, Fut, S, SFut>(
    policy: &RetryPolicy,
    mut call: F,
    mut sleep: S,
) -> Result<T, CallError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CallError>>,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut attempt: u32 = 0;

    loop {
        match call().await {
            Ok(value) => {
                if attempt > 0 {
                    info!("AI call succeeded after {attempt} retries");
                }
                return Ok(value);
            }
            Err(error) => {
                if !is_retryable(&error) || attempt == policy.max_retries {
                    return Err(error);
                }

                let delay = backoff_delay(policy, attempt);
                warn!(
                    "AI call failed ({error}); retry {}/{} after {}ms",
                    attempt + 1,
                    policy.max_retries,
                    delay.as_millis()
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
