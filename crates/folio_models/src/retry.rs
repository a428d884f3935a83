//! Adaptive retry for transient provider failures.
//!
//! The first attempt runs unconditionally. If it fails with a retryable
//! error, the error itself picks the backoff profile (rate limits back off
//! longer than gateway hiccups) and the remaining attempts run under an
//! exponential strategy with jitter.

use folio_error::{ModelsError, ModelsResult, RetryableError};
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{info, warn};

/// Run `operation`, retrying transient failures up to `max_retries` times.
///
/// Permanent errors (bad credentials, malformed requests) fail immediately.
/// With `max_retries == 0` the first error is returned as-is.
pub async fn with_retry<T, F, Fut>(
    provider: &str,
    max_retries: usize,
    mut operation: F,
) -> ModelsResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ModelsResult<T>>,
{
    let (initial_ms, max_delay_secs) = match operation().await {
        Ok(value) => return Ok(value),
        Err(e) if max_retries == 0 || !e.is_retryable() => {
            warn!(provider, error = %e, "Model request failed permanently");
            return Err(e);
        }
        Err(e) => {
            let (initial_ms, max_delay_secs) = e.retry_strategy_params();
            info!(
                provider,
                error = %e,
                initial_backoff_ms = initial_ms,
                max_retries,
                max_delay_secs,
                "Model request failed, will retry with backoff"
            );
            (initial_ms, max_delay_secs)
        }
    };

    // Retry::spawn makes its own immediate attempt before consulting the strategy.
    let strategy = ExponentialBackoff::from_millis(initial_ms)
        .factor(2)
        .max_delay(Duration::from_secs(max_delay_secs))
        .map(jitter)
        .take(max_retries.saturating_sub(1));

    Retry::spawn(strategy, || {
        let attempt = operation();
        async move {
            attempt.await.map_err(|e: ModelsError| {
                if e.is_retryable() {
                    warn!(provider, error = %e, "Transient model error, retrying");
                    RetryError::Transient {
                        err: e,
                        retry_after: None,
                    }
                } else {
                    warn!(provider, error = %e, "Permanent model error, giving up");
                    RetryError::Permanent(e)
                }
            })
        }
    })
    .await
}
