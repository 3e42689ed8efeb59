//! Retry and timeout primitives shared by middleware and the router.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use scout_types::{RetryConfig, ScoutError};

/// The exponential delay before retry number `retry` (1-based), without
/// jitter: `min(base * 2^(retry - 1), max)`.
#[must_use]
pub fn backoff_delay_base(cfg: &RetryConfig, retry: u32) -> Duration {
    let exp = retry.saturating_sub(1).min(31);
    let delay = cfg.base_delay.saturating_mul(1u32 << exp);
    delay.min(cfg.max_delay)
}

/// The delay before retry number `retry` (1-based), with up to
/// `jitter_percent` of the base added on top so concurrent callers do not
/// retry in lockstep. Jitter only ever extends the delay; the exponential
/// base is the floor.
#[must_use]
pub fn backoff_delay(cfg: &RetryConfig, retry: u32) -> Duration {
    let base = backoff_delay_base(cfg, retry);
    if cfg.jitter_percent == 0 {
        return base;
    }
    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let spread = base_ms * u64::from(cfg.jitter_percent) / 100;
    if spread == 0 {
        return base;
    }
    let jittered = rand::rng().random_range(base_ms..=base_ms.saturating_add(spread));
    Duration::from_millis(jittered)
}

/// Run `op`, retrying on retryable errors up to `cfg.max_retries` times with
/// exponential backoff.
///
/// When the failure is [`ScoutError::RateLimited`] and the provider suggested
/// a longer wait than the computed backoff, the suggestion wins.
///
/// # Errors
/// Returns the last error once retries are exhausted, or immediately for
/// non-retryable errors.
pub async fn with_retry<T, F, Fut>(cfg: &RetryConfig, mut op: F) -> Result<T, ScoutError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScoutError>>,
{
    let mut retry = 0u32;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if retry < cfg.max_retries && e.is_retryable() => {
                retry += 1;
                let mut delay = backoff_delay(cfg, retry);
                if let ScoutError::RateLimited { retry_after_ms } = &e {
                    delay = delay.max(Duration::from_millis(*retry_after_ms));
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "scout::resilience",
                    retry,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Bound `fut` by `limit`, converting elapsed deadlines into
/// [`ScoutError::Timeout`] carrying the given label.
///
/// # Errors
/// Returns [`ScoutError::Timeout`] on deadline, otherwise the future's own
/// result.
pub async fn with_timeout<T, Fut>(
    label: &str,
    limit: Duration,
    fut: Fut,
) -> Result<T, ScoutError>
where
    Fut: Future<Output = Result<T, ScoutError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res,
        Err(_) => Err(ScoutError::timeout(
            label,
            u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}
