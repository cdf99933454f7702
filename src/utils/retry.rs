// Retry with deterministic exponential backoff

use backoff::{backoff::Backoff, ExponentialBackoff};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Policy for the backoff retry executor.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Must be at least 1;
    /// with 1 the executor degrades to a single unconditional attempt.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each attempt after.
    pub initial_delay: Duration,
    /// Growth factor applied per failed attempt.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            multiplier: 2.0,
        }
    }
}

/// Build the backoff schedule for a policy. Randomization is disabled so the
/// delay sequence is exactly `initial`, `initial * 2`, `initial * 4`, ...
fn create_backoff(policy: &RetryPolicy) -> ExponentialBackoff {
    ExponentialBackoff {
        current_interval: policy.initial_delay,
        initial_interval: policy.initial_delay,
        randomization_factor: 0.0,
        multiplier: policy.multiplier,
        max_interval: Duration::from_secs(60),
        max_elapsed_time: None,
        ..Default::default()
    }
}

/// Run `operation` up to `policy.max_attempts` times.
///
/// After a failed attempt that is not the last, sleeps for the next backoff
/// interval and tries again. The final failure is returned to the caller
/// unchanged; this function never inspects or rewrites the error itself.
/// `is_retryable` lets the caller short-circuit failures that another
/// attempt cannot fix (configuration mistakes, malformed response shapes).
pub async fn with_backoff<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    is_retryable: P,
    mut operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut backoff = create_backoff(policy);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(error) => {
                if attempt >= policy.max_attempts.max(1) || !is_retryable(&error) {
                    return Err(error);
                }
                let delay = backoff
                    .next_backoff()
                    .unwrap_or(Duration::from_secs(60));
                debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying after backoff");
                tokio::time::sleep(delay).await;
            }
        }
    }
}
