//! Retry logic.
//!
//! # Responsibilities
//! - Run an async operation up to a fixed number of attempts
//! - Sleep with exponential backoff between failed attempts
//! - Report intermediate failures, surface only the last one
//!
//! Sleeping goes through `tokio::time`, so a retry sequence only suspends the
//! task that owns it.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::observability::metrics;
use crate::resilience::backoff::calculate_backoff;

/// Execute `operation` up to `max_retries` times.
///
/// Between attempt `i` and `i + 1` (0-indexed) the task sleeps
/// `delay * 2^i`. The first `Ok` is returned immediately. When every attempt
/// fails the error of the last attempt is returned as-is. A `max_retries`
/// of zero still runs the operation once.
pub async fn retry_with_backoff<F, Fut, T, E>(
    mut operation: F,
    max_retries: u32,
    delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = max_retries.max(1);
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::debug!(attempts = attempt + 1, "Operation succeeded after retries");
                }
                return Ok(value);
            }
            Err(e) if attempt + 1 >= max_attempts => {
                tracing::error!(
                    attempts = max_attempts,
                    error = %e,
                    "Operation failed after all attempts"
                );
                metrics::record_retry_exhausted();
                return Err(e);
            }
            Err(e) => {
                let wait = calculate_backoff(attempt, delay);
                tracing::warn!(
                    attempt = attempt + 1,
                    delay = ?wait,
                    error = %e,
                    "Attempt failed, retrying"
                );
                metrics::record_retry_attempt();
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
        }
    }
}

/// Attempt count and initial delay, usually read from [`RetryConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Run `operation` under this policy.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        retry_with_backoff(operation, self.max_attempts, self.base_delay).await
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.base_delay_ms))
    }
}
