//! Exponential backoff.

use std::time::Duration;

/// Delay to wait after the failed attempt `attempt` (0-indexed).
///
/// Pure exponential: `base * 2^attempt`, saturating instead of overflowing.
pub fn calculate_backoff(attempt: u32, base: Duration) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}
