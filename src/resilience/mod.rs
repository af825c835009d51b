//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound call:
//!     → retries.rs (run the operation, wait between failed attempts)
//!     → backoff.rs (delay * 2^attempt, no jitter)
//!     → last error returned to the caller on exhaustion
//! ```
//!
//! The per-attempt deadline is the HTTP client's own timeout; nothing bounds
//! the retry sequence as a whole.

pub mod backoff;
pub mod retries;

pub use backoff::calculate_backoff;
pub use retries::{retry_with_backoff, RetryPolicy};
