//! Outbound HTTP calls.
//!
//! # Data Flow
//! ```text
//! ApiService::new(config)        (no client yet)
//!     → open()                   → ApiSession (client built, timeout applied)
//!     → test_connection / fetch  → ApiResult
//!     → session dropped          → client released
//! ```
//!
//! Transport, status and decoding failures never escape as errors: they are
//! folded into an unsuccessful [`ApiResult`]. The only error surfaced to
//! callers is [`ApiError::NotInitialized`].

pub mod client;
pub mod types;

pub use client::{ApiService, ApiSession};
pub use types::{ApiError, ApiResult};
