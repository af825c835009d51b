//! Outbound call types and error definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while calling an external endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An operation was invoked without an open session.
    #[error("Client not initialized")]
    NotInitialized,

    /// Connection, TLS or timeout failure.
    #[error("Request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The body was not a JSON object.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The target URL could not be parsed.
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// Whether retrying the same call might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Request(_) | ApiError::Status(_) | ApiError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ApiError::Status(status.as_u16()),
            None if e.is_decode() => ApiError::Decode(e.to_string()),
            None => ApiError::Request(e.to_string()),
        }
    }
}

/// Result type for outbound operations.
pub type ApiOutcome<T> = Result<T, ApiError>;

/// Outcome of a single outbound operation, created fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
    pub timestamp: DateTime<Utc>,
}

impl ApiResult {
    pub fn ok(message: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload),
            timestamp: Utc::now(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
            timestamp: Utc::now(),
        }
    }
}
