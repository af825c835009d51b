//! Scoped HTTP client for outbound calls.
//!
//! # Responsibilities
//! - Own the `reqwest` client for the lifetime of a session only
//! - Probe the configured endpoint with retries
//! - Fetch arbitrary JSON endpoints with a single attempt

use std::ops::Deref;
use std::time::Duration;

use serde_json::{Map, Value};
use url::Url;

use crate::api::types::{ApiError, ApiOutcome, ApiResult};
use crate::config::ApiConfig;
use crate::resilience::RetryPolicy;

/// Wrapper around an outbound HTTP client.
///
/// A fresh service holds no client; [`ApiService::open`] creates one and
/// hands out an [`ApiSession`] that releases it again when dropped.
#[derive(Debug)]
pub struct ApiService {
    config: ApiConfig,
    retry: RetryPolicy,
    client: Option<reqwest::Client>,
}

impl ApiService {
    pub fn new(config: ApiConfig, retry: RetryPolicy) -> Self {
        Self {
            config,
            retry,
            client: None,
        }
    }

    /// Build the client and start a session.
    pub fn open(&mut self) -> ApiOutcome<ApiSession<'_>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;
        self.client = Some(client);

        tracing::debug!(timeout_secs = self.config.timeout_secs, "API client opened");
        Ok(ApiSession { service: self })
    }

    /// Whether a session currently holds a client.
    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> ApiOutcome<&reqwest::Client> {
        self.client.as_ref().ok_or(ApiError::NotInitialized)
    }

    /// Probe the configured endpoint, retrying with backoff.
    ///
    /// Only [`ApiError::NotInitialized`] is returned as an error; exhausted
    /// retries produce an unsuccessful result.
    pub async fn test_connection(&self) -> ApiOutcome<ApiResult> {
        let client = self.client()?;
        let url = self.config.probe_url.as_str();

        match self.retry.execute(|| get_json(client, url)).await {
            Ok(payload) => Ok(ApiResult::ok("API connection successful", payload)),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "API connection failed");
                Ok(ApiResult::failed(format!("API connection failed: {}", e)))
            }
        }
    }

    /// Fetch a JSON object from `url` in a single attempt.
    pub async fn fetch(&self, url: &str) -> ApiOutcome<ApiResult> {
        let client = self.client()?;

        let outcome = match Url::parse(url) {
            Ok(parsed) => get_json(client, parsed.as_str()).await,
            Err(e) => Err(ApiError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        };

        match outcome {
            Ok(payload) => Ok(ApiResult::ok("Data fetched successfully", payload)),
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!(url = %url, error = %e, "Failed to fetch data");
                } else {
                    tracing::error!(url = %url, error = %e, "Failed to fetch data");
                }
                Ok(ApiResult::failed(format!("Failed to fetch data: {}", e)))
            }
        }
    }
}

/// GET `url` and decode the body as a JSON object. Non-2xx is an error.
async fn get_json(client: &reqwest::Client, url: &str) -> ApiOutcome<Map<String, Value>> {
    let response = client.get(url).send().await?.error_for_status()?;

    match response.json::<Value>().await? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// An open session on an [`ApiService`].
///
/// Dropping the session releases the client on every exit path.
#[derive(Debug)]
pub struct ApiSession<'a> {
    service: &'a mut ApiService,
}

impl Deref for ApiSession<'_> {
    type Target = ApiService;
    fn deref(&self) -> &Self::Target {
        self.service
    }
}

impl Drop for ApiSession<'_> {
    fn drop(&mut self) {
        self.service.client = None;
        tracing::debug!("API client released");
    }
}
