//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and formats. All
//! problems are reported at once rather than stopping at the first.

use std::fmt;

use crate::config::schema::AppConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Dotted path of the offending field, e.g. `api.probe_url`.
    pub field: &'static str,
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, returning every issue found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    if config.app.name.trim().is_empty() {
        errors.push(ConfigValidationError::new("app.name", "must not be empty"));
    }
    if config.app.host.trim().is_empty() {
        errors.push(ConfigValidationError::new("app.host", "must not be empty"));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ConfigValidationError::new(
            "server.request_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.cache.default_ttl_secs == 0 {
        errors.push(ConfigValidationError::new(
            "cache.default_ttl_secs",
            "must be greater than 0",
        ));
    }
    if let Err(e) = url::Url::parse(&config.api.probe_url) {
        errors.push(ConfigValidationError::new(
            "api.probe_url",
            format!("invalid URL: {}", e),
        ));
    }
    if config.api.timeout_secs == 0 {
        errors.push(ConfigValidationError::new(
            "api.timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.retries.max_attempts == 0 {
        errors.push(ConfigValidationError::new(
            "retries.max_attempts",
            "must be at least 1",
        ));
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ConfigValidationError::new(
            "observability.metrics_address",
            "must be a socket address",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
