//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ConfigValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for environment variable {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ConfigValidationError>),
}

fn join_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the TOML file at `path` (if any), then
/// process environment overrides. The result is validated.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML document into a configuration, without validation.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply the `APP_NAME`, `APP_VERSION`, `DEBUG`, `PORT` and `HOST` overrides.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = lookup("APP_NAME") {
        config.app.name = name;
    }
    if let Some(version) = lookup("APP_VERSION") {
        config.app.version = version;
    }
    if let Some(host) = lookup("HOST") {
        config.app.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.app.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: "PORT", value: port.clone() })?;
    }
    if let Some(debug) = lookup("DEBUG") {
        config.app.debug = parse_bool(&debug).ok_or(ConfigError::Env {
            var: "DEBUG",
            value: debug.clone(),
        })?;
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("PORT", "8000"),
            ("HOST", "127.0.0.1"),
            ("DEBUG", "true"),
            ("APP_NAME", "Test App"),
            ("APP_VERSION", "1.0.0-test"),
        ]);
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.app.name, "Test App");
        assert_eq!(config.app.version, "1.0.0-test");
        assert_eq!(config.app.host, "127.0.0.1");
        assert_eq!(config.app.port, 8000);
        assert!(config.app.debug);
    }

    #[test]
    fn test_bad_port_rejected() {
        let vars = env(&[("PORT", "eighty")]);
        let mut config = AppConfig::default();
        let err = apply_env_overrides(&mut config, |k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "PORT", .. }));
    }

    #[test]
    fn test_bad_debug_rejected() {
        let vars = env(&[("DEBUG", "maybe")]);
        let mut config = AppConfig::default();
        assert!(apply_env_overrides(&mut config, |k| vars.get(k).cloned()).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("showcase-config-{}.toml", std::process::id()));
        fs::write(
            &path,
            "[app]\nname = \"From File\"\n\n[cache]\ndefault_ttl_secs = 60\n",
        )
        .unwrap();

        let config = parse_config(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config.app.name, "From File");
        assert_eq!(config.cache.default_ttl_secs, 60);

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_config("[app\nname ="),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ConfigValidationError {
                field: "app.name",
                message: "must not be empty".into(),
            },
            ConfigValidationError {
                field: "api.timeout_secs",
                message: "must be greater than 0".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: app.name: must not be empty, api.timeout_secs: must be greater than 0"
        );
    }
}
