//! Health report types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

impl HealthStatus {
    /// `Degraded` if any dependency reported unhealthy.
    pub fn from_dependencies(results: &BTreeMap<String, bool>) -> Self {
        if results.values().all(|healthy| *healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        }
    }
}

/// Minimal liveness answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liveness {
    pub status: HealthStatus,
    /// ISO-8601 time of the answer.
    pub timestamp: String,
}

/// Point-in-time health of the process. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: f64,
    pub dependency_results: BTreeMap<String, bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_dependencies() {
        let mut results = BTreeMap::new();
        assert_eq!(HealthStatus::from_dependencies(&results), HealthStatus::Healthy);

        results.insert("memory".to_string(), true);
        assert_eq!(HealthStatus::from_dependencies(&results), HealthStatus::Healthy);

        results.insert("external_api".to_string(), false);
        assert_eq!(HealthStatus::from_dependencies(&results), HealthStatus::Degraded);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&HealthStatus::Healthy).unwrap(), "\"healthy\"");
        assert_eq!(serde_json::to_string(&HealthStatus::Degraded).unwrap(), "\"degraded\"");
    }
}
