//! Health aggregation.
//!
//! # Responsibilities
//! - Track uptime from a start instant captured once
//! - Probe the external API through its own scoped client
//! - Fold probe results into a status

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::api::ApiService;
use crate::config::ApiConfig;
use crate::health::state::{HealthSnapshot, HealthStatus, Liveness};
use crate::observability::metrics;
use crate::resilience::RetryPolicy;
use crate::util::iso_timestamp;

pub const EXTERNAL_API: &str = "external_api";
pub const MEMORY: &str = "memory";
pub const DISK: &str = "disk";

/// Computes uptime and dependency health on demand.
#[derive(Debug, Clone)]
pub struct HealthService {
    started: Instant,
    started_at: DateTime<Utc>,
    version: String,
    api: ApiConfig,
    retry: RetryPolicy,
}

impl HealthService {
    pub fn new(version: impl Into<String>, api: ApiConfig, retry: RetryPolicy) -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
            version: version.into(),
            api,
            retry,
        }
    }

    /// Wall-clock time the service was constructed.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn liveness(&self) -> Liveness {
        Liveness {
            status: HealthStatus::Healthy,
            timestamp: iso_timestamp(),
        }
    }

    /// Uptime-only snapshot. Always reports `healthy`.
    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            status: HealthStatus::Healthy,
            timestamp: Utc::now(),
            version: self.version.clone(),
            uptime_seconds: self.uptime_seconds(),
            dependency_results: BTreeMap::new(),
        }
    }

    /// Probe every dependency. Failures become `false`, never errors.
    pub async fn check_dependencies(&self) -> BTreeMap<String, bool> {
        let mut checks = BTreeMap::new();

        checks.insert(EXTERNAL_API.to_string(), self.probe_external_api().await);
        checks.insert(MEMORY.to_string(), true);
        checks.insert(DISK.to_string(), true);

        for (name, healthy) in &checks {
            metrics::record_dependency_health(name, *healthy);
        }
        checks
    }

    /// Snapshot including dependency results; `degraded` if any failed.
    pub async fn report(&self) -> HealthSnapshot {
        let dependency_results = self.check_dependencies().await;
        let status = HealthStatus::from_dependencies(&dependency_results);
        if status == HealthStatus::Degraded {
            tracing::warn!(dependencies = ?dependency_results, "Health degraded");
        }

        HealthSnapshot {
            status,
            dependency_results,
            ..self.snapshot()
        }
    }

    async fn probe_external_api(&self) -> bool {
        let mut service = ApiService::new(self.api.clone(), self.retry);
        let session = match service.open() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Could not open API client for dependency check");
                return false;
            }
        };

        match session.test_connection().await {
            Ok(result) => result.success,
            Err(e) => {
                tracing::warn!(error = %e, "Dependency check failed");
                false
            }
        }
    }
}
