//! Metrics collection and exposition.
//!
//! # Metrics
//! - `showcase_cache_lookups_total` (counter): cache reads by outcome (hit, miss, expired)
//! - `showcase_cache_entries` (gauge): entries currently stored
//! - `showcase_directory_users` (gauge): records in the user directory
//! - `showcase_retry_attempts_total` (counter): failed attempts that were retried
//! - `showcase_retry_exhausted_total` (counter): operations that ran out of attempts
//! - `showcase_dependency_health` (gauge): 1=healthy, 0=unhealthy, per dependency
//! - `showcase_http_requests_total` (counter): handled requests by endpoint and status
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_cache_lookup(outcome: &'static str) {
    counter!("showcase_cache_lookups_total", "outcome" => outcome).increment(1);
}

pub fn record_cache_size(size: usize) {
    gauge!("showcase_cache_entries").set(size as f64);
}

pub fn record_directory_size(size: usize) {
    gauge!("showcase_directory_users").set(size as f64);
}

pub fn record_retry_attempt() {
    counter!("showcase_retry_attempts_total").increment(1);
}

pub fn record_retry_exhausted() {
    counter!("showcase_retry_exhausted_total").increment(1);
}

pub fn record_dependency_health(name: &str, healthy: bool) {
    gauge!("showcase_dependency_health", "dependency" => name.to_string())
        .set(if healthy { 1.0 } else { 0.0 });
}

pub fn record_request(endpoint: String, status: u16) {
    counter!(
        "showcase_http_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}
