//! Startup orchestration.
//!
//! Subsystems come up in order: metrics, services, background tasks, and
//! the listener last so traffic only arrives once everything is ready.

use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Run the service until a shutdown signal arrives.
pub async fn run(config: AppConfig) -> Result<(), std::io::Error> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.bind_address();
    let state = AppState::from_config(config);
    tracing::info!(started_at = %state.health.started_at(), "Services initialized");
    let shutdown = Shutdown::new();

    spawn_background_tasks(&state, &shutdown);

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    signals::spawn_signal_handler(shutdown.clone());

    HttpServer::new(state).run(listener, shutdown.subscribe()).await
}

/// Start the tasks that live for the whole process.
pub fn spawn_background_tasks(state: &AppState, shutdown: &Shutdown) {
    let sweep_secs = state.config.cache.sweep_interval_secs;
    if sweep_secs > 0 {
        let cache = state.cache.clone();
        let rx = shutdown.subscribe();
        tokio::spawn(cache.run_sweeper(Duration::from_secs(sweep_secs), rx));
    } else {
        tracing::debug!("Cache sweeper disabled, expiry is lazy");
    }
}
