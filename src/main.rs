//! Widget showcase backend.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http (router, request ID, trace, timeout)
//!                         │
//!                         ▼
//!              ┌────────────────────────────────────────────┐
//!              │ directory │ cache │ api │ health │ forms   │
//!              └────────────────────────────────────────────┘
//!                         │
//!              resilience (retry with backoff) ─▶ external HTTP API
//!
//!     Cross-cutting: config, observability, lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;

use showcase::config::load_config;
use showcase::lifecycle::startup;
use showcase::observability::logging;

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Widget showcase backend", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "SHOWCASE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    logging::init_logging(&config.observability, config.app.debug);

    tracing::info!(
        name = %config.app.name,
        version = %config.app.version,
        debug = config.app.debug,
        bind_address = %config.bind_address(),
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
