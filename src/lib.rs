//! Widget showcase backend library.

// Core services
pub mod api;
pub mod cache;
pub mod directory;
pub mod health;

// Demo content
pub mod data;
pub mod forms;

// Presentation
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod util;

pub use config::AppConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
