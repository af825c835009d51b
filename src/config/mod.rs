//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → APP_NAME / APP_VERSION / DEBUG / PORT / HOST overrides (loader.rs)
//!     → validation.rs (semantic checks, all issues collected)
//!     → AppConfig (immutable, shared by the services built from it)
//! ```
//!
//! Every field has a default, so an empty file (or no file) is a valid config.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ApiConfig;
pub use schema::AppSection;
pub use schema::CacheConfig;
pub use schema::ObservabilityConfig;
pub use schema::RetryConfig;
pub use schema::ServerConfig;
