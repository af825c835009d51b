//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! liveness()            → {status, timestamp}          (pure read)
//! snapshot()            → uptime since construction    (always healthy)
//! check_dependencies()  → own ApiService session → test_connection
//!                         + fixed placeholders (memory, disk)
//! report()              → snapshot + dependencies, degraded on any failure
//! ```

pub mod monitor;
pub mod state;

pub use monitor::HealthService;
pub use state::{HealthSnapshot, HealthStatus, Liveness};
