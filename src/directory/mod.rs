//! In-memory user directory keyed by email.

pub mod service;
pub mod types;

pub use service::Directory;
pub use types::{UserPatch, UserRecord, UserRole};
