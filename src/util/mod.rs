//! Shared helpers for input handling.
//!
//! # Responsibilities
//! - Validate user-supplied fields (email, name, password)
//! - Sanitize free text before it is echoed back
//! - Format timestamps for display and for the wire

pub mod sanitize;
pub mod time;
pub mod validate;

pub use sanitize::{safe_get, sanitize_input, sanitize_value, DEFAULT_MAX_INPUT_LENGTH};
pub use time::{format_timestamp, iso_timestamp};
pub use validate::{
    validate_email, validate_email_value, validate_name, validate_password, ValidationError,
};
