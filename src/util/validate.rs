//! Field validation rules shared by the directory and the form models.

use serde_json::Value;
use thiserror::Error;

/// Maximum length of a display name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Malformed input. Returned synchronously and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty (after trimming).
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// The email address is not of the form `local@domain.tld`.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// The password is shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// The confirmation field does not equal the password.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Any other field-level rule.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Empty { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Invalid { field, .. } => field,
            ValidationError::InvalidEmail(_) => "email",
            ValidationError::PasswordTooShort { .. } => "password",
            ValidationError::PasswordMismatch => "confirm_password",
        }
    }
}

/// Basic email check: a non-empty local part, an `@`, and a non-empty
/// domain containing a `.`.
pub fn validate_email(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && domain.contains('.'),
        None => false,
    }
}

/// [`validate_email`] for untyped input; anything but a string is invalid.
pub fn validate_email_value(value: &Value) -> bool {
    value.as_str().map(validate_email).unwrap_or(false)
}

/// Trim a display name and check it is non-empty and within bounds.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "name" });
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Check password length and, when a confirmation is given, exact equality.
pub fn validate_password(password: &str, confirm: Option<&str>) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    match confirm {
        Some(confirm) if confirm != password => Err(ValidationError::PasswordMismatch),
        _ => Ok(()),
    }
}
