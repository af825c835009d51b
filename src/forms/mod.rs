//! Form models submitted by the front end.
//!
//! Each model checks itself with `validate()`; the HTTP layer maps a
//! failure to 422.

pub mod credentials;
pub mod settings;
pub mod upload;

pub use credentials::CredentialsForm;
pub use settings::{AppSettings, ALLOWED_THEMES};
pub use upload::{FileUpload, MAX_UPLOAD_BYTES};
