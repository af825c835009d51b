//! Email and password form.

use serde::{Deserialize, Serialize};

use crate::util::{validate_email, validate_password, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

impl CredentialsForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !validate_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        validate_password(&self.password, self.confirm_password.as_deref())
    }
}
