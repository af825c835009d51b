//! User-facing application settings (theme picker and friends).

use serde::{Deserialize, Serialize};

use crate::util::ValidationError;

pub const ALLOWED_THEMES: [&str; 5] = ["blue", "green", "purple", "orange", "red"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme: String,
    pub notifications_enabled: bool,
    pub language: String,
    pub timezone: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: "blue".to_string(),
            notifications_enabled: true,
            language: "en".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !ALLOWED_THEMES.contains(&self.theme.as_str()) {
            return Err(ValidationError::Invalid {
                field: "theme",
                reason: format!("must be one of {}", ALLOWED_THEMES.join(", ")),
            });
        }
        Ok(())
    }
}
