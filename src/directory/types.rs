//! User directory types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{validate_email, validate_name, ValidationError};

/// Role assigned to a directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
            UserRole::Guest => "guest",
        }
    }
}

/// A user profile. The email is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl UserRecord {
    /// Build a new active record with the default role.
    ///
    /// The name is stored trimmed.
    pub fn new(name: &str, email: &str) -> Result<Self, ValidationError> {
        let record = Self {
            email: email.to_string(),
            name: name.to_string(),
            role: UserRole::default(),
            created_at: Utc::now(),
            is_active: true,
        };
        record.validated()
    }

    /// Check every field, returning the normalized record.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.name = validate_name(&self.name)?;
        if !validate_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email));
        }
        Ok(self)
    }

    /// Apply `patch` to a copy of this record and re-validate the result.
    pub fn patched(&self, patch: &UserPatch) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(role) = patch.role {
            next.role = role;
        }
        if let Some(is_active) = patch.is_active {
            next.is_active = is_active;
        }
        next.validated()
    }
}

/// Fields that may be changed on an existing record.
///
/// Unknown fields are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none() && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let user = UserRecord::new("  John Doe  ", "john@example.com").unwrap();
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.role, UserRole::User);
        assert!(user.is_active);
    }

    #[test]
    fn test_new_record_rejects_bad_input() {
        assert_eq!(
            UserRecord::new("", "john@example.com"),
            Err(ValidationError::Empty { field: "name" })
        );
        assert_eq!(
            UserRecord::new("John", "john.example.com"),
            Err(ValidationError::InvalidEmail("john.example.com".into()))
        );
    }

    #[test]
    fn test_patch_keeps_unlisted_fields() {
        let user = UserRecord::new("Bob Smith", "bob@example.com").unwrap();
        let patch = UserPatch {
            role: Some(UserRole::Admin),
            ..UserPatch::default()
        };
        let next = user.patched(&patch).unwrap();
        assert_eq!(next.role, UserRole::Admin);
        assert_eq!(next.name, "Bob Smith");
        assert_eq!(next.created_at, user.created_at);
    }

    #[test]
    fn test_patch_revalidates() {
        let user = UserRecord::new("Bob Smith", "bob@example.com").unwrap();
        assert!(user.patched(&UserPatch::name("   ")).is_err());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&UserRole::Guest).unwrap(), "\"guest\"");
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
        assert_eq!(role.as_str(), "admin");
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let result: Result<UserPatch, _> = serde_json::from_str(r#"{"email": "x@y.z"}"#);
        assert!(result.is_err());
        let patch: UserPatch = serde_json::from_str(r#"{"is_active": false}"#).unwrap();
        assert_eq!(patch.is_active, Some(false));
        assert!(!patch.is_empty());
    }
}
