//! Directory service.

use std::sync::Arc;

use dashmap::DashMap;

use crate::directory::types::{UserPatch, UserRecord};
use crate::observability::metrics;
use crate::util::ValidationError;

/// Thread-safe store of user records keyed by email.
///
/// Every mutation replaces a whole record under the map's entry lock, so
/// readers never observe a half-applied update.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    users: Arc<DashMap<String, UserRecord>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user. An existing record with the same email is replaced.
    pub fn create(&self, name: &str, email: &str) -> Result<UserRecord, ValidationError> {
        let record = UserRecord::new(name, email)?;
        let replaced = self.users.insert(record.email.clone(), record.clone());

        tracing::info!(
            email = %record.email,
            role = record.role.as_str(),
            replaced = replaced.is_some(),
            "User created"
        );
        metrics::record_directory_size(self.users.len());
        Ok(record)
    }

    pub fn get(&self, email: &str) -> Option<UserRecord> {
        self.users.get(email).map(|r| r.value().clone())
    }

    /// Apply `patch` to the user with `email`.
    ///
    /// Returns `Ok(None)` without touching the store when the email is
    /// unknown. A patch that fails validation leaves the record unchanged.
    pub fn update(
        &self,
        email: &str,
        patch: &UserPatch,
    ) -> Result<Option<UserRecord>, ValidationError> {
        let Some(mut slot) = self.users.get_mut(email) else {
            tracing::debug!(email = %email, "Update skipped, user not found");
            return Ok(None);
        };

        let updated = slot.patched(patch)?;
        *slot = updated.clone();

        tracing::info!(email = %email, role = updated.role.as_str(), "User updated");
        Ok(Some(updated))
    }

    /// All users, in no particular order.
    pub fn list(&self) -> Vec<UserRecord> {
        self.users.iter().map(|r| r.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::types::UserRole;

    fn sorted(mut users: Vec<UserRecord>) -> Vec<UserRecord> {
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }

    #[test]
    fn test_create_and_get() {
        let directory = Directory::new();
        directory.create("Jane Doe", "jane@example.com").unwrap();

        let user = directory.get("jane@example.com").unwrap();
        assert_eq!(user.name, "Jane Doe");
        assert!(directory.get("missing@example.com").is_none());
    }

    #[test]
    fn test_create_same_email_keeps_one_record() {
        let directory = Directory::new();
        directory.create("First", "dup@example.com").unwrap();
        let second = directory.create("Second", "dup@example.com").unwrap();

        assert_eq!(directory.len(), 1);
        let stored = directory.get("dup@example.com").unwrap();
        assert_eq!(stored, second);
        assert_eq!(stored.name, "Second");
    }

    #[test]
    fn test_create_invalid_leaves_store_empty() {
        let directory = Directory::new();
        assert!(directory.create("  ", "a@b.co").is_err());
        assert!(directory.create("Name", "a@").is_err());
        assert!(directory.is_empty());
    }

    #[test]
    fn test_update_miss_is_noop() {
        let directory = Directory::new();
        directory.create("Bob Smith", "bob@example.com").unwrap();
        let before = sorted(directory.list());

        let result = directory
            .update("missing@example.com", &UserPatch::name("New Name"))
            .unwrap();
        assert!(result.is_none());
        assert_eq!(sorted(directory.list()), before);
    }

    #[test]
    fn test_update_invalid_patch_keeps_record() {
        let directory = Directory::new();
        let original = directory.create("Bob Smith", "bob@example.com").unwrap();

        assert!(directory
            .update("bob@example.com", &UserPatch::name(""))
            .is_err());
        assert_eq!(directory.get("bob@example.com"), Some(original));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let directory = Directory::new();
        directory.create("Jane Doe", "jane@example.com").unwrap();

        let user = directory.get("jane@example.com").unwrap();
        assert!(user.is_active);
        assert_eq!(user.role, UserRole::User);

        let updated = directory
            .update("jane@example.com", &UserPatch::name("Jane R. Doe"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Jane R. Doe");
        assert_eq!(updated.email, "jane@example.com");
        assert_eq!(updated.role, UserRole::User);
        assert_eq!(directory.get("jane@example.com"), Some(updated));

        assert!(directory
            .update("missing@x.com", &UserPatch::name("Nobody"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_list() {
        let directory = Directory::new();
        directory.create("A", "a@example.com").unwrap();
        directory.create("B", "b@example.com").unwrap();
        let emails: Vec<_> = sorted(directory.list()).into_iter().map(|u| u.email).collect();
        assert_eq!(emails, vec!["a@example.com", "b@example.com"]);
    }
}
