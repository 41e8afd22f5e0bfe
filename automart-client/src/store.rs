//! Persisted credential and cached user record.

use std::sync::Arc;

use shared::models::UserRecord;
use tracing::warn;

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key of the serialized [`UserRecord`].
pub const USER_KEY: &str = "currentUser";

/// Owns the credential and the cached user on top of a [`KeyValueStorage`].
///
/// Reads never fail: unreadable or corrupt entries are logged and reported
/// as absent.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    /// A store over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// The underlying storage backend.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    /// Overwrite the stored token. No expiry is tracked.
    ///
    /// # Errors
    /// Returns an error when the storage backend cannot be written.
    pub fn set_credential(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token)
    }

    /// The stored token, if any.
    #[must_use]
    pub fn credential(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    /// Forget the token.
    ///
    /// # Errors
    /// Returns an error when the storage backend cannot be written.
    pub fn clear_credential(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)
    }

    /// Replace the cached profile.
    ///
    /// # Errors
    /// Returns an error when the record cannot be serialized or stored.
    pub fn cache_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(user)?;
        self.storage.set(USER_KEY, &serialized)
    }

    /// The cached profile; unreadable records count as absent.
    #[must_use]
    pub fn cached_user(&self) -> Option<UserRecord> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "cached user record is unreadable; treating as signed out");
                None
            }
        }
    }

    /// Forget the cached profile.
    ///
    /// # Errors
    /// Returns an error when the storage backend cannot be written.
    pub fn clear_user(&self) -> Result<(), StorageError> {
        self.storage.remove(USER_KEY)
    }

    /// Remove both keys, attempting the second even if the first fails.
    ///
    /// # Errors
    /// Returns the first storage error encountered.
    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.clear_credential();
        let user = self.clear_user();
        token.and(user)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "failed to read session storage");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use shared::models::{RecordId, UserRole};

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    fn sample_user() -> UserRecord {
        UserRecord {
            id: RecordId::Text("5f1c".into()),
            first_name: "Chidi".into(),
            last_name: "Eze".into(),
            email: "chidi@example.com".into(),
            role: UserRole::Admin,
        }
    }

    #[test]
    fn credential_lifecycle() {
        let store = store();
        assert_eq!(store.credential(), None);

        store.set_credential("first").unwrap();
        store.set_credential("second").unwrap();
        assert_eq!(store.credential().as_deref(), Some("second"));

        store.clear_credential().unwrap();
        store.clear_credential().unwrap();
        assert_eq!(store.credential(), None);
    }

    #[test]
    fn cached_user_roundtrip_is_lossless() {
        let store = store();
        let user = sample_user();
        store.cache_user(&user).unwrap();
        assert_eq!(store.cached_user(), Some(user));
    }

    #[test]
    fn corrupt_user_fails_closed() {
        let store = store();
        store.storage().set(USER_KEY, "{\"id\": ").unwrap();
        assert_eq!(store.cached_user(), None);
    }

    #[test]
    fn clear_removes_both_keys() {
        let store = store();
        store.set_credential("token").unwrap();
        store.cache_user(&sample_user()).unwrap();

        store.clear().unwrap();
        assert_eq!(store.storage().get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.storage().get(USER_KEY).unwrap(), None);
    }
}
