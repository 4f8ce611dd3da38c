//! In-memory key-value storage for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{KeyValueStorage, StorageError};

/// Map-backed [`KeyValueStorage`] whose reads and writes can be made to fail.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what a store persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    read_should_fail: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with one entry.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.insert(key, value);
        storage
    }

    /// Configure whether reads should fail.
    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether writes should fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Read an entry synchronously (for assertions).
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Write an entry synchronously (for test setup).
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStorage for InMemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(StorageError::Io("simulated read failure".to_string()));
        }
        Ok(self.get(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(StorageError::Io("simulated write failure".to_string()));
        }
        self.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.get_item("k").await.unwrap(), None);

        storage.set_item("k", "v").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));

        storage.set_item("k", "w").await.unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("w"));
    }

    #[tokio::test]
    async fn test_failures() {
        let storage = InMemoryStorage::with_item("k", "v");

        storage.set_read_should_fail(true);
        assert!(storage.get_item("k").await.is_err());

        storage.set_write_should_fail(true);
        assert!(storage.set_item("k", "w").await.is_err());
        assert_eq!(storage.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = InMemoryStorage::new();
        let handle = storage.clone();
        storage.insert("k", "v");
        assert_eq!(handle.get("k").as_deref(), Some("v"));
    }
}
