//! Key-value storage trait abstraction.
//!
//! Models the device's durable string storage (one value per key). The theme
//! store persists its mode through this trait.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("IO error: {0}")]
    Io(String),
    /// The backing data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// No directory is available to hold the storage file
    #[error("Could not determine a data directory")]
    NoDataDirectory,
    /// Other error
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Trait for durable key-value storage.
///
/// # Example
///
/// ```ignore
/// use mypets::traits::KeyValueStorage;
///
/// async fn remember<S: KeyValueStorage>(storage: &S) -> Result<(), StorageError> {
///     storage.set_item("@my_pets_theme_mode", "dark").await?;
///     assert_eq!(storage.get_item("@my_pets_theme_mode").await?.as_deref(), Some("dark"));
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
