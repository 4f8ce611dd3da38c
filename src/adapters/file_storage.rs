//! File-backed key-value storage adapter.
//!
//! All keys live in a single JSON object file, by default
//! `~/.mypets/storage.json`. The file is re-read on every access so that
//! several processes see each other's writes. Writes go to a temporary file
//! that is then renamed over the real one, so readers never observe a
//! partially written file.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::traits::{KeyValueStorage, StorageError};

/// The storage directory name under the home directory.
const STORAGE_DIR: &str = ".mypets";

/// The storage file name.
const STORAGE_FILE: &str = "storage.json";

/// Distinguishes temporary files of concurrent writers in this process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// JSON-file implementation of [`KeyValueStorage`].
///
/// Clones share a write lock, so read-modify-write cycles through the same
/// handle never lose each other's updates.
///
/// # Example
///
/// ```ignore
/// use mypets::adapters::FileStorage;
/// use mypets::traits::KeyValueStorage;
///
/// let storage = FileStorage::new()?;
/// storage.set_item("@my_pets_theme_mode", "dark").await?;
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStorage {
    /// Create storage in the default location under the home directory.
    pub fn new() -> Result<Self, StorageError> {
        let home = dirs::home_dir().ok_or(StorageError::NoDataDirectory)?;
        Ok(Self::in_dir(home.join(STORAGE_DIR)))
    }

    /// Create storage whose file lives in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_FILE),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(entries)?;

        let temp_path = self.path.with_extension(format!(
            "{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let written = async {
            let mut file = tokio::fs::File::create(&temp_path).await?;
            file.write_all(json.as_bytes()).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&temp_path, &self.path).await
        }
        .await;

        if let Err(err) = written {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(err.into());
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.read_all().await?;
        Ok(entries.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(temp_dir.path());
        assert_eq!(storage.get_item("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(temp_dir.path().join("nested").join("dir"));

        storage.set_item("key", "value").await.unwrap();

        assert!(storage.path().exists());
        assert_eq!(storage.get_item("key").await.unwrap().as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(temp_dir.path());

        storage.set_item("a", "1").await.unwrap();
        storage.set_item("b", "2").await.unwrap();
        storage.set_item("a", "3").await.unwrap();

        assert_eq!(storage.get_item("a").await.unwrap().as_deref(), Some("3"));
        assert_eq!(storage.get_item("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_keep_every_key() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(temp_dir.path());

        let mut handles = Vec::new();
        for i in 0..16 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage.set_item(&format!("key{}", i), "v").await.unwrap();
                // Readers racing the writers never see a partial file.
                storage.get_item("key0").await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..16 {
            assert_eq!(
                storage.get_item(&format!("key{}", i)).await.unwrap().as_deref(),
                Some("v")
            );
        }
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(temp_dir.path());

        storage.set_item("a", "1").await.unwrap();
        storage.set_item("a", "2").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from(STORAGE_FILE)]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(temp_dir.path());
        std::fs::write(storage.path(), "not json").unwrap();

        let result = storage.get_item("a").await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
