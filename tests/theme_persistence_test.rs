//! Theme mode survives a restart through the file storage adapter.

use mypets::adapters::FileStorage;
use mypets::models::{ColorScheme, ThemeMode};
use mypets::state::{ThemeStore, THEME_STORAGE_KEY};
use mypets::traits::KeyValueStorage;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_mode_restored_by_new_store() {
    let temp_dir = TempDir::new().unwrap();

    let first = ThemeStore::load(Arc::new(FileStorage::in_dir(temp_dir.path())), None).await;
    assert_eq!(first.mode(), ThemeMode::System);
    first.set_mode(ThemeMode::Dark).unwrap().await.unwrap();

    let second = ThemeStore::load(
        Arc::new(FileStorage::in_dir(temp_dir.path())),
        Some(ColorScheme::Light),
    )
    .await;
    assert_eq!(second.mode(), ThemeMode::Dark);
    assert_eq!(second.resolved(), ColorScheme::Dark);
}

#[tokio::test]
async fn test_toggle_from_system_writes_explicit_mode() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::in_dir(temp_dir.path());

    let store = ThemeStore::load(Arc::new(storage.clone()), Some(ColorScheme::Dark)).await;
    store.toggle().unwrap().await.unwrap();

    assert_eq!(store.mode(), ThemeMode::Light);
    assert_eq!(
        storage.get_item(THEME_STORAGE_KEY).await.unwrap().as_deref(),
        Some("light")
    );
}

#[tokio::test]
async fn test_garbage_value_falls_back_to_system() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::in_dir(temp_dir.path());
    storage.set_item(THEME_STORAGE_KEY, "sepia").await.unwrap();

    let store = ThemeStore::load(Arc::new(storage), None).await;

    assert_eq!(store.mode(), ThemeMode::System);
    assert_eq!(store.resolved(), ColorScheme::Light);
}

#[tokio::test]
async fn test_unwritable_storage_keeps_in_memory_mode() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the storage file should be makes every write fail.
    let storage = FileStorage::in_dir(temp_dir.path());
    std::fs::create_dir_all(storage.path()).unwrap();

    let store = ThemeStore::load(Arc::new(storage), None).await;
    store.set_mode(ThemeMode::Dark).unwrap().await.unwrap();

    assert_eq!(store.mode(), ThemeMode::Dark);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_rapid_toggling_persists_last_mode() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::in_dir(temp_dir.path());
    let store = ThemeStore::load(Arc::new(storage.clone()), None).await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let mode = if i % 2 == 0 { ThemeMode::Dark } else { ThemeMode::Light };
        handles.push(store.set_mode(mode).unwrap());
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.mode(), ThemeMode::Light);
    assert_eq!(
        storage.get_item(THEME_STORAGE_KEY).await.unwrap().as_deref(),
        Some("light")
    );

    let restarted = ThemeStore::load(Arc::new(FileStorage::in_dir(temp_dir.path())), None).await;
    assert_eq!(restarted.mode(), ThemeMode::Light);
}
