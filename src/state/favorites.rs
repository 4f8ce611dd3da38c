//! Favorites store.
//!
//! A process-wide set of favorited pet ids, held as an immutable snapshot
//! inside a `watch` channel. Every mutation publishes a whole new snapshot,
//! so readers always observe a complete state. Nothing is persisted.

use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// An immutable view of the favorites set.
pub type FavoriteIds = Arc<BTreeSet<String>>;

/// Handle to the shared favorites set.
///
/// Clones share the same state; pass a clone to each consumer instead of
/// reaching for a global.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    tx: Arc<watch::Sender<FavoriteIds>>,
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FavoriteIds::default());
        Self { tx: Arc::new(tx) }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> FavoriteIds {
        self.tx.borrow().clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tx.borrow().contains(id)
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Receive a notification whenever the set changes.
    pub fn subscribe(&self) -> watch::Receiver<FavoriteIds> {
        self.tx.subscribe()
    }

    /// Mark `id` as favorite. No-op if already present.
    pub fn add(&self, id: &str) {
        self.update(|ids| ids.insert(id.to_string()));
    }

    /// Unmark `id`. No-op if absent.
    pub fn remove(&self, id: &str) {
        self.update(|ids| ids.remove(id));
    }

    /// Flip membership of `id` and return whether it is now a favorite.
    pub fn toggle(&self, id: &str) -> bool {
        let mut now_favorite = false;
        self.update(|ids| {
            now_favorite = if ids.remove(id) {
                false
            } else {
                ids.insert(id.to_string())
            };
            true
        });
        debug!(pet_id = id, favorite = now_favorite, "favorite toggled");
        now_favorite
    }

    /// Remove every favorite.
    pub fn clear(&self) {
        self.update(|ids| {
            let changed = !ids.is_empty();
            ids.clear();
            changed
        });
    }

    /// Apply `mutate` to a copy of the current set and publish it if
    /// `mutate` reports a change.
    fn update(&self, mutate: impl FnOnce(&mut BTreeSet<String>) -> bool) {
        self.tx.send_if_modified(|current| {
            let mut next = (**current).clone();
            if mutate(&mut next) {
                *current = Arc::new(next);
                true
            } else {
                false
            }
        });
    }
}
