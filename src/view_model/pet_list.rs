//! Home screen: the pet list.
//!
//! Loads are tagged with a generation number like the detail screen, so a
//! slow earlier load can never overwrite the result of a later retry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use super::LoadState;
use crate::api::PetClient;
use crate::models::Pet;
use crate::state::FavoritesStore;
use crate::traits::HttpClient;

/// One row of the list.
#[derive(Debug, Clone, PartialEq)]
pub struct PetListItem {
    pub pet: Pet,
    pub is_favorite: bool,
    /// Subtitle, e.g. "Your Dog"
    pub type_label: String,
}

/// Search box and filter chips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    /// Case-insensitive substring of the name; blank matches everything
    pub query: String,
    /// Exact type, compared case-insensitively; `None` matches everything
    pub kind: Option<String>,
    pub favorites_only: bool,
}

impl PetFilter {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }

    fn matches(&self, item: &PetListItem) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !item.pet.name.to_lowercase().contains(&query) {
            return false;
        }
        if let Some(kind) = &self.kind {
            if !item.pet.kind.eq_ignore_ascii_case(kind.trim()) {
                return false;
            }
        }
        !self.favorites_only || item.is_favorite
    }
}

/// Loads the collection and derives per-row favorite flags.
pub struct PetListViewModel<C: HttpClient> {
    client: Arc<PetClient<C>>,
    favorites: FavoritesStore,
    state: watch::Sender<LoadState<Vec<Pet>>>,
    generation: AtomicU64,
}

impl<C: HttpClient> PetListViewModel<C> {
    pub fn new(client: Arc<PetClient<C>>, favorites: FavoritesStore) -> Self {
        let (state, _rx) = watch::channel(LoadState::Idle);
        Self {
            client,
            favorites,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> LoadState<Vec<Pet>> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<Vec<Pet>>> {
        self.state.subscribe()
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Fetch the collection. Ends in exactly one of `Ready` or `Failed`.
    ///
    /// Returns `false` if the result was discarded because a newer load
    /// started while this one was in flight.
    pub async fn load(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(LoadState::Loading);
        debug!(generation, "pet list loading");

        let next = LoadState::from(self.client.list_pets().await);
        let label = next.label();

        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        });

        if applied {
            debug!(generation, state = label, "pet list settled");
        } else {
            debug!(generation, "discarding stale pet list response");
        }
        applied
    }

    /// Manual reload after a failure or pull-to-refresh.
    pub async fn retry(&self) -> bool {
        self.load().await
    }

    /// Rows for the current data, empty unless `Ready`.
    pub fn items(&self) -> Vec<PetListItem> {
        let favorites = self.favorites.snapshot();
        let state = self.state.borrow();
        state
            .data()
            .map(|pets| {
                pets.iter()
                    .map(|pet| PetListItem {
                        is_favorite: favorites.contains(&pet.id),
                        type_label: format!("Your {}", pet.kind),
                        pet: pet.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rows that pass `filter`.
    pub fn filtered_items(&self, filter: &PetFilter) -> Vec<PetListItem> {
        self.items()
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect()
    }

    /// Distinct types in first-seen order, for the filter chips.
    pub fn kinds(&self) -> Vec<String> {
        let state = self.state.borrow();
        let mut kinds: Vec<String> = Vec::new();
        for pet in state.data().into_iter().flatten() {
            if !kinds.iter().any(|k| k.eq_ignore_ascii_case(&pet.kind)) {
                kinds.push(pet.kind.clone());
            }
        }
        kinds
    }

    /// Flip a pet's favorite flag; returns the new value.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        self.favorites.toggle(id)
    }
}
