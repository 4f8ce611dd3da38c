//! Pet profile screen.
//!
//! Every [`load`](PetDetailViewModel::load) tags its request with a
//! generation number. When the response arrives it is applied only if no
//! newer load has started since, so switching pets while a fetch is in
//! flight can never show the previous pet's profile.

use chrono::{Local, NaiveDate};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use super::{LoadState, PetDetails};
use crate::api::PetClient;
use crate::traits::HttpClient;

/// Source of "today" for age computation.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

pub struct PetDetailViewModel<C: HttpClient> {
    client: Arc<PetClient<C>>,
    state: watch::Sender<LoadState<PetDetails>>,
    generation: AtomicU64,
    today: Clock,
}

impl<C: HttpClient> PetDetailViewModel<C> {
    /// Create a view-model that computes ages against the local date.
    pub fn new(client: Arc<PetClient<C>>) -> Self {
        Self::with_clock(client, Arc::new(|| Local::now().date_naive()))
    }

    /// Create a view-model with a fixed or injected notion of today.
    pub fn with_clock(client: Arc<PetClient<C>>, today: Clock) -> Self {
        let (state, _rx) = watch::channel(LoadState::Idle);
        Self {
            client,
            state,
            generation: AtomicU64::new(0),
            today,
        }
    }

    pub fn state(&self) -> LoadState<PetDetails> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<PetDetails>> {
        self.state.subscribe()
    }

    /// Fetch `id` and derive its display fields.
    ///
    /// Always hits the network; nothing is cached between ids. Returns
    /// `false` if the result was discarded because a newer load started.
    pub async fn load(&self, id: &str) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(LoadState::Loading);
        debug!(pet_id = id, generation, "pet detail loading");

        let result = self.client.get_pet(id).await;
        let today = (self.today)();
        let next = LoadState::from(result.map(|pet| PetDetails::from_pet(&pet, today)));

        // Check and publish under the channel's lock so a newer load cannot
        // slip in between.
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        });

        if applied {
            debug!(pet_id = id, generation, "pet detail settled");
        } else {
            debug!(pet_id = id, generation, "discarding stale pet detail response");
        }
        applied
    }

    /// Reload the same id.
    pub async fn retry(&self, id: &str) -> bool {
        self.load(id).await
    }
}
