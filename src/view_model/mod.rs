//! Screen view-models.
//!
//! Each view-model owns a load state machine, publishes it through a `watch`
//! channel for the render path, and pulls data from the [`PetClient`](crate::api::PetClient).

pub mod add_pet;
pub mod format;
pub mod pet_detail;
pub mod pet_list;

pub use add_pet::{AddPetForm, AddPetViewModel, VALIDATION_MESSAGE};
pub use format::PetDetails;
pub use pet_detail::PetDetailViewModel;
pub use pet_list::{PetFilter, PetListItem, PetListViewModel};

/// Load state shared by the list and detail screens.
///
/// `Idle -> Loading -> Ready | Failed`; a reload goes back to `Loading`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// Human-readable message, never empty
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "failed",
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for LoadState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => LoadState::Ready(data),
            Err(e) => {
                let message = e.to_string();
                if message.is_empty() {
                    LoadState::Failed("Something went wrong".to_string())
                } else {
                    LoadState::Failed(message)
                }
            }
        }
    }
}
