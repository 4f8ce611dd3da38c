//! Process-wide state containers.
//!
//! Both stores are cheap cloneable handles. Create one of each at startup and
//! hand clones to whatever needs them.

pub mod favorites;
pub mod theme;

pub use favorites::{FavoriteIds, FavoritesStore};
pub use theme::{resolve, Palette, ThemeState, ThemeStore, THEME_STORAGE_KEY};
