//! Theme store.
//!
//! Holds the user's theme preference together with the last OS-reported
//! colour scheme and derives the scheme actually applied. The preference is
//! persisted through a [`KeyValueStorage`]; writes happen in the background
//! and their failures are logged only. Writes are serialized and each one
//! stores the mode current at the time it runs, so the last mode set is the
//! one that ends up in storage.

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::models::{ColorScheme, ThemeMode};
use crate::traits::KeyValueStorage;

/// Storage key holding the theme mode string.
pub const THEME_STORAGE_KEY: &str = "@my_pets_theme_mode";

/// The resolved scheme for a preference and an OS signal.
///
/// An unknown OS scheme counts as light.
pub fn resolve(mode: ThemeMode, system: Option<ColorScheme>) -> ColorScheme {
    mode.explicit().unwrap_or_else(|| system.unwrap_or_default())
}

/// Snapshot published to subscribers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub mode: ThemeMode,
    /// Last OS-reported scheme, `None` when the OS does not say
    pub system: Option<ColorScheme>,
}

impl ThemeState {
    pub fn resolved(&self) -> ColorScheme {
        resolve(self.mode, self.system)
    }
}

/// Colours used by the screens for one scheme, as `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: &'static str,
    pub background: &'static str,
    pub tint: &'static str,
    pub icon: &'static str,
    pub tab_icon_default: &'static str,
    pub tab_icon_selected: &'static str,
    pub primary: &'static str,
    pub text_gray: &'static str,
    pub background_light: &'static str,
    pub card_background: &'static str,
    pub border_light: &'static str,
}

const PRIMARY: &str = "#007AFF";
const WHITE: &str = "#FFFFFF";
const TEXT_DARK: &str = "#11181C";
const TEXT_GRAY: &str = "#687076";
const TEXT_LIGHT: &str = "#ECEDEE";
const BACKGROUND_LIGHT: &str = "#E6F4FE";
const CARD_BACKGROUND: &str = "#F8F9FE";
const BORDER_LIGHT: &str = "#E5E5E5";
const BACKGROUND_DARK: &str = "#151718";
const ICON_GRAY: &str = "#9BA1A6";

pub const LIGHT_PALETTE: Palette = Palette {
    text: TEXT_DARK,
    background: WHITE,
    tint: PRIMARY,
    icon: TEXT_GRAY,
    tab_icon_default: TEXT_GRAY,
    tab_icon_selected: PRIMARY,
    primary: PRIMARY,
    text_gray: TEXT_GRAY,
    background_light: BACKGROUND_LIGHT,
    card_background: CARD_BACKGROUND,
    border_light: BORDER_LIGHT,
};

pub const DARK_PALETTE: Palette = Palette {
    text: TEXT_LIGHT,
    background: BACKGROUND_DARK,
    tint: WHITE,
    icon: ICON_GRAY,
    tab_icon_default: ICON_GRAY,
    tab_icon_selected: WHITE,
    primary: PRIMARY,
    text_gray: ICON_GRAY,
    background_light: BACKGROUND_DARK,
    card_background: CARD_BACKGROUND,
    border_light: BORDER_LIGHT,
};

impl Palette {
    pub fn for_scheme(scheme: ColorScheme) -> &'static Palette {
        match scheme {
            ColorScheme::Light => &LIGHT_PALETTE,
            ColorScheme::Dark => &DARK_PALETTE,
        }
    }
}

/// Handle to the shared theme state.
#[derive(Clone)]
pub struct ThemeStore {
    tx: Arc<watch::Sender<ThemeState>>,
    storage: Arc<dyn KeyValueStorage>,
    /// Mode last written to storage, locked for the duration of each write
    persisted: Arc<Mutex<Option<ThemeMode>>>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("state", &*self.tx.borrow())
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Create a store in `System` mode without reading storage.
    pub fn new(storage: Arc<dyn KeyValueStorage>, system: Option<ColorScheme>) -> Self {
        let (tx, _rx) = watch::channel(ThemeState {
            mode: ThemeMode::System,
            system,
        });
        Self {
            tx: Arc::new(tx),
            storage,
            persisted: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a store and restore the saved mode.
    ///
    /// A missing or unrecognised value, or a failed read, leaves the mode at
    /// `System`.
    pub async fn load(storage: Arc<dyn KeyValueStorage>, system: Option<ColorScheme>) -> Self {
        let store = Self::new(storage, system);

        match store.storage.get_item(THEME_STORAGE_KEY).await {
            Ok(Some(saved)) => match saved.parse::<ThemeMode>() {
                Ok(mode) => {
                    debug!(%mode, "restored theme mode");
                    store.tx.send_replace(ThemeState { mode, system });
                    *store.persisted.lock().await = Some(mode);
                }
                Err(e) => warn!("Ignoring saved theme: {}", e),
            },
            Ok(None) => debug!("no saved theme mode"),
            Err(e) => error!("Error loading theme: {}", e),
        }

        store
    }

    pub fn state(&self) -> ThemeState {
        *self.tx.borrow()
    }

    pub fn mode(&self) -> ThemeMode {
        self.tx.borrow().mode
    }

    pub fn system_scheme(&self) -> Option<ColorScheme> {
        self.tx.borrow().system
    }

    /// The scheme to apply right now.
    pub fn resolved(&self) -> ColorScheme {
        self.tx.borrow().resolved()
    }

    /// Colours for the resolved scheme.
    pub fn palette(&self) -> &'static Palette {
        Palette::for_scheme(self.resolved())
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeState> {
        self.tx.subscribe()
    }

    /// Record a change in the OS colour scheme.
    pub fn set_system_scheme(&self, system: Option<ColorScheme>) {
        self.tx.send_if_modified(|state| {
            let changed = state.system != system;
            state.system = system;
            changed
        });
    }

    /// Switch to `mode` and persist it in the background.
    ///
    /// The new mode is visible to every reader as soon as this returns. The
    /// returned handle completes once the write has been attempted; dropping
    /// it does not cancel the write. Outside a tokio runtime nothing is
    /// written and `None` is returned.
    pub fn set_mode(&self, mode: ThemeMode) -> Option<JoinHandle<()>> {
        self.tx.send_if_modified(|state| {
            let changed = state.mode != mode;
            state.mode = mode;
            changed
        });
        debug!(%mode, "theme mode set");

        let Ok(handle) = Handle::try_current() else {
            error!(%mode, "Error saving theme: no tokio runtime");
            return None;
        };

        let tx = Arc::clone(&self.tx);
        let storage = Arc::clone(&self.storage);
        let persisted = Arc::clone(&self.persisted);
        Some(handle.spawn(async move {
            let mut persisted = persisted.lock().await;
            // A later set_mode may have run while this task waited.
            let current = tx.borrow().mode;
            if *persisted == Some(current) {
                return;
            }
            match storage.set_item(THEME_STORAGE_KEY, current.as_str()).await {
                Ok(()) => *persisted = Some(current),
                Err(e) => error!("Error saving theme: {}", e),
            }
        }))
    }

    /// Flip between light and dark.
    ///
    /// From `System`, the new explicit mode is the opposite of what the OS
    /// currently shows (unknown counts as light).
    pub fn toggle(&self) -> Option<JoinHandle<()>> {
        let state = self.state();
        let next = match state.mode {
            ThemeMode::System => state.system.unwrap_or_default().opposite().into(),
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
        self.set_mode(next)
    }
}
