//! Application configuration.
//!
//! Defaults point at the public pets collection and `~/.mypets`; each value
//! can be overridden from the environment or with the builder methods.

use std::path::PathBuf;

use crate::api::PETS_API_URL;

/// Environment variable overriding the pets collection URL.
pub const ENV_API_URL: &str = "MYPETS_API_URL";

/// Environment variable overriding the local data directory.
pub const ENV_DATA_DIR: &str = "MYPETS_DATA_DIR";

/// Environment variable holding the tracing filter directive.
pub const ENV_LOG: &str = "MYPETS_LOG";

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime configuration.
///
/// # Example
///
/// ```ignore
/// use mypets::config::AppConfig;
///
/// let config = AppConfig::from_env().with_api_url("http://localhost:3000/pets");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Pets collection URL
    pub api_url: String,
    /// Directory for local storage; `None` means `~/.mypets`
    pub data_dir: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: PETS_API_URL.to_string(),
            data_dir: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Defaults overridden by any non-empty `MYPETS_*` variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_empty_var(ENV_API_URL) {
            config = config.with_api_url(url);
        }
        if let Some(dir) = non_empty_var(ENV_DATA_DIR) {
            config = config.with_data_dir(dir);
        }
        if let Some(filter) = non_empty_var(ENV_LOG) {
            config = config.with_log_filter(filter);
        }
        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.api_url, PETS_API_URL);
        assert_eq!(config.data_dir, None);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::new()
            .with_api_url("http://localhost:3000/pets")
            .with_data_dir("/tmp/mypets")
            .with_log_filter("mypets=debug");

        assert_eq!(config.api_url, "http://localhost:3000/pets");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/mypets")));
        assert_eq!(config.log_filter, "mypets=debug");
    }
}
