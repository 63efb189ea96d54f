//! Store configuration.
//!
//! Construction-time settings for the cache store: where the persisted blob
//! lives, whether persistence is on, and which backend (if any) to talk to.
//! `StoreOptions` is the all-optional runtime mirror applied by
//! `CacheStore::set_options`.

use serde::{Deserialize, Serialize};

/// Placeholder endpoint baked into the demo deployment. Treated as "no
/// remote configured": the store fabricates data instead of calling it.
pub const PLACEHOLDER_BASE_URL: &str = "https://api.example.com/hr";

/// Default file name stem for the persisted cache blob.
pub const DEFAULT_STORAGE_KEY: &str = "hr-data";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the cache blob is stored under (file name stem).
    pub storage_key: String,
    /// Base URL of the HR backend.
    pub api_base_url: String,
    /// When false, state lives only in memory for the session.
    pub enable_persistence: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            api_base_url: PLACEHOLDER_BASE_URL.to_string(),
            enable_persistence: true,
        }
    }
}

impl StoreConfig {
    /// Whether a real remote endpoint is configured. The builtin placeholder
    /// value and an empty string both mean "no remote".
    pub fn has_remote(&self) -> bool {
        !self.api_base_url.is_empty() && self.api_base_url != PLACEHOLDER_BASE_URL
    }

    /// Shallow merge: provided options overwrite, missing ones are kept.
    pub fn apply(&mut self, options: StoreOptions) {
        if let Some(storage_key) = options.storage_key {
            self.storage_key = storage_key;
        }
        if let Some(api_base_url) = options.api_base_url {
            self.api_base_url = api_base_url;
        }
        if let Some(enable_persistence) = options.enable_persistence {
            self.enable_persistence = enable_persistence;
        }
    }
}

/// Runtime option overrides, applied by `CacheStore::set_options`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_persistence: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_disable_remote() {
        let config = StoreConfig::default();
        assert!(!config.has_remote());
        assert!(config.enable_persistence);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_empty_base_url_means_no_remote() {
        let config = StoreConfig {
            api_base_url: String::new(),
            ..Default::default()
        };
        assert!(!config.has_remote());
    }

    #[test]
    fn test_real_endpoint_enables_remote() {
        let config = StoreConfig {
            api_base_url: "http://localhost:8080/api".to_string(),
            ..Default::default()
        };
        assert!(config.has_remote());
    }

    #[test]
    fn test_apply_merges_provided_options_only() {
        let mut config = StoreConfig::default();
        config.apply(StoreOptions {
            enable_persistence: Some(false),
            ..Default::default()
        });

        assert!(!config.enable_persistence);
        assert_eq!(config.api_base_url, PLACEHOLDER_BASE_URL);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }
}
