//! Shared config utilities for loading JSON config files and applying
//! environment overrides.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "THEME_MANAGER_CONFIG";

/// How item codes are checked before they reach the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemPolicy {
    /// Reject items that are not codes; store them trimmed and uppercased.
    #[default]
    Strict,
    /// Trim only. Blank items are kept.
    Lenient,
}

impl ItemPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(ItemPolicy::Strict),
            "lenient" => Some(ItemPolicy::Lenient),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listen address, e.g. "127.0.0.1:3001".
    pub bind: String,
    /// Directory holding one `<slot>.json` per slot.
    pub data_dir: PathBuf,
    pub item_policy: ItemPolicy,
    /// Write empty documents for missing slots at startup.
    pub seed_missing_slots: bool,
    /// Send permissive CORS headers.
    pub cors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3001".to_string(),
            data_dir: PathBuf::from("data"),
            item_policy: ItemPolicy::Strict,
            seed_missing_slots: false,
            cors: true,
        }
    }
}

impl AppConfig {
    /// Load from the config file (if any), then apply environment overrides.
    pub fn load() -> Self {
        let path = config_path();
        let mut config = match path {
            Some(ref path) => load_json_config::<AppConfig>(path, "Config"),
            None => AppConfig::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `THEME_MANAGER_*` / `DATA_DIR` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = non_empty(lookup("THEME_MANAGER_BIND")) {
            self.bind = bind;
        }
        if let Some(dir) = non_empty(lookup("DATA_DIR")) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = non_empty(lookup("THEME_MANAGER_ITEM_POLICY")) {
            match ItemPolicy::parse(&raw) {
                Some(policy) => self.item_policy = policy,
                None => warn!(value = %raw, "[Config] Unknown item policy, keeping {:?}", self.item_policy),
            }
        }
        if let Some(raw) = non_empty(lookup("THEME_MANAGER_SEED")) {
            self.seed_missing_slots = matches!(raw.as_str(), "1" | "true" | "yes" | "on");
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `$THEME_MANAGER_CONFIG`, else `<config_dir>/theme-manager/config.json`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = non_empty(std::env::var(CONFIG_PATH_ENV).ok()) {
        return Some(PathBuf::from(path));
    }
    dirs_next::config_dir().map(|dir| dir.join("theme-manager").join("config.json"))
}

/// Generic load for any Serde config type with a `Default` implementation.
/// Falls back to `T::default()` if the file is missing or unparsable.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(config) => {
                info!(path = %path.display(), "[{}] Loaded config", label);
                config
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "[{}] Failed to parse config, using defaults",
                    label
                );
                T::default()
            }
        },
        Err(_) => {
            info!(path = %path.display(), "[{}] No config file, using defaults", label);
            T::default()
        }
    }
}
