//! Account-level configuration document
//!
//! A single JSON object persisted as `app-config.json`. Two keys are reserved:
//! `auth` holds the bearer token, `conf` holds the client's opaque config blob.
//! Any other keys are preserved untouched.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AgentError, AgentResult};
use crate::json_file;

pub const AUTH_KEY: &str = "auth";
pub const CONF_KEY: &str = "conf";

/// The config mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured bearer token; an empty string counts as unset
    pub fn auth(&self) -> Option<&str> {
        self.0
            .get(AUTH_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    }

    pub fn set_auth(&mut self, token: impl Into<String>) {
        self.0.insert(AUTH_KEY.to_string(), Value::String(token.into()));
    }

    /// Client config blob, stored verbatim
    pub fn conf(&self) -> Option<&str> {
        self.0.get(CONF_KEY).and_then(Value::as_str)
    }

    pub fn set_conf(&mut self, conf: impl Into<String>) {
        self.0.insert(CONF_KEY.to_string(), Value::String(conf.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Loads and persists [`Config`] at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the config file. Absent, unreadable or malformed files all yield an
    /// empty config; a missing file is the normal first-run state.
    pub fn load(&self) -> Config {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "No config file yet, starting empty");
            return Config::new();
        }

        match json_file::read::<Config>(&self.path) {
            Ok(config) => {
                tracing::info!(path = %self.path.display(), "Config loaded");
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring unusable config: {}", e);
                Config::new()
            }
        }
    }

    /// Persist the config, best effort. Failures are logged; the in-memory
    /// config stays authoritative until the next restart.
    pub fn save(&self, config: &Config) {
        match self.try_save(config) {
            Ok(()) => tracing::info!(path = %self.path.display(), "Config saved"),
            Err(e) => tracing::error!("Failed to save config: {}", e),
        }
    }

    /// Persist the config, reporting failure to the caller
    pub fn try_save(&self, config: &Config) -> AgentResult<()> {
        json_file::write_pretty(&self.path, config)
    }
}

impl TryFrom<Value> for Config {
    type Error = AgentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value).map_err(|e| AgentError::json("<inline>", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ConfigStore {
        ConfigStore::new(temp.path().join("app-config.json"))
    }

    #[test]
    fn missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let config = store_in(&temp).load();
        assert!(config.is_empty());
        assert_eq!(config.auth(), None);
    }

    #[test]
    fn malformed_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.path(), "{\"auth\": ").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn non_object_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_preserves_keys() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut config = Config::try_from(json!({"theme": "dark"})).unwrap();
        config.set_auth("0123abcd");
        config.set_conf("{\"fontSize\":12}");
        store.save(&config);

        let loaded = store.load();
        assert_eq!(loaded, config);
        assert_eq!(loaded.auth(), Some("0123abcd"));
        assert_eq!(loaded.conf(), Some("{\"fontSize\":12}"));
        assert_eq!(loaded.get("theme"), Some(&json!("dark")));
    }

    #[test]
    fn empty_auth_counts_as_unset() {
        let mut config = Config::new();
        config.set_auth("");
        assert_eq!(config.auth(), None);
    }

    #[test]
    fn non_string_auth_counts_as_unset() {
        let config = Config::try_from(json!({"auth": 42})).unwrap();
        assert_eq!(config.auth(), None);
    }

    #[test]
    fn failed_save_is_swallowed() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("missing-dir").join("app-config.json"));
        let mut config = Config::new();
        config.set_auth("token");

        store.save(&config);
        assert!(store.try_save(&config).is_err());
        assert!(!store.path().exists());
    }
}
