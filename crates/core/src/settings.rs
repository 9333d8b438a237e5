use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

pub const SETTINGS_KEY: &str = "smashcut-settings";

/// Flat string key-value storage for user settings and credentials.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// A JSON object on disk. Changes stay in memory until [`FileStore::close`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl FileStore {
    /// Load the store from `path`. A missing file is an empty store.
    ///
    /// A file that is not a flat JSON object of strings is replaced by an
    /// empty store on the next [`FileStore::close`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (values, dirty): (BTreeMap<String, String>, bool) = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => (values, false),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "settings file is unreadable, starting empty");
                    (BTreeMap::new(), true)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (BTreeMap::new(), false),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = values.len(), "opened settings store");

        Ok(Self {
            path,
            values,
            dirty,
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(default_store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write pending changes to disk.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        self.dirty = false;
        Ok(())
    }

    pub fn close(mut self) -> Result<()> {
        self.flush()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.dirty = true;
        }
    }
}

pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smashcut")
        .join("settings.json")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebSearchEngine {
    #[default]
    Auto,
    Native,
    Exa,
}

impl WebSearchEngine {
    pub fn name(&self) -> &'static str {
        match self {
            WebSearchEngine::Auto => "auto",
            WebSearchEngine::Native => "native",
            WebSearchEngine::Exa => "exa",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub api_key: String,
    pub selected_model: Option<String>,
    pub enable_web_search: bool,
    pub web_search_engine: WebSearchEngine,
    pub web_search_max_results: u32,
    pub enable_structured_outputs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            selected_model: None,
            enable_web_search: false,
            web_search_engine: WebSearchEngine::Auto,
            web_search_max_results: 5,
            enable_structured_outputs: true,
        }
    }
}

impl Settings {
    /// Stored fields override defaults. Unreadable JSON falls back to defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(SETTINGS_KEY) else {
            return Self::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "stored settings are unreadable, using defaults");
            Self::default()
        })
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(SETTINGS_KEY, serde_json::to_string(self)?);
        Ok(())
    }

    pub fn reset(store: &mut dyn KeyValueStore) {
        store.remove(SETTINGS_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_are_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn partial_settings_merge_over_defaults() {
        let mut store = MemoryStore::new();
        store.set(
            SETTINGS_KEY,
            r#"{"apiKey":"sk-1","webSearchEngine":"exa"}"#.to_string(),
        );
        let settings = Settings::load(&store);
        assert_eq!(settings.api_key, "sk-1");
        assert_eq!(settings.web_search_engine, WebSearchEngine::Exa);
        assert_eq!(settings.web_search_max_results, 5);
        assert!(settings.enable_structured_outputs);
    }

    #[test]
    fn garbage_settings_are_defaults() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, "{not json".to_string());
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn save_then_reset() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            selected_model: Some("openai/gpt-4o".to_string()),
            ..Settings::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);

        Settings::reset(&mut store);
        assert!(store.get(SETTINGS_KEY).is_none());
    }
}
