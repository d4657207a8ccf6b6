/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default number of history snapshots kept per editor.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Upper bound accepted for `history_limit`.
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Default storage slot the current page is saved under.
pub const DEFAULT_STORAGE_KEY: &str = "page-builder-data";

/// Name given to freshly created pages.
pub const DEFAULT_PAGE_NAME: &str = "Untitled Page";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Max snapshots kept in the undo/redo log.
    pub history_limit: usize,
    /// Fixed slot key the current page is saved under.
    pub storage_key: String,
    /// Name for new pages when none is given.
    pub default_page_name: String,
    /// Whether the store accepts document edits while preview mode is on.
    pub allow_edits_in_preview: bool,
    /// Directory holding the page database. Empty = platform default.
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_page_name: DEFAULT_PAGE_NAME.to_string(),
            allow_edits_in_preview: false,
            data_dir: String::new(),
        }
    }
}

/// Resolves the data directory path.
///
/// Resolution order:
/// 1. `PAGESMITH_DATA_DIR` environment variable
/// 2. the platform local data directory + `pagesmith`
/// 3. `.data/` in the working directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PAGESMITH_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .map(|d| d.join("pagesmith"))
        .unwrap_or_else(|| PathBuf::from(".data"))
}

impl AppConfig {
    /// Returns the default config file path: data directory + `pagesmith.json`.
    pub fn config_path() -> PathBuf {
        resolve_data_dir().join("pagesmith.json")
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Return defaults on error (don't overwrite broken file)
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Directory holding the page database.
    pub fn effective_data_dir(&self) -> PathBuf {
        if self.data_dir.trim().is_empty() {
            resolve_data_dir()
        } else {
            PathBuf::from(&self.data_dir)
        }
    }

    /// Path of the page database file.
    pub fn page_db_path(&self) -> PathBuf {
        self.effective_data_dir().join("pages.redb")
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.history_limit = self.history_limit.clamp(1, MAX_HISTORY_LIMIT);
        if self.storage_key.trim().is_empty() {
            self.storage_key = DEFAULT_STORAGE_KEY.to_string();
        }
        if self.default_page_name.trim().is_empty() {
            self.default_page_name = DEFAULT_PAGE_NAME.to_string();
        }
    }
}
