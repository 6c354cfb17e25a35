//! Front-end settings, read from an optional YAML file.
//!
//! ```yaml
//! data_dir: ~/.local/share/waymark
//! position: [51.5, -0.12]
//! map_zoom: 13
//! workouts_key: workout
//! sort_key: sortValue
//! ```
//!
//! Every field is optional; anything left out keeps its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wm_core::Coords;
use wm_storage::StorageKeys;

use crate::error::{AppError, AppResult};

pub const DEFAULT_MAP_ZOOM: u8 = 13;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the stored snapshot.
    pub data_dir: Option<PathBuf>,
    /// Position reported to the map when the front end has no live source.
    pub position: Option<Coords>,
    pub map_zoom: u8,
    pub workouts_key: String,
    pub sort_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        let keys = StorageKeys::default();
        Self {
            data_dir: None,
            position: None,
            map_zoom: DEFAULT_MAP_ZOOM,
            workouts_key: keys.workouts,
            sort_key: keys.sort,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::SettingsRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content).map_err(|e| AppError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> AppResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults", not an error.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            workouts: self.workouts_key.clone(),
            sort: self.sort_key.clone(),
        }
    }
}
