use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::platform::Platform;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("postdeck")
}

fn default_platforms() -> Vec<Platform> {
    Platform::ALL.to_vec()
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PostdeckConfig {
    pub data_directory: PathBuf,
    /// Platforms shown on the drag rail, in display order.
    pub platforms: Vec<Platform>,
    pub debug_logging: bool,
}

impl Default for PostdeckConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            platforms: default_platforms(),
            debug_logging: false,
        }
    }
}

impl PostdeckConfig {
    /// Directory holding one JSON file per storage key.
    pub fn storage_dir(&self) -> PathBuf {
        self.data_directory.join("storage")
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("postdeck")
            .join("config.json")
    }

    /// Read a config file, falling back to defaults when it is missing or
    /// unparseable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::error!("Failed to parse config: {e}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Ensure the data and storage directories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.storage_dir())
    }
}
