use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub popup: PopupConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Popup geometry in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupConfig {
    #[serde(default = "default_width")]
    pub width: u16,
    #[serde(default = "default_height")]
    pub height: u16,
    #[serde(default)]
    pub left: u16,
    #[serde(default)]
    pub top: u16,
}

impl Default for PopupConfig {
    fn default() -> Self {
        PopupConfig {
            width: default_width(),
            height: default_height(),
            left: 0,
            top: 0,
        }
    }
}

/// 400px at an 8px cell
fn default_width() -> u16 {
    50
}

/// 500px at a 16px cell
fn default_height() -> u16 {
    31
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the store files. None = platform data dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
