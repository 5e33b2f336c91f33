//! User settings
//!
//! JSON settings file loaded from the platform config directory
//! (`<config>/emberwood/settings.json`). Only the save-related settings are
//! defined so far; unknown fields are ignored so older builds can read newer
//! files. A missing or unparsable file falls back to defaults with a warning
//! rather than failing startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub saves: SavesSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SavesSettings {
    /// Name of the character save directory the load screen preselects when
    /// no character is active in the current session.
    pub character: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            saves: SavesSettings::default(),
        }
    }
}

impl Default for SavesSettings {
    fn default() -> Self {
        SavesSettings {
            character: String::new(),
        }
    }
}

impl Settings {
    /// Path of the settings file, if a config directory exists on this platform.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("emberwood").join("settings.json"))
    }

    /// Loads settings from the default location, falling back to defaults.
    pub fn load_or_default() -> Settings {
        let Some(path) = Self::default_path() else {
            return Settings::default();
        };
        if !path.exists() {
            return Settings::default();
        }
        match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("ignoring malformed settings file {}: {}", path.display(), e);
                    Settings::default()
                }
            },
            Err(e) => {
                log::warn!("could not read settings file {}: {}", path.display(), e);
                Settings::default()
            }
        }
    }
}
