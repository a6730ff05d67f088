//! Application settings and persistence management
//!
//! This module handles loading, saving, and managing user preferences
//! that persist between sessions: the form options, the destination folder
//! and an optional explicit path to the scdl executable.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::data_structures::DownloadKind;
use crate::helper_functions::Utils;

/// Errors raised while reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Application settings that persist between sessions
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub kind: DownloadKind,
    pub download_folder: String,
    pub convert_to_mp3: bool,
    pub continue_on_error: bool,
    pub overwrite_existing: bool,
    pub attach_metadata: bool,
    /// Explicit scdl location; blank means environment / PATH lookup
    pub tool_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kind: DownloadKind::Track,
            download_folder: Utils::default_download_folder().to_string_lossy().to_string(),
            convert_to_mp3: true,
            continue_on_error: true,
            overwrite_existing: true,
            attach_metadata: true,
            tool_path: String::new(),
        }
    }
}

impl Settings {
    /// Get the path where settings are stored
    pub fn get_path() -> std::io::Result<PathBuf> {
        #[cfg(windows)]
        {
            let exe_path = std::env::current_exe()?;
            let exe_dir = exe_path.parent().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "Failed to get executable directory")
            })?;
            Ok(exe_dir.join("cloudgrab_settings.json"))
        }

        #[cfg(target_os = "macos")]
        {
            let home_dir = dirs::home_dir().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "Failed to get home directory")
            })?;
            let app_support = home_dir.join("Library/Application Support/cloudgrab");
            std::fs::create_dir_all(&app_support)?;
            Ok(app_support.join("settings.json"))
        }

        #[cfg(target_os = "linux")]
        {
            let app_dir = match xdg::BaseDirectories::new() {
                Ok(xdg_dirs) => xdg_dirs.get_config_home().join("cloudgrab"),
                Err(_) => {
                    let home_dir = dirs::home_dir().ok_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::NotFound, "Failed to get home directory")
                    })?;
                    home_dir.join(".cloudgrab")
                }
            };
            std::fs::create_dir_all(&app_dir)?;
            Ok(app_dir.join("settings.json"))
        }

        #[cfg(not(any(windows, target_os = "macos", target_os = "linux")))]
        {
            let config_dir = dirs::config_dir().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "Failed to get config directory")
            })?;
            let app_dir = config_dir.join("cloudgrab");
            std::fs::create_dir_all(&app_dir)?;
            Ok(app_dir.join("settings.json"))
        }
    }

    /// Load settings from disk, falling back to defaults if the file is missing or broken
    pub fn load() -> Self {
        match Self::get_path() {
            Ok(path) => match Self::load_from(&path) {
                Ok(settings) => {
                    crate::info!("Settings loaded from {}", path.display());
                    settings
                }
                Err(SettingsError::Io(e)) => {
                    crate::debug!("Settings file not found or unreadable: {}. Using defaults.", e);
                    Settings::default()
                }
                Err(e) => {
                    crate::warn!("Failed to parse settings file: {}. Using defaults.", e);
                    Settings::default()
                }
            },
            Err(e) => {
                crate::warn!("Failed to get settings path: {}. Using defaults.", e);
                Settings::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::get_path()?;
        self.save_to(&path)?;
        crate::debug!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
