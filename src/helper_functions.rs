//! Common utility functions and validation helpers
//!
//! This module provides folder helpers and input validation used by the
//! form and the download worker.

use std::path::{Path, PathBuf};
use crate::config::{DEFAULT_FOLDER_NAME, PLACEHOLDER_PREFIX};
use crate::data_structures::InvalidInput;

/// Common utility functions used throughout the application
pub struct Utils;

impl Utils {
    /// Default destination: `<Downloads>/SoundCloud`
    pub fn default_download_folder() -> PathBuf {
        dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("Downloads"))
            .join(DEFAULT_FOLDER_NAME)
    }

    /// Open a folder in the system's file explorer
    pub fn open_folder(path: &Path) -> Result<(), String> {
        let canonical = path.canonicalize().map_err(|e| e.to_string())?;
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            let path_str = canonical.to_string_lossy().replace("/", "\\");
            let mut cmd = std::process::Command::new("explorer.exe");
            cmd.arg(&path_str);
            cmd.creation_flags(0x08000000); // CREATE_NO_WINDOW
            cmd.spawn().map_err(|e| e.to_string())?;
        }
        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg(&canonical)
                .spawn()
                .map_err(|e| e.to_string())?;
        }
        #[cfg(not(any(windows, target_os = "macos")))]
        {
            std::process::Command::new("xdg-open")
                .arg(&canonical)
                .spawn()
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

/// Input validation utilities
pub struct Validation;

impl Validation {
    /// Trim the URL field and reject empty or placeholder text
    pub fn check_url(text: &str) -> Result<&str, InvalidInput> {
        let url = text.trim();
        if url.is_empty() {
            Err(InvalidInput::EmptyUrl)
        } else if url.starts_with(PLACEHOLDER_PREFIX) {
            Err(InvalidInput::PlaceholderUrl)
        } else {
            Ok(url)
        }
    }

    /// Validate that a folder path exists and is a directory
    pub fn is_valid_folder(path: &str) -> bool {
        if path.trim().is_empty() {
            return false;
        }

        Path::new(path.trim()).is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_check_url_trims() {
        assert_eq!(Validation::check_url("  https://soundcloud.com/a/b \n"), Ok("https://soundcloud.com/a/b"));
    }

    #[test]
    fn test_check_url_rejects_empty() {
        assert_eq!(Validation::check_url(""), Err(InvalidInput::EmptyUrl));
        assert_eq!(Validation::check_url("   "), Err(InvalidInput::EmptyUrl));
    }

    #[test]
    fn test_check_url_rejects_placeholder() {
        let result = Validation::check_url("e.g. https://soundcloud.com/artist/track-name");
        assert_eq!(result, Err(InvalidInput::PlaceholderUrl));
        assert_eq!(result.unwrap_err().to_string(), "Please enter a valid SoundCloud URL!");
    }

    #[test]
    fn test_is_valid_folder() {
        let temp_dir = tempdir().unwrap();
        assert!(Validation::is_valid_folder(temp_dir.path().to_str().unwrap()));
        assert!(!Validation::is_valid_folder(""));
        assert!(!Validation::is_valid_folder(temp_dir.path().join("missing").to_str().unwrap()));
    }

    #[test]
    fn test_default_download_folder_ends_with_soundcloud() {
        assert!(Utils::default_download_folder().ends_with(DEFAULT_FOLDER_NAME));
    }
}
