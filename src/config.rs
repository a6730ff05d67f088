//! Configuration constants for the CloudGrab downloader front-end
//!
//! This module contains application-wide configuration values including
//! the scdl invocation constants, the tool lookup settings and UI sizes.

/// The current application version (keep in sync with Cargo.toml)
pub const APP_VERSION: &str = "0.3.0";

/// Name of the download tool looked up on PATH
pub static TOOL_NAME: &str = "scdl";

/// Environment variable that may point at the download tool
pub static TOOL_ENV_VAR: &str = "CLOUDGRAB_SCDL";

/// Flag that makes scdl treat the next argument as a URL to download
pub static LIST_FLAG: &str = "-l";

/// File name template handed to scdl (avoids the numbered "01 - " naming)
pub static NAME_FORMAT: &str = "{uploader} - {title}";

/// Every URL placeholder starts with this, so a copied hint is rejected
pub static PLACEHOLDER_PREFIX: &str = "e.g.";

/// Width of the `=` separator lines in the output log
pub static SEPARATOR_WIDTH: usize = 70;

/// Sub-folder of the user's downloads directory used by default
pub static DEFAULT_FOLDER_NAME: &str = "SoundCloud";

/// Default window size
pub static WINDOW_SIZE: [f32; 2] = [800.0, 800.0];

/// Minimum window size
pub static MIN_WINDOW_SIZE: [f32; 2] = [600.0, 560.0];

/// The `=` separator that frames the run header and summary
pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}
