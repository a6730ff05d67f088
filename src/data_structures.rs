//! Data structures and types for the CloudGrab downloader front-end
//!
//! This module contains the form state, the download request built from it,
//! the events a download worker sends back, and the main application state.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use serde::{Deserialize, Serialize};

use crate::helper_functions::Validation;

/// What the user wants to download
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    #[default]
    Track,
    Playlist,
    Likes,
}

impl DownloadKind {
    pub const ALL: [DownloadKind; 3] = [DownloadKind::Track, DownloadKind::Playlist, DownloadKind::Likes];

    /// Lowercase name, as shown in the run header
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadKind::Track => "track",
            DownloadKind::Playlist => "playlist",
            DownloadKind::Likes => "likes",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            DownloadKind::Track => "🎵",
            DownloadKind::Playlist => "📀",
            DownloadKind::Likes => "❤️",
        }
    }

    /// Radio button label
    pub fn label(&self) -> String {
        let name = match self {
            DownloadKind::Track => "Single Track",
            DownloadKind::Playlist => "Playlist/Album",
            DownloadKind::Likes => "Likes",
        };
        format!("{} {}", self.emoji(), name)
    }

    /// Example URL shown in the empty URL field
    pub fn placeholder(&self) -> &'static str {
        match self {
            DownloadKind::Track => "e.g. https://soundcloud.com/artist/track-name",
            DownloadKind::Playlist => "e.g. https://soundcloud.com/artist/sets/playlist-name",
            DownloadKind::Likes => "e.g. https://soundcloud.com/username/likes",
        }
    }
}

/// Rejected form input, reported before anything is launched
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Please enter a valid SoundCloud URL!")]
    EmptyUrl,

    #[error("Please enter a valid SoundCloud URL!")]
    PlaceholderUrl,
}

/// The editable values of the download form
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadForm {
    pub kind: DownloadKind,
    pub url: String,
    pub folder: String,
    pub convert_to_mp3: bool,
    pub continue_on_error: bool,
    pub overwrite_existing: bool,
    pub attach_metadata: bool,
}

impl DownloadForm {
    /// Validate the form and snapshot it into a request for one run
    pub fn to_request(&self) -> Result<DownloadRequest, InvalidInput> {
        let url = Validation::check_url(&self.url)?;
        let folder = self.folder.trim();
        Ok(DownloadRequest {
            kind: self.kind,
            source_url: url.to_string(),
            destination: (!folder.is_empty()).then(|| PathBuf::from(folder)),
            convert_to_mp3: self.convert_to_mp3,
            continue_on_error: self.continue_on_error,
            overwrite_existing: self.overwrite_existing,
            attach_metadata: self.attach_metadata,
        })
    }
}

/// Everything one scdl run needs, detached from the UI
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadRequest {
    pub kind: DownloadKind,
    pub source_url: String,
    pub destination: Option<PathBuf>,
    pub convert_to_mp3: bool,
    pub continue_on_error: bool,
    pub overwrite_existing: bool,
    pub attach_metadata: bool,
}

/// Display category of a line in the output log
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCategory {
    Error,
    Warning,
    Success,
    Info,
    Plain,
}

/// A single line of the output log
#[derive(Clone, Debug, PartialEq)]
pub struct LogLine {
    pub text: String,
    pub category: LineCategory,
}

impl LogLine {
    pub fn new(text: impl Into<String>, category: LineCategory) -> Self {
        Self { text: text.into(), category }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, LineCategory::Plain)
    }
}

/// How a download run ended
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    Success,
    ExitCode(i32),
    Terminated,
    ToolNotFound { tool: String },
    Failed(String),
}

/// Messages sent from the download worker to the UI thread
#[derive(Clone, Debug, PartialEq)]
pub enum RunEvent {
    Line(LogLine),
    Finished(RunOutcome),
}

/// Main application state for the downloader window
pub struct CloudGrab {
    // Form
    pub form: DownloadForm,
    pub tool_path: String,

    // Download state
    pub downloading: bool,
    pub run_receiver: Option<Receiver<RunEvent>>,
    pub run_handle: Option<std::thread::JoinHandle<()>>,
    pub last_outcome: Option<RunOutcome>,

    // Output log
    pub log_lines: Vec<LogLine>,

    // UI status
    pub status: String,
    pub warning: Option<String>,

    // Settings file override; `None` means the platform location
    pub settings_path: Option<PathBuf>,
}
