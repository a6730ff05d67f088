//! Maps a download request onto the scdl argument vector

use std::path::Path;

use crate::config::{LIST_FLAG, NAME_FORMAT};
use crate::data_structures::DownloadRequest;

/// Builds scdl command lines
pub struct CommandBuilder;

impl CommandBuilder {
    /// Build the full argument vector, tool path first.
    ///
    /// All three download kinds share one command shape, and
    /// `attach_metadata` does not map to a flag.
    pub fn build(tool: &Path, request: &DownloadRequest) -> Vec<String> {
        let mut args = vec![
            tool.to_string_lossy().to_string(),
            LIST_FLAG.to_string(),
            request.source_url.clone(),
        ];

        if request.convert_to_mp3 {
            args.push("--onlymp3".to_string());
        }
        if request.continue_on_error {
            args.push("-c".to_string());
        }
        if request.overwrite_existing {
            args.push("-f".to_string());
        }

        args.push("--name-format".to_string());
        args.push(NAME_FORMAT.to_string());

        if let Some(destination) = &request.destination {
            args.push("--path".to_string());
            args.push(destination.to_string_lossy().to_string());
        }

        args
    }

    /// Render an argument vector for the log header
    pub fn display(args: &[String]) -> String {
        args.join(" ")
    }
}
