//! Locating and running the scdl executable
//!
//! A run happens on a worker thread. The tool's stdout and stderr share one
//! pipe; its output is split into lines as it arrives, classified, and sent to
//! the UI thread over a channel, followed by a summary and a final
//! `RunEvent::Finished`.

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::command_builder::CommandBuilder;
use crate::config::{separator, TOOL_ENV_VAR, TOOL_NAME};
use crate::data_structures::{DownloadRequest, LineCategory, LogLine, RunEvent, RunOutcome};
use crate::line_classifier::LineClassifier;
use crate::{debug, error, info};

/// Failures of a single download run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{tool} not found")]
    ToolNotFound { tool: String },

    #[error("Failed to create download folder {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to start {tool}: {source}")]
    Spawn { tool: String, source: io::Error },

    #[error("Failed to create output pipe: {0}")]
    Pipe(io::Error),

    #[error("Failed to read tool output: {0}")]
    Output(io::Error),

    #[error("Failed to wait for the download process: {0}")]
    Wait(io::Error),
}

impl From<RunError> for RunOutcome {
    fn from(err: RunError) -> Self {
        match err {
            RunError::ToolNotFound { tool } => RunOutcome::ToolNotFound { tool },
            other => RunOutcome::Failed(other.to_string()),
        }
    }
}

impl RunOutcome {
    /// Map a process exit code onto an outcome
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => RunOutcome::Success,
            Some(code) => RunOutcome::ExitCode(code),
            None => RunOutcome::Terminated,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }

    /// Lines appended to the output log once the run is over
    pub fn summary_lines(&self) -> Vec<LogLine> {
        let framed = |line: LogLine| {
            vec![
                LogLine::plain(""),
                LogLine::new(separator(), LineCategory::Info),
                line,
                LogLine::new(separator(), LineCategory::Info),
            ]
        };

        match self {
            RunOutcome::Success => framed(LogLine::new("✅ Download completed successfully!", LineCategory::Success)),
            RunOutcome::ExitCode(code) => framed(LogLine::new(format!("❌ Process exited with code {}", code), LineCategory::Error)),
            RunOutcome::Terminated => framed(LogLine::new("❌ Process terminated without an exit code", LineCategory::Error)),
            RunOutcome::ToolNotFound { tool } => vec![
                LogLine::new(format!("❌ Error: {} not found!", TOOL_NAME), LineCategory::Error),
                LogLine::new(format!("Please verify the path: {}", tool), LineCategory::Error),
                LogLine::new(
                    format!("Set the scdl path in the settings, or point {} at the executable.", TOOL_ENV_VAR),
                    LineCategory::Error,
                ),
            ],
            RunOutcome::Failed(message) => vec![LogLine::new(format!("❌ Error: {}", message), LineCategory::Error)],
        }
    }

    /// Short text for the status line
    pub fn status_text(&self) -> String {
        match self {
            RunOutcome::Success => "Download completed successfully.".to_string(),
            RunOutcome::ExitCode(code) => format!("Download failed (exit code {}).", code),
            RunOutcome::Terminated => "Download process was terminated.".to_string(),
            RunOutcome::ToolNotFound { .. } => format!("{} not found.", TOOL_NAME),
            RunOutcome::Failed(message) => format!("Download failed: {}", message),
        }
    }
}

/// Starts and supervises scdl processes
pub struct ProcessRunner;

impl ProcessRunner {
    /// Find the scdl executable.
    ///
    /// Lookup order: explicit override, then `CLOUDGRAB_SCDL`, then `PATH`.
    pub fn resolve_tool(override_path: Option<&Path>) -> Result<PathBuf, RunError> {
        let env_path = std::env::var_os(TOOL_ENV_VAR).map(PathBuf::from);
        Self::resolve_tool_from(override_path, env_path.as_deref())
    }

    fn resolve_tool_from(override_path: Option<&Path>, env_path: Option<&Path>) -> Result<PathBuf, RunError> {
        let explicit = override_path
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| env_path.filter(|p| !p.as_os_str().is_empty()));

        if let Some(path) = explicit {
            return if path.is_file() {
                Ok(path.to_path_buf())
            } else {
                Err(RunError::ToolNotFound { tool: path.display().to_string() })
            };
        }

        which::which(TOOL_NAME).map_err(|e| {
            debug!("PATH lookup for {} failed: {}", TOOL_NAME, e);
            RunError::ToolNotFound { tool: TOOL_NAME.to_string() }
        })
    }

    /// Run a download on a new worker thread
    pub fn spawn(request: DownloadRequest, tool_override: Option<PathBuf>) -> (thread::JoinHandle<()>, Receiver<RunEvent>) {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            Self::execute(&request, tool_override.as_deref(), &tx);
        });
        (handle, rx)
    }

    /// Run a download to completion on the current thread, reporting through `events`
    pub fn execute(request: &DownloadRequest, tool_override: Option<&Path>, events: &Sender<RunEvent>) -> RunOutcome {
        let outcome = match Self::run_tool(request, tool_override, events) {
            Ok(code) => RunOutcome::from_exit_code(code),
            Err(e) => {
                error!("Download run failed: {}", e);
                RunOutcome::from(e)
            }
        };

        info!("Download run finished: {:?}", outcome);
        for line in outcome.summary_lines() {
            let _ = events.send(RunEvent::Line(line));
        }
        let _ = events.send(RunEvent::Finished(outcome.clone()));
        outcome
    }

    /// Launch the tool and pump its output; returns the exit code, if any
    fn run_tool(request: &DownloadRequest, tool_override: Option<&Path>, events: &Sender<RunEvent>) -> Result<Option<i32>, RunError> {
        // An unresolved tool still gets a header; the lookup error is raised after it
        let resolved = Self::resolve_tool(tool_override);
        let shown_tool = match &resolved {
            Ok(path) => path.clone(),
            Err(RunError::ToolNotFound { tool }) => PathBuf::from(tool),
            Err(_) => PathBuf::from(TOOL_NAME),
        };
        let args = CommandBuilder::build(&shown_tool, request);

        if let Some(destination) = &request.destination {
            std::fs::create_dir_all(destination).map_err(|source| RunError::CreateDir {
                path: destination.clone(),
                source,
            })?;
        }

        let header = [
            LogLine::new(separator(), LineCategory::Info),
            LogLine::new(
                format!("{} Starting download ({})...", request.kind.emoji(), request.kind.as_str()),
                LineCategory::Info,
            ),
            LogLine::new(format!("Command: {}", CommandBuilder::display(&args)), LineCategory::Info),
            LogLine::new(separator(), LineCategory::Info),
            LogLine::plain(""),
        ];
        for line in header {
            let _ = events.send(RunEvent::Line(line));
        }

        let tool = resolved?;
        info!("Running: {}", CommandBuilder::display(&args));

        // stdout and stderr share one pipe so lines keep the order they were written in
        let (reader, writer) = io::pipe().map_err(RunError::Pipe)?;
        let stderr_writer = writer.try_clone().map_err(RunError::Pipe)?;

        let mut command = Command::new(&tool);
        command.args(&args[1..]);
        command.stdin(Stdio::null());
        command.stdout(writer);
        command.stderr(stderr_writer);
        command.env("PYTHONUNBUFFERED", "1");

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(0x08000000); // CREATE_NO_WINDOW
        }

        let mut child = command.spawn().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                RunError::ToolNotFound { tool: tool.display().to_string() }
            } else {
                RunError::Spawn { tool: tool.display().to_string(), source }
            }
        })?;

        // The command still holds the write ends; drop them so the reader sees EOF
        drop(command);

        let pumped = pump_lines(reader, events);
        let status = child.wait().map_err(RunError::Wait)?;
        pumped.map_err(RunError::Output)?;
        debug!("Tool exited with status {:?}", status);
        Ok(status.code())
    }
}

/// Classify and forward every non-blank line of `reader`
fn pump_lines<R: Read>(reader: R, events: &Sender<RunEvent>) -> io::Result<()> {
    for_each_line(reader, |line| {
        let _ = events.send(RunEvent::Line(LineClassifier::to_log_line(line)));
    })
}

/// Split a byte stream into trimmed, non-empty lines as data arrives.
///
/// Both `\n` and `\r` end a line, so progress bars that redraw in place
/// produce one line per redraw. Invalid UTF-8 is replaced, not rejected.
pub fn for_each_line<R: Read>(reader: R, mut on_line: impl FnMut(&str)) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut pending: Vec<u8> = Vec::new();

    let mut emit = |bytes: &[u8]| {
        let text = String::from_utf8_lossy(bytes);
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            on_line(trimmed);
        }
    };

    loop {
        let chunk = match reader.fill_buf() {
            Ok(chunk) => chunk,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if chunk.is_empty() {
            break;
        }

        let len = chunk.len();
        for &byte in chunk {
            if byte == b'\n' || byte == b'\r' {
                emit(&pending);
                pending.clear();
            } else {
                pending.push(byte);
            }
        }
        reader.consume(len);
    }

    emit(&pending);
    Ok(())
}
