//! Application logic for the CloudGrab downloader front-end
//!
//! This module contains the state transitions of the main window: starting a
//! download run, draining the worker's events, and settings bookkeeping.

use std::path::{Path, PathBuf};
use std::sync::mpsc::TryRecvError;

use crate::data_structures::{CloudGrab, DownloadForm, LineCategory, LogLine, RunEvent, RunOutcome};
use crate::helper_functions::{Utils, Validation};
use crate::process_runner::ProcessRunner;
use crate::settings::Settings;

// Use the logging macros directly from the crate root
use crate::{info, warn, debug, error};

impl Default for CloudGrab {
    fn default() -> Self {
        info!("Initializing CloudGrab");
        let settings = Settings::load();
        info!("Loaded settings: kind={:?}, folder={}, mp3={}, continue={}, overwrite={}, metadata={}, tool_path={:?}",
              settings.kind, settings.download_folder, settings.convert_to_mp3, settings.continue_on_error,
              settings.overwrite_existing, settings.attach_metadata, settings.tool_path);
        Self::with_settings(settings)
    }
}

impl CloudGrab {
    /// Build the window state from saved settings
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            form: DownloadForm {
                kind: settings.kind,
                url: String::new(),
                folder: settings.download_folder,
                convert_to_mp3: settings.convert_to_mp3,
                continue_on_error: settings.continue_on_error,
                overwrite_existing: settings.overwrite_existing,
                attach_metadata: settings.attach_metadata,
            },
            tool_path: settings.tool_path,
            downloading: false,
            run_receiver: None,
            run_handle: None,
            last_outcome: None,
            log_lines: Vec::new(),
            status: "Ready.".to_string(),
            warning: None,
            settings_path: None,
        }
    }

    /// Snapshot of the persistent part of the form
    pub fn current_settings(&self) -> Settings {
        Settings {
            kind: self.form.kind,
            download_folder: self.form.folder.clone(),
            convert_to_mp3: self.form.convert_to_mp3,
            continue_on_error: self.form.continue_on_error,
            overwrite_existing: self.form.overwrite_existing,
            attach_metadata: self.form.attach_metadata,
            tool_path: self.tool_path.clone(),
        }
    }

    /// Save the current user settings to disk
    pub fn save_current_settings(&self) {
        let saved = match &self.settings_path {
            Some(path) => self.current_settings().save_to(path),
            None => self.current_settings().save(),
        };
        if let Err(e) = saved {
            warn!("Failed to save settings: {}", e);
        } else {
            debug!("Settings saved successfully");
        }
    }

    /// The tool path from the settings field, if one was entered
    pub fn tool_override(&self) -> Option<PathBuf> {
        let trimmed = self.tool_path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    /// Validate the form and launch a download run on a worker thread
    pub fn start_download(&mut self) {
        if self.downloading {
            warn!("Download requested while a run is active; ignoring");
            return;
        }

        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected download request: {:?}", e);
                self.warning = Some(e.to_string());
                return;
            }
        };

        info!("Starting {} download for {}", request.kind.as_str(), request.source_url);
        self.downloading = true;
        self.log_lines.clear();
        self.last_outcome = None;
        self.status = "Downloading...".to_string();

        let (handle, receiver) = ProcessRunner::spawn(request, self.tool_override());
        self.run_handle = Some(handle);
        self.run_receiver = Some(receiver);
    }

    /// Move worker output into the log; re-enable the form when the run ends
    pub fn poll_run_events(&mut self) {
        let Some(receiver) = &self.run_receiver else {
            return;
        };

        let mut finished = None;
        let mut disconnected = false;
        loop {
            match receiver.try_recv() {
                Ok(RunEvent::Line(line)) => self.log_lines.push(line),
                Ok(RunEvent::Finished(outcome)) => {
                    finished = Some(outcome);
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if finished.is_some() || disconnected {
            self.finish_run(finished);
        }
    }

    /// Return to the ready state, whatever the run's outcome
    fn finish_run(&mut self, outcome: Option<RunOutcome>) {
        self.downloading = false;
        self.run_receiver = None;
        if let Some(handle) = self.run_handle.take() {
            if handle.join().is_err() {
                error!("Download worker panicked");
            }
        }

        match outcome {
            Some(outcome) => {
                info!("Download run ended: {:?}", outcome);
                self.status = outcome.status_text();
                self.last_outcome = Some(outcome);
            }
            None => {
                error!("Download worker stopped without reporting an outcome");
                let message = "Download worker stopped unexpectedly".to_string();
                self.log_lines.push(LogLine::new(format!("❌ Error: {}", message), LineCategory::Error));
                self.status = format!("Download failed: {}", message);
                self.last_outcome = Some(RunOutcome::Failed(message));
            }
        }
    }

    /// Open the destination folder in the system file browser
    pub fn open_download_folder(&mut self) {
        let folder = self.form.folder.trim().to_string();
        if !Validation::is_valid_folder(&folder) {
            warn!("Open folder requested for missing folder: {}", folder);
            self.warning = Some("Download folder does not exist!".to_string());
            return;
        }
        if let Err(e) = Utils::open_folder(Path::new(&folder)) {
            warn!("Failed to open folder {}: {}", folder, e);
            self.warning = Some(format!("Could not open the download folder: {}", e));
        }
    }

    /// Apply a folder picked in the browse dialog
    pub fn set_download_folder(&mut self, folder: PathBuf) {
        self.form.folder = folder.to_string_lossy().to_string();
        info!("Download folder set to {}", self.form.folder);
        self.save_current_settings();
    }

    /// Persist a typed change to the folder field
    pub fn folder_edited(&mut self) {
        debug!("(Download Folder) changed to: {}", self.form.folder);
        self.save_current_settings();
    }

    /// Persist a typed change to the scdl path field
    pub fn tool_path_edited(&mut self) {
        info!("(scdl path) changed to: {:?}", self.tool_path);
        self.save_current_settings();
    }

    /// Text of the download button for the current state
    pub fn download_button_text(&self) -> &'static str {
        if self.downloading {
            "⏳ Downloading..."
        } else {
            "⬇ Download"
        }
    }

    pub fn is_downloading(&self) -> bool { self.downloading }
    pub fn get_status(&self) -> &str { &self.status }
    pub fn get_log_lines(&self) -> &[LogLine] { &self.log_lines }
    pub fn get_last_outcome(&self) -> Option<&RunOutcome> { self.last_outcome.as_ref() }
    pub fn take_warning(&mut self) -> Option<String> { self.warning.take() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::DownloadKind;

    fn app() -> CloudGrab {
        let temp_dir = std::env::temp_dir().join("cloudgrab-tests");
        CloudGrab::with_settings(Settings {
            download_folder: temp_dir.to_string_lossy().to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_url_does_not_start() {
        let mut app = app();
        app.start_download();

        assert!(!app.is_downloading());
        assert!(app.run_receiver.is_none());
        assert_eq!(app.take_warning().as_deref(), Some("Please enter a valid SoundCloud URL!"));
        assert_eq!(app.download_button_text(), "⬇ Download");
    }

    #[test]
    fn test_placeholder_url_does_not_start() {
        let mut app = app();
        app.form.url = DownloadKind::Playlist.placeholder().to_string();
        app.start_download();

        assert!(!app.is_downloading());
        assert!(app.run_handle.is_none());
        assert!(app.take_warning().is_some());
    }

    #[test]
    fn test_form_round_trips_through_settings() {
        let mut app = app();
        app.form.kind = DownloadKind::Likes;
        app.form.attach_metadata = false;
        app.tool_path = " /opt/scdl ".to_string();

        let restored = CloudGrab::with_settings(app.current_settings());
        assert_eq!(restored.form.kind, DownloadKind::Likes);
        assert!(!restored.form.attach_metadata);
        assert_eq!(restored.tool_override(), Some(PathBuf::from("/opt/scdl")));
    }

    #[test]
    fn test_blank_tool_path_means_lookup() {
        let mut app = app();
        app.tool_path = "   ".to_string();
        assert_eq!(app.tool_override(), None);
    }

    #[test]
    fn test_open_missing_folder_warns() {
        let mut app = app();
        app.form.folder = "/definitely/not/a/real/folder".to_string();
        app.open_download_folder();
        assert_eq!(app.take_warning().as_deref(), Some("Download folder does not exist!"));
    }

    #[test]
    fn test_typed_edits_are_saved_immediately() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        let mut app = app();
        app.settings_path = Some(path.clone());

        app.form.folder = "/music/soundcloud".to_string();
        app.folder_edited();
        assert_eq!(Settings::load_from(&path).unwrap().download_folder, "/music/soundcloud");

        app.tool_path = "/opt/scdl/bin/scdl".to_string();
        app.tool_path_edited();
        let saved = Settings::load_from(&path).unwrap();
        assert_eq!(saved.tool_path, "/opt/scdl/bin/scdl");
        assert_eq!(saved.download_folder, "/music/soundcloud");
    }

    #[test]
    fn test_worker_panic_restores_button() {
        let mut app = app();
        let (tx, rx) = std::sync::mpsc::channel::<RunEvent>();
        let handle = std::thread::spawn(move || {
            let _events = tx;
            panic!("worker died before reporting");
        });
        while !handle.is_finished() {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        app.downloading = true;
        app.run_receiver = Some(rx);
        app.run_handle = Some(handle);

        app.poll_run_events();

        assert!(!app.is_downloading());
        assert!(app.run_handle.is_none());
        assert_eq!(app.download_button_text(), "⬇ Download");
        let last = app.get_log_lines().last().unwrap();
        assert_eq!(last.text, "❌ Error: Download worker stopped unexpectedly");
        assert_eq!(last.category, LineCategory::Error);
        assert!(matches!(app.get_last_outcome(), Some(RunOutcome::Failed(_))));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use crate::test_support::{fake_tool, process_lock};
        use std::time::{Duration, Instant};

        fn run_to_completion(app: &mut CloudGrab) {
            let deadline = Instant::now() + Duration::from_secs(20);
            while app.is_downloading() {
                assert!(Instant::now() < deadline, "download run did not finish");
                app.poll_run_events();
                std::thread::sleep(Duration::from_millis(10));
            }
        }

        fn app_with_tool(dir: &std::path::Path, body: &str) -> CloudGrab {
            let mut app = app();
            app.tool_path = fake_tool(dir, body).to_string_lossy().to_string();
            app.form.folder = dir.join("downloads").to_string_lossy().to_string();
            app.form.url = "https://soundcloud.com/a/b".to_string();
            app
        }

        #[test]
        fn test_successful_run_restores_button() {
            let _guard = process_lock();
            let temp_dir = tempfile::tempdir().unwrap();
            let mut app = app_with_tool(temp_dir.path(), "echo 'Track Downloaded'\nexit 0");

            app.start_download();
            assert!(app.is_downloading());
            assert_eq!(app.download_button_text(), "⏳ Downloading...");
            run_to_completion(&mut app);

            assert_eq!(app.get_last_outcome(), Some(&RunOutcome::Success));
            assert_eq!(app.download_button_text(), "⬇ Download");
            assert!(app.run_handle.is_none());
            assert!(app.get_log_lines().iter().any(|l| l.text == "✅ Track Downloaded"));
            assert!(temp_dir.path().join("downloads").is_dir());
        }

        #[test]
        fn test_failed_run_restores_button() {
            let _guard = process_lock();
            let temp_dir = tempfile::tempdir().unwrap();
            let mut app = app_with_tool(temp_dir.path(), "exit 1");

            app.start_download();
            run_to_completion(&mut app);

            assert_eq!(app.get_last_outcome(), Some(&RunOutcome::ExitCode(1)));
            assert!(app.get_status().contains('1'));
            assert!(app.get_log_lines().iter().any(|l| l.text == "❌ Process exited with code 1"));
        }

        #[test]
        fn test_missing_tool_restores_button() {
            let _guard = process_lock();
            let temp_dir = tempfile::tempdir().unwrap();
            let mut app = app();
            app.tool_path = temp_dir.path().join("missing-scdl").to_string_lossy().to_string();
            app.form.url = "https://soundcloud.com/a/b".to_string();

            app.start_download();
            run_to_completion(&mut app);

            assert!(matches!(app.get_last_outcome(), Some(RunOutcome::ToolNotFound { .. })));
            assert!(!app.is_downloading());
        }

        #[test]
        fn test_new_run_clears_previous_log() {
            let _guard = process_lock();
            let temp_dir = tempfile::tempdir().unwrap();
            let mut app = app_with_tool(temp_dir.path(), "echo 'Track 3 of 10'");

            app.start_download();
            run_to_completion(&mut app);
            let first_len = app.get_log_lines().len();

            app.start_download();
            run_to_completion(&mut app);
            assert_eq!(app.get_log_lines().len(), first_len);
        }
    }
}
