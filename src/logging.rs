//! Asynchronous logging system for the CloudGrab application
//!
//! Log messages are handed to a background thread that appends them to a
//! file, so the UI thread never blocks on disk I/O. Every message is also
//! forwarded to the `log` facade, which `env_logger` prints to stderr when
//! `RUST_LOG` is set.

use std::io::Write;
use std::sync::Mutex;
use std::sync::mpsc;
use std::time::Duration;

/// Entries buffered before the writer thread flushes on its own
const FLUSH_THRESHOLD: usize = 10;

/// Asynchronous logger that writes to file without blocking the main thread
pub struct AsyncLogger {
    sender: mpsc::Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<()>>,
}

/// Types of log messages that can be sent to the logger
#[derive(Clone)]
pub enum LogMessage {
    Entry(log::Level, String),
    Shutdown,
}

impl AsyncLogger {
    /// Create a new async logger that writes to the platform log file
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let log_path = {
            #[cfg(windows)]
            {
                let exe_path = std::env::current_exe()?;
                let exe_dir = exe_path.parent().ok_or("Failed to get executable directory")?;
                exe_dir.join("cloudgrab_log.txt")
            }

            #[cfg(not(windows))]
            {
                let app_dir = match xdg::BaseDirectories::new() {
                    Ok(xdg_dirs) => xdg_dirs.get_cache_home().join("cloudgrab"),
                    Err(_) => {
                        let home_dir = dirs::home_dir().ok_or("Failed to get home directory")?;
                        home_dir.join(".cloudgrab")
                    }
                };
                std::fs::create_dir_all(&app_dir)?;
                app_dir.join("cloudgrab.log")
            }
        };

        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self::with_writer(log_file))
    }

    /// Create a logger that writes to any sink
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        let (tx, rx) = mpsc::channel();

        let handle = std::thread::spawn(move || {
            let mut file = std::io::BufWriter::new(writer);
            let mut pending = 0usize;

            loop {
                match rx.recv_timeout(Duration::from_millis(250)) {
                    Ok(LogMessage::Entry(level, msg)) => {
                        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                        let _ = writeln!(file, "[{} {}] {}", level, timestamp, msg);
                        pending += 1;
                        if pending >= FLUSH_THRESHOLD {
                            let _ = file.flush();
                            pending = 0;
                        }
                    }
                    Ok(LogMessage::Shutdown) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                        let _ = file.flush();
                        return;
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        if pending > 0 {
                            let _ = file.flush();
                            pending = 0;
                        }
                    }
                }
            }
        });

        AsyncLogger {
            sender: tx,
            handle: Some(handle),
        }
    }

    /// Send a log message to the async logger
    pub fn log(&self, level: log::Level, message: &str) {
        // A closed writer thread just drops the message
        let _ = self.sender.send(LogMessage::Entry(level, message.to_string()));
    }

    /// Gracefully shutdown the logger
    pub fn shutdown(mut self) {
        let _ = self.sender.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// Global logger instance
pub(crate) static LOGGER: Mutex<Option<AsyncLogger>> = Mutex::new(None);

/// Initialize the global logging system
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error>> {
    // Console output for development, silent unless RUST_LOG is set
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).try_init();

    let logger = AsyncLogger::new()?;
    let mut guard = LOGGER.lock().map_err(|e| format!("Failed to lock logger: {}", e))?;
    *guard = Some(logger);
    Ok(())
}

/// Flush and stop the global logger
pub fn shutdown_logging() {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(logger) = guard.take() {
            logger.shutdown();
        }
    }
}

/// Send a message to the global logger
pub fn log_message(level: log::Level, message: &str) {
    log::log!(target: "cloudgrab", level, "{}", message);
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = &*guard {
            logger.log(level, message);
        }
    }
}

// Custom log macros
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::logging::log_message(::log::Level::Info, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logging::log_message(::log::Level::Warn, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logging::log_message(::log::Level::Error, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::logging::log_message(::log::Level::Debug, &format!($($arg)*));
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_shutdown_flushes_entries() {
        let buffer = SharedBuffer::default();
        let logger = AsyncLogger::with_writer(buffer.clone());
        logger.log(log::Level::Info, "first");
        logger.log(log::Level::Warn, "second");
        logger.shutdown();

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[INFO "));
        assert!(lines[0].ends_with("] first"));
        assert!(lines[1].starts_with("[WARN "));
        assert!(lines[1].ends_with("] second"));
    }

    #[test]
    fn test_log_message_without_logger_is_noop() {
        log_message(log::Level::Debug, "nobody is listening");
    }
}
