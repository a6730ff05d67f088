//! CloudGrab - SoundCloud Downloader Library
//!
//! This library provides the core functionality for building scdl command
//! lines, running scdl with live output capture, and classifying its output.

pub mod config;
pub mod data_structures;
pub mod logging;
pub mod settings;
pub mod command_builder;
pub mod line_classifier;
pub mod process_runner;
pub mod app;
pub mod gui;
pub mod helper_functions;

#[cfg(all(test, unix))]
mod test_support;

// Re-export commonly used items
pub use config::*;
pub use data_structures::*;
pub use logging::*;
pub use settings::*;
pub use command_builder::*;
pub use line_classifier::*;
pub use process_runner::*;
pub use helper_functions::*;
