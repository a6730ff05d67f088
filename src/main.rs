//! CloudGrab - SoundCloud Downloader
//!
//! A desktop front-end for the scdl command-line downloader.
//! Built with Rust and egui for cross-platform (Windows, Linux & macOS)

#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use cloudgrab::{info, setup_logging, shutdown_logging, CloudGrab, MIN_WINDOW_SIZE, WINDOW_SIZE};

// Third-party crate imports
use eframe::egui;

/// Initialize the application with logging and configuration
fn initialize_app() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = setup_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting CloudGrab application");
    Ok(())
}

/// Configure the application window
fn configure_window() -> eframe::NativeOptions {
    let viewport_builder = egui::ViewportBuilder::default()
        .with_inner_size(WINDOW_SIZE)
        .with_decorations(true)
        .with_resizable(true)
        .with_min_inner_size(MIN_WINDOW_SIZE); // Minimum window size to prevent UI elements from disappearing

    eframe::NativeOptions {
        viewport: viewport_builder,
        centered: true,
        ..Default::default()
    }
}

/// Dark theme with the SoundCloud orange accent
fn configure_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();

    visuals.override_text_color = Some(egui::Color32::from_rgb(255, 255, 255)); // #ffffff
    visuals.panel_fill = egui::Color32::from_rgb(30, 30, 30); // #1e1e1e
    visuals.window_fill = egui::Color32::from_rgb(45, 45, 45); // #2d2d2d
    visuals.extreme_bg_color = egui::Color32::from_rgb(61, 61, 61); // #3d3d3d (text inputs)
    visuals.widgets.inactive.bg_fill = egui::Color32::from_rgb(45, 45, 45); // #2d2d2d
    visuals.widgets.inactive.weak_bg_fill = egui::Color32::from_rgb(45, 45, 45);
    visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(255, 106, 26); // #ff6a1a
    visuals.widgets.active.bg_fill = egui::Color32::from_rgb(204, 68, 0); // #cc4400
    visuals.selection.bg_fill = egui::Color32::from_rgb(255, 85, 0); // #ff5500
    visuals.hyperlink_color = egui::Color32::from_rgb(255, 85, 0);
    visuals.warn_fg_color = egui::Color32::from_rgb(255, 170, 0); // #ffaa00
    visuals.error_fg_color = egui::Color32::from_rgb(255, 68, 68); // #ff4444

    ctx.set_visuals(visuals);
}

fn main() {
    if let Err(e) = initialize_app() {
        eprintln!("Failed to initialize application: {}", e);
        return;
    }

    let native_options = configure_window();

    info!("Initializing GUI with window size: {}x{}", WINDOW_SIZE[0], WINDOW_SIZE[1]);

    let result = eframe::run_native(
        "CloudGrab",
        native_options,
        Box::new(|cc| {
            configure_visuals(&cc.egui_ctx);

            info!("GUI initialized successfully");
            Box::new(CloudGrab::default())
        }),
    );

    // Flush the log file before leaving
    shutdown_logging();

    result.expect("Failed to start eframe");
}
