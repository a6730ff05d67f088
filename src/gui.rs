//! GUI rendering components for the CloudGrab downloader front-end
//!
//! This module contains all the UI rendering methods and the eframe entry point.

use eframe::egui;
use rfd::FileDialog;
use crate::{
    config::{APP_VERSION, TOOL_ENV_VAR},
    data_structures::{CloudGrab, DownloadKind, LineCategory},
    info, debug,
};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(255, 85, 0); // #ff5500
const SUBTLE: egui::Color32 = egui::Color32::from_rgb(170, 170, 170); // #aaaaaa
const LOG_BG: egui::Color32 = egui::Color32::from_rgb(61, 61, 61); // #3d3d3d

/// Log text color for a line category
pub fn category_color(category: LineCategory) -> Option<egui::Color32> {
    match category {
        LineCategory::Error => Some(egui::Color32::from_rgb(255, 68, 68)), // #ff4444
        LineCategory::Success => Some(egui::Color32::from_rgb(68, 255, 68)), // #44ff44
        LineCategory::Info => Some(egui::Color32::from_rgb(68, 136, 255)), // #4488ff
        LineCategory::Warning => Some(egui::Color32::from_rgb(255, 170, 0)), // #ffaa00
        LineCategory::Plain => None,
    }
}

impl CloudGrab {
    /// Render the application header
    pub fn render_header(&self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new(format!("🎵 CloudGrab v{}", APP_VERSION)).color(ACCENT).size(24.0).strong());
        ui.label(egui::RichText::new("Download your favorite tracks and playlists").color(SUBTLE).small());
        ui.add_space(10.0);
    }

    /// Render the download kind radio buttons
    pub fn render_kind_selection(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Download Type").color(ACCENT).strong());
            ui.horizontal(|ui| {
                let mut changed = false;
                for kind in DownloadKind::ALL {
                    changed |= ui.radio_value(&mut self.form.kind, kind, kind.label()).changed();
                }
                if changed {
                    info!("(Download Type) changed to: {}", self.form.kind.as_str());
                    self.save_current_settings();
                }
            });
        });
    }

    /// Render the URL input; the hint follows the selected kind
    pub fn render_url_input(&mut self, ui: &mut egui::Ui) {
        ui.label("SoundCloud URL");
        ui.add(
            egui::TextEdit::singleline(&mut self.form.url)
                .hint_text(self.form.kind.placeholder())
                .desired_width(f32::INFINITY),
        );
    }

    /// Render folder selection interface
    pub fn render_folder_selection(&mut self, ui: &mut egui::Ui) {
        ui.label("Download Folder");
        ui.horizontal(|ui| {
            let browse = ui.button("📁 Browse");
            let folder_response = ui.add(
                egui::TextEdit::singleline(&mut self.form.folder).desired_width(ui.available_width()),
            );
            if folder_response.changed() {
                self.folder_edited();
            }
            if browse.clicked() {
                let mut dialog = FileDialog::new();
                if self.form.folder.trim().is_empty() {
                    debug!("Browsing without a starting folder");
                } else {
                    dialog = dialog.set_directory(self.form.folder.trim());
                }
                if let Some(folder) = dialog.pick_folder() {
                    self.set_download_folder(folder);
                }
            }
        });
    }

    /// Render the four download option checkboxes
    pub fn render_options(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Download Options").color(ACCENT).strong());
            let mut changed = false;
            egui::Grid::new("download_options").num_columns(2).spacing([40.0, 6.0]).show(ui, |ui| {
                changed |= ui.checkbox(&mut self.form.convert_to_mp3, "Convert to MP3").changed();
                changed |= ui.checkbox(&mut self.form.continue_on_error, "Continue on error").changed();
                ui.end_row();
                changed |= ui.checkbox(&mut self.form.overwrite_existing, "Overwrite existing files").changed();
                changed |= ui.checkbox(&mut self.form.attach_metadata, "Add metadata tags").changed();
                ui.end_row();
            });
            if changed {
                info!("Options changed: mp3={}, continue={}, overwrite={}, metadata={}",
                      self.form.convert_to_mp3, self.form.continue_on_error,
                      self.form.overwrite_existing, self.form.attach_metadata);
                self.save_current_settings();
            }
        });
    }

    /// Render the optional scdl location override
    pub fn render_tool_path(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("scdl path:");
            let response = ui
                .add(
                    egui::TextEdit::singleline(&mut self.tool_path)
                        .hint_text("found on PATH")
                        .desired_width(ui.available_width()),
                )
                .on_hover_text(format!("Leave empty to use {} or search PATH", TOOL_ENV_VAR));
            if response.changed() {
                self.tool_path_edited();
            }
        });
    }

    /// Render the download button, disabled while a run is active
    pub fn render_download_button(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(egui::RichText::new(self.download_button_text()).strong().size(16.0))
                .fill(ACCENT)
                .min_size(egui::vec2(160.0, 36.0));
            if ui.add_enabled(!self.is_downloading(), button).clicked() {
                info!("User clicked Download");
                self.start_download();
            }
        });
    }

    /// Render the colored output log
    pub fn render_log(&self, ui: &mut egui::Ui) {
        ui.label("Output Log");
        egui::Frame::none()
            .fill(LOG_BG)
            .inner_margin(egui::Margin::same(10.0))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .max_height((ui.available_height() - 40.0).max(120.0))
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in self.get_log_lines() {
                            let mut text = egui::RichText::new(&line.text).monospace();
                            if let Some(color) = category_color(line.category) {
                                text = text.color(color);
                            }
                            ui.add(egui::Label::new(text).wrap(true));
                        }
                    });
            });
    }

    /// Render the bottom row: open folder button and status
    pub fn render_footer(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("📂 Open Download Folder").clicked() {
                self.open_download_folder();
            }
            let status_color = match self.get_last_outcome() {
                Some(outcome) if outcome.is_success() => category_color(LineCategory::Success),
                Some(_) if !self.is_downloading() => category_color(LineCategory::Error),
                _ => None,
            };
            let mut status = egui::RichText::new(self.get_status());
            if let Some(color) = status_color {
                status = status.color(color);
            }
            ui.label(status);
            if self.is_downloading() {
                ui.spinner();
            }
        });
    }

    /// Render a modal-style warning, if one is pending
    pub fn render_warning(&mut self, ctx: &egui::Context) {
        let Some(message) = self.warning.clone() else {
            return;
        };
        egui::Window::new("Warning")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.take_warning();
                }
            });
    }
}

impl eframe::App for CloudGrab {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_run_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui);
            self.render_kind_selection(ui);
            ui.add_space(8.0);
            self.render_url_input(ui);
            ui.add_space(8.0);
            self.render_folder_selection(ui);
            ui.add_space(8.0);
            self.render_options(ui);
            ui.add_space(4.0);
            self.render_tool_path(ui);
            ui.add_space(8.0);
            self.render_download_button(ui);
            ui.separator();
            self.render_log(ui);
            ui.add_space(5.0);
            self.render_footer(ui);
        });

        self.render_warning(ctx);

        if self.is_downloading() {
            // Keep draining worker output while a run is active
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_current_settings();
        if self.is_downloading() {
            info!("Application closed while a download was running");
        }
        info!("Application closed by user");
        info!("");
        info!("---------------------------------------------------------------");
        info!("");
    }
}
