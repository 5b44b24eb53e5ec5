//! Small modal windows: load progress and the picked point's attributes.

use egui::Align2;

use crate::state::{Command, PointPopup};

pub const LOADING_TEXT: &str = "Loading map and data...";

pub fn show_progress(ctx: &egui::Context) {
    egui::Window::new("GeoTrack Visualizer")
        .collapsible(false)
        .resizable(false)
        .title_bar(true)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(LOADING_TEXT);
            });
        });
    // Keep the spinner animating while the worker runs
    ctx.request_repaint();
}

/// "Point Attributes" window. Returns `DismissPopup` when closed.
pub fn show_point_popup(ctx: &egui::Context, popup: &PointPopup) -> Option<Command> {
    let mut command = None;
    egui::Window::new("Point Attributes")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            for line in &popup.lines {
                ui.label(line);
            }
            ui.separator();
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    command = Some(Command::DismissPopup);
                }
            });
        });
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        command = Some(Command::DismissPopup);
    }
    command
}
