//! "Select Files" dialog: one raster and one point file.

use egui::{Align2, RichText};

use crate::state::{Command, FileSelection};
use crate::theme::ThemeStyles;

/// Draw the dialog. Returns the command raised by its buttons.
pub fn show_file_select(
    ctx: &egui::Context,
    selection: &FileSelection,
    styles: &ThemeStyles,
) -> Option<Command> {
    let mut command = None;

    egui::Window::new("Select Files")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("file_select_rows")
                .num_columns(3)
                .spacing([12.0, 10.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("TIFF File:").color(styles.label));
                    ui.label(FileSelection::status(selection.tiff_path.as_deref()));
                    if browse_button(ui, selection) {
                        command = Some(Command::BrowseTiff);
                    }
                    ui.end_row();

                    ui.label(RichText::new("GeoJSON File:").color(styles.label));
                    ui.label(FileSelection::status(selection.geojson_path.as_deref()));
                    if browse_button(ui, selection) {
                        command = Some(Command::BrowseGeojson);
                    }
                    ui.end_row();
                });

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!selection.picking, egui::Button::new("OK"))
                    .clicked()
                {
                    command = Some(Command::ConfirmFiles);
                }
                if ui.button("Cancel").clicked() {
                    command = Some(Command::CancelFiles);
                }
            });
        });

    command
}

/// Browse buttons stay disabled while a picker is open.
fn browse_button(ui: &mut egui::Ui, selection: &FileSelection) -> bool {
    ui.add_enabled(!selection.picking, egui::Button::new("Browse..."))
        .clicked()
}
