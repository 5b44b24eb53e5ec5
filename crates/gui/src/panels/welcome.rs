//! Welcome screen shown before the main window.

use egui::{Button, Frame, Margin, RichText, Vec2};

use crate::theme::{ThemeStyles, ACCENT};

pub const WELCOME_TITLE: &str = "Welcome to GeoTrack Visualizer";

/// Onboarding sections as (heading, body) pairs.
const SECTIONS: &[(&str, &str)] = &[
    (
        "Getting started",
        "GeoTrack Visualizer overlays recorded tracking points on a georeferenced \
         map image and lists their attributes next to the map.",
    ),
    (
        "Historical tracking",
        "Click \"Historical Tracking\" and choose a GeoTIFF map (.tif, .tiff) and a \
         GeoJSON file (.geojson) of point features. Points are reprojected into the \
         map's coordinate system when the two differ.",
    ),
    (
        "Reading the map",
        "Red markers show the recorded points. When the data has a \"TN Bearing\" \
         attribute, a blue arrow shows the heading at each point. Hover a marker to \
         see its bearing, signal strength and time; click it to highlight the matching \
         table row and see all of its attributes.",
    ),
    (
        "Navigating",
        "Use the toolbar above the map to reset the view, pan, zoom in or out, or zoom \
         to a rectangle. The mouse wheel zooms around the cursor. \"Clear\" removes the \
         loaded data so you can pick new files.",
    ),
    (
        "Settings",
        "Toggle dark mode and pick a map style (Default, Terrain or Satellite) from the \
         top bar. The folder you choose on first start is remembered as the default \
         location for file selection.",
    ),
];

/// Draw the welcome screen. Returns true when "Start Application" is clicked.
pub fn show_welcome(ctx: &egui::Context, styles: &ThemeStyles) -> bool {
    let mut start = false;

    egui::TopBottomPanel::bottom("welcome_actions")
        .frame(Frame::none().fill(styles.welcome_bg).inner_margin(Margin::same(16.0)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let button = Button::new(
                    RichText::new("Start Application")
                        .size(16.0)
                        .color(egui::Color32::WHITE),
                )
                .fill(ACCENT)
                .min_size(Vec2::new(200.0, 50.0));
                start = ui.add(button).clicked();
            });
        });

    egui::CentralPanel::default()
        .frame(Frame::none().fill(styles.welcome_bg).inner_margin(Margin::same(24.0)))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading(RichText::new(WELCOME_TITLE).color(styles.welcome_text));
                    ui.add_space(12.0);
                    for (heading, body) in SECTIONS {
                        ui.label(
                            RichText::new(*heading)
                                .strong()
                                .size(15.0)
                                .color(styles.welcome_text),
                        );
                        ui.label(RichText::new(*body).color(styles.welcome_text));
                        ui.add_space(10.0);
                    }
                });
        });

    start
}
