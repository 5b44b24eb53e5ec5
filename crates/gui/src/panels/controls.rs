//! Top controls: mode buttons and settings.

use egui::{Button, RichText, Ui};

use geotrack_colormap::MapStyle;

use crate::state::{AppState, Command};
use crate::theme::{themed_tooltip, ThemeStyles};

const LIVE_TOOLTIP: &str = "Live tracking functionality is currently disabled in this version";
const HISTORICAL_TOOLTIP: &str = "Load historical tracking data from TIFF and GeoJSON files";

/// Draw the controls row. Returns the command raised, if any.
pub fn show_controls(ui: &mut Ui, state: &AppState, styles: &ThemeStyles) -> Option<Command> {
    let mut command = None;

    ui.add_enabled_ui(state.is_interactive(), |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Mode:").strong().color(styles.label));

            let live = Button::new(
                RichText::new("Live Tracking").color(styles.disabled_button.text),
            )
            .fill(styles.disabled_button.fill);
            themed_tooltip(ui.add_enabled(false, live), LIVE_TOOLTIP, styles);

            let historical = Button::new(
                RichText::new("Historical Tracking").color(styles.active_button.text),
            )
            .fill(styles.active_button.fill);
            // Waits for the directory resolver so pickers open in the right place
            let ready = state.default_dir.is_some();
            let response = themed_tooltip(
                ui.add_enabled(ready, historical),
                HISTORICAL_TOOLTIP,
                styles,
            );
            if response.clicked() {
                command = Some(Command::OpenFileDialog);
            }

            ui.separator();
            ui.label(RichText::new("Settings:").strong().color(styles.label));

            let mut dark = state.dark_mode;
            if ui
                .checkbox(&mut dark, RichText::new("Dark Mode").color(styles.checkbox))
                .changed()
            {
                command = Some(Command::SetDarkMode(dark));
            }

            ui.label(RichText::new("Map Style:").color(styles.label));
            if let Some(style) = map_style_selector(ui, state.map_style, styles) {
                command = Some(Command::SetMapStyle(style));
            }
        });
    });

    command
}

fn map_style_selector(ui: &mut Ui, current: MapStyle, styles: &ThemeStyles) -> Option<MapStyle> {
    let mut picked = None;
    ui.scope(|ui| {
        let combo = styles.combo;
        let visuals = ui.visuals_mut();
        visuals.widgets.inactive.weak_bg_fill = combo.fill;
        visuals.widgets.inactive.bg_fill = combo.fill;
        visuals.widgets.hovered.weak_bg_fill = combo.selection;
        visuals.widgets.active.weak_bg_fill = combo.selection;
        visuals.selection.bg_fill = combo.selection;
        visuals.override_text_color = Some(combo.text);

        egui::ComboBox::from_id_salt("map_style")
            .selected_text(current.label())
            .show_ui(ui, |ui| {
                for style in MapStyle::ALL {
                    if ui
                        .selectable_label(*style == current, style.label())
                        .clicked()
                    {
                        picked = Some(*style);
                    }
                }
            });
    });
    picked.filter(|style| *style != current)
}
