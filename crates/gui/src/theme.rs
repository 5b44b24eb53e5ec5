//! Light and dark palettes for the controls, welcome screen and tooltips.

use egui::{Color32, Response, RichText, Stroke};

/// Tooltip background in dark mode.
pub const DARK_TOOLTIP_BG: Color32 = Color32::from_rgb(0x2a, 0x82, 0xda);
/// Fill of the active mode button and the start button.
pub const ACCENT: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Foreground/background pair for a button state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub text: Color32,
    pub fill: Color32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboStyle {
    pub fill: Color32,
    pub text: Color32,
    pub selection: Color32,
}

/// Colors of the styled widgets for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeStyles {
    pub dark: bool,
    pub label: Color32,
    pub disabled_button: ButtonStyle,
    pub active_button: ButtonStyle,
    pub checkbox: Color32,
    pub combo: ComboStyle,
    pub welcome_bg: Color32,
    pub welcome_text: Color32,
}

impl ThemeStyles {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                dark,
                label: Color32::WHITE,
                disabled_button: ButtonStyle {
                    text: Color32::from_rgb(0xaa, 0xaa, 0xaa),
                    fill: Color32::from_rgb(0x55, 0x55, 0x55),
                },
                active_button: ButtonStyle {
                    text: Color32::WHITE,
                    fill: ACCENT,
                },
                checkbox: Color32::WHITE,
                combo: ComboStyle {
                    fill: Color32::from_rgb(0x44, 0x44, 0x44),
                    text: Color32::WHITE,
                    selection: Color32::from_rgb(0x66, 0x66, 0x66),
                },
                welcome_bg: Color32::from_rgb(0x2d, 0x2d, 0x2d),
                welcome_text: Color32::WHITE,
            }
        } else {
            Self {
                dark,
                label: Color32::BLACK,
                disabled_button: ButtonStyle {
                    text: Color32::from_rgb(0x77, 0x77, 0x77),
                    fill: Color32::from_rgb(0xe0, 0xe0, 0xe0),
                },
                active_button: ButtonStyle {
                    text: Color32::BLACK,
                    fill: ACCENT,
                },
                checkbox: Color32::BLACK,
                combo: ComboStyle {
                    fill: Color32::WHITE,
                    text: Color32::BLACK,
                    selection: Color32::from_rgb(0xe0, 0xe0, 0xe0),
                },
                welcome_bg: Color32::from_rgb(0xf8, 0xf9, 0xfa),
                welcome_text: Color32::BLACK,
            }
        }
    }
}

/// Application-wide visuals for the given mode.
pub fn global_visuals(dark: bool) -> egui::Visuals {
    let mut visuals = if dark {
        let window = Color32::from_rgb(53, 53, 53);
        let highlight = Color32::from_rgb(42, 130, 218);
        let mut v = egui::Visuals::dark();
        v.window_fill = window;
        v.panel_fill = window;
        v.extreme_bg_color = Color32::from_rgb(25, 25, 25);
        v.faint_bg_color = Color32::from_rgb(66, 66, 66);
        v.hyperlink_color = highlight;
        v.selection.bg_fill = highlight;
        v.selection.stroke = Stroke::new(1.0, Color32::WHITE);
        v.override_text_color = Some(Color32::WHITE);
        v
    } else {
        egui::Visuals::light()
    };
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals
}

pub fn apply_global(ctx: &egui::Context, dark: bool) {
    ctx.set_visuals(global_visuals(dark));
}

/// Attach a hover tooltip, drawn in the dark palette when dark mode is on.
///
/// Works for enabled and disabled widgets alike.
pub fn themed_tooltip(response: Response, text: &str, styles: &ThemeStyles) -> Response {
    if !styles.dark {
        return response
            .on_hover_text(text)
            .on_disabled_hover_text(text);
    }
    let add_contents = |ui: &mut egui::Ui| {
        egui::Frame::none()
            .fill(DARK_TOOLTIP_BG)
            .stroke(Stroke::new(1.0, Color32::WHITE))
            .inner_margin(egui::Margin::same(4.0))
            .show(ui, |ui| {
                ui.label(RichText::new(text).color(Color32::WHITE));
            });
    };
    response
        .on_hover_ui(add_contents)
        .on_disabled_hover_ui(add_contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_styles() {
        let light = ThemeStyles::for_mode(false);
        let dark = ThemeStyles::for_mode(true);
        assert_ne!(light, dark);

        let mut dark_mode = false;
        for _ in 0..2 {
            dark_mode = !dark_mode;
        }
        assert_eq!(ThemeStyles::for_mode(dark_mode), light);
        assert_eq!(global_visuals(false), global_visuals(false));
        assert_ne!(global_visuals(true), global_visuals(false));
    }

    #[test]
    fn palettes_match_modes() {
        let dark = ThemeStyles::for_mode(true);
        assert_eq!(dark.combo.fill, Color32::from_rgb(0x44, 0x44, 0x44));
        assert_eq!(dark.active_button.fill, ACCENT);
        assert_eq!(dark.welcome_bg, Color32::from_rgb(0x2d, 0x2d, 0x2d));

        let light = ThemeStyles::for_mode(false);
        assert_eq!(light.label, Color32::BLACK);
        assert_eq!(light.disabled_button.fill, Color32::from_rgb(0xe0, 0xe0, 0xe0));
        assert_eq!(light.welcome_bg, Color32::from_rgb(0xf8, 0xf9, 0xfa));
    }
}
