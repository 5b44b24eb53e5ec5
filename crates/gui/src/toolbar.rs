//! Navigation toolbar shown above the map once data is loaded.

use egui::{Button, Color32, RichText, Ui};

use crate::icons::ToolbarIcons;
use crate::state::NavTool;
use crate::theme::{themed_tooltip, ThemeStyles};

/// One navigation toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Reset,
    Pan,
    ZoomIn,
    ZoomOut,
    ZoomRect,
    Clear,
    SaveImage,
}

/// Left-to-right button order.
pub const NAV_TOOLBAR: [ToolbarAction; 7] = [
    ToolbarAction::Reset,
    ToolbarAction::Pan,
    ToolbarAction::ZoomIn,
    ToolbarAction::ZoomOut,
    ToolbarAction::ZoomRect,
    ToolbarAction::Clear,
    ToolbarAction::SaveImage,
];

impl ToolbarAction {
    pub fn tooltip(&self) -> &'static str {
        match self {
            Self::Reset => {
                "Reset View: Return the map to its original extent and zoom level. \
                 Use this if you want to quickly see the entire map as it was loaded."
            }
            Self::Pan => {
                "Pan Map: Click and drag the map to move to different areas.\n\
                 Left-click: Move the map.\n\
                 Right-click: Move the map and zoom at the same time. \
                 Useful for exploring regions outside the current view."
            }
            Self::ZoomIn => {
                "Zoom In: Make the map view larger. \
                 Click to zoom in and see more detail in the current region."
            }
            Self::ZoomOut => {
                "Zoom Out: Make the map view smaller. \
                 Click to zoom out and see a larger area of the map."
            }
            Self::ZoomRect => {
                "Zoom to Rectangle: Drag to select a region to zoom into for a closer view."
            }
            Self::Clear => {
                "Clear: Remove all map overlays and uploaded data. \
                 Use this to reset the workspace and upload new files."
            }
            Self::SaveImage => "Save Map as Image: Save the current map view as a PNG file.",
        }
    }

    /// Icon file names under `icons/`, in order of preference.
    pub fn icon_files(&self) -> &'static [&'static str] {
        match self {
            Self::Reset => &["reset.png"],
            Self::Pan => &["pan_cursor.png", "pan.png"],
            Self::ZoomIn => &["plus.png"],
            Self::ZoomOut => &["minus.png"],
            Self::ZoomRect => &["zoom_rect.png"],
            Self::Clear => &["clear.png"],
            Self::SaveImage => &["save.png"],
        }
    }

    /// Text drawn when no icon could be loaded. ASCII only, so the
    /// default fonts always cover it.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Reset => "Home",
            Self::Pan => "Pan",
            Self::ZoomIn => "+",
            Self::ZoomOut => "-",
            Self::ZoomRect => "[ ]",
            Self::Clear => "X",
            Self::SaveImage => "Save",
        }
    }

    /// Drag tool toggled by this button, if any.
    pub fn tool(&self) -> Option<NavTool> {
        match self {
            Self::Pan => Some(NavTool::Pan),
            Self::ZoomRect => Some(NavTool::ZoomRect),
            _ => None,
        }
    }
}

const ICON_SIZE: f32 = 20.0;

/// Show the navigation toolbar. Returns the clicked action, if any.
pub fn show_toolbar(
    ui: &mut Ui,
    active_tool: NavTool,
    icons: &ToolbarIcons,
    styles: &ThemeStyles,
) -> Option<ToolbarAction> {
    let mut clicked = None;

    ui.horizontal(|ui| {
        for action in NAV_TOOLBAR {
            let checked = action.tool() == Some(active_tool);
            let button = match icons.get(action) {
                Some(texture) => Button::image(egui::Image::new((
                    texture.id(),
                    egui::vec2(ICON_SIZE, ICON_SIZE),
                ))),
                None => Button::new(
                    RichText::new(action.glyph())
                        .size(ICON_SIZE * 0.8)
                        .color(styles.label),
                ),
            }
            .selected(checked)
            .min_size(egui::vec2(ICON_SIZE + 8.0, ICON_SIZE + 8.0))
            .stroke(if checked {
                egui::Stroke::new(1.0, Color32::from_rgb(0x4C, 0xAF, 0x50))
            } else {
                egui::Stroke::NONE
            });

            let response = ui.add(button);
            if themed_tooltip(response, action.tooltip(), styles).clicked() {
                clicked = Some(action);
            }
        }
    });

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn toolbar_order_is_fixed() {
        assert_eq!(
            NAV_TOOLBAR,
            [
                ToolbarAction::Reset,
                ToolbarAction::Pan,
                ToolbarAction::ZoomIn,
                ToolbarAction::ZoomOut,
                ToolbarAction::ZoomRect,
                ToolbarAction::Clear,
                ToolbarAction::SaveImage,
            ]
        );
    }

    #[test]
    fn fallback_glyphs_are_ascii() {
        for action in NAV_TOOLBAR {
            assert!(action.glyph().is_ascii(), "{:?}", action);
            assert!(!action.glyph().is_empty());
        }
    }

    #[test]
    fn tooltips_are_distinct() {
        let tips: HashSet<_> = NAV_TOOLBAR.iter().map(|a| a.tooltip()).collect();
        assert_eq!(tips.len(), NAV_TOOLBAR.len());
        assert!(ToolbarAction::Reset.tooltip().starts_with("Reset View:"));
        assert!(ToolbarAction::Clear.tooltip().starts_with("Clear:"));
        assert_eq!(
            ToolbarAction::SaveImage.tooltip(),
            "Save Map as Image: Save the current map view as a PNG file."
        );
    }

    #[test]
    fn only_pan_and_rect_are_toggles() {
        let toggles: Vec<_> = NAV_TOOLBAR.iter().filter_map(|a| a.tool()).collect();
        assert_eq!(toggles, vec![NavTool::Pan, NavTool::ZoomRect]);
        assert_eq!(ToolbarAction::Pan.icon_files()[0], "pan_cursor.png");
    }
}
