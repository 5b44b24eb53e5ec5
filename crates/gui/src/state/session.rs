//! The single application-state record and its transition function.
//!
//! Rendering code only reads [`AppState`]; every change goes through
//! [`AppState::apply`], which returns the [`Effect`]s the shell has to run.

use std::path::{Path, PathBuf};

use geotrack_colormap::MapStyle;
use geotrack_core::view::ViewBounds;
use geotrack_core::MapScene;
use tracing::debug;

use super::command::{Command, Effect};
use crate::toolbar::ToolbarAction;

/// Zoom-in toolbar factor applied to both spans.
const ZOOM_IN_FACTOR: f64 = 0.5;
const ZOOM_OUT_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Main,
}

/// Drag tool toggled from the navigation toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavTool {
    #[default]
    None,
    Pan,
    ZoomRect,
}

/// Paths chosen so far in the "Select Files" dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileSelection {
    pub tiff_path: Option<PathBuf>,
    pub geojson_path: Option<PathBuf>,
    /// A native picker opened from this dialog has not closed yet.
    pub picking: bool,
}

impl FileSelection {
    /// Status label shown next to a picker row.
    pub fn status(path: Option<&Path>) -> String {
        match path.and_then(Path::file_name) {
            Some(name) => format!("Selected: {}", name.to_string_lossy()),
            None => "No file selected".to_string(),
        }
    }
}

/// View window and marker interaction for the current scene.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewState {
    pub view: ViewBounds,
    pub tool: NavTool,
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
    /// Set when the table should scroll the selected row into view.
    pub reveal_selected: bool,
}

impl MapViewState {
    pub fn new(view: ViewBounds) -> Self {
        Self {
            view,
            tool: NavTool::None,
            selected: None,
            hovered: None,
            reveal_selected: false,
        }
    }
}

impl Default for MapViewState {
    fn default() -> Self {
        Self::new(ViewBounds::new(0.0, 1.0, 0.0, 1.0))
    }
}

/// Contents of the "Point Attributes" window.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPopup {
    pub row: usize,
    pub lines: Vec<String>,
}

pub struct AppState {
    pub screen: Screen,
    pub dark_mode: bool,
    pub map_style: MapStyle,
    /// `None` until the directory resolver has reported back.
    pub default_dir: Option<String>,
    /// Open "Select Files" dialog.
    pub file_dialog: Option<FileSelection>,
    /// Bumped each time a "Select Files" dialog opens; picker results
    /// carry it so a closed dialog's picks are dropped.
    dialog_generation: u64,
    pub loading: bool,
    pub scene: Option<MapScene>,
    pub view: MapViewState,
    pub popup: Option<PointPopup>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Welcome,
            dark_mode: false,
            map_style: MapStyle::Default,
            default_dir: None,
            file_dialog: None,
            dialog_generation: 0,
            loading: false,
            scene: None,
            view: MapViewState::default(),
            popup: None,
        }
    }
}

impl AppState {
    /// Whether the main controls accept input.
    pub fn is_interactive(&self) -> bool {
        self.screen == Screen::Main
            && !self.loading
            && self.file_dialog.is_none()
            && self.popup.is_none()
    }

    /// Browse directory handed to the native pickers.
    fn browse_dir(&self) -> String {
        self.default_dir.clone().unwrap_or_default()
    }

    /// Open a fresh "Select Files" dialog.
    fn open_file_dialog(&mut self) {
        self.dialog_generation += 1;
        self.file_dialog = Some(FileSelection::default());
    }

    /// Mark the open dialog as picking; `false` if no picker may start now.
    fn start_picking(&mut self) -> bool {
        match self.file_dialog.as_mut() {
            Some(dialog) if !dialog.picking => {
                dialog.picking = true;
                true
            }
            _ => false,
        }
    }

    /// The dialog a picker result belongs to, if it is still open.
    fn picked_into(&mut self, generation: u64) -> Option<&mut FileSelection> {
        if generation != self.dialog_generation {
            debug!("Dropping picker result from a closed dialog");
            return None;
        }
        let dialog = self.file_dialog.as_mut()?;
        dialog.picking = false;
        Some(dialog)
    }

    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        debug!("apply {:?}", command);
        match command {
            Command::StartApplication => {
                if self.screen != Screen::Welcome {
                    return Vec::new();
                }
                self.screen = Screen::Main;
                vec![Effect::ShowMainWindow, Effect::ResolveDirectory]
            }
            Command::DirectoryResolved(dir) => {
                self.default_dir = Some(dir);
                Vec::new()
            }
            Command::OpenFileDialog => {
                if self.screen == Screen::Main && !self.loading && self.file_dialog.is_none() {
                    self.open_file_dialog();
                }
                Vec::new()
            }
            Command::BrowseTiff => {
                if !self.start_picking() {
                    return Vec::new();
                }
                vec![Effect::PickTiff {
                    directory: self.browse_dir(),
                    generation: self.dialog_generation,
                }]
            }
            Command::BrowseGeojson => {
                if !self.start_picking() {
                    return Vec::new();
                }
                vec![Effect::PickGeojson {
                    directory: self.browse_dir(),
                    generation: self.dialog_generation,
                }]
            }
            Command::TiffPicked { generation, path } => {
                if let (Some(dialog), Some(path)) = (self.picked_into(generation), path) {
                    dialog.tiff_path = Some(path);
                }
                Vec::new()
            }
            Command::GeojsonPicked { generation, path } => {
                if let (Some(dialog), Some(path)) = (self.picked_into(generation), path) {
                    dialog.geojson_path = Some(path);
                }
                Vec::new()
            }
            Command::ConfirmFiles => {
                if !matches!(&self.file_dialog, Some(dialog) if !dialog.picking) {
                    return Vec::new();
                }
                let Some(selection) = self.file_dialog.take() else {
                    return Vec::new();
                };
                self.clear_scene();
                self.loading = true;
                vec![
                    Effect::InvalidateRaster,
                    Effect::LoadScene {
                        raster: selection.tiff_path.unwrap_or_default(),
                        points: selection.geojson_path.unwrap_or_default(),
                    },
                ]
            }
            Command::CancelFiles => {
                self.file_dialog = None;
                Vec::new()
            }
            Command::SceneLoaded(scene) => {
                self.loading = false;
                self.view = MapViewState::new(scene.home);
                self.popup = None;
                self.scene = Some(*scene);
                vec![Effect::InvalidateRaster]
            }
            Command::SetDarkMode(dark) => {
                self.dark_mode = dark;
                vec![Effect::ApplyTheme { dark }]
            }
            Command::SetMapStyle(style) => {
                if style == self.map_style {
                    return Vec::new();
                }
                self.map_style = style;
                vec![Effect::InvalidateRaster]
            }
            Command::Toolbar(action) => self.apply_toolbar(action),
            Command::ZoomAt { factor, anchor } => {
                if factor.is_finite() && factor > 0.0 {
                    self.view.view = self.view.view.zoom_at(factor, anchor);
                }
                Vec::new()
            }
            Command::PanBy { dx, dy } => {
                if dx.is_finite() && dy.is_finite() {
                    self.view.view = self.view.view.pan(dx, dy);
                }
                Vec::new()
            }
            Command::ZoomToRect { a, b } => {
                if let Some(view) = ViewBounds::zoom_to_rect(a, b) {
                    self.view.view = view;
                }
                Vec::new()
            }
            Command::HoverMarker(index) => {
                self.view.hovered = index;
                Vec::new()
            }
            Command::PickMarker(index) => {
                let Some(scene) = self.scene.as_ref() else {
                    return Vec::new();
                };
                if index >= scene.marker_count() {
                    return Vec::new();
                }
                let lines = scene
                    .table
                    .as_ref()
                    .map(|table| table.row_details(index))
                    .unwrap_or_default();
                self.view.selected = Some(index);
                self.view.reveal_selected = true;
                self.popup = Some(PointPopup { row: index, lines });
                Vec::new()
            }
            Command::SelectRow(index) => {
                let rows = self
                    .scene
                    .as_ref()
                    .and_then(|s| s.table.as_ref())
                    .map_or(0, |t| t.row_count());
                if index < rows {
                    self.view.selected = Some(index);
                }
                Vec::new()
            }
            Command::RowRevealed => {
                self.view.reveal_selected = false;
                Vec::new()
            }
            Command::DismissPopup => {
                self.popup = None;
                Vec::new()
            }
        }
    }

    fn apply_toolbar(&mut self, action: ToolbarAction) -> Vec<Effect> {
        let Some(scene) = self.scene.as_ref() else {
            return Vec::new();
        };
        match action {
            ToolbarAction::Reset => self.view.view = scene.home,
            ToolbarAction::Pan => self.view.tool = toggle(self.view.tool, NavTool::Pan),
            ToolbarAction::ZoomIn => self.view.view = self.view.view.zoom(ZOOM_IN_FACTOR),
            ToolbarAction::ZoomOut => self.view.view = self.view.view.zoom(ZOOM_OUT_FACTOR),
            ToolbarAction::ZoomRect => {
                self.view.tool = toggle(self.view.tool, NavTool::ZoomRect)
            }
            ToolbarAction::Clear => {
                self.clear_scene();
                self.open_file_dialog();
                return vec![Effect::InvalidateRaster];
            }
            ToolbarAction::SaveImage => return vec![Effect::SaveImage],
        }
        Vec::new()
    }

    fn clear_scene(&mut self) {
        self.scene = None;
        self.popup = None;
        self.view = MapViewState::default();
    }
}

fn toggle(current: NavTool, tool: NavTool) -> NavTool {
    if current == tool {
        NavTool::None
    } else {
        tool
    }
}
