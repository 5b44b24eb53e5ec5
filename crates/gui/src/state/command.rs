//! Commands flowing into [`AppState::apply`](super::AppState::apply) and the
//! effects it asks the shell to run.

use std::path::PathBuf;

use geotrack_colormap::MapStyle;
use geotrack_core::MapScene;

use crate::toolbar::ToolbarAction;

/// A user or background event.
#[derive(Debug)]
pub enum Command {
    /// "Start Application" on the welcome screen.
    StartApplication,
    DirectoryResolved(String),
    /// "Historical Tracking": open the file-selection dialog.
    OpenFileDialog,
    BrowseTiff,
    BrowseGeojson,
    /// A raster picker closed. `generation` identifies the dialog it was
    /// opened from; `path` is `None` when cancelled.
    TiffPicked { generation: u64, path: Option<PathBuf> },
    GeojsonPicked { generation: u64, path: Option<PathBuf> },
    ConfirmFiles,
    CancelFiles,
    SceneLoaded(Box<MapScene>),
    SetDarkMode(bool),
    SetMapStyle(MapStyle),
    Toolbar(ToolbarAction),
    /// Scale the view around a fixed map point.
    ZoomAt { factor: f64, anchor: (f64, f64) },
    /// Shift the view by a map-space offset.
    PanBy { dx: f64, dy: f64 },
    /// Zoom to the rectangle between two map points.
    ZoomToRect { a: (f64, f64), b: (f64, f64) },
    HoverMarker(Option<usize>),
    PickMarker(usize),
    SelectRow(usize),
    /// The table has scrolled the selected row into view.
    RowRevealed,
    DismissPopup,
}

/// Side effects the egui shell performs after a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Resize and retitle the window for the main screen.
    ShowMainWindow,
    /// Read the config, prompting for a folder if needed.
    ResolveDirectory,
    PickTiff { directory: String, generation: u64 },
    PickGeojson { directory: String, generation: u64 },
    /// Load both files on a worker thread.
    LoadScene { raster: PathBuf, points: PathBuf },
    ApplyTheme { dark: bool },
    /// The raster texture must be rebuilt.
    InvalidateRaster,
    /// Render the current view and ask where to save it as PNG.
    SaveImage,
}
