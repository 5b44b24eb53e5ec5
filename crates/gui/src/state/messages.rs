//! Application messages for inter-thread communication.

use std::path::PathBuf;

use geotrack_core::MapScene;

/// Messages sent from background threads to the main UI loop.
pub enum AppMessage {
    /// The default browse directory was read from config or picked.
    DirectoryResolved(String),
    /// The raster picker opened from dialog `generation` closed.
    /// `None` when cancelled.
    TiffPicked(u64, Option<PathBuf>),
    /// The GeoJSON picker opened from dialog `generation` closed.
    GeojsonPicked(u64, Option<PathBuf>),
    /// Both files were loaded (or failed) and the scene is ready to draw.
    SceneLoaded(Box<MapScene>),
    /// The save dialog closed. The written path, or `None` when cancelled
    /// or the write failed.
    ImageSaved(Option<PathBuf>),
}
