//! Native dialogs (rfd) and the background scene load.
//!
//! Every function spawns a thread and reports back through `tx`, so the UI
//! keeps repainting while a dialog is open or files are being read.

use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use tracing::info;

use geotrack_core::config::{resolve_default_directory, SettingsStore};
use geotrack_core::build_scene;

use crate::state::AppMessage;

/// Read the stored default directory, prompting for one when needed.
pub fn resolve_directory(store: SettingsStore, tx: Sender<AppMessage>) {
    std::thread::spawn(move || {
        let directory = resolve_default_directory(&store, || {
            rfd::FileDialog::new()
                .set_title("Select Default Directory")
                .pick_folder()
        });
        let _ = tx.send(AppMessage::DirectoryResolved(directory));
    });
}

fn file_dialog(title: &str, directory: &str) -> rfd::FileDialog {
    let dialog = rfd::FileDialog::new().set_title(title);
    if !directory.is_empty() && Path::new(directory).is_dir() {
        dialog.set_directory(directory)
    } else {
        dialog
    }
}

/// Pick the raster file.
pub fn pick_tiff(directory: String, generation: u64, tx: Sender<AppMessage>) {
    std::thread::spawn(move || {
        let path = file_dialog("Select .tiff File", &directory)
            .add_filter("TIFF Files", &["tif", "tiff"])
            .pick_file();
        let _ = tx.send(AppMessage::TiffPicked(generation, path));
    });
}

/// Pick the point file.
pub fn pick_geojson(directory: String, generation: u64, tx: Sender<AppMessage>) {
    std::thread::spawn(move || {
        let path = file_dialog("Select .geojson File", &directory)
            .add_filter("GeoJSON Files", &["geojson"])
            .pick_file();
        let _ = tx.send(AppMessage::GeojsonPicked(generation, path));
    });
}

/// Load both files and assemble the scene in a background thread.
pub fn load_scene(raster: PathBuf, points: PathBuf, tx: Sender<AppMessage>) {
    std::thread::spawn(move || {
        let started = std::time::Instant::now();
        let scene = build_scene(&raster, &points);
        info!("Scene loaded in {:.2?}", started.elapsed());
        let _ = tx.send(AppMessage::SceneLoaded(Box::new(scene)));
    });
}
