//! GeoTrack Visualizer
//!
//! Overlays GeoJSON tracking points on a GeoTIFF map with a synced
//! attribute table.

mod app;
mod dock;
mod export;
mod icons;
mod io;
mod panels;
mod state;
mod theme;
mod toolbar;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use geotrack_core::config::SettingsStore;

use app::GeoTrackApp;
use panels::welcome::WELCOME_TITLE;

#[derive(Parser)]
#[command(name = "geotrack-visualizer")]
#[command(author, version, about = "Overlay tracking points on a GeoTIFF map", long_about = None)]
struct Cli {
    /// Directory holding config.json [default: <executable dir>/settings]
    #[arg(long, env = "GEOTRACK_SETTINGS_DIR")]
    settings_dir: Option<PathBuf>,

    /// Directory containing icons/ [default: executable dir]
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("logging unavailable: {e}");
    }
}

fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let settings = match cli.settings_dir {
        Some(dir) => SettingsStore::new(dir),
        None => SettingsStore::beside_executable(),
    };
    let assets_dir = cli.assets_dir.unwrap_or_else(executable_dir);
    info!("Assets directory: {}", assets_dir.display());

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(WELCOME_TITLE)
        .with_inner_size([800.0, 600.0])
        .with_min_inner_size([640.0, 480.0]);
    if let Some(icon) = icons::load_window_icon(&assets_dir) {
        viewport = viewport.with_icon(icon);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "GeoTrack Visualizer",
        native_options,
        Box::new(move |cc| Ok(Box::new(GeoTrackApp::new(cc, settings, &assets_dir)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "geotrack-visualizer",
            "--settings-dir",
            "/tmp/geo",
            "--assets-dir",
            "/opt/geo",
            "-v",
        ]);
        assert_eq!(cli.settings_dir, Some(PathBuf::from("/tmp/geo")));
        assert_eq!(cli.assets_dir, Some(PathBuf::from("/opt/geo")));
        assert!(cli.verbose);
    }
}
