//! PNG icons for the toolbar and the window.
//!
//! Every icon is optional: a missing or undecodable file is logged and the
//! caller falls back to a text glyph.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use egui::{ColorImage, TextureHandle, TextureOptions};
use tracing::warn;

use crate::toolbar::{ToolbarAction, NAV_TOOLBAR};

const ICON_DIR: &str = "icons";
const APP_ICON: &str = "app_icon.png";

/// First candidate under `<assets_dir>/icons` that exists on disk.
pub fn resolve_icon(assets_dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| assets_dir.join(ICON_DIR).join(name))
        .find(|path| path.is_file())
}

/// Decode a PNG into straight RGBA.
pub fn load_rgba(path: &Path) -> Result<image::RgbaImage> {
    let img = image::open(path).with_context(|| format!("decoding {}", path.display()))?;
    Ok(img.to_rgba8())
}

/// Window icon, if `icons/app_icon.png` exists and decodes.
pub fn load_window_icon(assets_dir: &Path) -> Option<egui::IconData> {
    let path = resolve_icon(assets_dir, &[APP_ICON])?;
    match load_rgba(&path) {
        Ok(rgba) => Some(egui::IconData {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        }),
        Err(e) => {
            warn!("Window icon unavailable: {:#}", e);
            None
        }
    }
}

/// Toolbar textures keyed by action.
#[derive(Default)]
pub struct ToolbarIcons {
    textures: HashMap<ToolbarAction, TextureHandle>,
}

impl ToolbarIcons {
    pub fn load(ctx: &egui::Context, assets_dir: &Path) -> Self {
        let mut textures = HashMap::new();
        for action in NAV_TOOLBAR {
            let Some(path) = resolve_icon(assets_dir, action.icon_files()) else {
                continue;
            };
            match load_rgba(&path) {
                Ok(rgba) => {
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let image = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    let name = format!("toolbar_{:?}", action);
                    textures.insert(action, ctx.load_texture(name, image, TextureOptions::LINEAR));
                }
                Err(e) => warn!("Toolbar icon unavailable: {:#}", e),
            }
        }
        Self { textures }
    }

    pub fn get(&self, action: ToolbarAction) -> Option<&TextureHandle> {
        self.textures.get(&action)
    }
}
