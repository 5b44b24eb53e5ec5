//! "Save Map as Image": rasterize the current view and write it as PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use tracing::{error, info};

use geotrack_colormap::{surface_to_rgba, MapStyle, RgbaImage};
use geotrack_core::view::ViewBounds;
use geotrack_core::{LayerState, MapScene};

use crate::state::AppMessage;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const MARKER: [u8; 4] = [255, 0, 0, 179];
const SELECTED_MARKER: [u8; 4] = [255, 255, 0, 255];
const ARROW: [u8; 4] = [0, 0, 255, 255];
const MARKER_RADIUS: f64 = 4.0;

/// Size used when the map panel has not been laid out yet.
pub const DEFAULT_EXPORT_SIZE: [usize; 2] = [1000, 800];

/// Draw the raster, markers and bearing arrows inside `view` into an
/// opaque `width` by `height` image.
pub fn render_view(
    scene: &MapScene,
    view: &ViewBounds,
    style: MapStyle,
    selected: Option<usize>,
    [width, height]: [usize; 2],
) -> RgbaImage {
    let (width, height) = (width.max(1), height.max(1));
    let mut canvas = Canvas::new(width, height);

    let to_pixel = |(x, y): (f64, f64)| {
        (
            (x - view.x_min) / view.width() * width as f64,
            (view.y_max - y) / view.height() * height as f64,
        )
    };

    if let LayerState::Loaded(surface) = &scene.raster {
        let texture = surface_to_rgba(surface, style);
        let extent = surface.extent();
        for row in 0..height {
            let y = view.y_max - (row as f64 + 0.5) / height as f64 * view.height();
            let src_row = ((extent.max_y - y) / extent.height() * texture.height as f64).floor();
            if !(0.0..texture.height as f64).contains(&src_row) {
                continue;
            }
            for col in 0..width {
                let x = view.x_min + (col as f64 + 0.5) / width as f64 * view.width();
                let src_col = ((x - extent.min_x) / extent.width() * texture.width as f64).floor();
                if !(0.0..texture.width as f64).contains(&src_col) {
                    continue;
                }
                let start = (src_row as usize * texture.width + src_col as usize) * 4;
                let mut rgba = [0u8; 4];
                rgba.copy_from_slice(&texture.pixels[start..start + 4]);
                canvas.blend(col as i64, row as i64, rgba);
            }
        }
    }

    if let LayerState::Loaded(layer) = &scene.points {
        for (index, &point) in layer.plotted.iter().enumerate() {
            let color = if selected == Some(index) {
                SELECTED_MARKER
            } else {
                MARKER
            };
            canvas.disc(to_pixel(point), MARKER_RADIUS, color);
        }
        for quiver in layer.indicators.iter().flatten().flatten() {
            canvas.line(to_pixel(quiver.origin), to_pixel(quiver.tip()), ARROW);
        }
    }

    canvas.into_image()
}

/// Encode as PNG and write to `path`.
pub fn save_png(path: &Path, image: &RgbaImage) -> Result<()> {
    let buffer = image::RgbaImage::from_raw(
        image.width as u32,
        image.height as u32,
        image.pixels.clone(),
    )
    .context("Image buffer does not match its dimensions")?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Ask for a destination and write the image in a background thread.
pub fn save_image_dialog(image: RgbaImage, directory: Option<String>, tx: Sender<AppMessage>) {
    std::thread::spawn(move || {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save Map as Image")
            .set_file_name("map.png")
            .add_filter("PNG Image", &["png"]);
        if let Some(dir) = directory.filter(|d| Path::new(d).is_dir()) {
            dialog = dialog.set_directory(dir);
        }
        let saved = dialog.save_file().and_then(|path| write_logged(path, &image));
        let _ = tx.send(AppMessage::ImageSaved(saved));
    });
}

fn write_logged(path: PathBuf, image: &RgbaImage) -> Option<PathBuf> {
    match save_png(&path, image) {
        Ok(()) => {
            info!("Saved map image to {}", path.display());
            Some(path)
        }
        Err(e) => {
            error!("Saving map image failed: {:#}", e);
            None
        }
    }
}

/// Opaque RGB pixels over a white background.
struct Canvas {
    width: usize,
    height: usize,
    rgb: Vec<[u8; 3]>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rgb: vec![BACKGROUND; width * height],
        }
    }

    fn blend(&mut self, x: i64, y: i64, [r, g, b, a]: [u8; 4]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let alpha = a as f64 / 255.0;
        let dst = &mut self.rgb[y as usize * self.width + x as usize];
        for (d, s) in dst.iter_mut().zip([r, g, b]) {
            *d = (s as f64 * alpha + *d as f64 * (1.0 - alpha)).round() as u8;
        }
    }

    fn disc(&mut self, (cx, cy): (f64, f64), radius: f64, color: [u8; 4]) {
        if !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let reach = radius.ceil() as i64;
        let (px, py) = (cx.floor() as i64, cy.floor() as i64);
        for y in py - reach..=py + reach {
            for x in px - reach..=px + reach {
                let (dx, dy) = (x as f64 + 0.5 - cx, y as f64 + 0.5 - cy);
                if dx * dx + dy * dy <= radius * radius {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn line(&mut self, (x0, y0): (f64, f64), (x1, y1): (f64, f64), color: [u8; 4]) {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return;
        }
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().clamp(1.0, 10_000.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.blend(x.floor() as i64, y.floor() as i64, color);
        }
    }

    fn into_image(self) -> RgbaImage {
        let pixels = self
            .rgb
            .into_iter()
            .flat_map(|[r, g, b]| [r, g, b, 255])
            .collect();
        RgbaImage {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrack_core::io::read_points_from_str;
    use geotrack_core::scene::assemble_scene;
    use geotrack_core::{Error, GeoTransform, RasterPixels, RasterSurface};
    use ndarray::Array2;

    const ONE_POINT: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [5.0, 5.0]},
         "properties": {"name": "a"}}]}"#;

    fn pixel(image: &RgbaImage, x: usize, y: usize) -> &[u8] {
        let start = (y * image.width + x) * 4;
        &image.pixels[start..start + 4]
    }

    #[test]
    fn markers_drawn_over_white_background() {
        let scene = assemble_scene(
            Err(Error::Other("no raster".into())),
            read_points_from_str(ONE_POINT),
        );
        let view = ViewBounds::new(0.0, 10.0, 0.0, 10.0);
        let image = render_view(&scene, &view, MapStyle::Default, None, [20, 20]);

        assert_eq!((image.width, image.height), (20, 20));
        assert_eq!(pixel(&image, 0, 0), &[255, 255, 255, 255]);
        // red at 0.7 opacity over white
        assert_eq!(pixel(&image, 10, 10), &[255, 76, 76, 255]);

        let selected = render_view(&scene, &view, MapStyle::Default, Some(0), [20, 20]);
        assert_eq!(pixel(&selected, 10, 10), &[255, 255, 0, 255]);
    }

    #[test]
    fn raster_fills_only_its_extent() {
        let surface = RasterSurface::new(
            RasterPixels::Gray(Array2::from_elem((2, 2), 1.0)),
            GeoTransform::new(0.0, 2.0, 1.0, -1.0),
            None,
        )
        .unwrap();
        let scene = assemble_scene(Ok(surface), Err(Error::Other("no points".into())));
        let view = ViewBounds::new(0.0, 4.0, 0.0, 4.0);
        let image = render_view(&scene, &view, MapStyle::Default, None, [4, 4]);

        // black from the bottom of the gray ramp at half opacity
        assert_eq!(pixel(&image, 0, 3), &[127, 127, 127, 255]);
        assert_eq!(pixel(&image, 3, 0), &[255, 255, 255, 255]);
    }

    #[test]
    fn png_written_and_read_back() {
        let image = RgbaImage {
            width: 3,
            height: 2,
            pixels: (0..6u8).flat_map(|i| [i * 40, 0, 255 - i, 255]).collect(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        save_png(&path, &image).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.into_raw(), image.pixels);
    }

    #[test]
    fn mismatched_buffer_is_an_error() {
        let image = RgbaImage {
            width: 4,
            height: 4,
            pixels: vec![0; 8],
        };
        let dir = tempfile::tempdir().unwrap();
        assert!(save_png(&dir.path().join("bad.png"), &image).is_err());
    }
}
