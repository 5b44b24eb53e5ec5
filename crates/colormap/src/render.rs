//! Raster-to-RGBA rendering using color schemes.

use crate::scheme::{evaluate, ColorScheme, Rgb};
use crate::style::MapStyle;
use geotrack_core::raster::{RasterPixels, RasterSurface, SampleKind};
use ndarray::{Array2, Array3};

/// Parameters for colormap rendering.
#[derive(Debug, Clone)]
pub struct ColormapParams {
    /// Color scheme to use.
    pub scheme: ColorScheme,
    /// Minimum value for normalization. Values below this are clamped.
    pub min: f64,
    /// Maximum value for normalization. Values above this are clamped.
    pub max: f64,
    /// Layer opacity in [0, 1], written to every valid pixel's alpha.
    pub alpha: f64,
    /// Color for NaN pixels (RGBA). Default: fully transparent.
    pub nodata_color: [u8; 4],
}

impl ColormapParams {
    /// Create params with explicit min/max range, fully opaque.
    pub fn with_range(scheme: ColorScheme, min: f64, max: f64) -> Self {
        Self {
            scheme,
            min,
            max,
            alpha: 1.0,
            nodata_color: [0, 0, 0, 0],
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

/// An RGBA buffer with its dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    /// Row-major, 4 bytes per pixel
    pub pixels: Vec<u8>,
}

/// Auto-detect min/max from a band, returning `ColormapParams` ready to use.
///
/// Non-finite cells are ignored.
pub fn auto_params(band: &Array2<f64>, scheme: ColorScheme) -> ColormapParams {
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in band.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }

    // Handle edge case: no valid cells or constant band
    if !min.is_finite() || !max.is_finite() {
        min = 0.0;
        max = 1.0;
    } else if (max - min).abs() < f64::EPSILON {
        max = min + 1.0;
    }

    ColormapParams::with_range(scheme, min, max)
}

/// Convert one band to an RGBA pixel buffer.
///
/// Returns a `Vec<u8>` of length `rows * cols * 4` in row-major order,
/// suitable for uploading as a GPU texture.
pub fn band_to_rgba(band: &Array2<f64>, params: &ColormapParams) -> Vec<u8> {
    let range = params.max - params.min;
    let inv_range = if range.abs() > f64::EPSILON {
        1.0 / range
    } else {
        1.0
    };
    let alpha = (params.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;

    let mut rgba = Vec::with_capacity(band.len() * 4);
    for &v in band.iter() {
        if v.is_finite() {
            let Rgb { r, g, b } = evaluate(params.scheme, (v - params.min) * inv_range);
            rgba.extend_from_slice(&[r, g, b, alpha]);
        } else {
            rgba.extend_from_slice(&params.nodata_color);
        }
    }
    rgba
}

/// Convert a three-band composite to opaque RGBA.
///
/// If any sample exceeds 255 the bands are divided by the overall maximum.
/// Otherwise integer samples are 0..=255 intensities and float samples are
/// fractions in [0, 1], clipped.
pub fn rgb_to_rgba(bands: &Array3<f64>, kind: SampleKind) -> Vec<u8> {
    let max = bands
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    let scale = if max > 255.0 {
        255.0 / max
    } else {
        match kind {
            SampleKind::Integer => 1.0,
            SampleKind::Float => 255.0,
        }
    };

    let (rows, cols, _) = bands.dim();
    let mut rgba = Vec::with_capacity(rows * cols * 4);
    for row in 0..rows {
        for col in 0..cols {
            let mut valid = true;
            for band in 0..3 {
                let v = bands[(row, col, band)];
                valid &= v.is_finite();
                rgba.push(to_byte(v * scale));
            }
            rgba.push(if valid { 255 } else { 0 });
        }
    }
    rgba
}

fn to_byte(v: f64) -> u8 {
    if v.is_finite() {
        v.clamp(0.0, 255.0).round() as u8
    } else {
        0
    }
}

/// Render a raster surface with the given map style.
///
/// Three-band surfaces ignore the style and are drawn as RGB.
pub fn surface_to_rgba(surface: &RasterSurface, style: MapStyle) -> RgbaImage {
    let pixels = match surface.pixels() {
        RasterPixels::Gray(band) => {
            let params = auto_params(band, style.scheme()).with_alpha(style.alpha());
            band_to_rgba(band, &params)
        }
        RasterPixels::Rgb(bands) => rgb_to_rgba(bands, surface.sample_kind()),
    };
    RgbaImage {
        width: surface.cols(),
        height: surface.rows(),
        pixels,
    }
}

/// Shrink an image so neither side exceeds `max_side`, by nearest sampling.
///
/// Images already within the limit are returned unchanged.
pub fn downsample_rgba(image: &RgbaImage, max_side: usize) -> RgbaImage {
    let max_side = max_side.max(1);
    if image.width <= max_side && image.height <= max_side {
        return image.clone();
    }
    let step = image.width.max(image.height).div_ceil(max_side);
    let width = image.width.div_ceil(step);
    let height = image.height.div_ceil(step);

    let mut pixels = Vec::with_capacity(width * height * 4);
    for row in 0..height {
        for col in 0..width {
            let start = ((row * step) * image.width + col * step) * 4;
            pixels.extend_from_slice(&image.pixels[start..start + 4]);
        }
    }
    RgbaImage {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrack_core::raster::GeoTransform;
    use ndarray::array;

    #[test]
    fn band_to_rgba_basic() {
        let band = array![[0.0, 0.5], [1.0, f64::NAN]];
        let params = ColormapParams::with_range(ColorScheme::Gray, 0.0, 1.0);
        let rgba = band_to_rgba(&band, &params);

        assert_eq!(rgba.len(), 16);
        assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
        assert_eq!(&rgba[4..8], &[128, 128, 128, 255]);
        assert_eq!(&rgba[8..12], &[255, 255, 255, 255]);
        // NaN -> transparent
        assert_eq!(&rgba[12..16], &[0, 0, 0, 0]);
    }

    #[test]
    fn alpha_applied_to_valid_pixels() {
        let band = array![[0.0, 1.0]];
        let params = ColormapParams::with_range(ColorScheme::Gray, 0.0, 1.0).with_alpha(0.5);
        let rgba = band_to_rgba(&band, &params);
        assert_eq!(rgba[3], 128);
        assert_eq!(rgba[7], 128);
    }

    #[test]
    fn auto_params_range() {
        let band = array![[10.0, 50.0, 100.0]];
        let params = auto_params(&band, ColorScheme::Terrain);
        assert_eq!((params.min, params.max), (10.0, 100.0));

        let constant = Array2::from_elem((2, 2), 42.0);
        let params = auto_params(&constant, ColorScheme::Terrain);
        assert_eq!((params.min, params.max), (42.0, 43.0));

        let empty = Array2::from_elem((1, 2), f64::NAN);
        let params = auto_params(&empty, ColorScheme::Terrain);
        assert_eq!((params.min, params.max), (0.0, 1.0));
    }

    #[test]
    fn rgb_over_255_normalized_by_max() {
        let mut bands = Array3::zeros((1, 2, 3));
        bands[(0, 0, 0)] = 1000.0;
        bands[(0, 1, 2)] = 600.0;
        for kind in [SampleKind::Integer, SampleKind::Float] {
            let rgba = rgb_to_rgba(&bands, kind);
            assert_eq!(&rgba[0..4], &[255, 0, 0, 255]);
            assert_eq!(&rgba[4..8], &[0, 0, 153, 255]);
        }
    }

    #[test]
    fn integer_rgb_is_byte_intensity() {
        let bytes = Array3::from_elem((1, 1, 3), 200.0);
        assert_eq!(rgb_to_rgba(&bytes, SampleKind::Integer), vec![200, 200, 200, 255]);

        // near-black image stays near black
        let mut dark = Array3::zeros((1, 2, 3));
        dark[(0, 1, 0)] = 1.0;
        let rgba = rgb_to_rgba(&dark, SampleKind::Integer);
        assert_eq!(&rgba[4..8], &[1, 0, 0, 255]);
    }

    #[test]
    fn float_rgb_is_clipped_fraction() {
        let fractions = Array3::from_elem((1, 1, 3), 0.5);
        assert_eq!(rgb_to_rgba(&fractions, SampleKind::Float), vec![128, 128, 128, 255]);

        let mut mixed = Array3::from_elem((1, 1, 3), 0.25);
        mixed[(0, 0, 1)] = 200.0;
        assert_eq!(rgb_to_rgba(&mixed, SampleKind::Float), vec![64, 255, 64, 255]);
    }

    #[test]
    fn rgb_surface_follows_sample_kind() {
        let surface = RasterSurface::new(
            RasterPixels::Rgb(Array3::from_elem((1, 1, 3), 1.0)),
            GeoTransform::default(),
            None,
        )
        .unwrap();
        let image = surface_to_rgba(&surface, MapStyle::Default);
        assert_eq!(image.pixels, vec![255, 255, 255, 255]);

        let image = surface_to_rgba(&surface.with_sample_kind(SampleKind::Integer), MapStyle::Default);
        assert_eq!(image.pixels, vec![1, 1, 1, 255]);
    }

    #[test]
    fn downsample_caps_both_sides() {
        let pixels = (0..40u8).flat_map(|i| [i, 0, 0, 255]).collect();
        let image = RgbaImage {
            width: 10,
            height: 4,
            pixels,
        };
        let small = downsample_rgba(&image, 5);
        assert_eq!((small.width, small.height), (5, 2));
        assert_eq!(small.pixels.len(), 5 * 2 * 4);
        // every second pixel of every second row
        assert_eq!(small.pixels[4], 2);
        assert_eq!(small.pixels[5 * 4], 20);
        assert_eq!(small.pixels[9 * 4], 28);

        assert_eq!(downsample_rgba(&image, 10), image);
    }

    #[test]
    fn surface_uses_style_for_single_band() {
        let surface = RasterSurface::new(
            RasterPixels::Gray(array![[0.0, 2.0]]),
            GeoTransform::default(),
            None,
        )
        .unwrap();
        let image = surface_to_rgba(&surface, MapStyle::Default);
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(&image.pixels[4..8], &[255, 255, 255, 128]);

        let image = surface_to_rgba(&surface, MapStyle::Satellite);
        assert_eq!(image.pixels[3], 255);
    }
}
