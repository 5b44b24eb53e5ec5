//! The raster surface drawn underneath the points

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::raster::{Extent, GeoTransform};
use ndarray::{Array2, Array3};

/// Pixel storage for the supported band layouts.
#[derive(Debug, Clone)]
pub enum RasterPixels {
    /// One band, drawn through the active colormap.
    Gray(Array2<f64>),
    /// Three bands in (row, col, band) order, drawn as an RGB composite.
    Rgb(Array3<f64>),
}

impl RasterPixels {
    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Gray(a) => a.dim(),
            Self::Rgb(a) => {
                let (rows, cols, _) = a.dim();
                (rows, cols)
            }
        }
    }

    pub fn band_count(&self) -> usize {
        match self {
            Self::Gray(_) => 1,
            Self::Rgb(_) => 3,
        }
    }
}

/// Numeric kind of the stored samples before conversion to `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleKind {
    Integer,
    #[default]
    Float,
}

/// A georeferenced raster: pixels, affine transform and an optional CRS.
///
/// Built once by the GeoTIFF reader and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RasterPixels,
    transform: GeoTransform,
    crs: Option<CRS>,
    sample_kind: SampleKind,
}

impl RasterSurface {
    pub fn new(pixels: RasterPixels, transform: GeoTransform, crs: Option<CRS>) -> Result<Self> {
        let (rows, cols) = pixels.shape();
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
        Ok(Self {
            pixels,
            transform,
            crs,
            sample_kind: SampleKind::default(),
        })
    }

    /// Record the sample type the pixels were decoded from.
    pub fn with_sample_kind(mut self, kind: SampleKind) -> Self {
        self.sample_kind = kind;
        self
    }

    pub fn sample_kind(&self) -> SampleKind {
        self.sample_kind
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.pixels.shape().0
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.pixels.shape().1
    }

    pub fn band_count(&self) -> usize {
        self.pixels.band_count()
    }

    pub fn pixels(&self) -> &RasterPixels {
        &self.pixels
    }

    /// Get the geotransform
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Get the CRS
    pub fn crs(&self) -> Option<&CRS> {
        self.crs.as_ref()
    }

    /// Geographic extent of the full grid
    pub fn extent(&self) -> Extent {
        Extent::from_bounds(self.transform.bounds(self.cols(), self.rows()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_follows_transform() {
        let pixels = RasterPixels::Gray(Array2::zeros((10, 20)));
        let surface =
            RasterSurface::new(pixels, GeoTransform::new(100.0, 50.0, 0.5, -0.5), Some(CRS::wgs84()))
                .unwrap();
        assert_eq!(surface.rows(), 10);
        assert_eq!(surface.cols(), 20);
        assert_eq!(surface.extent(), Extent::new(100.0, 45.0, 110.0, 50.0));
    }

    #[test]
    fn rgb_reports_three_bands() {
        let pixels = RasterPixels::Rgb(Array3::zeros((4, 5, 3)));
        let surface = RasterSurface::new(pixels, GeoTransform::default(), None).unwrap();
        assert_eq!(surface.band_count(), 3);
        assert_eq!((surface.rows(), surface.cols()), (4, 5));
        assert!(surface.crs().is_none());
    }

    #[test]
    fn empty_grid_rejected() {
        let pixels = RasterPixels::Gray(Array2::zeros((0, 3)));
        assert!(RasterSurface::new(pixels, GeoTransform::default(), None).is_err());
    }
}
