//! Raster data structures

mod extent;
mod geotransform;
mod surface;

pub use extent::Extent;
pub use geotransform::GeoTransform;
pub use surface::{RasterPixels, RasterSurface, SampleKind};
