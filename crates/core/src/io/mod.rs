//! Readers for the two input formats: GeoTIFF rasters and GeoJSON points

mod geotiff;
mod points;

pub use geotiff::{read_geotiff, read_geotiff_from_buffer, write_geotiff_to_buffer};
pub use points::{read_points, read_points_from_str};
