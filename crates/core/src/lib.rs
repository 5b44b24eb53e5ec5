//! # GeoTrack Core
//!
//! Framework-independent model behind the GeoTrack visualizer.
//!
//! This crate provides:
//! - `RasterSurface`: single- or three-band georeferenced pixel grid
//! - `GeoTransform`: Affine transformation for georeferencing
//! - `CRS`: Coordinate Reference System handling and point reprojection
//! - `PointFeatureSet`: ordered point features with typed attributes
//! - `MapScene`: the loaded raster/point pair with its attribute table
//! - `SettingsStore`: the persisted default browse directory

pub mod config;
pub mod crs;
pub mod error;
pub mod io;
pub mod pick;
pub mod raster;
pub mod reproject;
pub mod scene;
pub mod table;
pub mod vector;
pub mod view;

pub use crs::CRS;
pub use error::{Error, Result};
pub use raster::{Extent, GeoTransform, RasterPixels, RasterSurface, SampleKind};
pub use scene::{build_scene, LayerState, MapScene, PointLayer};
pub use vector::{AttributeValue, PointFeature, PointFeatureSet};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CRS;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Extent, GeoTransform, RasterPixels, RasterSurface, SampleKind};
    pub use crate::scene::{build_scene, LayerState, MapScene, PointLayer};
    pub use crate::table::{AttributeTable, CellAlign, TableCell};
    pub use crate::vector::{AttributeValue, PointFeature, PointFeatureSet};
    pub use crate::view::{AxisFormat, ViewBounds};
}
