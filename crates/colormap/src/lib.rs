//! # GeoTrack Colormap
//!
//! Color mapping and raster-to-RGBA rendering for the map view.
//!
//! Single-band rasters are drawn through the colormap of the active
//! [`MapStyle`]; three-band rasters are drawn as an RGB composite. The main
//! entry point is [`surface_to_rgba`].
//!
//! ## Usage
//!
//! ```ignore
//! use geotrack_colormap::{surface_to_rgba, MapStyle};
//!
//! let image = surface_to_rgba(&surface, MapStyle::Terrain);
//! ```

mod render;
mod scheme;
mod style;

pub use render::{
    auto_params, band_to_rgba, downsample_rgba, rgb_to_rgba, surface_to_rgba, ColormapParams,
    RgbaImage,
};
pub use scheme::{evaluate, ColorScheme, ColorStop, Rgb};
pub use style::MapStyle;
