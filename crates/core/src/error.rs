//! Error types for GeoTrack

use thiserror::Error;

/// Main error type for GeoTrack operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(String),

    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Unsupported CRS transform: {from} -> {to}")]
    UnsupportedTransform { from: String, to: String },

    #[error("Feature {index} has no geometry")]
    MissingGeometry { index: usize },

    #[error("Feature {index} is not a Point (found {kind})")]
    NonPointGeometry { index: usize, kind: String },

    #[error("{0}")]
    Other(String),
}

impl From<tiff::TiffError> for Error {
    fn from(e: tiff::TiffError) -> Self {
        Error::Tiff(e.to_string())
    }
}

impl From<geojson::Error> for Error {
    fn from(e: geojson::Error) -> Self {
        Error::GeoJson(e.to_string())
    }
}

/// Result type alias for GeoTrack operations
pub type Result<T> = std::result::Result<T, Error>;
