//! Map scene assembly: raster, points, direction indicators and table
//!
//! Loading never fails as a whole. Each layer either loads or carries the
//! message that is drawn in its place.

use crate::crs::CRS;
use crate::error::Result;
use crate::io::{read_geotiff, read_points};
use crate::raster::{Extent, RasterSurface};
use crate::reproject::reproject_points;
use crate::table::AttributeTable;
use crate::vector::PointFeatureSet;
use crate::view::{AxisFormat, ViewBounds};
use std::path::Path;
use tracing::{info, warn};

pub const MAP_TITLE: &str = "Map View";
pub const X_LABEL: &str = "Longitude";
pub const Y_LABEL: &str = "Latitude";

/// Attribute holding the true-north bearing in degrees
pub const BEARING_ATTRIBUTE: &str = "TN Bearing";

/// Indicator length as a fraction of the larger span of the initial view
const INDICATOR_SCALE: f64 = 0.0005;

/// Margin added around the points when there is no raster to frame the view
const POINT_MARGIN: f64 = 0.05;

/// A layer that either loaded or failed with a displayable message.
#[derive(Debug, Clone)]
pub enum LayerState<T> {
    Loaded(T),
    Failed(String),
}

impl<T> LayerState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(message) => Some(message),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Direction indicator anchored at a marker, in map units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quiver {
    pub origin: (f64, f64),
    pub dx: f64,
    pub dy: f64,
}

impl Quiver {
    /// Point `length` along `bearing_deg`, measured clockwise from north
    pub fn from_bearing(origin: (f64, f64), bearing_deg: f64, length: f64) -> Self {
        let theta = bearing_deg.to_radians();
        Self {
            origin,
            dx: length * theta.sin(),
            dy: length * theta.cos(),
        }
    }

    pub fn tip(&self) -> (f64, f64) {
        (self.origin.0 + self.dx, self.origin.1 + self.dy)
    }
}

/// Loaded points with their original and plotted coordinates.
///
/// Index `i` of `original`, `plotted`, `indicators` and the feature list all
/// refer to the same point.
#[derive(Debug, Clone)]
pub struct PointLayer {
    pub features: PointFeatureSet,
    pub original: Vec<(f64, f64)>,
    pub plotted: Vec<(f64, f64)>,
    pub reprojected: bool,
    /// Present only when the bearing column exists; `None` entries have no
    /// usable bearing.
    pub indicators: Option<Vec<Option<Quiver>>>,
}

impl PointLayer {
    pub fn len(&self) -> usize {
        self.plotted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plotted.is_empty()
    }
}

/// Everything the map and table views draw.
#[derive(Debug, Clone)]
pub struct MapScene {
    pub raster: LayerState<RasterSurface>,
    pub points: LayerState<PointLayer>,
    /// Built only when the points loaded
    pub table: Option<AttributeTable>,
    /// The initial view; "reset" returns here
    pub home: ViewBounds,
    pub axis_format: AxisFormat,
}

impl MapScene {
    /// Plotted position of marker `index`
    pub fn marker(&self, index: usize) -> Option<(f64, f64)> {
        self.points.loaded()?.plotted.get(index).copied()
    }

    pub fn marker_count(&self) -> usize {
        self.points.loaded().map_or(0, PointLayer::len)
    }
}

/// Load both files and assemble the scene
pub fn build_scene(raster_path: &Path, points_path: &Path) -> MapScene {
    info!(
        "Loading scene: raster {}, points {}",
        raster_path.display(),
        points_path.display()
    );
    let raster = read_geotiff(raster_path);
    let points = read_points(points_path);
    assemble_scene(raster, points)
}

/// Assemble a scene from already attempted loads
pub fn assemble_scene(
    raster: Result<RasterSurface>,
    points: Result<PointFeatureSet>,
) -> MapScene {
    let raster = match raster {
        Ok(surface) => LayerState::Loaded(surface),
        Err(e) => {
            warn!("Raster load failed: {}", e);
            LayerState::Failed(format!("Failed to load TIFF:\n{}", e))
        }
    };
    let raster_crs = raster.loaded().and_then(|s| s.crs()).cloned();

    let points = match points.and_then(|set| place_points(set, raster_crs.as_ref())) {
        Ok(layer) => LayerState::Loaded(layer),
        Err(e) => {
            warn!("GeoJSON load failed: {}", e);
            LayerState::Failed(format!("Failed to load GeoJSON:\n{}", e))
        }
    };

    let home = initial_view(&raster, &points);
    let points = match points {
        LayerState::Loaded(layer) => LayerState::Loaded(with_indicators(layer, &home)),
        failed => failed,
    };

    let table = points.loaded().map(|layer| {
        let mapped = layer.reprojected.then_some(layer.plotted.as_slice());
        AttributeTable::build(&layer.features, mapped)
    });

    let scene = MapScene {
        axis_format: AxisFormat::for_raster_crs(raster_crs.as_ref()),
        raster,
        points,
        table,
        home,
    };
    info!(
        "Scene ready: raster loaded = {}, {} markers",
        scene.raster.is_loaded(),
        scene.marker_count()
    );
    scene
}

/// Reproject into the raster CRS when it is known and differs
fn place_points(features: PointFeatureSet, raster_crs: Option<&CRS>) -> Result<PointLayer> {
    let original = features.coordinates();
    let (plotted, reprojected) = match raster_crs {
        Some(target) if !features.crs.is_equivalent(target) => {
            info!("Reprojecting {} points {} -> {}", original.len(), features.crs, target);
            (reproject_points(&original, &features.crs, target)?, true)
        }
        _ => (original.clone(), false),
    };

    Ok(PointLayer {
        features,
        original,
        plotted,
        reprojected,
        indicators: None,
    })
}

fn initial_view(raster: &LayerState<RasterSurface>, points: &LayerState<PointLayer>) -> ViewBounds {
    let extent = raster
        .loaded()
        .map(RasterSurface::extent)
        .or_else(|| {
            points
                .loaded()
                .and_then(|layer| Extent::from_points(layer.plotted.iter().copied()))
                .map(|e| e.padded(POINT_MARGIN))
        })
        .unwrap_or_else(Extent::unit);
    ViewBounds::from_extent(&extent)
}

fn with_indicators(mut layer: PointLayer, home: &ViewBounds) -> PointLayer {
    if !layer.features.has_column(BEARING_ATTRIBUTE) {
        return layer;
    }
    let length = INDICATOR_SCALE * home.max_span();
    let indicators = layer
        .features
        .features
        .iter()
        .zip(&layer.plotted)
        .map(|(feature, &origin)| {
            let bearing = feature.get(BEARING_ATTRIBUTE)?.as_f64()?;
            if !bearing.is_finite() || !origin.0.is_finite() || !origin.1.is_finite() {
                return None;
            }
            Some(Quiver::from_bearing(origin, bearing, length))
        })
        .collect();
    layer.indicators = Some(indicators);
    layer
}
