//! End-to-end scene loading from files on disk

use approx::assert_relative_eq;
use geotrack_core::io::write_geotiff_to_buffer;
use geotrack_core::reproject::reproject_points;
use geotrack_core::view::AxisFormat;
use geotrack_core::{build_scene, GeoTransform, RasterPixels, RasterSurface, CRS};
use ndarray::Array2;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TRACK: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 1.0]},
         "properties": {"TN Bearing": 0, "Signal Strength": -70, "Date & Time": "2024-05-01 10:00:00"}},
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [5.0, 5.0]},
         "properties": {"TN Bearing": 90, "Signal Strength": -64, "Date & Time": "2024-05-01 10:05:00"}}
    ]
}"#;

fn write_raster(dir: &TempDir, transform: GeoTransform, crs: CRS) -> PathBuf {
    let surface = RasterSurface::new(
        RasterPixels::Gray(Array2::from_elem((10, 10), 128.0)),
        transform,
        Some(crs),
    )
    .unwrap();
    let path = dir.path().join("map.tif");
    fs::write(&path, write_geotiff_to_buffer(&surface).unwrap()).unwrap();
    path
}

fn write_track(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("track.geojson");
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn wgs84_raster_with_two_bearings() {
    let dir = tempfile::tempdir().unwrap();
    let raster = write_raster(&dir, GeoTransform::new(0.0, 10.0, 1.0, -1.0), CRS::wgs84());
    let track = write_track(&dir, TRACK);

    let scene = build_scene(&raster, &track);

    assert!(scene.raster.is_loaded());
    assert_eq!(scene.axis_format, AxisFormat::Degrees);
    assert_eq!(scene.axis_format.format(scene.home.x_max), "10.000000");

    let layer = scene.points.loaded().unwrap();
    assert!(!layer.reprojected);
    assert_eq!(layer.plotted, vec![(1.0, 1.0), (5.0, 5.0)]);

    let quivers = layer.indicators.as_ref().unwrap();
    let up = quivers[0].unwrap();
    let right = quivers[1].unwrap();
    assert!(up.dy > 0.0);
    assert_relative_eq!(up.dx, 0.0, epsilon = 1e-12);
    assert!(right.dx > 0.0);
    assert_relative_eq!(right.dy, 0.0, epsilon = 1e-12);

    let table = scene.table.as_ref().unwrap();
    assert_eq!(table.row_count(), 2);
    assert!(!table.has_mapped_columns());
    assert_eq!(table.value(0, "Longitude"), Some("1.000000000000000"));
    assert_eq!(table.value(1, "Latitude"), Some("5.000000000000000"));
    assert_eq!(
        table.tooltip_lines(1),
        vec![
            "TN Bearing: 90",
            "Signal Strength: -64",
            "Date & Time: 2024-05-01 10:05:00"
        ]
    );
}

#[test]
fn utm_raster_rows_match_markers() {
    let dir = tempfile::tempdir().unwrap();
    let raster = write_raster(
        &dir,
        GeoTransform::new(430_000.0, 4_480_000.0, 1_000.0, -1_000.0),
        CRS::from_epsg(32630),
    );
    let track = write_track(
        &dir,
        r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-3.7037, 40.4168]}, "properties": {"id": "a"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-3.68, 40.43]}, "properties": {"id": "b"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-3.72, 40.40]}, "properties": {"id": "c"}}
        ]}"#,
    );

    let scene = build_scene(&raster, &track);
    assert_eq!(scene.axis_format, AxisFormat::Projected);

    let layer = scene.points.loaded().unwrap();
    assert!(layer.reprojected);
    let expected =
        reproject_points(&layer.original, &CRS::wgs84(), &CRS::from_epsg(32630)).unwrap();
    assert_eq!(layer.plotted, expected);

    let table = scene.table.as_ref().unwrap();
    assert!(table.has_mapped_columns());
    for (i, (x, y)) in layer.plotted.iter().enumerate() {
        assert_eq!(scene.marker(i), Some((*x, *y)));
        assert_eq!(table.value(i, "Mapped Longitude"), Some(format!("{:.15}", x).as_str()));
        assert_eq!(table.value(i, "Mapped Latitude"), Some(format!("{:.15}", y).as_str()));
    }
    assert_eq!(table.value(2, "id"), Some("c"));
}

#[test]
fn missing_files_render_failure_text() {
    let dir = tempfile::tempdir().unwrap();
    let scene = build_scene(&dir.path().join("none.tif"), &dir.path().join("none.geojson"));

    assert!(scene.raster.error().unwrap().starts_with("Failed to load TIFF:\n"));
    assert!(scene.points.error().unwrap().starts_with("Failed to load GeoJSON:\n"));
    assert!(scene.table.is_none());
    assert_eq!(scene.axis_format, AxisFormat::Projected);
}
