//! GeoJSON point reader

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::vector::{AttributeValue, PointFeature, PointFeatureSet};
use geo_types::Coord;
use geojson::{Feature, GeoJson, JsonObject, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a GeoJSON FeatureCollection (or a single Feature) of points.
///
/// The CRS comes from the legacy `crs` member when present and defaults to
/// EPSG:4326 otherwise.
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<PointFeatureSet> {
    let file = File::open(path.as_ref())?;
    let geojson = GeoJson::from_reader(BufReader::new(file))?;
    points_from_geojson(geojson)
}

/// Parse GeoJSON text into a point set
pub fn read_points_from_str(text: &str) -> Result<PointFeatureSet> {
    let geojson: GeoJson = text.parse()?;
    points_from_geojson(geojson)
}

fn points_from_geojson(geojson: GeoJson) -> Result<PointFeatureSet> {
    let (features, foreign) = match geojson {
        GeoJson::FeatureCollection(fc) => (fc.features, fc.foreign_members),
        GeoJson::Feature(feature) => {
            let foreign = feature.foreign_members.clone();
            (vec![feature], foreign)
        }
        GeoJson::Geometry(_) => {
            return Err(Error::GeoJson(
                "expected a FeatureCollection or Feature, found a bare geometry".to_string(),
            ))
        }
    };

    let crs = foreign
        .as_ref()
        .and_then(crs_from_members)
        .unwrap_or_default();

    let points = features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| point_feature(index, feature))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(count = points.len(), crs = %crs, "Parsed GeoJSON points");
    Ok(PointFeatureSet::new(points, crs))
}

fn point_feature(index: usize, feature: Feature) -> Result<PointFeature> {
    let geometry = feature
        .geometry
        .ok_or(Error::MissingGeometry { index })?;

    let position = match geometry.value {
        Value::Point(coords) if coords.len() >= 2 => Coord {
            x: coords[0],
            y: coords[1],
        },
        Value::Point(_) => {
            return Err(Error::GeoJson(format!(
                "point {} has fewer than two coordinates",
                index
            )))
        }
        other => {
            return Err(Error::NonPointGeometry {
                index,
                kind: geometry_kind(&other).to_string(),
            })
        }
    };

    let attributes = feature
        .properties
        .map(|props| {
            props
                .iter()
                .map(|(key, value)| (key.clone(), AttributeValue::from_json(value)))
                .collect()
        })
        .unwrap_or_default();

    Ok(PointFeature::new(position, attributes))
}

/// `{"crs": {"type": "name", "properties": {"name": "EPSG:3857"}}}`
fn crs_from_members(members: &JsonObject) -> Option<CRS> {
    let name = members
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()?;
    Some(CRS::parse(name))
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRACK: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 1.0]},
             "properties": {"TN Bearing": 0, "Signal Strength": -71.5, "Date & Time": "2024-05-01 10:00"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [5.0, 5.0]},
             "properties": {"TN Bearing": 90, "Note": "relay"}}
        ]
    }"#;

    #[test]
    fn reads_points_in_file_order() {
        let set = read_points_from_str(TRACK).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.coordinates(), vec![(1.0, 1.0), (5.0, 5.0)]);
        assert!(set.crs.is_wgs84());
        assert_eq!(
            set.columns,
            vec!["TN Bearing", "Signal Strength", "Date & Time", "Note"]
        );
        assert_eq!(set.features[1].get("TN Bearing"), Some(&AttributeValue::Int(90)));
    }

    #[test]
    fn legacy_crs_member_is_honoured() {
        let text = r#"{
            "type": "FeatureCollection",
            "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::3857"}},
            "features": []
        }"#;
        let set = read_points_from_str(text).unwrap();
        assert_eq!(set.crs.epsg(), Some(3857));
        assert!(set.is_empty());
    }

    #[test]
    fn single_feature_accepted() {
        let text = r#"{"type": "Feature", "geometry": {"type": "Point", "coordinates": [2.0, 3.0]}, "properties": null}"#;
        let set = read_points_from_str(text).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.columns.is_empty());
    }

    #[test]
    fn non_point_geometry_rejected() {
        let text = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}, "properties": {}}
        ]}"#;
        match read_points_from_str(text) {
            Err(Error::NonPointGeometry { index, kind }) => {
                assert_eq!(index, 0);
                assert_eq!(kind, "LineString");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRACK.as_bytes()).unwrap();
        let set = read_points(file.path()).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(read_points_from_str("{ not json").is_err());
    }
}
