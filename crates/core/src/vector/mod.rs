//! Point features and their attributes

use crate::crs::CRS;
use geo_types::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Arrays and objects, kept as compact JSON text
    Other(String),
}

impl AttributeValue {
    /// Convert a GeoJSON property value
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map(Self::Float).unwrap_or(Self::Null),
            },
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Other(other.to_string()),
        }
    }

    /// Int and float values; these are right-aligned in the table
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Numeric view of the value. Text is parsed so that bearings stored as
    /// strings still produce an indicator.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{:?}", v),
            Self::Text(s) | Self::Other(s) => f.write_str(s),
        }
    }
}

/// A point with its properties in source order
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    pub position: Coord<f64>,
    pub attributes: Vec<(String, AttributeValue)>,
}

impl PointFeature {
    pub fn new(position: Coord<f64>, attributes: Vec<(String, AttributeValue)>) -> Self {
        Self {
            position,
            attributes,
        }
    }

    /// Get an attribute by name
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// Ordered point features read from one file.
///
/// `columns` is the union of all property keys in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeatureSet {
    pub features: Vec<PointFeature>,
    pub crs: CRS,
    pub columns: Vec<String>,
}

impl PointFeatureSet {
    /// Build a set, deriving the column list from the features
    pub fn new(features: Vec<PointFeature>, crs: CRS) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for feature in &features {
            for (name, _) in &feature.attributes {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.clone());
                }
            }
        }
        Self {
            features,
            crs,
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Source coordinates as (x, y) pairs
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.features
            .iter()
            .map(|f| (f.position.x, f.position.y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(x: f64, y: f64, attrs: &[(&str, AttributeValue)]) -> PointFeature {
        PointFeature::new(
            Coord { x, y },
            attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn json_values_map_to_variants() {
        assert_eq!(AttributeValue::from_json(&json!(3)), AttributeValue::Int(3));
        assert_eq!(AttributeValue::from_json(&json!(2.5)), AttributeValue::Float(2.5));
        assert_eq!(AttributeValue::from_json(&json!(null)), AttributeValue::Null);
        assert_eq!(
            AttributeValue::from_json(&json!([1, 2])),
            AttributeValue::Other("[1,2]".to_string())
        );
    }

    #[test]
    fn numeric_and_display() {
        assert!(AttributeValue::Float(1.0).is_numeric());
        assert!(!AttributeValue::Bool(true).is_numeric());
        assert!(!AttributeValue::Text("12".into()).is_numeric());
        assert_eq!(AttributeValue::Text(" 90 ".into()).as_f64(), Some(90.0));
        assert_eq!(AttributeValue::Text("north".into()).as_f64(), None);
        assert_eq!(AttributeValue::Null.to_string(), "");
        assert_eq!(AttributeValue::Bool(false).to_string(), "False");
        assert_eq!(AttributeValue::Float(90.0).to_string(), "90.0");
        assert_eq!(AttributeValue::Float(-71.5).to_string(), "-71.5");
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let set = PointFeatureSet::new(
            vec![
                feature(0.0, 0.0, &[("b", AttributeValue::Int(1)), ("a", AttributeValue::Null)]),
                feature(1.0, 1.0, &[("c", AttributeValue::Int(2)), ("b", AttributeValue::Int(3))]),
            ],
            CRS::wgs84(),
        );
        assert_eq!(set.columns, vec!["b", "a", "c"]);
        assert_eq!(set.features[1].get("c"), Some(&AttributeValue::Int(2)));
        assert!(set.features[0].get("c").is_none());
        assert_eq!(set.coordinates(), vec![(0.0, 0.0), (1.0, 1.0)]);
    }
}
