//! Coordinate Reference System handling

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate Reference System representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CRS {
    /// EPSG code if known
    epsg: Option<u32>,
    /// Raw identifier when no EPSG code could be recognised
    name: Option<String>,
}

impl CRS {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self {
            epsg: Some(code),
            name: None,
        }
    }

    /// Parse a CRS identifier as found in GeoJSON `crs` members.
    ///
    /// Recognises `EPSG:4326`, `epsg:4326`, `urn:ogc:def:crs:EPSG::4326`,
    /// `urn:ogc:def:crs:EPSG:6.6:4326` and the `CRS84` forms (treated as 4326,
    /// longitude first). Anything else is kept verbatim without an EPSG code.
    pub fn parse(identifier: &str) -> Self {
        let trimmed = identifier.trim();
        let upper = trimmed.to_ascii_uppercase();

        if upper.ends_with("CRS84") {
            return Self::wgs84();
        }

        if let Some(pos) = upper.find("EPSG") {
            let code = upper[pos + 4..]
                .rsplit(':')
                .next()
                .and_then(|c| c.trim().parse::<u32>().ok());
            if let Some(code) = code {
                return Self::from_epsg(code);
            }
        }

        Self {
            epsg: None,
            name: Some(trimmed.to_string()),
        }
    }

    /// WGS84 geographic CRS (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::from_epsg(4326)
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Self::from_epsg(3857)
    }

    /// Get EPSG code if known
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Whether this is exactly EPSG:4326 (axis labels are then decimal degrees)
    pub fn is_wgs84(&self) -> bool {
        self.epsg == Some(4326)
    }

    /// Check if two CRS are equivalent
    pub fn is_equivalent(&self, other: &CRS) -> bool {
        if let (Some(a), Some(b)) = (self.epsg, other.epsg) {
            return a == b;
        }

        if let (Some(a), Some(b)) = (&self.name, &other.name) {
            return a == b;
        }

        false
    }

    /// Get a string identifier for this CRS
    pub fn identifier(&self) -> String {
        if let Some(code) = self.epsg {
            return format!("EPSG:{}", code);
        }
        if let Some(name) = &self.name {
            return name.clone();
        }
        "Unknown".to_string()
    }
}

impl fmt::Display for CRS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl Default for CRS {
    fn default() -> Self {
        Self::wgs84()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crs_epsg() {
        let crs = CRS::from_epsg(4326);
        assert_eq!(crs.epsg(), Some(4326));
        assert_eq!(crs.identifier(), "EPSG:4326");
        assert!(crs.is_wgs84());
    }

    #[test]
    fn test_crs_equivalence() {
        let a = CRS::from_epsg(4326);
        let b = CRS::wgs84();
        assert!(a.is_equivalent(&b));
        assert!(!a.is_equivalent(&CRS::web_mercator()));
    }

    #[test]
    fn parse_geojson_names() {
        assert_eq!(CRS::parse("EPSG:3857").epsg(), Some(3857));
        assert_eq!(CRS::parse("urn:ogc:def:crs:EPSG::32630").epsg(), Some(32630));
        assert_eq!(CRS::parse("urn:ogc:def:crs:EPSG:6.6:4326").epsg(), Some(4326));
        assert_eq!(CRS::parse("urn:ogc:def:crs:OGC:1.3:CRS84").epsg(), Some(4326));
    }

    #[test]
    fn parse_unknown_keeps_name() {
        let crs = CRS::parse("LOCAL_CS[\"site grid\"]");
        assert_eq!(crs.epsg(), None);
        assert_eq!(crs.identifier(), "LOCAL_CS[\"site grid\"]");
        assert!(!crs.is_equivalent(&CRS::wgs84()));
    }
}
