//! Pure-Rust point reprojection (Snyder 1987, USGS formulas).
//!
//! Supports EPSG:4326, EPSG:3857 (Web Mercator) and EPSG 326xx/327xx
//! (UTM north/south). Any pair of these is handled by going through
//! geographic WGS84. No external C dependencies (no libproj).

use crate::crs::CRS;
use crate::error::{Error, Result};

// ── WGS84 ellipsoid constants ────────────────────────────────────────────

const A: f64 = 6_378_137.0; // semi-major axis (m)
const F: f64 = 1.0 / 298.257_223_563; // flattening
const E2: f64 = 2.0 * F - F * F; // eccentricity squared
const E_PRIME2: f64 = E2 / (1.0 - E2); // second eccentricity squared
const K0: f64 = 0.9996; // UTM scale factor
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Latitude limit of the Web Mercator square
const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

/// The projections this module knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Projection {
    Geographic,
    WebMercator,
    Utm { zone: u32, north: bool },
}

impl Projection {
    fn from_crs(crs: &CRS) -> Option<Self> {
        match crs.epsg()? {
            4326 => Some(Self::Geographic),
            3857 | 900913 => Some(Self::WebMercator),
            code => parse_utm_epsg(code).map(|(zone, north)| Self::Utm { zone, north }),
        }
    }

    fn to_wgs84(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::Geographic => (x, y),
            Self::WebMercator => mercator_to_wgs84(x, y),
            Self::Utm { zone, north } => utm_to_wgs84(x, y, zone, north),
        }
    }

    fn from_wgs84(self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Self::Geographic => (lon, lat),
            Self::WebMercator => wgs84_to_mercator(lon, lat),
            Self::Utm { zone, north } => wgs84_to_utm(lon, lat, zone, north),
        }
    }
}

// ── Public API ───────────────────────────────────────────────────────────

/// Reproject `(x, y)` points from one CRS to another.
///
/// Output has the same length and order as the input. Equivalent CRSs
/// return a copy of the input.
pub fn reproject_points(points: &[(f64, f64)], from: &CRS, to: &CRS) -> Result<Vec<(f64, f64)>> {
    if from.is_equivalent(to) {
        return Ok(points.to_vec());
    }

    let unsupported = || Error::UnsupportedTransform {
        from: from.identifier(),
        to: to.identifier(),
    };
    let source = Projection::from_crs(from).ok_or_else(unsupported)?;
    let target = Projection::from_crs(to).ok_or_else(unsupported)?;

    tracing::debug!(from = %from, to = %to, count = points.len(), "Reprojecting points");

    Ok(points
        .iter()
        .map(|&(x, y)| {
            let (lon, lat) = source.to_wgs84(x, y);
            target.from_wgs84(lon, lat)
        })
        .collect())
}

/// Parse an EPSG code into UTM zone info: `Some((zone, is_north))`.
///
/// - EPSG 326xx → zone xx, North hemisphere
/// - EPSG 327xx → zone xx, South hemisphere
pub fn parse_utm_epsg(epsg: u32) -> Option<(u32, bool)> {
    if (32601..=32660).contains(&epsg) {
        Some((epsg - 32600, true))
    } else if (32701..=32760).contains(&epsg) {
        Some((epsg - 32700, false))
    } else {
        None
    }
}

// ── Web Mercator ─────────────────────────────────────────────────────────

fn wgs84_to_mercator(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let lat = lat_deg.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT).to_radians();
    let x = A * lon_deg.to_radians();
    let y = A * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
    (x, y)
}

fn mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / A).to_degrees();
    let lat = (2.0 * (y / A).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    (lon, lat)
}

// ── Transverse Mercator (Snyder 1987, USGS Prof. Paper 1395, pp. 61-64) ──

fn central_meridian(zone: u32) -> f64 {
    ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians()
}

/// Convert WGS84 (longitude, latitude) in degrees to UTM (easting, northing)
/// in metres for the given zone and hemisphere.
fn wgs84_to_utm(lon_deg: f64, lat_deg: f64, zone: u32, north: bool) -> (f64, f64) {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let lon0 = central_meridian(zone);

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let tan_lat = lat.tan();

    let n = A / (1.0 - E2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = E_PRIME2 * cos_lat * cos_lat;
    let a_coeff = cos_lat * (lon - lon0);

    let m = meridional_arc(lat);

    let a2 = a_coeff * a_coeff;
    let a4 = a2 * a2;
    let a6 = a4 * a2;

    // Snyder eq. 8-9
    let easting = K0
        * n
        * (a_coeff
            + (1.0 - t + c) * a2 * a_coeff / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * E_PRIME2) * a4 * a_coeff / 120.0)
        + FALSE_EASTING;

    // Snyder eq. 8-10
    let northing = K0
        * (m + n
            * tan_lat
            * (a2 / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * E_PRIME2) * a6 / 720.0));

    let northing = if north {
        northing
    } else {
        northing + FALSE_NORTHING_SOUTH
    };

    (easting, northing)
}

/// Convert UTM (easting, northing) in metres back to WGS84 degrees.
fn utm_to_wgs84(easting: f64, northing: f64, zone: u32, north: bool) -> (f64, f64) {
    let y = if north {
        northing
    } else {
        northing - FALSE_NORTHING_SOUTH
    };
    let x = easting - FALSE_EASTING;

    let e4 = E2 * E2;
    let e6 = e4 * E2;

    // Footpoint latitude (Snyder eq. 7-19, 3-24, 3-26)
    let m = y / K0;
    let mu = m / (A * (1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
    let sqrt_1_e2 = (1.0 - E2).sqrt();
    let e1 = (1.0 - sqrt_1_e2) / (1.0 + sqrt_1_e2);
    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_3 * e1;
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();
    let c1 = E_PRIME2 * cos_phi1 * cos_phi1;
    let t1 = tan_phi1 * tan_phi1;
    let denom = 1.0 - E2 * sin_phi1 * sin_phi1;
    let n1 = A / denom.sqrt();
    let r1 = A * (1.0 - E2) / denom.powf(1.5);
    let d = x / (n1 * K0);

    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d2 * d2;
    let d5 = d4 * d;
    let d6 = d4 * d2;

    // Snyder eq. 8-17
    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * E_PRIME2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                    - 252.0 * E_PRIME2
                    - 3.0 * c1 * c1)
                    * d6
                    / 720.0);

    // Snyder eq. 8-18
    let lon = central_meridian(zone)
        + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * E_PRIME2 + 24.0 * t1 * t1)
                * d5
                / 120.0)
            / cos_phi1;

    (lon.to_degrees(), lat.to_degrees())
}

/// Meridional arc from equator to latitude `lat` (radians).
/// Snyder eq. 3-21.
fn meridional_arc(lat: f64) -> f64 {
    let e2 = E2;
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    A * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
        - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
        + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
        - (35.0 * e6 / 3072.0) * (6.0 * lat).sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_close(a: f64, b: f64, tol: f64, msg: &str) {
        let diff = (a - b).abs();
        assert!(
            diff < tol,
            "{msg}: expected {b}, got {a}, diff {diff} exceeds tolerance {tol}"
        );
    }

    #[test]
    fn parse_utm_codes() {
        assert_eq!(parse_utm_epsg(32630), Some((30, true)));
        assert_eq!(parse_utm_epsg(32721), Some((21, false)));
        assert_eq!(parse_utm_epsg(32600), None);
        assert_eq!(parse_utm_epsg(32661), None);
        assert_eq!(parse_utm_epsg(3857), None);
    }

    // pyproj: Transformer.from_crs(4326, 32630, always_xy=True)
    //   .transform(-3.7037, 40.4168) → (440298.94, 4474257.31)
    #[test]
    fn madrid_to_utm30n() {
        let out = reproject_points(&[(-3.7037, 40.4168)], &CRS::wgs84(), &CRS::from_epsg(32630))
            .unwrap();
        assert_close(out[0].0, 440_298.94, 1.0, "easting");
        assert_close(out[0].1, 4_474_257.31, 1.0, "northing");
    }

    #[test]
    fn buenos_aires_utm21s_roundtrip() {
        let (e, n) = wgs84_to_utm(-58.3816, -34.6037, 21, false);
        assert_close(e, 373_317.50, 1.0, "easting");
        assert_close(n, 6_170_036.17, 1.0, "northing");

        let (lon, lat) = utm_to_wgs84(e, n, 21, false);
        assert_relative_eq!(lon, -58.3816, epsilon = 1e-6);
        assert_relative_eq!(lat, -34.6037, epsilon = 1e-6);
    }

    #[test]
    fn web_mercator_known_values() {
        let out = reproject_points(&[(180.0, 0.0), (0.0, 0.0)], &CRS::wgs84(), &CRS::web_mercator())
            .unwrap();
        assert_relative_eq!(out[0].0, 20_037_508.342_789_244, epsilon = 1e-6);
        assert_relative_eq!(out[0].1, 0.0, epsilon = 1e-6);
        assert_relative_eq!(out[1].0, 0.0, epsilon = 1e-9);

        let back = reproject_points(&[(-412_000.0, 4_926_000.0)], &CRS::web_mercator(), &CRS::wgs84())
            .unwrap();
        let again = reproject_points(&back, &CRS::wgs84(), &CRS::web_mercator()).unwrap();
        assert_relative_eq!(again[0].0, -412_000.0, epsilon = 1e-6);
        assert_relative_eq!(again[0].1, 4_926_000.0, epsilon = 1e-6);
    }

    #[test]
    fn composes_through_wgs84() {
        let start = [(440_298.94, 4_474_257.31)];
        let merc = reproject_points(&start, &CRS::from_epsg(32630), &CRS::web_mercator()).unwrap();
        let (lon, lat) = mercator_to_wgs84(merc[0].0, merc[0].1);
        assert_relative_eq!(lon, -3.7037, epsilon = 1e-4);
        assert_relative_eq!(lat, 40.4168, epsilon = 1e-4);
    }

    #[test]
    fn same_crs_is_identity() {
        let pts = vec![(1.0, 2.0), (3.0, 4.0)];
        let out = reproject_points(&pts, &CRS::from_epsg(32630), &CRS::from_epsg(32630)).unwrap();
        assert_eq!(out, pts);
    }

    #[test]
    fn unsupported_pair_errors() {
        let err = reproject_points(&[(0.0, 0.0)], &CRS::wgs84(), &CRS::from_epsg(2154)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedTransform { .. }));
    }
}
