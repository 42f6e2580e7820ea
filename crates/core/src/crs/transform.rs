//! Pure-Rust geographic ↔ UTM reprojection (Snyder 1987, USGS formulas).
//!
//! Covers the geographic frames EPSG 4326 (WGS84) and 4674 (SIRGAS 2000,
//! same ellipsoid within the tolerances used here) and the UTM families
//! EPSG 326xx (North) / 327xx (South). No external C dependencies (no
//! libproj). Both directions are implemented so geometries can be carried
//! into a planar frame and back.

use geo::MapCoords;
use geo_types::Coord;

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

// ── Public API ───────────────────────────────────────────────────────────

/// Projection family resolved from an EPSG code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Geographic longitude/latitude in degrees
    Geographic,
    /// Universal Transverse Mercator, coordinates in metres
    Utm { zone: u32, north: bool },
}

impl Projection {
    /// Resolve the projection for a CRS.
    ///
    /// Fails with `UnsupportedCrs` when the CRS has no EPSG code or the code
    /// is outside the supported geographic/UTM families.
    pub fn from_crs(crs: &CRS) -> Result<Self> {
        let Some(code) = crs.epsg() else {
            return Err(Error::UnsupportedCrs(crs.identifier()));
        };
        if is_geographic(code) {
            return Ok(Projection::Geographic);
        }
        if let Some((zone, north)) = parse_utm_epsg(code) {
            return Ok(Projection::Utm { zone, north });
        }
        Err(Error::UnsupportedCrs(crs.identifier()))
    }

    /// True for frames where Euclidean distance/area computations are valid.
    pub fn is_planar(&self) -> bool {
        matches!(self, Projection::Utm { .. })
    }
}

/// Check if an EPSG code represents a supported geographic frame.
pub fn is_geographic(epsg: u32) -> bool {
    epsg == 4326 || epsg == 4674
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

/// Coordinate transform between two supported frames.
///
/// Transforms route through geographic coordinates, so UTM → UTM across
/// zones works as well. Equal source and target frames pass coordinates
/// through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct CrsTransform {
    source: Projection,
    target: Projection,
}

impl CrsTransform {
    pub fn new(source: &CRS, target: &CRS) -> Result<Self> {
        Ok(Self {
            source: Projection::from_crs(source)?,
            target: Projection::from_crs(target)?,
        })
    }

    /// Transform a single coordinate.
    pub fn coord(&self, c: Coord<f64>) -> Coord<f64> {
        if self.source == self.target {
            return c;
        }

        let (lon, lat) = match self.source {
            Projection::Geographic => (c.x, c.y),
            Projection::Utm { zone, north } => utm_to_wgs84(c.x, c.y, zone, north),
        };

        let (x, y) = match self.target {
            Projection::Geographic => (lon, lat),
            Projection::Utm { zone, north } => wgs84_to_utm(lon, lat, zone, north),
        };

        Coord { x, y }
    }

    /// Transform a whole geometry, coordinate by coordinate.
    pub fn apply<G>(&self, geometry: &G) -> G
    where
        G: MapCoords<f64, f64, Output = G>,
    {
        geometry.map_coords(|c| self.coord(c))
    }
}

// ── Forward projection (Snyder 1987, USGS Prof. Paper 1395, pp. 61-64) ───

/// Convert (longitude, latitude) in degrees to UTM (easting, northing)
/// in metres for the given zone and hemisphere.
pub fn wgs84_to_utm(lon_deg: f64, lat_deg: f64, zone: u32, north: bool) -> (f64, f64) {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();

    // Central meridian of the zone
    let lon0 = ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians();

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let tan_lat = lat.tan();

    let n = A / (1.0 - E2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = E_PRIME2 * cos_lat * cos_lat;
    let a_coeff = cos_lat * (lon - lon0);

    // Meridional arc length M (Snyder eq. 3-21)
    let m = meridional_arc(lat);

    let a2 = a_coeff * a_coeff;
    let a4 = a2 * a2;
    let a6 = a4 * a2;

    // Easting (Snyder eq. 8-9)
    let easting = K0 * n
        * (a_coeff
            + (1.0 - t + c) * a2 * a_coeff / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * E_PRIME2)
                * a4
                * a_coeff
                / 120.0)
        + FALSE_EASTING;

    // Northing (Snyder eq. 8-10)
    let northing = K0
        * (m
            + n
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

// ── Inverse projection (Snyder 1987, eqs. 8-11 … 8-25) ──────────────────

/// Convert UTM (easting, northing) in metres back to (longitude, latitude)
/// in degrees for the given zone and hemisphere.
pub fn utm_to_wgs84(easting: f64, northing: f64, zone: u32, north: bool) -> (f64, f64) {
    let x = easting - FALSE_EASTING;
    let y = if north {
        northing
    } else {
        northing - FALSE_NORTHING_SOUTH
    };

    let lon0 = ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians();

    // Footpoint latitude from the rectifying latitude mu (Snyder eq. 7-19)
    let m = y / K0;
    let mu = m / (A * (1.0 - E2 / 4.0 - 3.0 * E2 * E2 / 64.0 - 5.0 * E2 * E2 * E2 / 256.0));
    let e1 = (1.0 - (1.0 - E2).sqrt()) / (1.0 + (1.0 - E2).sqrt());

    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_2 * e1_2;

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
    let n1 = A / (1.0 - E2 * sin_phi1 * sin_phi1).sqrt();
    let r1 = A * (1.0 - E2) / (1.0 - E2 * sin_phi1 * sin_phi1).powf(1.5);
    let d = x / (n1 * K0);

    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d2 * d2;
    let d5 = d4 * d;
    let d6 = d4 * d2;

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * E_PRIME2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                    - 252.0 * E_PRIME2
                    - 3.0 * c1 * c1)
                    * d6
                    / 720.0);

    let lon = lon0
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

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, Polygon};

    /// Helper: assert two values are within `tol` of each other.
    fn assert_close(a: f64, b: f64, tol: f64, msg: &str) {
        let diff = (a - b).abs();
        assert!(
            diff < tol,
            "{msg}: expected {b}, got {a}, diff {diff} exceeds tolerance {tol}"
        );
    }

    #[test]
    fn parse_utm_north() {
        assert_eq!(parse_utm_epsg(32630), Some((30, true)));
        assert_eq!(parse_utm_epsg(32601), Some((1, true)));
        assert_eq!(parse_utm_epsg(32660), Some((60, true)));
    }

    #[test]
    fn parse_utm_south() {
        assert_eq!(parse_utm_epsg(32723), Some((23, false)));
        assert_eq!(parse_utm_epsg(32701), Some((1, false)));
        assert_eq!(parse_utm_epsg(32760), Some((60, false)));
    }

    #[test]
    fn parse_utm_invalid() {
        assert_eq!(parse_utm_epsg(4326), None);
        assert_eq!(parse_utm_epsg(3857), None);
        assert_eq!(parse_utm_epsg(32600), None); // zone 0 invalid
        assert_eq!(parse_utm_epsg(32661), None); // zone 61 invalid
        assert_eq!(parse_utm_epsg(32700), None);
    }

    #[test]
    fn geographic_codes() {
        assert!(is_geographic(4326));
        assert!(is_geographic(4674));
        assert!(!is_geographic(32723));
    }

    #[test]
    fn projection_from_crs() {
        assert_eq!(
            Projection::from_crs(&CRS::sirgas2000()).unwrap(),
            Projection::Geographic
        );
        assert_eq!(
            Projection::from_crs(&CRS::utm(23, false)).unwrap(),
            Projection::Utm { zone: 23, north: false }
        );
        assert!(Projection::from_crs(&CRS::from_epsg(3857)).is_err());
        assert!(Projection::from_crs(&CRS::from_wkt("PROJCS[\"local\"]")).is_err());
    }

    // Reference values from pyproj (PROJ 9.x):
    //   from pyproj import Transformer
    //   t = Transformer.from_crs(4326, 32630, always_xy=True)
    //   t.transform(-3.7037, 40.4168) → (440298.94, 4474257.31)
    #[test]
    fn madrid_wgs84_to_utm30n() {
        let (e, n) = wgs84_to_utm(-3.7037, 40.4168, 30, true);
        assert_close(e, 440_298.94, 1.0, "easting");
        assert_close(n, 4_474_257.31, 1.0, "northing");
    }

    // Buenos Aires: (-58.3816, -34.6037) → UTM 21S (EPSG:32721)
    //   t = Transformer.from_crs(4326, 32721, always_xy=True)
    //   t.transform(-58.3816, -34.6037) → (373317.50, 6170036.17)
    #[test]
    fn buenos_aires_wgs84_to_utm21s() {
        let (e, n) = wgs84_to_utm(-58.3816, -34.6037, 21, false);
        assert_close(e, 373_317.50, 1.0, "easting");
        assert_close(n, 6_170_036.17, 1.0, "northing");
    }

    // Equator at zone 30 central meridian (-3°): easting should be 500000
    #[test]
    fn equator_central_meridian() {
        let (e, n) = wgs84_to_utm(-3.0, 0.0, 30, true);
        assert_close(e, 500_000.0, 0.01, "easting at CM");
        assert_close(n, 0.0, 0.01, "northing at equator");
    }

    // Round trip bounds are the contract: 1e-8 degrees is ~1 mm on the
    // ground, 1e-4 m going the other way.
    #[test]
    fn roundtrip_geographic_utm_geographic() {
        // Belo Horizonte area, UTM zone 23S
        let (lon, lat) = (-43.9378, -19.9208);
        let (e, n) = wgs84_to_utm(lon, lat, 23, false);
        let (lon2, lat2) = utm_to_wgs84(e, n, 23, false);
        assert_close(lon2, lon, 1e-8, "longitude after round trip");
        assert_close(lat2, lat, 1e-8, "latitude after round trip");
    }

    #[test]
    fn roundtrip_utm_geographic_utm() {
        let (e, n) = (610_000.0, 7_795_000.0); // zone 23S, Minas Gerais
        let (lon, lat) = utm_to_wgs84(e, n, 23, false);
        let (e2, n2) = wgs84_to_utm(lon, lat, 23, false);
        assert_close(e2, e, 1e-4, "easting after round trip");
        assert_close(n2, n, 1e-4, "northing after round trip");
    }

    #[test]
    fn roundtrip_between_planar_frames() {
        // Zone 23S → neighboring zone 22S and back, through the geographic hop
        let forward = CrsTransform::new(&CRS::utm(23, false), &CRS::utm(22, false)).unwrap();
        let back = CrsTransform::new(&CRS::utm(22, false), &CRS::utm(23, false)).unwrap();

        // Far from zone 22's central meridian, so the series truncation is at
        // its worst; 1 mm still holds for a round trip.
        let c = Coord { x: 310_000.0, y: 7_795_000.0 };
        let rt = back.coord(forward.coord(c));
        assert_close(rt.x, c.x, 1e-3, "easting after cross-zone round trip");
        assert_close(rt.y, c.y, 1e-3, "northing after cross-zone round trip");
    }

    #[test]
    fn transform_identity_is_exact() {
        let tf = CrsTransform::new(&CRS::utm(23, false), &CRS::utm(23, false)).unwrap();
        let c = Coord { x: 610_000.0, y: 7_795_000.0 };
        assert_eq!(tf.coord(c), c);
    }

    #[test]
    fn transform_polygon_roundtrip() {
        let forward = CrsTransform::new(&CRS::sirgas2000(), &CRS::utm(23, false)).unwrap();
        let back = CrsTransform::new(&CRS::utm(23, false), &CRS::sirgas2000()).unwrap();

        let poly: Polygon<f64> = polygon![
            (x: -44.1, y: -20.0),
            (x: -43.9, y: -20.0),
            (x: -43.9, y: -19.8),
            (x: -44.1, y: -19.8),
            (x: -44.1, y: -20.0),
        ];

        let projected = forward.apply(&poly);
        // Projected coordinates are metric and in the zone's easting range
        for c in projected.exterior().0.iter() {
            assert!(c.x > 100_000.0 && c.x < 900_000.0, "easting in metres, got {}", c.x);
            assert!(c.y > 7_000_000.0, "northing with south offset, got {}", c.y);
        }

        let restored = back.apply(&projected);
        for (orig, rt) in poly.exterior().0.iter().zip(restored.exterior().0.iter()) {
            assert_close(rt.x, orig.x, 1e-8, "longitude after round trip");
            assert_close(rt.y, orig.y, 1e-8, "latitude after round trip");
        }
    }
}
