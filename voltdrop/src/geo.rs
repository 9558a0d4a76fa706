//! Geodesy helpers for map-measured circuit runs.
//!
//! Lengths are computed on a sphere with the WGS-84 equatorial radius,
//! matching the spherical geometry library the map host uses, so a
//! length measured here agrees with what the map displays.

use serde::{Deserialize, Serialize};

/// Earth radius in meters (WGS-84 equatorial, the Web Mercator sphere).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A geodetic point as drawn on the map.
///
/// Serialized with `lat`/`lng` field names, the wire format of the
/// `path` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two points in meters (haversine).
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Geodesic length of an ordered vertex sequence in meters.
///
/// Empty and single-vertex paths have length 0 by definition; duplicate
/// adjacent vertices are legal and contribute nothing.
pub fn path_length(path: &[GeoPoint]) -> f64 {
    // Fold from an explicit 0.0: summing zero segments must yield
    // positive zero, not the -0.0 an empty `sum()` can produce, or the
    // serialized length would read "-0.00".
    path.windows(2)
        .fold(0.0, |total, pair| total + haversine_distance(pair[0], pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_singleton_paths_have_zero_length() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[GeoPoint::new(43.6532, -79.3832)]), 0.0);
    }

    #[test]
    fn test_zero_length_is_positive_zero() {
        // -0.0 compares equal to 0.0 but renders as "-0.00"; the zero
        // must carry a positive sign so serialized lengths never do.
        assert!(path_length(&[]).is_sign_positive());
        let single = path_length(&[GeoPoint::new(43.6532, -79.3832)]);
        assert!(single.is_sign_positive());
        assert_eq!(format!("{:.2}", single), "0.00");
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree of latitude on the sphere is R * pi / 180.
        let a = GeoPoint::new(43.0, -79.0);
        let b = GeoPoint::new(44.0, -79.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((haversine_distance(a, b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(43.6532, -79.3832);
        let b = GeoPoint::new(43.7, -79.4);
        assert!((haversine_distance(a, b) - haversine_distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_adjacent_vertices_contribute_nothing() {
        let p = GeoPoint::new(43.6532, -79.3832);
        let q = GeoPoint::new(43.66, -79.39);
        let with_dup = path_length(&[p, p, q]);
        let without = path_length(&[p, q]);
        assert!((with_dup - without).abs() < 1e-9);
    }

    #[test]
    fn test_length_sums_segments() {
        let a = GeoPoint::new(43.0, -79.0);
        let b = GeoPoint::new(43.1, -79.0);
        let c = GeoPoint::new(43.1, -79.1);
        let total = path_length(&[a, b, c]);
        let segments = haversine_distance(a, b) + haversine_distance(b, c);
        assert!((total - segments).abs() < 1e-9);
    }
}
