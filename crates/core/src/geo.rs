//! Great-circle distance math for nearby search.
//!
//! The repositories embed the same formula into SQL so the database can rank
//! candidate rows; this module is the canonical definition of the constant
//! and the reference implementation used by unit tests.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default search radius in kilometers when the caller does not provide one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Great-circle distance in kilometers between two latitude/longitude points,
/// using the spherical law of cosines.
///
/// The cosine argument is clamped to `[-1, 1]` so identical coordinates
/// produce exactly 0 instead of a NaN from floating-point drift.
pub fn distance_km(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let (lat_a, lon_a) = (lat_a.to_radians(), lon_a.to_radians());
    let (lat_b, lon_b) = (lat_b.to_radians(), lon_b.to_radians());

    let central = lat_a.cos() * lat_b.cos() * (lon_b - lon_a).cos() + lat_a.sin() * lat_b.sin();

    EARTH_RADIUS_KM * central.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_have_zero_distance() {
        // Manhattan; also the coordinate pair the API tests seed with.
        let d = distance_km(40.7128, -74.0060, 40.7128, -74.0060);
        assert!(d.abs() < 1e-9, "identical points must be 0 km apart, got {d}");
    }

    #[test]
    fn test_known_city_pair() {
        // New York City -> Los Angeles is roughly 3936 km.
        let d = distance_km(40.7128, -74.0060, 34.0522, -118.2437);
        assert!(
            (d - 3936.0).abs() < 25.0,
            "NYC->LA should be ~3936 km, got {d}"
        );
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = distance_km(51.5074, -0.1278, 48.8566, 2.3522);
        let b = distance_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree of latitude is ~111.19 km on a 6371 km sphere.
        let d = distance_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.19).abs() < 0.1, "expected ~111.19 km, got {d}");
    }
}
