//! Great-circle distance for the nearest-landmark fallback.

use crate::models::GeoPoint;

/// Earth radius in meters.
///
/// The fallback cutoff is calibrated against this exact value; swapping in a
/// library distance with a different mean radius changes which landmark wins
/// at the boundary.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points, in meters.
pub fn haversine_distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_for_identical_points() {
        let p = GeoPoint::new(37.5788, 126.9770);
        assert_eq!(haversine_distance_meters(p, p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(37.5788, 126.9770);
        let b = GeoPoint::new(37.5796, 126.9770);
        let ab = haversine_distance_meters(a, b);
        let ba = haversine_distance_meters(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance_along_meridian() {
        // 0.001° of latitude is ~111.2 m on a 6371 km sphere
        let a = GeoPoint::new(37.5780, 126.9770);
        let b = GeoPoint::new(37.5790, 126.9770);
        let d = haversine_distance_meters(a, b);
        assert!((d - 111.2).abs() < 0.5, "got {}", d);
    }

    #[test]
    fn test_seoul_to_gyeongju_magnitude() {
        // Gyeongbokgung to Bulguksa is roughly 270 km
        let seoul = GeoPoint::new(37.5788, 126.9770);
        let bulguksa = GeoPoint::new(35.7898, 129.3320);
        let d = haversine_distance_meters(seoul, bulguksa);
        assert!(d > 250_000.0 && d < 300_000.0, "got {}", d);
    }
}
