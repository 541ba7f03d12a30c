//! Spatial query utilities for distance calculations.
//!
//! Uses Haversine formula for accurate distances on Earth's surface.

use geo::Point;

/// Earth radius used by every distance in the game, in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate Haversine distance in meters between two `(latitude, longitude)`
/// pairs given in degrees.
///
/// Total over all inputs: NaN coordinates yield NaN.
pub fn distance_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    distance_between(p1.y(), p1.x(), p2.y(), p2.x())
}

/// Straight-line distance through a unit sphere between two surface points
/// `meters` apart along the surface. Saturates at the diameter.
pub fn chord_for_distance(meters: f64) -> f64 {
    let angle = (meters / EARTH_RADIUS_M).min(std::f64::consts::PI);
    2.0 * (angle / 2.0).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_between(40.7128, -74.0060, 40.7128, -74.0060), 0.0);
        assert_eq!(distance_between(-33.86, 151.2, -33.86, 151.2), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = distance_between(40.7128, -74.0060, 34.0522, -118.2437);
        let ba = distance_between(34.0522, -118.2437, 40.7128, -74.0060);
        assert_relative_eq!(ab, ba, epsilon = 1e-6);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let dist = distance_between(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(dist, 111_320.0, max_relative = 0.01);
    }

    #[test]
    fn test_haversine_distance() {
        // Distance from NYC to LA is approximately 3,936 km
        let nyc = Point::new(-74.0060, 40.7128);
        let la = Point::new(-118.2437, 34.0522);

        let dist = haversine_distance(nyc, la);
        assert!((dist - 3_936_000.0).abs() < 50_000.0); // Within 50km
    }

    #[test]
    fn test_nan_propagates() {
        assert!(distance_between(f64::NAN, 0.0, 1.0, 1.0).is_nan());
    }

    #[test]
    fn test_chord_matches_haversine() {
        use crate::spatial::index::unit_vector;

        let a = Point::new(10.75, 59.9);
        let b = Point::new(10.76, 59.904);
        let (ua, ub) = (unit_vector(a), unit_vector(b));
        let chord = ua
            .iter()
            .zip(&ub)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt();

        let expected = chord_for_distance(haversine_distance(a, b));
        assert_relative_eq!(chord, expected, max_relative = 1e-9);
        assert_relative_eq!(chord_for_distance(1e9), 2.0, epsilon = 1e-12);
    }
}
