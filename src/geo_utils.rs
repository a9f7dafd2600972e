//! # Geographic Utilities
//!
//! Distance computation between itinerary stops.
//!
//! The planner only needs one geographic primitive: the great-circle
//! distance between two coordinate pairs, which feeds the proximity term of
//! the place score so that afternoon and evening picks cluster around the
//! morning anchor instead of sprawling across the city.
//!
//! ## Algorithm Notes
//!
//! Distances use the haversine formula (mean Earth radius ≈ 6371 km) via the
//! `geo` crate, accurate to within 0.3% for city-scale distances. All inputs
//! are WGS84 latitude/longitude in degrees.

use crate::LatLng;
use geo::{Distance, Haversine, Point};

/// Great-circle distance between two coordinates, in kilometers.
///
/// Symmetric, and zero when both coordinates are equal. Non-finite inputs
/// propagate through the result rather than erroring.
///
/// # Example
///
/// ```rust
/// use trip_planner::{geo_utils, LatLng};
///
/// let london = LatLng::new(51.5074, -0.1278);
/// let paris = LatLng::new(48.8566, 2.3522);
///
/// let distance = geo_utils::distance_km(london, paris);
/// assert!((distance - 343.5).abs() < 5.0); // ~344 km
/// ```
#[inline]
pub fn distance_km(a: LatLng, b: LatLng) -> f64 {
    let p1 = Point::new(a.lng, a.lat);
    let p2 = Point::new(b.lng, b.lat);
    Haversine::distance(p1, p2) / 1000.0
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let p = LatLng::new(51.5074, -0.1278);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let london = LatLng::new(51.5074, -0.1278);
        let paris = LatLng::new(48.8566, 2.3522);
        assert_eq!(distance_km(london, paris), distance_km(paris, london));
    }

    #[test]
    fn test_distance_known_value() {
        // London to Paris is approximately 344 km
        let london = LatLng::new(51.5074, -0.1278);
        let paris = LatLng::new(48.8566, 2.3522);
        let dist = distance_km(london, paris);
        assert!(approx_eq(dist, 343.5, 5.0));
    }

    #[test]
    fn test_distance_city_scale() {
        // Louvre to Eiffel Tower, a few kilometers
        let louvre = LatLng::new(48.8606, 2.3376);
        let eiffel = LatLng::new(48.8584, 2.2945);
        let dist = distance_km(louvre, eiffel);
        assert!(dist > 2.0 && dist < 4.0, "expected ~3 km, got {dist}");
    }

    #[test]
    fn test_non_finite_inputs_propagate() {
        let p = LatLng::new(48.8566, 2.3522);
        let bad = LatLng::new(f64::NAN, 2.3522);
        assert!(distance_km(p, bad).is_nan());
    }
}
