//! Great-circle distance between coordinates

use geo::{Distance, Geodesic, Point};

use crate::model::Coordinate;

/// Metres per statute mile
const METERS_PER_MILE: f64 = 1609.344;

/// Geodesic (WGS84 ellipsoid) distance in statute miles.
pub fn geodesic_miles(from: Coordinate, to: Coordinate) -> f64 {
    if from == to {
        return 0.0;
    }
    let a = Point::new(from.lon(), from.lat());
    let b = Point::new(to.lon(), to.lat());
    Geodesic.distance(a, b) / METERS_PER_MILE
}

/// Inclusive radius test. An unresolved point is never inside any radius.
pub fn within_radius(point: Option<Coordinate>, center: Coordinate, radius_miles: f64) -> bool {
    match point {
        Some(point) => geodesic_miles(point, center) <= radius_miles,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_toronto_montreal() {
        let miles = geodesic_miles(c(43.65107, -79.347015), c(45.501689, -73.567256));
        assert!((miles - 313.0).abs() < 5.0, "got {}", miles);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = c(41.8781, -87.6298);
        let b = c(29.4241, -98.4936);
        assert!((geodesic_miles(a, b) - geodesic_miles(b, a)).abs() < 1e-6);
    }

    #[test]
    fn test_same_point_is_zero() {
        let a = c(19.4326, -99.1332);
        assert_eq!(geodesic_miles(a, a), 0.0);
    }

    #[test]
    fn test_within_radius() {
        let chicago = c(41.8781, -87.6298);
        let detroit = c(42.3314, -83.0458);
        assert!(within_radius(Some(detroit), chicago, 300.0));
        assert!(!within_radius(Some(detroit), chicago, 200.0));
        assert!(within_radius(Some(chicago), chicago, 0.0));
        assert!(!within_radius(None, chicago, 10_000.0));
    }
}
