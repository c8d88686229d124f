//! Validated latitude/longitude pair

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in decimal degrees.
///
/// Only constructible through [`Coordinate::new`], so every value in the system
/// is in range. Unresolved locations are `None`, never a placeholder pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Returns `None` unless `lat` is in [-90, 90] and `lon` is in [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self { lat, lon })
    }

    /// Parse a `"lat,lon"` pair. Malformed input yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let (lat, lon) = s.split_once(',')?;
        let lat = lat.trim().parse().ok()?;
        let lon = lon.trim().parse().ok()?;
        Self::new(lat, lon)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Build a coordinate from optional raw parts, as read from two table cells.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Self::new(lat, lon),
            _ => None,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).is_some());
        assert!(Coordinate::new(-90.0, -180.0).is_some());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Coordinate::new(90.5, 0.0).is_none());
        assert!(Coordinate::new(0.0, -180.1).is_none());
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_parse_pair() {
        let c = Coordinate::parse(" 43.65107 , -79.347015 ").unwrap();
        assert_eq!(c.lat(), 43.65107);
        assert_eq!(c.lon(), -79.347015);
        assert!(Coordinate::parse("43.6").is_none());
        assert!(Coordinate::parse("north,west").is_none());
        assert!(Coordinate::parse("").is_none());
    }

    #[test]
    fn test_from_parts_requires_both() {
        assert!(Coordinate::from_parts(Some(1.0), None).is_none());
        assert!(Coordinate::from_parts(Some(1.0), Some(2.0)).is_some());
    }
}
