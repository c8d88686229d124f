//! Route map data: line segments plus a viewport, written as JSON for a map layer

use std::path::Path;

use ratefinder_domain::model::LaneRecord;
use ratefinder_types::Result;
use serde::{Deserialize, Serialize};

/// Zoom level used for every derived viewport
pub const DEFAULT_ZOOM: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMap {
    pub segments: Vec<RouteSegment>,
    /// `None` when no record had both endpoints resolved
    pub viewport: Option<Viewport>,
}

impl RouteMap {
    /// One segment per record with both endpoints resolved, in record order.
    /// The viewport centers on the mean of the segment start points.
    pub fn from_records(records: &[LaneRecord]) -> Self {
        let segments: Vec<RouteSegment> = records
            .iter()
            .filter_map(|r| {
                let from = r.origin.coordinate?;
                let to = r.destination.coordinate?;
                Some(RouteSegment {
                    from_lat: from.lat(),
                    from_lon: from.lon(),
                    to_lat: to.lat(),
                    to_lon: to.lon(),
                    label: r.lane_label(),
                })
            })
            .collect();

        let viewport = (!segments.is_empty()).then(|| {
            let n = segments.len() as f64;
            Viewport {
                center_lat: segments.iter().map(|s| s.from_lat).sum::<f64>() / n,
                center_lon: segments.iter().map(|s| s.from_lon).sum::<f64>() / n,
                zoom: DEFAULT_ZOOM,
            }
        });

        Self { segments, viewport }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratefinder_domain::model::{Coordinate, LocationDescriptor};

    fn lane(from: (f64, f64), to: Option<(f64, f64)>) -> LaneRecord {
        let origin = LocationDescriptor::new("A", "", "").with_coordinate(Coordinate::new(from.0, from.1));
        let destination =
            LocationDescriptor::new("B", "", "").with_coordinate(to.and_then(|(lat, lon)| Coordinate::new(lat, lon)));
        LaneRecord::new(origin, destination, "Dry Van")
    }

    #[test]
    fn test_viewport_is_mean_of_origins() {
        let map = RouteMap::from_records(&[
            lane((40.0, -80.0), Some((45.0, -75.0))),
            lane((42.0, -90.0), Some((30.0, -95.0))),
        ]);
        assert_eq!(map.segments.len(), 2);
        let viewport = map.viewport.unwrap();
        assert!((viewport.center_lat - 41.0).abs() < 1e-9);
        assert!((viewport.center_lon + 85.0).abs() < 1e-9);
        assert_eq!(viewport.zoom, 4);
    }

    #[test]
    fn test_unresolved_records_have_no_segment() {
        let map = RouteMap::from_records(&[lane((40.0, -80.0), None)]);
        assert!(map.is_empty());
        assert!(map.viewport.is_none());
    }
}
