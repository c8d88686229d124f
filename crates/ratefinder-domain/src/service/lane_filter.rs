//! Filter engine: categorical filters plus origin/destination radius queries

use ratefinder_types::Error;
use thiserror::Error as ThisError;

use crate::model::{normalize_label, Coordinate, EquipmentGroup, LaneRecord, Selection, ServiceType};
use crate::service::distance::within_radius;

/// Input errors reported before any filtering happens
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum FilterError {
    #[error("no location criteria supplied")]
    NoLocationCriteria,

    #[error("radius must be a non-negative number of miles, got {0}")]
    InvalidRadius(f64),
}

impl From<FilterError> for Error {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::NoLocationCriteria => Error::NoLocationCriteria,
            FilterError::InvalidRadius(_) => Error::InvalidInput(err.to_string()),
        }
    }
}

/// A resolved query point with its search radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusQuery {
    pub center: Coordinate,
    pub radius_miles: f64,
}

impl RadiusQuery {
    pub fn new(center: Coordinate, radius_miles: f64) -> Self {
        Self { center, radius_miles }
    }

    fn contains(&self, point: Option<Coordinate>) -> bool {
        within_radius(point, self.center, self.radius_miles)
    }

    /// Either endpoint of the lane lies inside this query.
    fn touches(&self, record: &LaneRecord) -> bool {
        self.contains(record.origin.coordinate) || self.contains(record.destination.coordinate)
    }
}

/// Immutable filter options for one search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneFilter {
    pub services: Selection<ServiceType>,
    pub equipment: Selection<EquipmentGroup>,
    /// Exact match on normalized mode type
    pub mode: Option<String>,
    pub origin: Option<RadiusQuery>,
    pub destination: Option<RadiusQuery>,
}

impl LaneFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(mut self, services: Selection<ServiceType>) -> Self {
        self.services = services;
        self
    }

    pub fn with_equipment(mut self, equipment: Selection<EquipmentGroup>) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn with_mode(mut self, mode: Option<&str>) -> Self {
        self.mode = mode.map(normalize_label).filter(|m| !m.is_empty());
        self
    }

    pub fn with_origin(mut self, origin: Option<RadiusQuery>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_destination(mut self, destination: Option<RadiusQuery>) -> Self {
        self.destination = destination;
        self
    }

    fn validate(&self) -> Result<(), FilterError> {
        if self.origin.is_none() && self.destination.is_none() {
            return Err(FilterError::NoLocationCriteria);
        }
        for query in [self.origin, self.destination].into_iter().flatten() {
            if !query.radius_miles.is_finite() || query.radius_miles < 0.0 {
                return Err(FilterError::InvalidRadius(query.radius_miles));
            }
        }
        Ok(())
    }

    fn matches_categories(&self, record: &LaneRecord) -> bool {
        if !self.services.allows(record.service_type.as_ref()) {
            return false;
        }
        if !self.equipment.allows(Some(&record.equipment_group)) {
            return false;
        }
        match &self.mode {
            Some(mode) => record.mode_type.as_deref() == Some(mode.as_str()),
            None => true,
        }
    }

    fn matches_location(&self, record: &LaneRecord) -> bool {
        match (&self.origin, &self.destination) {
            (Some(origin), Some(destination)) => {
                origin.contains(record.origin.coordinate)
                    && destination.contains(record.destination.coordinate)
            }
            (Some(query), None) | (None, Some(query)) => query.touches(record),
            (None, None) => false,
        }
    }
}

/// Apply `filter` to `records`, preserving table order.
///
/// With a single query a lane matches when either endpoint is inside it; with both
/// queries the origin must be inside the origin query and the destination inside
/// the destination query.
pub fn filter_lanes(records: &[LaneRecord], filter: &LaneFilter) -> Result<Vec<LaneRecord>, FilterError> {
    filter.validate()?;
    Ok(records
        .iter()
        .filter(|r| filter.matches_categories(r) && filter.matches_location(r))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocationDescriptor;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    const CHICAGO: (f64, f64) = (41.8781, -87.6298);
    const DETROIT: (f64, f64) = (42.3314, -83.0458);
    const TORONTO: (f64, f64) = (43.65107, -79.347015);
    const SEATTLE: (f64, f64) = (47.6062, -122.3321);

    fn lane(from: Option<(f64, f64)>, to: Option<(f64, f64)>, equipment: &str, service: ServiceType) -> LaneRecord {
        let origin = LocationDescriptor::new("A", "", "").with_coordinate(from.and_then(|(a, b)| Coordinate::new(a, b)));
        let destination = LocationDescriptor::new("B", "", "").with_coordinate(to.and_then(|(a, b)| Coordinate::new(a, b)));
        LaneRecord::new(origin, destination, equipment)
            .with_service_type(Some(service))
            .with_rate(Some(1000.0))
    }

    fn query(point: (f64, f64), radius: f64) -> Option<RadiusQuery> {
        Some(RadiusQuery::new(c(point.0, point.1), radius))
    }

    #[test]
    fn test_no_location_criteria_is_an_error() {
        let records = vec![lane(Some(CHICAGO), Some(DETROIT), "Dry Van", ServiceType::FullTruckload)];
        let result = filter_lanes(&records, &LaneFilter::new());
        assert_eq!(result, Err(FilterError::NoLocationCriteria));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let filter = LaneFilter::new().with_origin(query(CHICAGO, -1.0));
        assert_eq!(filter_lanes(&[], &filter), Err(FilterError::InvalidRadius(-1.0)));
    }

    #[test]
    fn test_single_query_matches_either_end() {
        // Destination near Chicago, origin far away
        let records = vec![lane(Some(SEATTLE), Some(CHICAGO), "Dry Van", ServiceType::FullTruckload)];

        let origin_only = LaneFilter::new().with_origin(query(CHICAGO, 50.0));
        assert_eq!(filter_lanes(&records, &origin_only).unwrap().len(), 1);

        let destination_only = LaneFilter::new().with_destination(query(CHICAGO, 50.0));
        assert_eq!(filter_lanes(&records, &destination_only).unwrap().len(), 1);
    }

    #[test]
    fn test_dual_query_requires_both_ends() {
        let records = vec![lane(Some(SEATTLE), Some(CHICAGO), "Dry Van", ServiceType::FullTruckload)];

        let dual = LaneFilter::new()
            .with_origin(query(CHICAGO, 50.0))
            .with_destination(query(CHICAGO, 50.0));
        assert!(filter_lanes(&records, &dual).unwrap().is_empty());

        let exact_lane = LaneFilter::new()
            .with_origin(query(SEATTLE, 50.0))
            .with_destination(query(CHICAGO, 50.0));
        assert_eq!(filter_lanes(&records, &exact_lane).unwrap().len(), 1);
    }

    #[test]
    fn test_radius_monotonic() {
        let records = vec![
            lane(Some(CHICAGO), Some(TORONTO), "Dry Van", ServiceType::FullTruckload),
            lane(Some(DETROIT), Some(SEATTLE), "Dry Van", ServiceType::FullTruckload),
            lane(Some(TORONTO), Some(SEATTLE), "Dry Van", ServiceType::FullTruckload),
            lane(None, Some(SEATTLE), "Dry Van", ServiceType::FullTruckload),
        ];
        let mut previous = 0;
        for radius in [0.0, 10.0, 100.0, 250.0, 500.0, 3000.0] {
            let filter = LaneFilter::new().with_origin(query(CHICAGO, radius));
            let count = filter_lanes(&records, &filter).unwrap().len();
            assert!(count >= previous, "radius {} dropped matches", radius);
            previous = count;
        }
    }

    #[test]
    fn test_unresolved_side_never_matches() {
        let records = vec![lane(None, None, "Dry Van", ServiceType::FullTruckload)];
        for radius in [0.0, 100.0, 25_000.0] {
            let single = LaneFilter::new().with_origin(query(CHICAGO, radius));
            assert!(filter_lanes(&records, &single).unwrap().is_empty());
            let dual = LaneFilter::new()
                .with_origin(query(CHICAGO, radius))
                .with_destination(query(CHICAGO, radius));
            assert!(filter_lanes(&records, &dual).unwrap().is_empty());
        }
    }

    #[test]
    fn test_missing_origin_coordinate_excluded_from_that_end_only() {
        let records = vec![lane(None, Some(CHICAGO), "Dry Van", ServiceType::FullTruckload)];
        let single = LaneFilter::new().with_origin(query(CHICAGO, 10.0));
        assert_eq!(filter_lanes(&records, &single).unwrap().len(), 1);
        let dual = LaneFilter::new()
            .with_origin(query(CHICAGO, 10.0))
            .with_destination(query(CHICAGO, 10.0));
        assert!(filter_lanes(&records, &dual).unwrap().is_empty());
    }

    #[test]
    fn test_categorical_filters() {
        let records = vec![
            lane(Some(CHICAGO), Some(DETROIT), "Flatbed w/Tarps", ServiceType::FullTruckload),
            lane(Some(CHICAGO), Some(DETROIT), "Reefer", ServiceType::FullTruckload),
            lane(Some(CHICAGO), Some(DETROIT), "Flatbed", ServiceType::LessThanTruckload),
        ];
        let filter = LaneFilter::new()
            .with_origin(query(CHICAGO, 10.0))
            .with_services(Selection::Only(vec![ServiceType::FullTruckload]))
            .with_equipment(Selection::Only(vec![EquipmentGroup::Flatbed]));
        let result = filter_lanes(&records, &filter).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].equipment_type, "Flatbed w/Tarps");
    }

    #[test]
    fn test_mode_filter_is_case_insensitive() {
        let records = vec![
            lane(Some(CHICAGO), Some(DETROIT), "Reefer", ServiceType::FullTruckload).with_mode_type("Truckload"),
            lane(Some(CHICAGO), Some(DETROIT), "Reefer", ServiceType::FullTruckload).with_mode_type("Parcel"),
            lane(Some(CHICAGO), Some(DETROIT), "Reefer", ServiceType::FullTruckload),
        ];
        let filter = LaneFilter::new()
            .with_origin(query(CHICAGO, 10.0))
            .with_mode(Some(" TRUCKLOAD "));
        assert_eq!(filter_lanes(&records, &filter).unwrap().len(), 1);
    }
}
