//! Lane Search Service - radius search over a lane table
//!
//! Workflow:
//! 1. Resolve record endpoints that carry no coordinate
//! 2. Resolve the origin / destination queries, dropping the ones that fail
//! 3. Filter by service, equipment, mode and radius
//! 4. Summarize matching lanes and derive the route map

use ratefinder_domain::model::{EquipmentGroup, LaneRecord, LocationDescriptor, Selection, ServiceType};
use ratefinder_domain::repository::Geocoder;
use ratefinder_domain::service::{
    filter_lanes, summarize_lanes, FilterError, LaneFilter, LaneSummary, LocationResolver, RadiusQuery,
    ResolverStats,
};
use ratefinder_types::Error;
use serde::Serialize;
use thiserror::Error;

use crate::map::RouteMap;

/// Errors specific to the lane search service
#[derive(Debug, Error)]
pub enum SearchServiceError {
    #[error("No location criteria: enter an origin or a destination that can be located")]
    NoLocationCriteria,

    #[error("Invalid search input: {0}")]
    InvalidInput(String),
}

impl From<FilterError> for SearchServiceError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::NoLocationCriteria => SearchServiceError::NoLocationCriteria,
            FilterError::InvalidRadius(_) => SearchServiceError::InvalidInput(err.to_string()),
        }
    }
}

impl From<SearchServiceError> for Error {
    fn from(err: SearchServiceError) -> Self {
        match err {
            SearchServiceError::NoLocationCriteria => Error::NoLocationCriteria,
            SearchServiceError::InvalidInput(msg) => Error::InvalidInput(msg),
        }
    }
}

/// One search, as entered by the user
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub origin: Option<LocationDescriptor>,
    pub destination: Option<LocationDescriptor>,
    pub radius_miles: f64,
    pub services: Selection<ServiceType>,
    pub equipment: Selection<EquipmentGroup>,
    pub mode: Option<String>,
}

impl SearchRequest {
    pub fn new(radius_miles: f64) -> Self {
        Self {
            radius_miles,
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, origin: LocationDescriptor) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_destination(mut self, destination: LocationDescriptor) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_services(mut self, services: Selection<ServiceType>) -> Self {
        self.services = services;
        self
    }

    pub fn with_equipment(mut self, equipment: Selection<EquipmentGroup>) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn with_mode(mut self, mode: Option<String>) -> Self {
        self.mode = mode;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub rows: Vec<LaneRecord>,
    pub summaries: Vec<LaneSummary>,
    pub route_map: RouteMap,
    /// Labels of queries that could not be located and were ignored
    pub dropped_queries: Vec<String>,
    pub resolver_stats: ResolverStats,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Record-resolution progress: (done, total)
pub type ProgressCallback<'a> = &'a mut dyn FnMut(usize, usize);

pub struct LaneSearchService<G: Geocoder> {
    resolver: LocationResolver<G>,
}

impl<G: Geocoder> LaneSearchService<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder),
        }
    }

    /// Fill in endpoint coordinates that the table did not carry and recompute the
    /// derived columns. Returns how many endpoints were newly resolved.
    pub fn resolve_records(&mut self, records: &mut [LaneRecord], progress: ProgressCallback<'_>) -> usize {
        let total = records.len();
        let mut resolved = 0;

        for (idx, record) in records.iter_mut().enumerate() {
            let origin = match record.origin.coordinate {
                Some(c) => Some(c),
                None => self.resolver.resolve(&record.origin).coordinate(),
            };
            let destination = match record.destination.coordinate {
                Some(c) => Some(c),
                None => self.resolver.resolve(&record.destination).coordinate(),
            };

            let newly = usize::from(origin.is_some() && record.origin.coordinate.is_none())
                + usize::from(destination.is_some() && record.destination.coordinate.is_none());
            if newly > 0 {
                record.set_coordinates(origin, destination);
                resolved += newly;
            }
            progress(idx + 1, total);
        }

        log::info!("resolved {} endpoint(s) across {} record(s)", resolved, total);
        resolved
    }

    pub fn search(&mut self, records: &[LaneRecord], request: &SearchRequest) -> Result<SearchOutcome, SearchServiceError> {
        if !request.radius_miles.is_finite() || request.radius_miles < 0.0 {
            return Err(FilterError::InvalidRadius(request.radius_miles).into());
        }

        let mut dropped_queries = Vec::new();
        let origin = self.resolve_query(request.origin.as_ref(), request.radius_miles, &mut dropped_queries);
        let destination = self.resolve_query(request.destination.as_ref(), request.radius_miles, &mut dropped_queries);

        let filter = LaneFilter::new()
            .with_services(request.services.clone())
            .with_equipment(request.equipment.clone())
            .with_mode(request.mode.as_deref())
            .with_origin(origin)
            .with_destination(destination);

        let rows = filter_lanes(records, &filter)?;
        let summaries = summarize_lanes(&rows);
        let route_map = RouteMap::from_records(&rows);
        log::info!("{} of {} record(s) matched, {} lane(s)", rows.len(), records.len(), summaries.len());

        Ok(SearchOutcome {
            rows,
            summaries,
            route_map,
            dropped_queries,
            resolver_stats: self.resolver.stats(),
        })
    }

    pub fn resolver_stats(&self) -> ResolverStats {
        self.resolver.stats()
    }

    fn resolve_query(
        &mut self,
        descriptor: Option<&LocationDescriptor>,
        radius_miles: f64,
        dropped: &mut Vec<String>,
    ) -> Option<RadiusQuery> {
        let descriptor = descriptor.filter(|d| !d.is_blank())?;
        match self.resolver.resolve(descriptor).coordinate() {
            Some(center) => Some(RadiusQuery::new(center, radius_miles)),
            None => {
                log::warn!("could not locate '{}', ignoring it", descriptor.label());
                dropped.push(descriptor.label());
                None
            }
        }
    }
}
