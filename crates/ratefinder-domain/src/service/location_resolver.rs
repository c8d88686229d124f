//! Location resolution: descriptor to coordinate, memoized per session

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Coordinate, LocationDescriptor};
use crate::repository::Geocoder;

/// Which part of the descriptor produced the coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Explicit,
    PostalCode,
    Address,
}

/// Outcome of resolving one descriptor. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Resolved {
        coordinate: Coordinate,
        source: ResolutionSource,
    },
    Unresolved,
}

impl Resolution {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Resolution::Resolved { coordinate, .. } => Some(*coordinate),
            Resolution::Unresolved => None,
        }
    }
}

/// Cache counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolverStats {
    pub lookups: usize,
    pub cache_hits: usize,
    pub failures: usize,
}

/// Resolves descriptors with precedence explicit coordinate > postal code > address,
/// calling the geocoder at most once per distinct query string.
pub struct LocationResolver<G: Geocoder> {
    geocoder: G,
    memo: HashMap<String, Option<Coordinate>>,
    stats: ResolverStats,
}

impl<G: Geocoder> LocationResolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            memo: HashMap::new(),
            stats: ResolverStats::default(),
        }
    }

    pub fn resolve(&mut self, descriptor: &LocationDescriptor) -> Resolution {
        if let Some(coordinate) = descriptor.coordinate {
            return Resolution::Resolved {
                coordinate,
                source: ResolutionSource::Explicit,
            };
        }

        if let Some(query) = descriptor.postal_query() {
            if let Some(coordinate) = self.lookup(&query) {
                return Resolution::Resolved {
                    coordinate,
                    source: ResolutionSource::PostalCode,
                };
            }
        }

        if let Some(query) = descriptor.address_query() {
            if let Some(coordinate) = self.lookup(&query) {
                return Resolution::Resolved {
                    coordinate,
                    source: ResolutionSource::Address,
                };
            }
        }

        Resolution::Unresolved
    }

    /// Geocode a raw query string through the memo.
    pub fn lookup(&mut self, query: &str) -> Option<Coordinate> {
        let key = query.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        if let Some(cached) = self.memo.get(&key) {
            self.stats.cache_hits += 1;
            log::debug!("geocode cache hit: {}", key);
            return *cached;
        }

        self.stats.lookups += 1;
        let result = match self.geocoder.geocode(query.trim()) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("geocoding '{}' failed: {}", query.trim(), e);
                None
            }
        };
        if result.is_none() {
            self.stats.failures += 1;
        }
        self.memo.insert(key, result);
        result
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }
}
