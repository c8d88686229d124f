//! Carrier Search Service - best quotes for one city or state pairing
//!
//! Also builds the option lists (origins, reachable destinations, mode types,
//! equipment groups) that a pairing is picked from.

use ratefinder_domain::model::{EquipmentGroup, LaneRecord};
use ratefinder_domain::service::pairing::{
    destination_cities_for, destination_states_for, equipment_groups, mode_types, origin_cities, origin_states,
};
use ratefinder_domain::service::{find_best_carriers, CarrierQuery, Pairing};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CarrierOutcome {
    pub pairing: Pairing,
    /// Best quotes in ranked order
    pub quotes: Vec<LaneRecord>,
}

impl CarrierOutcome {
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

pub fn search_carriers(records: &[LaneRecord], query: &CarrierQuery) -> CarrierOutcome {
    CarrierOutcome {
        pairing: query.pairing.clone(),
        quotes: find_best_carriers(records, query),
    }
}

/// Whether pairing options are listed by city or by state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingLevel {
    City,
    State,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaneOptions {
    pub level: PairingLevel,
    pub origins: Vec<String>,
    /// Destinations reachable from `origin`, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<String>>,
    pub mode_types: Vec<String>,
    pub equipment_groups: Vec<EquipmentGroup>,
}

pub fn lane_options(records: &[LaneRecord], level: PairingLevel, origin: Option<&str>) -> LaneOptions {
    let origins = match level {
        PairingLevel::City => origin_cities(records),
        PairingLevel::State => origin_states(records),
    };
    let destinations = origin.map(|o| match level {
        PairingLevel::City => destination_cities_for(records, o),
        PairingLevel::State => destination_states_for(records, o),
    });

    LaneOptions {
        level,
        origins,
        origin: origin.map(str::to_string),
        destinations,
        mode_types: mode_types(records),
        equipment_groups: equipment_groups(records),
    }
}
