//! City / state pairing and the option lists that drive it

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{normalize_label, EquipmentGroup, LaneRecord};

/// Which endpoint fields a pairing compares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pairing {
    City { origin: String, destination: String },
    State { origin: String, destination: String },
}

impl Pairing {
    pub fn city(origin: &str, destination: &str) -> Self {
        Pairing::City {
            origin: origin.to_string(),
            destination: destination.to_string(),
        }
    }

    pub fn state(origin: &str, destination: &str) -> Self {
        Pairing::State {
            origin: origin.to_string(),
            destination: destination.to_string(),
        }
    }

    /// Case-insensitive, whitespace-trimmed comparison of both endpoints.
    pub fn matches(&self, record: &LaneRecord) -> bool {
        let (origin, destination, record_origin, record_destination) = match self {
            Pairing::City { origin, destination } => {
                (origin, destination, &record.origin.city, &record.destination.city)
            }
            Pairing::State { origin, destination } => {
                (origin, destination, &record.origin.state, &record.destination.state)
            }
        };
        normalize_label(origin) == normalize_label(record_origin)
            && normalize_label(destination) == normalize_label(record_destination)
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pairing::City { origin, destination } => write!(f, "{} → {} (city)", origin, destination),
            Pairing::State { origin, destination } => write!(f, "{} → {} (state)", origin, destination),
        }
    }
}

/// Sorted, case-insensitively unique values; the first spelling seen is kept.
fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for value in values {
        let key = normalize_label(value);
        if key.is_empty() {
            continue;
        }
        seen.entry(key).or_insert_with(|| value.trim().to_string());
    }
    seen.into_values().collect()
}

pub fn origin_cities(records: &[LaneRecord]) -> Vec<String> {
    unique_sorted(records.iter().map(|r| r.origin.city.as_str()))
}

/// Destination cities quoted from `origin_city`
pub fn destination_cities_for(records: &[LaneRecord], origin_city: &str) -> Vec<String> {
    let origin = normalize_label(origin_city);
    unique_sorted(
        records
            .iter()
            .filter(|r| normalize_label(&r.origin.city) == origin)
            .map(|r| r.destination.city.as_str()),
    )
}

pub fn origin_states(records: &[LaneRecord]) -> Vec<String> {
    unique_sorted(records.iter().map(|r| r.origin.state.as_str()))
}

/// Destination states quoted from `origin_state`
pub fn destination_states_for(records: &[LaneRecord], origin_state: &str) -> Vec<String> {
    let origin = normalize_label(origin_state);
    unique_sorted(
        records
            .iter()
            .filter(|r| normalize_label(&r.origin.state) == origin)
            .map(|r| r.destination.state.as_str()),
    )
}

pub fn mode_types(records: &[LaneRecord]) -> Vec<String> {
    unique_sorted(records.iter().filter_map(|r| r.mode_type.as_deref()))
}

pub fn equipment_groups(records: &[LaneRecord]) -> Vec<EquipmentGroup> {
    let mut groups: Vec<EquipmentGroup> = records.iter().map(|r| r.equipment_group.clone()).collect();
    groups.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    groups.dedup();
    groups
}
