//! Lane aggregation: min / mean / max rate per (origin, destination, service, equipment)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::lane_record::round2;
use crate::model::{normalize_label, EquipmentGroup, LaneRecord, ServiceType};

/// Rate statistics for one lane key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSummary {
    pub origin_city: String,
    pub destination_city: String,
    pub service_type: Option<ServiceType>,
    pub equipment_group: EquipmentGroup,
    pub quote_count: usize,
    pub min_rate: f64,
    /// Arithmetic mean, rounded to cents
    pub mean_rate: f64,
    pub max_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LaneKey {
    origin_city: String,
    destination_city: String,
    service_type: Option<ServiceType>,
    equipment_group: EquipmentGroup,
}

struct Accumulator {
    summary: LaneSummary,
    total: f64,
}

/// Group `records` by lane and compute rate statistics.
///
/// Groups come out in first-seen order. Records without a rate are skipped, so a
/// lane whose quotes all lack a rate does not appear.
pub fn summarize_lanes(records: &[LaneRecord]) -> Vec<LaneSummary> {
    let mut index: HashMap<LaneKey, usize> = HashMap::new();
    let mut groups: Vec<Accumulator> = Vec::new();

    for record in records {
        let Some(rate) = record.rate else {
            continue;
        };
        let key = LaneKey {
            origin_city: normalize_label(&record.origin.city),
            destination_city: normalize_label(&record.destination.city),
            service_type: record.service_type,
            equipment_group: record.equipment_group.clone(),
        };
        match index.get(&key) {
            Some(&i) => {
                let acc = &mut groups[i];
                acc.summary.quote_count += 1;
                acc.summary.min_rate = acc.summary.min_rate.min(rate);
                acc.summary.max_rate = acc.summary.max_rate.max(rate);
                acc.total += rate;
            }
            None => {
                index.insert(key, groups.len());
                groups.push(Accumulator {
                    summary: LaneSummary {
                        origin_city: record.origin.city.clone(),
                        destination_city: record.destination.city.clone(),
                        service_type: record.service_type,
                        equipment_group: record.equipment_group.clone(),
                        quote_count: 1,
                        min_rate: rate,
                        mean_rate: rate,
                        max_rate: rate,
                    },
                    total: rate,
                });
            }
        }
    }

    groups
        .into_iter()
        .map(|acc| {
            let mut summary = acc.summary;
            summary.mean_rate = round2(acc.total / summary.quote_count as f64);
            summary
        })
        .collect()
}

/// Split summaries into per-equipment partitions, in first-seen equipment order.
pub fn partition_by_equipment(summaries: &[LaneSummary]) -> Vec<(EquipmentGroup, Vec<LaneSummary>)> {
    let mut partitions: Vec<(EquipmentGroup, Vec<LaneSummary>)> = Vec::new();
    for summary in summaries {
        match partitions.iter_mut().find(|(group, _)| *group == summary.equipment_group) {
            Some((_, lanes)) => lanes.push(summary.clone()),
            None => partitions.push((summary.equipment_group.clone(), vec![summary.clone()])),
        }
    }
    partitions
}
