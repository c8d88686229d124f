//! Best-carrier selection: top quotes for one pairing and equipment choice

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{normalize_label, EquipmentGroup, LaneRecord, Selection};
use crate::service::pairing::Pairing;

/// Default number of quotes returned
pub const DEFAULT_MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    pub max_results: usize,
    /// Newest ship date first, cheapest rate breaking ties
    pub sort_by_ship_date: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            sort_by_ship_date: false,
        }
    }
}

/// Everything the selector needs for one lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierQuery {
    pub pairing: Pairing,
    pub equipment: Selection<EquipmentGroup>,
    pub mode: Option<String>,
    pub options: RankOptions,
}

impl CarrierQuery {
    pub fn new(pairing: Pairing) -> Self {
        Self {
            pairing,
            equipment: Selection::Any,
            mode: None,
            options: RankOptions::default(),
        }
    }
}

/// Keep records on `pairing` with an allowed equipment group and, if given, the mode type.
pub fn restrict_to_pairing(
    records: &[LaneRecord],
    pairing: &Pairing,
    equipment: &Selection<EquipmentGroup>,
    mode: Option<&str>,
) -> Vec<LaneRecord> {
    let mode = mode.map(normalize_label).filter(|m| !m.is_empty());
    records
        .iter()
        .filter(|r| pairing.matches(r))
        .filter(|r| equipment.allows(Some(&r.equipment_group)))
        .filter(|r| match &mode {
            Some(mode) => r.mode_type.as_deref() == Some(mode.as_str()),
            None => true,
        })
        .cloned()
        .collect()
}

/// Top `max_results` quotes: ascending rate, or descending ship date then ascending
/// rate when `sort_by_ship_date` is set. Quotes without a rate are left out.
pub fn rank_carriers(records: &[LaneRecord], options: &RankOptions) -> Vec<LaneRecord> {
    let mut ranked: Vec<&LaneRecord> = records.iter().filter(|r| r.rate.is_some()).collect();

    if options.sort_by_ship_date {
        ranked.sort_by(|a, b| newest_first(a.ship_date, b.ship_date).then_with(|| cheapest_first(a, b)));
    } else {
        ranked.sort_by(|a, b| cheapest_first(a, b));
    }

    ranked
        .into_iter()
        .take(options.max_results)
        .cloned()
        .collect()
}

pub fn find_best_carriers(records: &[LaneRecord], query: &CarrierQuery) -> Vec<LaneRecord> {
    let candidates = restrict_to_pairing(records, &query.pairing, &query.equipment, query.mode.as_deref());
    log::info!("{} quote(s) on {}", candidates.len(), query.pairing);
    rank_carriers(&candidates, &query.options)
}

fn cheapest_first(a: &LaneRecord, b: &LaneRecord) -> Ordering {
    let a = a.rate.unwrap_or(f64::INFINITY);
    let b = b.rate.unwrap_or(f64::INFINITY);
    a.total_cmp(&b)
}

/// Undated quotes sort after every dated one.
fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocationDescriptor;

    fn quote(rate: Option<f64>, date: Option<(i32, u32, u32)>, equipment: &str) -> LaneRecord {
        LaneRecord::new(
            LocationDescriptor::new("Toronto", "ON", "Canada"),
            LocationDescriptor::new("Chicago", "IL", "USA"),
            equipment,
        )
        .with_rate(rate)
        .with_ship_date(date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)))
    }

    fn sample() -> Vec<LaneRecord> {
        vec![
            quote(Some(500.0), Some((2024, 1, 1)), "Dry Van"),
            quote(Some(300.0), Some((2024, 3, 1)), "Dry Van"),
            quote(Some(900.0), Some((2024, 2, 1)), "Dry Van"),
        ]
    }

    fn rates(records: &[LaneRecord]) -> Vec<f64> {
        records.iter().filter_map(|r| r.rate).collect()
    }

    #[test]
    fn test_rank_by_rate() {
        let ranked = rank_carriers(&sample(), &RankOptions::default());
        assert_eq!(rates(&ranked), vec![300.0, 500.0, 900.0]);
    }

    #[test]
    fn test_rank_by_ship_date() {
        let options = RankOptions {
            sort_by_ship_date: true,
            ..Default::default()
        };
        let ranked = rank_carriers(&sample(), &options);
        let dates: Vec<String> = ranked
            .iter()
            .map(|r| r.ship_date.unwrap().format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[test]
    fn test_same_date_breaks_tie_on_rate() {
        let records = vec![
            quote(Some(800.0), Some((2024, 5, 1)), "Reefer"),
            quote(Some(600.0), Some((2024, 5, 1)), "Reefer"),
            quote(Some(100.0), None, "Reefer"),
        ];
        let options = RankOptions {
            sort_by_ship_date: true,
            ..Default::default()
        };
        assert_eq!(rates(&rank_carriers(&records, &options)), vec![600.0, 800.0, 100.0]);
    }

    #[test]
    fn test_limit_and_missing_rates() {
        let mut records: Vec<LaneRecord> = (0..15).map(|i| quote(Some(1000.0 - i as f64), None, "Reefer")).collect();
        records.push(quote(None, None, "Reefer"));
        let ranked = rank_carriers(&records, &RankOptions::default());
        assert_eq!(ranked.len(), DEFAULT_MAX_RESULTS);
        assert_eq!(ranked[0].rate, Some(986.0));
    }

    #[test]
    fn test_find_best_carriers_with_equipment_group() {
        let mut records = sample();
        records.push(quote(Some(50.0), None, "Flatbed w/Tarps"));
        records.push(quote(Some(75.0), None, "Flatbed"));

        let mut query = CarrierQuery::new(Pairing::city("toronto", "CHICAGO"));
        query.equipment = Selection::Only(vec![EquipmentGroup::Flatbed]);
        let best = find_best_carriers(&records, &query);
        assert_eq!(rates(&best), vec![50.0, 75.0]);

        query.equipment = Selection::Any;
        assert_eq!(find_best_carriers(&records, &query).len(), 5);
    }
}
