//! Freight lane quote

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{normalize_label, Coordinate, EquipmentGroup, LocationDescriptor, ServiceType};
use crate::service::distance::geodesic_miles;

/// Markup applied to a quoted rate to get the suggested buy rate.
pub const MARKUP_FACTOR: f64 = 1.20;

/// One lane quote, plus the columns derived from it at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneRecord {
    pub origin: LocationDescriptor,
    pub destination: LocationDescriptor,
    pub service_type: Option<ServiceType>,
    /// Equipment name as it appeared in the source table
    pub equipment_type: String,
    pub equipment_group: EquipmentGroup,
    /// Normalized (trimmed, lowercase) mode type
    pub mode_type: Option<String>,
    pub carrier_name: Option<String>,
    pub service_name: Option<String>,
    /// `None` when the source cell was not a valid non-negative number
    pub rate: Option<f64>,
    pub currency: Option<String>,
    pub ship_date: Option<NaiveDate>,
    pub load_number: Option<String>,
    pub stops: Option<u32>,

    // Derived columns
    pub distance_miles: Option<f64>,
    pub rate_per_mile: Option<f64>,
    pub suggested_buy_rate: Option<f64>,
    pub profit_estimate: Option<f64>,
}

impl LaneRecord {
    pub fn new(origin: LocationDescriptor, destination: LocationDescriptor, equipment_type: &str) -> Self {
        let equipment_type = equipment_type.trim().to_string();
        let mut record = Self {
            origin,
            destination,
            service_type: None,
            equipment_group: EquipmentGroup::from_name(&equipment_type),
            equipment_type,
            mode_type: None,
            carrier_name: None,
            service_name: None,
            rate: None,
            currency: None,
            ship_date: None,
            load_number: None,
            stops: None,
            distance_miles: None,
            rate_per_mile: None,
            suggested_buy_rate: None,
            profit_estimate: None,
        };
        record.derive_fields();
        record
    }

    pub fn with_service_type(mut self, service_type: Option<ServiceType>) -> Self {
        self.service_type = service_type;
        self
    }

    pub fn with_rate(mut self, rate: Option<f64>) -> Self {
        self.rate = rate.filter(|r| r.is_finite() && *r >= 0.0);
        self.derive_fields();
        self
    }

    pub fn with_carrier(mut self, carrier_name: &str) -> Self {
        self.carrier_name = non_empty(carrier_name);
        self
    }

    pub fn with_mode_type(mut self, mode_type: &str) -> Self {
        self.mode_type = non_empty(mode_type).map(|m| normalize_label(&m));
        self
    }

    pub fn with_ship_date(mut self, ship_date: Option<NaiveDate>) -> Self {
        self.ship_date = ship_date;
        self
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = non_empty(currency);
        self
    }

    /// Replace both endpoint coordinates and recompute distance-based columns.
    pub fn set_coordinates(&mut self, origin: Option<Coordinate>, destination: Option<Coordinate>) {
        self.origin.coordinate = origin;
        self.destination.coordinate = destination;
        self.derive_fields();
    }

    /// Recompute distance, rate-per-mile, suggested buy rate and profit.
    pub fn derive_fields(&mut self) {
        self.distance_miles = match (self.origin.coordinate, self.destination.coordinate) {
            (Some(from), Some(to)) => Some(geodesic_miles(from, to)),
            _ => None,
        };
        self.rate_per_mile = match (self.rate, self.distance_miles) {
            (Some(rate), Some(distance)) if distance > 0.0 => Some(round2(rate / distance)),
            _ => None,
        };
        self.suggested_buy_rate = self.rate.map(|rate| rate / MARKUP_FACTOR);
        self.profit_estimate = match (self.rate, self.suggested_buy_rate) {
            (Some(rate), Some(buy)) => Some(rate - buy),
            _ => None,
        };
    }

    /// Human label for the lane, e.g. `"Toronto → Montreal"`.
    pub fn lane_label(&self) -> String {
        format!("{} → {}", self.origin.city, self.destination.city)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
