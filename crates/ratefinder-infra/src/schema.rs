//! Canonical lane-table schema and the alias table that maps external headers onto it
//!
//! Two header families show up in practice: the simple snake_case export
//! (`origin_city`, `rate`, ...) and vendor exports with headers such as
//! `Origin City`, `Equipment Type: Name`, `Carrier Total (converted)` and
//! `-Mode Type`. Both resolve to the same [`CanonicalField`] set once, at load.

use std::collections::HashMap;
use std::str::FromStr;

use ratefinder_types::SchemaError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    OriginCity,
    OriginState,
    OriginCountry,
    OriginPostal,
    OriginLat,
    OriginLon,
    DestinationCity,
    DestinationState,
    DestinationCountry,
    DestinationPostal,
    DestinationLat,
    DestinationLon,
    ServiceType,
    EquipmentType,
    ModeType,
    CarrierName,
    ServiceName,
    Rate,
    Currency,
    ShipDate,
    LoadNumber,
    Stops,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 22] = [
        CanonicalField::OriginCity,
        CanonicalField::OriginState,
        CanonicalField::OriginCountry,
        CanonicalField::OriginPostal,
        CanonicalField::OriginLat,
        CanonicalField::OriginLon,
        CanonicalField::DestinationCity,
        CanonicalField::DestinationState,
        CanonicalField::DestinationCountry,
        CanonicalField::DestinationPostal,
        CanonicalField::DestinationLat,
        CanonicalField::DestinationLon,
        CanonicalField::ServiceType,
        CanonicalField::EquipmentType,
        CanonicalField::ModeType,
        CanonicalField::CarrierName,
        CanonicalField::ServiceName,
        CanonicalField::Rate,
        CanonicalField::Currency,
        CanonicalField::ShipDate,
        CanonicalField::LoadNumber,
        CanonicalField::Stops,
    ];

    /// Columns without which no lane can be built
    pub const REQUIRED: [CanonicalField; 4] = [
        CanonicalField::OriginCity,
        CanonicalField::DestinationCity,
        CanonicalField::EquipmentType,
        CanonicalField::Rate,
    ];

    /// Canonical header, also the simple-schema column name
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::OriginCity => "origin_city",
            CanonicalField::OriginState => "origin_state",
            CanonicalField::OriginCountry => "origin_country",
            CanonicalField::OriginPostal => "origin_postal",
            CanonicalField::OriginLat => "origin_lat",
            CanonicalField::OriginLon => "origin_lon",
            CanonicalField::DestinationCity => "destination_city",
            CanonicalField::DestinationState => "destination_state",
            CanonicalField::DestinationCountry => "destination_country",
            CanonicalField::DestinationPostal => "destination_postal",
            CanonicalField::DestinationLat => "destination_lat",
            CanonicalField::DestinationLon => "destination_lon",
            CanonicalField::ServiceType => "service_type",
            CanonicalField::EquipmentType => "equipment_type",
            CanonicalField::ModeType => "mode_type",
            CanonicalField::CarrierName => "carrier_name",
            CanonicalField::ServiceName => "service_name",
            CanonicalField::Rate => "rate",
            CanonicalField::Currency => "currency",
            CanonicalField::ShipDate => "ship_date",
            CanonicalField::LoadNumber => "load_number",
            CanonicalField::Stops => "stops",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CanonicalField {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CanonicalField::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| SchemaError::UnknownField(s.to_string()))
    }
}

/// External header variants for each canonical field, highest priority first
const BUILTIN_ALIASES: &[(CanonicalField, &[&str])] = &[
    (CanonicalField::OriginCity, &["Origin City"]),
    (CanonicalField::OriginState, &["Origin State", "Origin State/Province"]),
    (CanonicalField::OriginCountry, &["Origin Country"]),
    (CanonicalField::OriginPostal, &["Origin Zip/Postal Code", "Origin Zip"]),
    (CanonicalField::OriginLat, &["Origin Latitude"]),
    (CanonicalField::OriginLon, &["Origin Longitude"]),
    (CanonicalField::DestinationCity, &["Destination City"]),
    (CanonicalField::DestinationState, &["Destination State", "Destination State/Province"]),
    (CanonicalField::DestinationCountry, &["Destination Country"]),
    (CanonicalField::DestinationPostal, &["Destination Zip/Postal Code", "Destination Zip"]),
    (CanonicalField::DestinationLat, &["Destination Latitude"]),
    (CanonicalField::DestinationLon, &["Destination Longitude"]),
    (CanonicalField::ServiceType, &["Service Type"]),
    (CanonicalField::EquipmentType, &["Equipment Type: Name", "Equipment Type"]),
    (CanonicalField::ModeType, &["-Mode Type", "Mode Type"]),
    (CanonicalField::CarrierName, &["Carrier Name"]),
    (CanonicalField::ServiceName, &["Carrier Service: Name"]),
    (CanonicalField::Rate, &["Base Rate", "Carrier Total (converted)"]),
    (CanonicalField::Currency, &["Currency"]),
    (CanonicalField::ShipDate, &["rate_date", "Expected Ship Date", "Valid From"]),
    (CanonicalField::LoadNumber, &["Load Number"]),
    (CanonicalField::Stops, &["Stops"]),
];

fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').to_lowercase()
}

/// Ordered header → field table. Earlier entries win when several headers for the
/// same field are present.
#[derive(Debug, Clone)]
pub struct ColumnAliases {
    entries: Vec<(String, CanonicalField)>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ColumnAliases {
    /// Canonical names first, then the vendor-export variants.
    pub fn builtin() -> Self {
        let mut entries: Vec<(String, CanonicalField)> = CanonicalField::ALL
            .into_iter()
            .map(|f| (f.name().to_string(), f))
            .collect();
        for (field, headers) in BUILTIN_ALIASES {
            entries.extend(headers.iter().map(|h| (normalize_header(h), *field)));
        }
        Self { entries }
    }

    /// Add aliases that take precedence over everything already in the table.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, CanonicalField)>,
    {
        let mut front: Vec<(String, CanonicalField)> = overrides
            .into_iter()
            .map(|(header, field)| (normalize_header(&header), field))
            .collect();
        front.append(&mut self.entries);
        self.entries = front;
        self
    }

    /// Map a header row onto canonical fields.
    ///
    /// Fails with every missing required column listed by canonical name.
    pub fn resolve<'a, I>(&self, headers: I) -> Result<ColumnMap, SchemaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .rev()
            .map(|(i, h)| (normalize_header(h), i))
            .collect();

        let mut columns = HashMap::new();
        for (alias, field) in &self.entries {
            if columns.contains_key(field) {
                continue;
            }
            if let Some(&index) = positions.get(alias) {
                columns.insert(*field, index);
            }
        }

        let missing: Vec<String> = CanonicalField::REQUIRED
            .into_iter()
            .filter(|f| !columns.contains_key(f))
            .map(|f| f.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing));
        }

        Ok(ColumnMap { columns, headers })
    }
}

/// Resolved column positions for one table
#[derive(Debug, Clone)]
pub struct ColumnMap {
    columns: HashMap<CanonicalField, usize>,
    headers: Vec<String>,
}

impl ColumnMap {
    pub fn has(&self, field: CanonicalField) -> bool {
        self.columns.contains_key(&field)
    }

    /// Trimmed cell value; `None` for absent columns and blank cells.
    pub fn get<'r>(&self, record: &'r csv::StringRecord, field: CanonicalField) -> Option<&'r str> {
        let index = *self.columns.get(&field)?;
        record.get(index).map(str::trim).filter(|v| !v.is_empty())
    }

    /// (field, source header) pairs in canonical order
    pub fn mapping(&self) -> Vec<(CanonicalField, String)> {
        CanonicalField::ALL
            .into_iter()
            .filter_map(|f| self.columns.get(&f).map(|&i| (f, self.headers[i].clone())))
            .collect()
    }

    /// Source headers that no canonical field uses
    pub fn unmapped_headers(&self) -> Vec<String> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.columns.values().any(|c| c == i))
            .map(|(_, h)| h.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_schema() {
        let map = ColumnAliases::builtin()
            .resolve(["origin_city", "destination_city", "equipment_type", "rate", "service_type"])
            .unwrap();
        assert!(map.has(CanonicalField::ServiceType));
        assert!(!map.has(CanonicalField::ModeType));
    }

    #[test]
    fn test_vendor_schema() {
        let headers = [
            "Origin City",
            "Destination City",
            "Equipment Type: Name",
            "Carrier Total (converted)",
            "-Mode Type",
            "Expected Ship Date",
            "Origin Zip/Postal Code",
        ];
        let map = ColumnAliases::builtin().resolve(headers).unwrap();
        let mapping = map.mapping();
        assert!(mapping.contains(&(CanonicalField::Rate, "Carrier Total (converted)".to_string())));
        assert!(mapping.contains(&(CanonicalField::ModeType, "-Mode Type".to_string())));
        assert!(mapping.contains(&(CanonicalField::OriginPostal, "Origin Zip/Postal Code".to_string())));
    }

    #[test]
    fn test_base_rate_preferred_over_carrier_total() {
        let headers = [
            "Origin City",
            "Destination City",
            "Equipment Type: Name",
            "Carrier Total (converted)",
            "Base Rate",
        ];
        let map = ColumnAliases::builtin().resolve(headers).unwrap();
        assert!(map.mapping().contains(&(CanonicalField::Rate, "Base Rate".to_string())));
    }

    #[test]
    fn test_headers_matched_case_insensitively() {
        let map = ColumnAliases::builtin()
            .resolve([" ORIGIN CITY ", "destination city", "equipment type: name", "BASE RATE"])
            .unwrap();
        assert!(map.has(CanonicalField::Rate));
    }

    #[test]
    fn test_missing_columns_listed() {
        let err = ColumnAliases::builtin()
            .resolve(["Origin City", "Equipment Type: Name", "Base Rate"])
            .unwrap_err();
        assert_eq!(err, SchemaError::MissingColumns(vec!["destination_city".to_string()]));

        let err = ColumnAliases::builtin().resolve(["foo"]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumns(vec![
                "origin_city".to_string(),
                "destination_city".to_string(),
                "equipment_type".to_string(),
                "rate".to_string(),
            ])
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let aliases = ColumnAliases::builtin().with_overrides([("Linehaul".to_string(), CanonicalField::Rate)]);
        let map = aliases
            .resolve(["origin_city", "destination_city", "equipment_type", "rate", "Linehaul"])
            .unwrap();
        assert!(map.mapping().contains(&(CanonicalField::Rate, "Linehaul".to_string())));
        assert_eq!(map.unmapped_headers(), vec!["rate".to_string()]);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("Origin_City".parse::<CanonicalField>().unwrap(), CanonicalField::OriginCity);
        assert!("pickup".parse::<CanonicalField>().is_err());
    }
}
