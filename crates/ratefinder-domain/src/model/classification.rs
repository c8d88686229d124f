//! Service, equipment and mode classification

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trim and lowercase a classification label for matching and grouping.
pub fn normalize_label(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Freight service type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "FTL")]
    FullTruckload,
    #[serde(rename = "LTL")]
    LessThanTruckload,
}

impl ServiceType {
    pub const ALL: [ServiceType; 2] = [ServiceType::FullTruckload, ServiceType::LessThanTruckload];

    /// Parse a free-text service label (`"FTL"`, `"full truckload"`, `" ltl "`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "ftl" | "tl" | "truckload" | "full truckload" | "full-truckload" => {
                Some(ServiceType::FullTruckload)
            }
            "ltl" | "less than truckload" | "less-than-truckload" => {
                Some(ServiceType::LessThanTruckload)
            }
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceType::FullTruckload => "FTL",
            ServiceType::LessThanTruckload => "LTL",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown service type '{}' (expected FTL or LTL)", s))
    }
}

/// Canonical equipment group.
///
/// Any equipment name containing "flatbed" folds into [`EquipmentGroup::Flatbed`];
/// names outside the known groups are kept as their normalized label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EquipmentGroup {
    DryVan,
    Reefer,
    Flatbed,
    StraightTruck,
    Sprinter,
    Other(String),
}

impl EquipmentGroup {
    pub fn from_name(name: &str) -> Self {
        let normalized = normalize_label(name);
        if normalized.contains("flatbed") {
            return EquipmentGroup::Flatbed;
        }
        match normalized.as_str() {
            "dry van" => EquipmentGroup::DryVan,
            "reefer" => EquipmentGroup::Reefer,
            "straight truck" => EquipmentGroup::StraightTruck,
            "sprinter" => EquipmentGroup::Sprinter,
            _ => EquipmentGroup::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EquipmentGroup::DryVan => "dry van",
            EquipmentGroup::Reefer => "reefer",
            EquipmentGroup::Flatbed => "flatbed",
            EquipmentGroup::StraightTruck => "straight truck",
            EquipmentGroup::Sprinter => "sprinter",
            EquipmentGroup::Other(label) => label,
        }
    }
}

impl std::fmt::Display for EquipmentGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("equipment type must not be empty".to_string());
        }
        Ok(Self::from_name(s))
    }
}

impl From<String> for EquipmentGroup {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<EquipmentGroup> for String {
    fn from(group: EquipmentGroup) -> Self {
        group.as_str().to_string()
    }
}

/// Categorical filter: everything, or an explicit allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Any,
    Only(Vec<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Any
    }
}

impl<T: PartialEq> Selection<T> {
    /// An empty list means no restriction.
    pub fn from_values(values: Vec<T>) -> Self {
        if values.is_empty() {
            Selection::Any
        } else {
            Selection::Only(values)
        }
    }

    /// A missing value only passes [`Selection::Any`].
    pub fn allows(&self, value: Option<&T>) -> bool {
        match self {
            Selection::Any => true,
            Selection::Only(allowed) => value.is_some_and(|v| allowed.contains(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatbed_variants_grouped() {
        assert_eq!(EquipmentGroup::from_name("Flatbed"), EquipmentGroup::Flatbed);
        assert_eq!(EquipmentGroup::from_name("flatbed w/tarps"), EquipmentGroup::Flatbed);
        assert_eq!(EquipmentGroup::from_name("  Step Deck FLATBED "), EquipmentGroup::Flatbed);
        assert_eq!(EquipmentGroup::Flatbed.as_str(), "flatbed");
    }

    #[test]
    fn test_grouping_is_idempotent() {
        for name in ["Flatbed w/Tarps", "Dry Van", " REEFER", "53' Dry Van", "Sprinter", "Conestoga"] {
            let once = EquipmentGroup::from_name(name);
            let twice = EquipmentGroup::from_name(once.as_str());
            assert_eq!(once, twice, "grouping {:?} twice changed it", name);
        }
    }

    #[test]
    fn test_unknown_equipment_normalized() {
        assert_eq!(
            EquipmentGroup::from_name("  Conestoga "),
            EquipmentGroup::Other("conestoga".to_string())
        );
    }

    #[test]
    fn test_service_type_parse() {
        assert_eq!(ServiceType::parse(" ftl "), Some(ServiceType::FullTruckload));
        assert_eq!(ServiceType::parse("Less-Than-Truckload"), Some(ServiceType::LessThanTruckload));
        assert_eq!(ServiceType::parse("parcel"), None);
        assert!("intermodal".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_selection_allows() {
        let any: Selection<ServiceType> = Selection::Any;
        assert!(any.allows(None));

        let only = Selection::from_values(vec![ServiceType::FullTruckload]);
        assert!(only.allows(Some(&ServiceType::FullTruckload)));
        assert!(!only.allows(Some(&ServiceType::LessThanTruckload)));
        assert!(!only.allows(None));

        assert_eq!(Selection::<ServiceType>::from_values(vec![]), Selection::Any);
    }

    #[test]
    fn test_equipment_string_conversion() {
        let label = String::from(EquipmentGroup::StraightTruck);
        assert_eq!(label, "straight truck");
        assert_eq!(EquipmentGroup::from(label), EquipmentGroup::StraightTruck);
    }
}
