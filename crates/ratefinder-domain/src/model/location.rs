//! Location descriptors for lane endpoints and user queries

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Everything known about a place: address parts, postal code, and possibly
/// an already-resolved coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDescriptor {
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub coordinate: Option<Coordinate>,
    /// Free-text address used when the structured parts are empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl LocationDescriptor {
    pub fn new(city: &str, state: &str, country: &str) -> Self {
        Self {
            city: city.trim().to_string(),
            state: state.trim().to_string(),
            country: country.trim().to_string(),
            ..Default::default()
        }
    }

    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
            ..Default::default()
        }
    }

    pub fn from_address(address: &str) -> Self {
        let address = address.trim();
        Self {
            address: (!address.is_empty()).then(|| address.to_string()),
            ..Default::default()
        }
    }

    pub fn with_postal_code(mut self, postal_code: &str) -> Self {
        let postal_code = postal_code.trim();
        self.postal_code = (!postal_code.is_empty()).then(|| postal_code.to_string());
        self
    }

    pub fn with_coordinate(mut self, coordinate: Option<Coordinate>) -> Self {
        self.coordinate = coordinate;
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = country.trim().to_string();
        self
    }

    /// True when no field carries any information.
    pub fn is_blank(&self) -> bool {
        self.coordinate.is_none()
            && self.postal_code.is_none()
            && self.address_query().is_none()
    }

    /// `"<postal>, <country>"`, or just the postal code without a country.
    pub fn postal_query(&self) -> Option<String> {
        let postal = self.postal_code.as_deref()?.trim();
        if postal.is_empty() {
            return None;
        }
        let country = self.country.trim();
        if country.is_empty() {
            Some(postal.to_string())
        } else {
            Some(format!("{}, {}", postal, country))
        }
    }

    /// `"<city>, <state>, <country>"` with empty parts skipped. Without a city or
    /// state the free-text address stands in for them.
    pub fn address_query(&self) -> Option<String> {
        let city_state: Vec<&str> = [self.city.as_str(), self.state.as_str()]
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let base = if city_state.is_empty() {
            self.address
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
        } else {
            Some(city_state.join(", "))
        };

        let country = self.country.trim();
        match base {
            Some(base) if country.is_empty() => Some(base),
            Some(base) if base.to_lowercase().ends_with(&country.to_lowercase()) => Some(base),
            Some(base) => Some(format!("{}, {}", base, country)),
            None if country.is_empty() => None,
            None => Some(country.to_string()),
        }
    }

    /// Short human label for listings.
    pub fn label(&self) -> String {
        if let Some(query) = self.address_query() {
            return query;
        }
        if let Some(postal) = &self.postal_code {
            return postal.clone();
        }
        match self.coordinate {
            Some(c) => c.to_string(),
            None => "(unknown)".to_string(),
        }
    }
}
