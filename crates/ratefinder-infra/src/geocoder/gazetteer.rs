//! Offline geocoder over the built-in city list

use ratefinder_domain::model::{normalize_label, Coordinate};
use ratefinder_domain::repository::Geocoder;
use ratefinder_types::Result;

use crate::sample_data::{SampleCity, SAMPLE_CITIES};

/// Matches postal codes and "city, state, country" style queries against a fixed
/// city list. Never fails; unknown places are `Ok(None)`.
#[derive(Debug, Clone)]
pub struct OfflineGeocoder {
    cities: Vec<SampleCity>,
}

impl Default for OfflineGeocoder {
    fn default() -> Self {
        Self {
            cities: SAMPLE_CITIES.to_vec(),
        }
    }
}

impl OfflineGeocoder {
    pub fn new(cities: Vec<SampleCity>) -> Self {
        Self { cities }
    }

    fn lookup(&self, query: &str) -> Option<&SampleCity> {
        let parts: Vec<String> = query
            .split(',')
            .map(normalize_label)
            .filter(|p| !p.is_empty())
            .collect();
        let first = parts.first()?;

        if let Some(city) = self
            .cities
            .iter()
            .find(|c| normalize_postal(c.postal_code) == normalize_postal(first))
        {
            return Some(city);
        }

        self.cities.iter().find(|c| {
            normalize_label(c.city) == *first
                && parts[1..].iter().all(|p| {
                    *p == normalize_label(c.state) || country_matches(c.country, p)
                })
        })
    }
}

impl Geocoder for OfflineGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>> {
        Ok(self.lookup(query).and_then(SampleCity::coordinate))
    }
}

fn normalize_postal(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase()
}

fn country_matches(country: &str, part: &str) -> bool {
    let country = normalize_label(country);
    if country == part {
        return true;
    }
    let aliases: &[&str] = match country.as_str() {
        "usa" => &["us", "united states", "united states of america"],
        "canada" => &["ca"],
        "mexico" => &["mx", "méxico"],
        _ => &[],
    };
    aliases.contains(&part)
}
