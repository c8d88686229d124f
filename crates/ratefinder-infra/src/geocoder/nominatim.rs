//! Nominatim (OpenStreetMap) search client

use std::time::Duration;

use ratefinder_domain::model::Coordinate;
use ratefinder_domain::repository::Geocoder;
use ratefinder_types::{Error, Result};
use serde::Deserialize;

pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Geocode(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>> {
        log::debug!("nominatim lookup: {}", query);
        let response = self
            .client
            .get(self.search_url())
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .map_err(|e| Error::Geocode(format!("GET request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Geocode(format!("geocoder returned HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| Error::Geocode(format!("reading response failed: {e}")))?;
        parse_search_response(&body)
    }
}

/// First hit of a `/search?format=jsonv2` response. An empty array is "not found".
pub fn parse_search_response(body: &str) -> Result<Option<Coordinate>> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| Error::Geocode(format!("unexpected response: {e}")))?;

    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };
    let lat = hit.lat.trim().parse::<f64>().ok();
    let lon = hit.lon.trim().parse::<f64>().ok();
    Ok(Coordinate::from_parts(lat, lon))
}
