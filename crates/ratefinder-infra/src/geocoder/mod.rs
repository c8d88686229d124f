//! Geocoder implementations

mod gazetteer;
mod nominatim;

pub use gazetteer::OfflineGeocoder;
pub use nominatim::{parse_search_response, NominatimGeocoder};
