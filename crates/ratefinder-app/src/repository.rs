//! Repository and geocoder adapters, chosen from config

use std::path::{Path, PathBuf};
use std::time::Duration;

use ratefinder_domain::repository::{Geocoder, LaneRepository};
use ratefinder_infra::persistence::{EmbeddedLaneRepository, FileLaneRepository};
use ratefinder_infra::schema::ColumnAliases;
use ratefinder_infra::{load_aliases_from_file, NominatimGeocoder, OfflineGeocoder};
use ratefinder_types::{GeocoderKind, Result};

use crate::config::Config;

/// Built-in aliases, extended by the configured alias file if any
pub fn column_aliases(aliases_file: Option<&Path>) -> Result<ColumnAliases> {
    match aliases_file {
        Some(path) => load_aliases_from_file(path),
        None => Ok(ColumnAliases::builtin()),
    }
}

/// Open file-based lane repository from CSV
pub fn open_lane_file(csv_path: PathBuf, aliases: ColumnAliases) -> Result<FileLaneRepository> {
    FileLaneRepository::new(csv_path, aliases)
}

/// `data` if given, else the configured data file, else the built-in sample table
pub fn open_lane_repo(config: &Config, data: Option<&Path>) -> Result<Box<dyn LaneRepository>> {
    let path = data.map(Path::to_path_buf).or_else(|| config.data_file.clone());
    match path {
        Some(path) => {
            let aliases = column_aliases(config.aliases_file.as_deref())?;
            Ok(Box::new(open_lane_file(path, aliases)?))
        }
        None => Ok(Box::new(EmbeddedLaneRepository)),
    }
}

pub fn open_geocoder(config: &Config, kind: GeocoderKind) -> Result<Box<dyn Geocoder>> {
    match kind {
        GeocoderKind::Offline => Ok(Box::new(OfflineGeocoder::default())),
        GeocoderKind::Nominatim => {
            let geocoder = NominatimGeocoder::new(
                &config.nominatim_url,
                &config.user_agent,
                Duration::from_secs(config.geocode_timeout_secs),
            )?;
            Ok(Box::new(geocoder))
        }
    }
}
