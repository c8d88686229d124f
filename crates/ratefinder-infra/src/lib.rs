//! Infrastructure layer: table loading and writing, geocoders, repositories

pub mod alias_loader;
pub mod csv_loader;
pub mod csv_writer;
pub mod geocoder;
pub mod persistence;
pub mod sample_data;
pub mod schema;

pub use alias_loader::{load_aliases_from_file, load_aliases_from_str};
pub use csv_loader::{load_lanes_from_bytes, load_lanes_from_path, load_lanes_from_reader, LoadedTable};
pub use csv_writer::{to_csv_string, write_lanes};
pub use geocoder::{NominatimGeocoder, OfflineGeocoder};
pub use persistence::{EmbeddedLaneRepository, FileLaneRepository};
pub use schema::{CanonicalField, ColumnAliases, ColumnMap};
