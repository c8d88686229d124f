//! File-based implementation of LaneRepository

use std::path::{Path, PathBuf};

use ratefinder_domain::model::LaneRecord;
use ratefinder_domain::repository::LaneRepository;
use ratefinder_types::Error;

use crate::csv_loader::{load_lanes_from_path, LoadedTable};
use crate::schema::ColumnAliases;

/// Lane table read from a CSV file on every call
pub struct FileLaneRepository {
    csv_path: PathBuf,
    aliases: ColumnAliases,
}

impl FileLaneRepository {
    pub fn new(csv_path: PathBuf, aliases: ColumnAliases) -> Result<Self, Error> {
        if !csv_path.exists() {
            return Err(Error::FileNotFound(csv_path.display().to_string()));
        }
        Ok(Self { csv_path, aliases })
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Load the table along with its column mapping and parse counters
    pub fn load_table(&self) -> Result<LoadedTable, Error> {
        Ok(load_lanes_from_path(&self.csv_path, &self.aliases)?)
    }
}

impl LaneRepository for FileLaneRepository {
    fn find_all(&self) -> Result<Vec<LaneRecord>, Error> {
        Ok(self.load_table()?.records)
    }

    fn describe(&self) -> String {
        self.csv_path.display().to_string()
    }
}
