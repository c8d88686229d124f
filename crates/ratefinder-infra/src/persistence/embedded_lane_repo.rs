//! Built-in sample table as a LaneRepository

use ratefinder_domain::model::LaneRecord;
use ratefinder_domain::repository::LaneRepository;
use ratefinder_types::Error;

use crate::sample_data::sample_lanes;

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedLaneRepository;

impl LaneRepository for EmbeddedLaneRepository {
    fn find_all(&self) -> Result<Vec<LaneRecord>, Error> {
        Ok(sample_lanes())
    }

    fn describe(&self) -> String {
        "built-in sample data".to_string()
    }
}
