//! Persistence implementations
//!
//! Implementations of [`LaneRepository`](ratefinder_domain::repository::LaneRepository)
//! for an uploaded CSV file and for the built-in sample table.

mod embedded_lane_repo;
mod file_lane_repo;

pub use embedded_lane_repo::EmbeddedLaneRepository;
pub use file_lane_repo::FileLaneRepository;
