//! Application Layer
//!
//! Orchestrates the CLI and the domain/infrastructure layers:
//! - `lane_search`: radius search with lane summaries and route map
//! - `carrier_search`: best quotes for a pairing, and the pairing option lists

pub mod carrier_search;
pub mod lane_search;

pub use carrier_search::{lane_options, search_carriers, CarrierOutcome, LaneOptions, PairingLevel};
pub use lane_search::{LaneSearchService, SearchOutcome, SearchRequest, SearchServiceError};
