//! Domain services

pub mod best_carrier;
pub mod distance;
pub mod lane_aggregator;
pub mod lane_filter;
pub mod location_resolver;
pub mod pairing;

pub use best_carrier::{find_best_carriers, rank_carriers, restrict_to_pairing, CarrierQuery, RankOptions};
pub use distance::{geodesic_miles, within_radius};
pub use lane_aggregator::{partition_by_equipment, summarize_lanes, LaneSummary};
pub use lane_filter::{filter_lanes, FilterError, LaneFilter, RadiusQuery};
pub use location_resolver::{LocationResolver, Resolution, ResolutionSource, ResolverStats};
pub use pairing::Pairing;
