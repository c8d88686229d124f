//! Domain model types

pub mod classification;
pub mod coordinate;
pub mod lane_record;
pub mod location;

pub use classification::{normalize_label, EquipmentGroup, Selection, ServiceType};
pub use coordinate::Coordinate;
pub use lane_record::{LaneRecord, MARKUP_FACTOR};
pub use location::LocationDescriptor;
