//! Domain layer for freight lane rates
//!
//! Lane records and their classification, the location resolution contract,
//! and the filter / aggregate / rank services that operate on an in-memory table.

pub mod model;
pub mod repository;
pub mod service;
