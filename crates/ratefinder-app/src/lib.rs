//! Application service layer - use cases, config, map data, export

pub mod app;
pub mod config;
pub mod export;
pub mod map;
pub mod repository;
