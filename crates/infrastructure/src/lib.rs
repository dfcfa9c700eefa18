//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the departures query
//! over HTTP and an in-memory map overlay. Also loads the application
//! configuration.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::{AppConfig, MapConfig, SearchConfig};
