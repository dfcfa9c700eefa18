//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod departures_adapter;
mod marker_overlay;

pub use departures_adapter::DeparturesAdapter;
pub use marker_overlay::{MAX_ZOOM, Marker, MarkerOverlay};
