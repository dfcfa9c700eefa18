//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure and presentation layers
//! implement these ports.

mod departures_port;
mod map_port;
mod view_port;

pub use departures_port::DeparturesPort;
#[cfg(test)]
pub use departures_port::MockDeparturesPort;
pub use map_port::{Bounds, MapPort, MarkerId, MarkerLayer, PointRole};
pub use view_port::{DepartureCard, StatusTone, ViewPort};
