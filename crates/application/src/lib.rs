//! Application layer - Use cases and orchestration
//!
//! Contains the interaction controller, the result presenter, and the port
//! definitions the controller drives. Adapters in the infrastructure and
//! presentation layers implement the ports.

pub mod error;
pub mod ports;
pub mod services;
#[cfg(test)]
pub(crate) mod testing;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
