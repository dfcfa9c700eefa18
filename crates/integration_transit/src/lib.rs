//! Closest-departures HTTP integration
//!
//! Talks to the public transport API endpoint
//! `GET {base_url}/public_transport/city/{city}/closest_departures`, which
//! returns the departures near a start point that bring the rider closer to
//! a destination.
//!
//! # Architecture
//!
//! [`DeparturesClient`] defines the interface, implemented over HTTP by
//! [`HttpDeparturesClient`]. Failures are reported as [`TransitError`], whose
//! `Display` text is what the user eventually sees.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{DeparturesClient, HttpDeparturesClient, TransitConfig};
//!
//! let client = HttpDeparturesClient::new(&TransitConfig::default())?;
//! let response = client.closest_departures(&request).await?;
//! println!("{} departures", response.len());
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{DeparturesClient, HttpDeparturesClient};
pub use config::TransitConfig;
pub use error::TransitError;
pub use models::DeparturesResponse;
