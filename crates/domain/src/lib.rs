//! Domain layer for the closest-departures client
//!
//! Contains the query data model, value objects, input validation, and domain
//! errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use validation::{Field, FieldError, RawQueryInput, ValidationErrors, validate};
pub use value_objects::*;
