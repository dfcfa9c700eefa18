//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error(
        "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180 (got {0})"
    )]
    InvalidCoordinates(String),

    /// Result limit outside [1, 20]
    #[error("Invalid limit: {0} (must be between 1 and 20)")]
    InvalidLimit(i64),

    /// Date/time missing or not convertible to an absolute instant
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}
