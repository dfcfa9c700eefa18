//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err = ApplicationError::from(DomainError::InvalidLimit(0));
        assert_eq!(err.to_string(), DomainError::InvalidLimit(0).to_string());
    }

    #[test]
    fn configuration_error_message() {
        let err = ApplicationError::Configuration("city must not be empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: city must not be empty");
    }
}
