//! Transit error types
//!
//! The `Display` text of each variant is what the user ends up seeing as the
//! failure reason of a query.

use thiserror::Error;

/// Errors that can occur while querying closest departures
#[derive(Debug, Error)]
pub enum TransitError {
    /// No response was received (connection refused, DNS, reset, ...)
    #[error("{0}")]
    Transport(String),

    /// The transport gave up waiting for a response
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// A response arrived with a non-success status
    #[error("HTTP error: {status}")]
    Protocol {
        /// HTTP status code
        status: u16,
    },

    /// The response body is not a departures payload
    #[error("Invalid response: {0}")]
    Parse(String),

    /// The departure time cannot be turned into a UTC instant
    #[error("Invalid departure time: {0}")]
    InvalidDepartureTime(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TransitError {
    /// Build a transport error from the full source chain of `err`
    pub(crate) fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Transport(message)
    }

    /// HTTP status of a protocol error
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if no response was received at all
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("Connection refused")]
    struct Inner;

    #[test]
    fn test_protocol_error_display() {
        let err = TransitError::Protocol { status: 404 };
        assert_eq!(err.to_string(), "HTTP error: 404");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_error_keeps_source_chain() {
        let err = TransitError::transport(&Outer(Inner));
        assert_eq!(err.to_string(), "error sending request: Connection refused");
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = TransitError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
        assert!(err.is_transport());

        let err = TransitError::Parse("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "Invalid response: expected value at line 1");

        let err = TransitError::InvalidDepartureTime("soon".to_string());
        assert_eq!(err.to_string(), "Invalid departure time: soon");
    }
}
