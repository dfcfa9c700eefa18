//! Outcome of a departures query

use serde::{Deserialize, Serialize};

use super::Departure;

/// Either the departures found or the reason the query failed
///
/// A new result always replaces the previous one; results are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum QueryResult {
    /// Departures in API order (may be empty)
    Success(Vec<Departure>),
    /// Human-readable failure reason
    Failure(String),
}

impl QueryResult {
    /// Build a failure from any displayable error
    pub fn failure(reason: impl ToString) -> Self {
        Self::Failure(reason.to_string())
    }

    /// Check if this is a success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Departures of a success, empty for a failure
    #[must_use]
    pub fn departures(&self) -> &[Departure] {
        match self {
            Self::Success(departures) => departures,
            Self::Failure(_) => &[],
        }
    }

    /// Reason of a failure
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}

impl<E: std::fmt::Display> From<Result<Vec<Departure>, E>> for QueryResult {
    fn from(result: Result<Vec<Departure>, E>) -> Self {
        match result {
            Ok(departures) => Self::Success(departures),
            Err(e) => Self::failure(e),
        }
    }
}

/// A query result together with the response body it came from
///
/// Ports without a body to show (fakes, failures before a response
/// arrived) leave `raw_body` empty.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    /// The outcome handed to the presenter
    pub result: QueryResult,
    /// Response body as received
    pub raw_body: Option<String>,
}

impl From<QueryResult> for QueryResponse {
    fn from(result: QueryResult) -> Self {
        Self {
            result,
            raw_body: None,
        }
    }
}
