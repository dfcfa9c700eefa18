//! Typed closest-departures response

use domain::{Departure, QueryResponse, QueryResult};

/// Departures parsed from a successful response, in API order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeparturesResponse {
    /// Departures as returned; the API's order is authoritative
    pub departures: Vec<Departure>,
    /// Response body as received, for the raw view
    pub raw_body: Option<String>,
}

impl DeparturesResponse {
    /// Number of departures
    #[must_use]
    pub fn len(&self) -> usize {
        self.departures.len()
    }

    /// Check if no departures were returned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }
}

impl From<DeparturesResponse> for QueryResult {
    fn from(response: DeparturesResponse) -> Self {
        Self::Success(response.departures)
    }
}

impl From<DeparturesResponse> for QueryResponse {
    fn from(response: DeparturesResponse) -> Self {
        Self {
            result: QueryResult::Success(response.departures),
            raw_body: response.raw_body,
        }
    }
}
