//! A validated closest-departures query

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, DepartureTime, ResultLimit};

/// Query for departures near `start` heading towards `destination`
///
/// Built by [`crate::validate`] once every field has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Where the trip starts
    pub start: Coordinate,
    /// Where the trip should end
    pub destination: Coordinate,
    /// Requested departure time as entered
    pub departure_time: DepartureTime,
    /// Maximum number of departures to return
    pub limit: ResultLimit,
}

impl QueryRequest {
    /// Create a query from already validated parts
    #[must_use]
    pub const fn new(
        start: Coordinate,
        destination: Coordinate,
        departure_time: DepartureTime,
        limit: ResultLimit,
    ) -> Self {
        Self {
            start,
            destination,
            departure_time,
            limit,
        }
    }
}
