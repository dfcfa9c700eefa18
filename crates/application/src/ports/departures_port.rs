//! Departure query port
//!
//! The single outbound call of the application. Implementations never return
//! an error: transport and protocol failures come back as
//! [`QueryResult::Failure`](domain::QueryResult::Failure) so the controller handles every outcome the same
//! way. The response body, when there was one, travels alongside for the raw
//! view.

use async_trait::async_trait;
use domain::{QueryRequest, QueryResponse};
#[cfg(test)]
use mockall::automock;

/// Port for fetching the departures closest to a start point
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeparturesPort: Send + Sync {
    /// Issue the query and wait for the full outcome
    async fn fetch(&self, request: &QueryRequest) -> QueryResponse;
}
