//! Domain entities - the query, its outcome, and the departures it returns

mod departure;
mod query_request;
mod query_result;

pub use departure::{Departure, Stop};
pub use query_request::QueryRequest;
pub use query_result::{QueryResponse, QueryResult};
