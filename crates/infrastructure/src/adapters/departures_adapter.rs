//! Departures adapter - Implements DeparturesPort using integration_transit

use application::ports::DeparturesPort;
use async_trait::async_trait;
use domain::{QueryRequest, QueryResponse, QueryResult};
use integration_transit::{DeparturesClient, HttpDeparturesClient, TransitConfig, TransitError};
use tracing::{debug, instrument, warn};

/// Adapter for the closest-departures API
///
/// Every client error is folded into [`QueryResult::Failure`] with the
/// error's display text as the reason. Successful responses keep their body.
#[derive(Debug)]
pub struct DeparturesAdapter<C = HttpDeparturesClient> {
    client: C,
}

impl DeparturesAdapter {
    /// Create an adapter backed by the HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        Ok(Self::with_client(HttpDeparturesClient::new(config)?))
    }
}

impl<C: DeparturesClient> DeparturesAdapter<C> {
    /// Create an adapter around any departures client
    pub const fn with_client(client: C) -> Self {
        Self { client }
    }

    /// The wrapped client
    pub const fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: DeparturesClient> DeparturesPort for DeparturesAdapter<C> {
    #[instrument(skip(self, request), fields(limit = request.limit.get()))]
    async fn fetch(&self, request: &QueryRequest) -> QueryResponse {
        match self.client.closest_departures(request).await {
            Ok(response) => {
                debug!(count = response.len(), "Departures received");
                response.into()
            },
            Err(e) => {
                warn!(error = %e, "Departures query failed");
                QueryResult::failure(e).into()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::{Coordinate, Departure, DepartureTime, ResultLimit, Stop};
    use integration_transit::DeparturesResponse;

    use super::*;

    enum FixedClient {
        Departures(DeparturesResponse),
        Status(u16),
        Transport(&'static str),
    }

    #[async_trait]
    impl DeparturesClient for FixedClient {
        async fn closest_departures(
            &self,
            _request: &QueryRequest,
        ) -> Result<DeparturesResponse, TransitError> {
            match self {
                Self::Departures(response) => Ok(response.clone()),
                Self::Status(status) => Err(TransitError::Protocol { status: *status }),
                Self::Transport(text) => Err(TransitError::Transport((*text).to_string())),
            }
        }
    }

    fn request() -> QueryRequest {
        QueryRequest::new(
            Coordinate::new(51.1, 17.0).unwrap(),
            Coordinate::new(51.2, 17.1).unwrap(),
            DepartureTime::new("2024-01-01T10:00:00Z").unwrap(),
            ResultLimit::new(5).unwrap(),
        )
    }

    #[tokio::test]
    async fn success_becomes_success() {
        let response = DeparturesResponse {
            departures: vec![Departure::new(Stop::new("Plac Grunwaldzki"))],
            raw_body: Some(r#"{"departures":[{"stop":{"name":"Plac Grunwaldzki"}}]}"#.to_string()),
        };
        let adapter = DeparturesAdapter::with_client(FixedClient::Departures(response));

        let response = adapter.fetch(&request()).await;

        assert!(response.result.is_success());
        assert_eq!(response.result.departures().len(), 1);
        assert!(response.raw_body.is_some_and(|body| body.contains("Plac Grunwaldzki")));
    }

    #[tokio::test]
    async fn protocol_error_becomes_failure() {
        let adapter = DeparturesAdapter::with_client(FixedClient::Status(404));

        let response = adapter.fetch(&request()).await;

        assert_eq!(response.result.failure_reason(), Some("HTTP error: 404"));
        assert!(response.raw_body.is_none());
    }

    #[tokio::test]
    async fn transport_error_keeps_text() {
        let adapter = DeparturesAdapter::with_client(FixedClient::Transport("connection refused"));

        let result = adapter.fetch(&request()).await.result;

        assert_eq!(result.failure_reason(), Some("connection refused"));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = TransitConfig {
            city: String::new(),
            ..TransitConfig::default()
        };
        assert!(DeparturesAdapter::new(&config).is_err());
    }
}
