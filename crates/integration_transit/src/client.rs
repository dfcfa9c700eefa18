//! Closest-departures client over HTTP
//!
//! Issues one `GET` per query and waits for the whole response. No retries
//! and no caching; the only timeout is the one configured on the transport.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Coordinate, Departure, DepartureTime, QueryRequest, Stop};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::DeparturesResponse;

/// Trait for closest-departures clients
#[async_trait]
pub trait DeparturesClient: Send + Sync {
    /// Fetch the departures closest to the request's start point
    async fn closest_departures(
        &self,
        request: &QueryRequest,
    ) -> Result<DeparturesResponse, TransitError>;
}

/// Closest-departures client using the public transport HTTP API
#[derive(Debug)]
pub struct HttpDeparturesClient {
    client: Client,
    endpoint: Url,
    config: TransitConfig,
}

impl HttpDeparturesClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        config.validate().map_err(TransitError::Configuration)?;

        let endpoint = Self::build_endpoint(config)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransitError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            config: config.clone(),
        })
    }

    /// Endpoint every query is sent to
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `{base_url}/public_transport/city/{city}/closest_departures`
    fn build_endpoint(config: &TransitConfig) -> Result<Url, TransitError> {
        let mut url = Url::parse(config.base_url.trim())
            .map_err(|e| TransitError::Configuration(format!("base_url: {e}")))?;

        url.path_segments_mut()
            .map_err(|()| {
                TransitError::Configuration(format!(
                    "base_url cannot carry a path: {}",
                    config.base_url
                ))
            })?
            .pop_if_empty()
            .extend([
                "public_transport",
                "city",
                config.city.trim(),
                "closest_departures",
            ]);

        Ok(url)
    }

    /// Query parameters for a request departing at `start_time`
    #[must_use]
    pub fn query_params(
        request: &QueryRequest,
        start_time: &DateTime<Utc>,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("start_coordinates", request.start.to_query_value()),
            ("end_coordinates", request.destination.to_query_value()),
            ("start_time", DepartureTime::format_utc(start_time)),
            ("limit", request.limit.to_string()),
        ]
    }

    /// Parse a success body into typed departures
    ///
    /// Only a body that is not JSON, or a `departures` value that is neither
    /// a list nor null, fails the whole response. Records that are not
    /// objects are skipped; every other record is kept.
    fn parse_departures_response(body: &str) -> Result<DeparturesResponse, TransitError> {
        let raw: Value =
            serde_json::from_str(body).map_err(|e| TransitError::Parse(e.to_string()))?;

        let records: &[Value] = match raw.get("departures") {
            Some(Value::Array(records)) => records.as_slice(),
            None | Some(Value::Null) => &[],
            Some(other) => {
                return Err(TransitError::Parse(format!(
                    "departures is not a list: {other}"
                )));
            },
        };

        let departures = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let converted = Self::convert_departure(record);
                if converted.is_none() {
                    warn!(index, %record, "Skipping departure record that is not an object");
                }
                converted
            })
            .collect();

        Ok(DeparturesResponse {
            departures,
            raw_body: Some(body.to_string()),
        })
    }

    /// Convert one raw record, dropping malformed fields individually
    fn convert_departure(record: &Value) -> Option<Departure> {
        if !record.is_object() {
            return None;
        }
        let raw = RawDeparture::deserialize(record).ok()?;

        Some(Departure {
            stop: raw
                .stop
                .as_ref()
                .filter(|stop| stop.is_object())
                .and_then(|stop| RawStop::deserialize(stop).ok())
                .map(Self::convert_stop)
                .unwrap_or_default(),
            route_id: raw.route_id.as_ref().and_then(text),
            trip_headsign: raw.trip_headsign.as_ref().and_then(text),
            trip_id: raw.trip_id.as_ref().and_then(text),
            distance_to_start: raw.distance_to_start.as_ref().and_then(number),
        })
    }

    /// Convert a raw stop; coordinates survive only if both parts are valid
    fn convert_stop(raw: RawStop) -> Stop {
        let coordinates = raw.coordinates.as_ref().and_then(|c| {
            let latitude = c.get("latitude").and_then(number)?;
            let longitude = c.get("longitude").and_then(number)?;
            Coordinate::new(latitude, longitude).ok()
        });

        Stop {
            name: raw.name.as_ref().and_then(text),
            coordinates,
            departure_time: raw.departure_time.as_ref().and_then(text),
            arrival_time: raw.arrival_time.as_ref().and_then(text),
        }
    }
}

#[async_trait]
impl DeparturesClient for HttpDeparturesClient {
    #[instrument(skip(self, request), fields(start = %request.start, destination = %request.destination, limit = %request.limit))]
    async fn closest_departures(
        &self,
        request: &QueryRequest,
    ) -> Result<DeparturesResponse, TransitError> {
        let start_time = request
            .departure_time
            .to_utc()
            .map_err(|_| TransitError::InvalidDepartureTime(request.departure_time.to_string()))?;
        let params = Self::query_params(request, &start_time);

        debug!(url = %self.endpoint, ?params, "Requesting closest departures");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::transport(&e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Closest departures request rejected");
            return Err(TransitError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::transport(&e))?;

        let result = Self::parse_departures_response(&body)?;

        if result.is_empty() {
            warn!("No departures found");
        }

        debug!(count = result.len(), "Departures found");
        Ok(result)
    }
}

/// String value, or a number rendered as text (route ids are often numeric)
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric value, or a string holding a number
fn number(value: &Value) -> Option<f64> {
    let parsed: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawDeparture {
    stop: Option<Value>,
    route_id: Option<Value>,
    trip_headsign: Option<Value>,
    trip_id: Option<Value>,
    distance_to_start: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawStop {
    name: Option<Value>,
    coordinates: Option<Value>,
    departure_time: Option<Value>,
    arrival_time: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ResultLimit, Stop};

    fn sample_request(time: &str) -> QueryRequest {
        QueryRequest::new(
            Coordinate::new_unchecked(51.10, 17.00),
            Coordinate::new_unchecked(51.20, 17.10),
            DepartureTime::new(time).unwrap(),
            ResultLimit::new(5).unwrap(),
        )
    }

    #[test]
    fn test_endpoint_path() {
        let client = HttpDeparturesClient::new(&TransitConfig::default()).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://localhost:5001/public_transport/city/wroclaw/closest_departures"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = TransitConfig::for_testing("https://api.example.com/v2/");
        let client = HttpDeparturesClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.example.com/v2/public_transport/city/wroclaw/closest_departures"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = TransitConfig::for_testing("not a url");
        let err = HttpDeparturesClient::new(&config).unwrap_err();
        assert!(matches!(err, TransitError::Configuration(_)));

        let config = TransitConfig::for_testing("mailto:someone@example.com");
        assert!(HttpDeparturesClient::new(&config).is_err());
    }

    #[test]
    fn test_query_params() {
        let request = sample_request("2024-01-01T10:00:00Z");
        let start_time = request.departure_time.to_utc().unwrap();
        let params = HttpDeparturesClient::query_params(&request, &start_time);

        assert_eq!(
            params,
            vec![
                ("start_coordinates", "51.1,17".to_string()),
                ("end_coordinates", "51.2,17.1".to_string()),
                ("start_time", "2024-01-01T10:00:00Z".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_departures_response() {
        let json = r#"{
            "departures": [{
                "trip_id": "3_14613060",
                "route_id": "A",
                "trip_headsign": "KOSMONAUTÓW (Pętla)",
                "stop": {
                    "name": "Plac Grunwaldzki",
                    "coordinates": { "latitude": 51.1115, "longitude": 17.0605 },
                    "arrival_time": "2024-01-01T10:04:00Z",
                    "departure_time": "2024-01-01T10:05:00Z"
                },
                "distance_to_start": 412.7
            }]
        }"#;

        let result = HttpDeparturesClient::parse_departures_response(json).unwrap();
        assert_eq!(result.len(), 1);

        let dep = &result.departures[0];
        assert_eq!(dep.stop.name.as_deref(), Some("Plac Grunwaldzki"));
        assert_eq!(dep.route_id.as_deref(), Some("A"));
        assert_eq!(dep.trip_headsign.as_deref(), Some("KOSMONAUTÓW (Pętla)"));
        assert_eq!(dep.trip_id.as_deref(), Some("3_14613060"));
        assert_eq!(dep.stop.departure_time.as_deref(), Some("2024-01-01T10:05:00Z"));
        assert_eq!(dep.stop.arrival_time.as_deref(), Some("2024-01-01T10:04:00Z"));
        assert!((dep.coordinates().unwrap().latitude() - 51.1115).abs() < 1e-9);
        assert!((dep.distance_to_start.unwrap() - 412.7).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_route_id_becomes_text() {
        let json = r#"{ "departures": [{ "route_id": 145, "stop": { "name": "Rynek" } }] }"#;
        let result = HttpDeparturesClient::parse_departures_response(json).unwrap();
        assert_eq!(result.departures[0].route_id.as_deref(), Some("145"));
    }

    #[test]
    fn test_malformed_coordinates_are_dropped_per_record() {
        let json = r#"{
            "departures": [
                { "stop": { "name": "No coords" } },
                { "stop": { "name": "Half", "coordinates": { "latitude": 51.1 } } },
                { "stop": { "name": "Text", "coordinates": { "latitude": "north", "longitude": 17.0 } } },
                { "stop": { "name": "Range", "coordinates": { "latitude": 123.0, "longitude": 17.0 } } },
                { "stop": { "name": "Flat", "coordinates": "51.1,17.0" } },
                { "stop": { "name": "Good", "coordinates": { "latitude": "51.1", "longitude": 17.0 } } }
            ]
        }"#;

        let result = HttpDeparturesClient::parse_departures_response(json).unwrap();
        let with_coords: Vec<Option<&str>> = result
            .departures
            .iter()
            .filter(|d| d.coordinates().is_some())
            .map(|d| d.stop.name.as_deref())
            .collect();
        assert_eq!(result.len(), 6);
        assert_eq!(with_coords, vec![Some("Good")]);
    }

    #[test]
    fn test_stop_that_is_not_an_object_keeps_record() {
        let json = r#"{
            "departures": [
                { "route_id": "33", "stop": { "name": "Good", "coordinates": { "latitude": 51.1, "longitude": 17.0 } } },
                { "route_id": "D", "stop": "Rynek" },
                { "route_id": "A", "stop": ["Rynek"] }
            ]
        }"#;

        let result = HttpDeparturesClient::parse_departures_response(json).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.departures[0].stop.name.as_deref(), Some("Good"));
        assert_eq!(result.departures[1].route_id.as_deref(), Some("D"));
        assert_eq!(result.departures[1].stop, Stop::default());
        assert_eq!(result.departures[2].stop, Stop::default());
    }

    #[test]
    fn test_records_that_are_not_objects_are_skipped() {
        let json = r#"{ "departures": [{ "stop": { "name": "A" } }, null, "B", 7, { "stop": { "name": "C" } }] }"#;

        let result = HttpDeparturesClient::parse_departures_response(json).unwrap();

        let names: Vec<_> = result
            .departures
            .iter()
            .map(|d| d.stop.name.as_deref())
            .collect();
        assert_eq!(names, [Some("A"), Some("C")]);
    }

    #[test]
    fn test_null_departures_is_empty() {
        let result =
            HttpDeparturesClient::parse_departures_response(r#"{ "departures": null }"#).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_departures_of_wrong_type_is_parse_error() {
        let result =
            HttpDeparturesClient::parse_departures_response(r#"{ "departures": "none" }"#);
        assert!(matches!(result, Err(TransitError::Parse(_))));
    }

    #[test]
    fn test_body_is_kept_as_received() {
        let json = r#"{"departures":[{"route_id":145}]}"#;
        let result = HttpDeparturesClient::parse_departures_response(json).unwrap();
        assert_eq!(result.raw_body.as_deref(), Some(json));
    }

    #[test]
    fn test_missing_departures_field_is_empty() {
        let result = HttpDeparturesClient::parse_departures_response("{}").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_record_without_stop() {
        let json = r#"{ "departures": [{ "route_id": "D" }] }"#;
        let result = HttpDeparturesClient::parse_departures_response(json).unwrap();
        assert_eq!(result.departures[0].stop, Stop::default());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = HttpDeparturesClient::parse_departures_response("not json");
        assert!(matches!(result, Err(TransitError::Parse(_))));
    }
}
