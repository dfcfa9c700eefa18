//! Input validation for the departures query form
//!
//! [`validate`] turns a snapshot of the raw form fields into a
//! [`QueryRequest`] or into the full list of field errors. Every rule runs
//! independently, so a form with three bad fields reports three errors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::QueryRequest;
use crate::value_objects::{
    Coordinate, DepartureTime, ResultLimit, is_valid_latitude, is_valid_longitude,
};

/// Message for an out-of-range or non-numeric latitude
pub const LATITUDE_MESSAGE: &str = "Invalid latitude (-90 to 90)";
/// Message for an out-of-range or non-numeric longitude
pub const LONGITUDE_MESSAGE: &str = "Invalid longitude (-180 to 180)";
/// Message for an empty departure time
pub const DEPARTURE_TIME_MESSAGE: &str = "Departure time is required";
/// Message for an out-of-range or non-integer limit
pub const LIMIT_MESSAGE: &str = "Limit must be between 1 and 20";

/// A field of the query form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Start point latitude
    StartLatitude,
    /// Start point longitude
    StartLongitude,
    /// Destination latitude
    EndLatitude,
    /// Destination longitude
    EndLongitude,
    /// Departure time
    DepartureTime,
    /// Maximum number of results
    Limit,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Self; 6] = [
        Self::StartLatitude,
        Self::StartLongitude,
        Self::EndLatitude,
        Self::EndLongitude,
        Self::DepartureTime,
        Self::Limit,
    ];

    /// Stable element id of the field
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::StartLatitude => "start-lat",
            Self::StartLongitude => "start-lon",
            Self::EndLatitude => "end-lat",
            Self::EndLongitude => "end-lon",
            Self::DepartureTime => "departure-time",
            Self::Limit => "result-limit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Raw form values exactly as typed or filled in by map clicks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQueryInput {
    /// Start latitude text
    pub start_latitude: String,
    /// Start longitude text
    pub start_longitude: String,
    /// Destination latitude text
    pub end_latitude: String,
    /// Destination longitude text
    pub end_longitude: String,
    /// Departure time text
    pub departure_time: String,
    /// Result limit text
    pub limit: String,
}

impl RawQueryInput {
    /// Read a field
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::StartLatitude => &self.start_latitude,
            Field::StartLongitude => &self.start_longitude,
            Field::EndLatitude => &self.end_latitude,
            Field::EndLongitude => &self.end_longitude,
            Field::DepartureTime => &self.departure_time,
            Field::Limit => &self.limit,
        }
    }

    /// Overwrite a field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::StartLatitude => &mut self.start_latitude,
            Field::StartLongitude => &mut self.start_longitude,
            Field::EndLatitude => &mut self.end_latitude,
            Field::EndLongitude => &mut self.end_longitude,
            Field::DepartureTime => &mut self.departure_time,
            Field::Limit => &mut self.limit,
        };
        *slot = value.into();
    }
}

/// A validation failure attributed to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Offending field
    pub field: Field,
    /// Message shown next to the field
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors of one validation run (never empty when returned)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Errors in form order
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Number of invalid fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if no field is invalid
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error for a specific field
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Check if a specific field is invalid
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.for_field(field).is_some()
    }

    fn push(&mut self, field: Field, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Validate a form snapshot
///
/// # Errors
///
/// Returns every field that violates its rule; no request is built then.
pub fn validate(input: &RawQueryInput) -> Result<QueryRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let start_lat = check_number(input, Field::StartLatitude, is_valid_latitude, &mut errors);
    let start_lon = check_number(input, Field::StartLongitude, is_valid_longitude, &mut errors);
    let end_lat = check_number(input, Field::EndLatitude, is_valid_latitude, &mut errors);
    let end_lon = check_number(input, Field::EndLongitude, is_valid_longitude, &mut errors);

    let departure_time = DepartureTime::new(input.departure_time.as_str()).ok();
    if departure_time.is_none() {
        errors.push(Field::DepartureTime, DEPARTURE_TIME_MESSAGE);
    }

    let limit = input
        .limit
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|v| ResultLimit::new(v).ok());
    if limit.is_none() {
        errors.push(Field::Limit, LIMIT_MESSAGE);
    }

    match (start_lat, start_lon, end_lat, end_lon, departure_time, limit) {
        (
            Some(start_lat),
            Some(start_lon),
            Some(end_lat),
            Some(end_lon),
            Some(departure_time),
            Some(limit),
        ) if errors.is_empty() => Ok(QueryRequest::new(
            Coordinate::new_unchecked(start_lat, start_lon),
            Coordinate::new_unchecked(end_lat, end_lon),
            departure_time,
            limit,
        )),
        _ => Err(errors),
    }
}

fn check_number(
    input: &RawQueryInput,
    field: Field,
    in_range: fn(f64) -> bool,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let value = input
        .get(field)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| in_range(*v));
    if value.is_none() {
        let message = match field {
            Field::StartLatitude | Field::EndLatitude => LATITUDE_MESSAGE,
            _ => LONGITUDE_MESSAGE,
        };
        errors.push(field, message);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> RawQueryInput {
        RawQueryInput {
            start_latitude: "51.10".to_string(),
            start_longitude: "17.00".to_string(),
            end_latitude: "51.20".to_string(),
            end_longitude: "17.10".to_string(),
            departure_time: "2024-01-01T10:00:00Z".to_string(),
            limit: "5".to_string(),
        }
    }

    #[test]
    fn valid_input_builds_request() {
        let request = validate(&valid_input()).expect("valid input");
        assert_eq!(request.start.to_query_value(), "51.1,17");
        assert_eq!(request.destination.to_query_value(), "51.2,17.1");
        assert_eq!(request.departure_time.as_str(), "2024-01-01T10:00:00Z");
        assert_eq!(request.limit.get(), 5);
    }

    #[test]
    fn whitespace_is_ignored() {
        let mut input = valid_input();
        input.set(Field::StartLatitude, " 51.1 ");
        input.set(Field::Limit, " 20\n");
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn boundaries_pass() {
        let mut input = valid_input();
        input.set(Field::StartLatitude, "-90");
        input.set(Field::EndLatitude, "90");
        input.set(Field::StartLongitude, "-180");
        input.set(Field::EndLongitude, "180");
        input.set(Field::Limit, "1");
        assert!(validate(&input).is_ok());

        input.set(Field::Limit, "20");
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn latitude_error_is_attributed_to_field() {
        let mut input = valid_input();
        input.set(Field::EndLatitude, "90.5");
        let errors = validate(&input).expect_err("invalid latitude");
        assert_eq!(errors.len(), 1);
        let error = errors.for_field(Field::EndLatitude).expect("end-lat error");
        assert_eq!(error.message, LATITUDE_MESSAGE);
    }

    #[test]
    fn longitude_error_is_attributed_to_field() {
        let mut input = valid_input();
        input.set(Field::StartLongitude, "-180.01");
        let errors = validate(&input).expect_err("invalid longitude");
        assert!(errors.contains(Field::StartLongitude));
        assert!(!errors.contains(Field::StartLatitude));
    }

    #[test]
    fn non_numeric_values_fail() {
        let mut input = valid_input();
        input.set(Field::StartLatitude, "north");
        input.set(Field::EndLongitude, "");
        input.set(Field::Limit, "five");
        let errors = validate(&input).expect_err("invalid input");
        assert!(errors.contains(Field::StartLatitude));
        assert!(errors.contains(Field::EndLongitude));
        assert!(errors.contains(Field::Limit));
    }

    #[test]
    fn nan_and_infinity_fail() {
        let mut input = valid_input();
        input.set(Field::StartLatitude, "NaN");
        input.set(Field::StartLongitude, "inf");
        let errors = validate(&input).expect_err("invalid input");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn fractional_limit_fails() {
        let mut input = valid_input();
        input.set(Field::Limit, "5.5");
        assert!(validate(&input).expect_err("invalid").contains(Field::Limit));
    }

    #[test]
    fn limit_out_of_range_fails() {
        for bad in ["0", "21", "-1"] {
            let mut input = valid_input();
            input.set(Field::Limit, bad);
            let errors = validate(&input).expect_err("invalid limit");
            assert_eq!(
                errors.for_field(Field::Limit).map(|e| e.message.as_str()),
                Some(LIMIT_MESSAGE)
            );
        }
    }

    #[test]
    fn departure_time_presence_only() {
        let mut input = valid_input();
        input.set(Field::DepartureTime, "  ");
        let errors = validate(&input).expect_err("missing time");
        assert_eq!(
            errors.for_field(Field::DepartureTime).map(|e| e.message.as_str()),
            Some(DEPARTURE_TIME_MESSAGE)
        );

        // format is checked later, at conversion time
        input.set(Field::DepartureTime, "whenever");
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn all_violations_are_reported() {
        let input = RawQueryInput::default();
        let errors = validate(&input).expect_err("empty form");
        assert_eq!(errors.len(), Field::ALL.len());
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn display_joins_errors() {
        let mut input = valid_input();
        input.set(Field::StartLatitude, "100");
        input.set(Field::Limit, "0");
        let text = validate(&input).expect_err("invalid").to_string();
        assert_eq!(
            text,
            "start-lat: Invalid latitude (-90 to 90); result-limit: Limit must be between 1 and 20"
        );
    }
}
