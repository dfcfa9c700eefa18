//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::errors::DomainError;

/// Valid latitude range in degrees
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Decimal places kept for coordinates picked on the map
const PICK_PRECISION: i32 = 6;

/// A point on the map with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCoordinate")]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !is_valid_latitude(latitude) || !is_valid_longitude(longitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "{latitude}, {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate without validation (for already checked values)
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Round both components to the precision used for map picks
    #[must_use]
    pub fn rounded(self) -> Self {
        let factor = 10f64.powi(PICK_PRECISION);
        Self {
            latitude: (self.latitude * factor).round() / factor,
            longitude: (self.longitude * factor).round() / factor,
        }
    }

    /// Comma-joined `lat,lon` form used in query strings
    ///
    /// Uses the shortest decimal that round-trips, so `17.0` becomes `17`.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Wrocław city centre, the default map view
    #[must_use]
    pub const fn wroclaw() -> Self {
        Self::new_unchecked(51.1079, 17.0385)
    }
}

/// Wire shape of a coordinate before range checking
#[derive(Deserialize)]
struct UncheckedCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<UncheckedCoordinate> for Coordinate {
    type Error = DomainError;

    fn try_from(value: UncheckedCoordinate) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Check a latitude against [-90, 90]; NaN is never valid
#[must_use]
pub fn is_valid_latitude(latitude: f64) -> bool {
    LATITUDE_RANGE.contains(&latitude)
}

/// Check a longitude against [-180, 180]; NaN is never valid
#[must_use]
pub fn is_valid_longitude(longitude: f64) -> bool {
    LONGITUDE_RANGE.contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let c = Coordinate::new(51.1, 17.0).expect("valid coordinates");
        assert!((c.latitude() - 51.1).abs() < f64::EPSILON);
        assert!((c.longitude() - 17.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(Coordinate::new(90.0001, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(Coordinate::new(0.0, 181.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_query_value_uses_shortest_form() {
        let start = Coordinate::new(51.10, 17.00).expect("valid");
        assert_eq!(start.to_query_value(), "51.1,17");

        let end = Coordinate::new(51.20, 17.10).expect("valid");
        assert_eq!(end.to_query_value(), "51.2,17.1");
    }

    #[test]
    fn test_display_six_decimals() {
        let c = Coordinate::new(51.1, 17.0385).expect("valid");
        assert_eq!(c.to_string(), "51.100000, 17.038500");
    }

    #[test]
    fn test_rounded_to_six_decimals() {
        let c = Coordinate::new_unchecked(51.123_456_789, 17.000_000_4).rounded();
        assert!((c.latitude() - 51.123_457).abs() < 1e-9);
        assert!((c.longitude() - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialization_field_names() {
        let c = Coordinate::new(51.1, 17.0).expect("valid");
        let json = serde_json::to_value(c).expect("serialize");
        assert_eq!(json["latitude"], 51.1);
        assert_eq!(json["longitude"], 17.0);
    }

    #[test]
    fn test_deserialization_checks_range() {
        let c: Coordinate =
            serde_json::from_str(r#"{"latitude": 51.1, "longitude": 17.0}"#).expect("valid");
        assert_eq!(c, Coordinate::new_unchecked(51.1, 17.0));

        let out_of_range =
            serde_json::from_str::<Coordinate>(r#"{"latitude": 123.0, "longitude": 17.0}"#);
        assert!(out_of_range.is_err());
        let missing = serde_json::from_str::<Coordinate>(r#"{"latitude": 51.1}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_wroclaw_is_valid() {
        let c = Coordinate::wroclaw();
        assert!(Coordinate::new(c.latitude(), c.longitude()).is_ok());
    }
}
