//! Departure time as entered by the user
//!
//! The validator only checks that a value is present. Turning it into an
//! absolute UTC instant is a separate, fallible step performed right before
//! the query is sent.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Naive formats accepted in addition to RFC 3339 (`datetime-local` style)
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Format of the local default value (minute precision, like `datetime-local`)
const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Non-empty departure time text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DepartureTime(String);

impl DepartureTime {
    /// Wrap a departure time, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateTime` if the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidDateTime(
                "departure time is required".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The text as entered
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to UTC, reading naive values in the local time zone
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateTime` if the text matches no accepted format or
    /// names a local time that does not exist.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, DomainError> {
        self.to_utc_in(&Local)
    }

    /// Convert to UTC, reading naive values in the given time zone
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateTime` if the text matches no accepted format or
    /// names a time that does not exist in `tz`.
    pub fn to_utc_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Utc>, DomainError> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.0) {
            return Ok(dt.with_timezone(&Utc));
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&self.0, fmt).ok())
            .ok_or_else(|| DomainError::InvalidDateTime(self.0.clone()))?;

        tz.from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| DomainError::InvalidDateTime(format!("{} does not exist locally", self.0)))
    }

    /// ISO-8601 UTC text with second precision and a `Z` suffix
    #[must_use]
    pub fn format_utc(instant: &DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// The current local time in input form, used as the form default
    #[must_use]
    pub fn now_local() -> Self {
        Self(Local::now().format(LOCAL_INPUT_FORMAT).to_string())
    }
}

impl TryFrom<String> for DepartureTime {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DepartureTime> for String {
    fn from(time: DepartureTime) -> Self {
        time.0
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
