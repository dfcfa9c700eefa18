//! Departure entity - a scheduled departure at a stop near the start point
//!
//! Records come from the external API and every field may be missing. Keeping
//! them optional lets one broken record degrade on its own instead of failing
//! the whole response.

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// A stop served by the departure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Human-readable stop name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stop position, present only when both components were valid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinate>,
    /// Scheduled departure timestamp (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    /// Scheduled arrival timestamp (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

impl Stop {
    /// Create a named stop
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the stop position
    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: Coordinate) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Set the departure timestamp
    #[must_use]
    pub fn with_departure_time(mut self, time: impl Into<String>) -> Self {
        self.departure_time = Some(time.into());
        self
    }
}

/// A single departure returned by the closest-departures endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    /// Stop the vehicle departs from
    pub stop: Stop,
    /// Route (line) identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    /// Rider-facing destination of the trip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_headsign: Option<String>,
    /// Trip identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
    /// Distance from the start point to the stop in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_to_start: Option<f64>,
}

impl Departure {
    /// Create a departure at a stop
    #[must_use]
    pub fn new(stop: Stop) -> Self {
        Self {
            stop,
            ..Self::default()
        }
    }

    /// Set the route identifier
    #[must_use]
    pub fn with_route(mut self, route_id: impl Into<String>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }

    /// Set the trip headsign
    #[must_use]
    pub fn with_headsign(mut self, headsign: impl Into<String>) -> Self {
        self.trip_headsign = Some(headsign.into());
        self
    }

    /// Stop position, if known
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinate> {
        self.stop.coordinates
    }
}
