//! Map overlay port
//!
//! The capabilities the application needs from a mapping library: markers
//! with popups grouped in layers, layer bounds, and viewport control. Tile
//! rendering and projection stay with the library.

use std::fmt;

use domain::Coordinate;
use serde::{Deserialize, Serialize};

/// Handle of a placed marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(u64);

impl MarkerId {
    /// Wrap a raw marker handle
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw handle
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Marker groups that are cleared independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerLayer {
    /// The picked start point
    Start,
    /// The picked destination
    Destination,
    /// Stops of the presented departures
    Departures,
}

/// Which end of the trip a picked point is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointRole {
    /// Where the trip starts
    Start,
    /// Where the trip ends
    Destination,
}

impl PointRole {
    /// Layer holding this role's marker
    #[must_use]
    pub const fn layer(self) -> MarkerLayer {
        match self {
            Self::Start => MarkerLayer::Start,
            Self::Destination => MarkerLayer::Destination,
        }
    }

    /// Popup label of this role's marker
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Destination => "Destination",
        }
    }
}

/// Axis-aligned bounding region of a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum latitude and longitude
    pub south_west: Coordinate,
    /// Maximum latitude and longitude
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest region containing every point; `None` for no points
    pub fn enclosing(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(acc.map_or(
                Self {
                    south_west: p,
                    north_east: p,
                },
                |b: Self| b.extend(p),
            ))
        })
    }

    /// Grow the region to include `point`
    #[must_use]
    pub fn extend(self, point: Coordinate) -> Self {
        Self {
            south_west: Coordinate::new_unchecked(
                self.south_west.latitude().min(point.latitude()),
                self.south_west.longitude().min(point.longitude()),
            ),
            north_east: Coordinate::new_unchecked(
                self.north_east.latitude().max(point.latitude()),
                self.north_east.longitude().max(point.longitude()),
            ),
        }
    }

    /// Check if `point` lies inside the region (edges included)
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.latitude()..=self.north_east.latitude()).contains(&point.latitude())
            && (self.south_west.longitude()..=self.north_east.longitude())
                .contains(&point.longitude())
    }

    /// Midpoint of the region
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new_unchecked(
            f64::midpoint(self.south_west.latitude(), self.north_east.latitude()),
            f64::midpoint(self.south_west.longitude(), self.north_east.longitude()),
        )
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] .. [{}]", self.south_west, self.north_east)
    }
}

/// Port for the map overlay
pub trait MapPort {
    /// Center the map on `center` at `zoom`
    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Place a marker with an attached popup
    fn add_marker(&mut self, layer: MarkerLayer, at: Coordinate, popup: &str) -> MarkerId;

    /// Remove one marker; returns false if it was already gone
    fn remove_marker(&mut self, id: MarkerId) -> bool;

    /// Remove every marker of a layer
    fn clear_layer(&mut self, layer: MarkerLayer);

    /// Number of markers in a layer
    fn marker_count(&self, layer: MarkerLayer) -> usize;

    /// Bounding region of a layer's markers; `None` when the layer is empty
    fn layer_bounds(&self, layer: MarkerLayer) -> Option<Bounds>;

    /// Adjust the viewport so that `bounds` is visible
    fn fit_bounds(&mut self, bounds: Bounds);
}
