//! Two-point picker driven by map clicks
//!
//! The first click sets the start, the second the destination. A third click
//! starts over: it becomes the new start and the destination is cleared.

use domain::Coordinate;
use tracing::debug;

use crate::ports::{MapPort, MarkerId, PointRole};

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerStep {
    /// First click of a session
    StartSet(Coordinate),
    /// Second click of a session
    DestinationSet(Coordinate),
    /// Click after both points were set; the session restarted at this point
    Restarted(Coordinate),
}

impl PickerStep {
    /// The clicked point, rounded to six decimals
    #[must_use]
    pub const fn point(&self) -> Coordinate {
        match self {
            Self::StartSet(at) | Self::DestinationSet(at) | Self::Restarted(at) => *at,
        }
    }

    /// Which point the click set
    #[must_use]
    pub const fn role(&self) -> PointRole {
        match self {
            Self::StartSet(_) | Self::Restarted(_) => PointRole::Start,
            Self::DestinationSet(_) => PointRole::Destination,
        }
    }
}

/// Picker session state and the markers it owns
#[derive(Debug, Clone, Default)]
pub struct MapPicker {
    start: Option<Coordinate>,
    destination: Option<Coordinate>,
    start_marker: Option<MarkerId>,
    destination_marker: Option<MarkerId>,
}

impl MapPicker {
    /// Empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picked start, if any
    #[must_use]
    pub const fn start(&self) -> Option<Coordinate> {
        self.start
    }

    /// Picked destination, if any
    #[must_use]
    pub const fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    /// Role the next click will set
    #[must_use]
    pub const fn next_role(&self) -> PointRole {
        match (self.start, self.destination) {
            (Some(_), None) => PointRole::Destination,
            _ => PointRole::Start,
        }
    }

    /// Handle a click at `at`
    pub fn click(&mut self, at: Coordinate, map: &mut dyn MapPort) -> PickerStep {
        let at = at.rounded();

        let step = match (self.start, self.destination) {
            (None, _) => PickerStep::StartSet(at),
            (Some(_), None) => PickerStep::DestinationSet(at),
            (Some(_), Some(_)) => {
                self.clear(PointRole::Destination, map);
                PickerStep::Restarted(at)
            },
        };
        self.place(step.role(), at, map);

        debug!(?step, "Map click handled");
        step
    }

    /// Drop both points and their markers
    pub fn reset(&mut self, map: &mut dyn MapPort) {
        self.clear(PointRole::Start, map);
        self.clear(PointRole::Destination, map);
    }

    fn place(&mut self, role: PointRole, at: Coordinate, map: &mut dyn MapPort) {
        self.clear(role, map);
        let id = map.add_marker(role.layer(), at, role.label());
        match role {
            PointRole::Start => {
                self.start = Some(at);
                self.start_marker = Some(id);
            },
            PointRole::Destination => {
                self.destination = Some(at);
                self.destination_marker = Some(id);
            },
        }
    }

    fn clear(&mut self, role: PointRole, map: &mut dyn MapPort) {
        let marker = match role {
            PointRole::Start => {
                self.start = None;
                self.start_marker.take()
            },
            PointRole::Destination => {
                self.destination = None;
                self.destination_marker.take()
            },
        };
        if let Some(id) = marker {
            map.remove_marker(id);
        }
    }
}
