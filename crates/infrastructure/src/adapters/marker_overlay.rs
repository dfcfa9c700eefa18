//! In-memory map overlay
//!
//! Keeps markers and the viewport without drawing anything. Front ends that
//! have no real map (the CLI) render from its state.

use std::collections::BTreeMap;

use application::ports::{Bounds, MapPort, MarkerId, MarkerLayer};
use domain::Coordinate;
use tracing::debug;

/// Highest zoom level the overlay will fit to
pub const MAX_ZOOM: u8 = 18;

/// A placed marker
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Layer the marker belongs to
    pub layer: MarkerLayer,
    /// Marker position
    pub at: Coordinate,
    /// Popup text
    pub popup: String,
}

/// Map overlay that only keeps state
#[derive(Debug, Clone)]
pub struct MarkerOverlay {
    markers: BTreeMap<MarkerId, Marker>,
    next_id: u64,
    center: Coordinate,
    zoom: u8,
}

impl Default for MarkerOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerOverlay {
    /// Empty overlay centered on Wrocław
    #[must_use]
    pub const fn new() -> Self {
        Self {
            markers: BTreeMap::new(),
            next_id: 0,
            center: Coordinate::wroclaw(),
            zoom: 13,
        }
    }

    /// Current viewport center
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.center
    }

    /// Current zoom level
    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Markers of one layer in placement order
    pub fn markers(&self, layer: MarkerLayer) -> impl Iterator<Item = &Marker> {
        self.markers.values().filter(move |m| m.layer == layer)
    }

    /// Look up a marker
    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }
}

/// Largest zoom at which a region of this size still fits one 256px tile
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn zoom_for(bounds: &Bounds) -> u8 {
    let lat_span = bounds.north_east.latitude() - bounds.south_west.latitude();
    let lon_span = bounds.north_east.longitude() - bounds.south_west.longitude();
    let span = lat_span.max(lon_span);
    if span <= f64::EPSILON {
        return MAX_ZOOM;
    }
    let zoom = (360.0 / span).log2().floor();
    zoom.clamp(0.0, f64::from(MAX_ZOOM)) as u8
}

impl MapPort for MarkerOverlay {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = center;
        self.zoom = zoom.min(MAX_ZOOM);
    }

    fn add_marker(&mut self, layer: MarkerLayer, at: Coordinate, popup: &str) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId::new(self.next_id);
        self.markers.insert(
            id,
            Marker {
                layer,
                at,
                popup: popup.to_string(),
            },
        );
        debug!(%id, ?layer, %at, "Marker added");
        id
    }

    fn remove_marker(&mut self, id: MarkerId) -> bool {
        self.markers.remove(&id).is_some()
    }

    fn clear_layer(&mut self, layer: MarkerLayer) {
        self.markers.retain(|_, m| m.layer != layer);
    }

    fn marker_count(&self, layer: MarkerLayer) -> usize {
        self.markers(layer).count()
    }

    fn layer_bounds(&self, layer: MarkerLayer) -> Option<Bounds> {
        Bounds::enclosing(self.markers(layer).map(|m| m.at))
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.center = bounds.center();
        self.zoom = zoom_for(&bounds);
        debug!(%bounds, zoom = self.zoom, "Viewport fitted");
    }
}
