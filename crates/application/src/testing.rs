//! Recording fakes for the view and map ports

use domain::{Coordinate, FieldError, ValidationErrors};

use crate::ports::{
    Bounds, DepartureCard, MapPort, MarkerId, MarkerLayer, PointRole, StatusTone, ViewPort,
};

/// View that remembers everything it was asked to show
#[derive(Debug, Default)]
pub struct RecordingView {
    pub status: Option<(String, StatusTone)>,
    pub trigger_enabled: bool,
    pub trigger_history: Vec<bool>,
    pub loading: bool,
    pub field_errors: Vec<FieldError>,
    pub start_display: String,
    pub destination_display: String,
    pub cards: Vec<DepartureCard>,
    pub no_results: Option<String>,
    pub error: Option<String>,
    pub raw_output: Option<String>,
}

impl RecordingView {
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|(m, _)| m.as_str())
    }

    pub fn status_tone(&self) -> Option<StatusTone> {
        self.status.as_ref().map(|(_, t)| *t)
    }
}

impl ViewPort for RecordingView {
    fn set_status(&mut self, message: &str, tone: StatusTone) {
        self.status = Some((message.to_string(), tone));
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
        self.trigger_history.push(enabled);
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn show_field_errors(&mut self, errors: &ValidationErrors) {
        self.field_errors = errors.iter().cloned().collect();
    }

    fn clear_field_errors(&mut self) {
        self.field_errors.clear();
    }

    fn set_point_display(&mut self, role: PointRole, text: &str) {
        match role {
            PointRole::Start => self.start_display = text.to_string(),
            PointRole::Destination => self.destination_display = text.to_string(),
        }
    }

    fn render_cards(&mut self, cards: &[DepartureCard]) {
        self.cards = cards.to_vec();
        self.no_results = None;
        self.error = None;
    }

    fn render_no_results(&mut self, message: &str) {
        self.cards.clear();
        self.no_results = Some(message.to_string());
        self.error = None;
    }

    fn render_error(&mut self, message: &str) {
        self.cards.clear();
        self.no_results = None;
        self.error = Some(message.to_string());
    }

    fn show_raw_output(&mut self, text: &str) {
        self.raw_output = Some(text.to_string());
    }

    fn clear_results(&mut self) {
        self.cards.clear();
        self.no_results = None;
        self.error = None;
        self.raw_output = None;
    }
}

/// A marker as seen by [`RecordingMap`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub layer: MarkerLayer,
    pub at: Coordinate,
    pub popup: String,
}

/// Map that keeps markers in a list and records viewport changes
#[derive(Debug, Default)]
pub struct RecordingMap {
    next_id: u64,
    pub markers: Vec<PlacedMarker>,
    pub removed: Vec<MarkerId>,
    pub fitted: Vec<Bounds>,
    pub view: Option<(Coordinate, u8)>,
}

impl RecordingMap {
    pub fn layer(&self, layer: MarkerLayer) -> Vec<&PlacedMarker> {
        self.markers.iter().filter(|m| m.layer == layer).collect()
    }
}

impl MapPort for RecordingMap {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn add_marker(&mut self, layer: MarkerLayer, at: Coordinate, popup: &str) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId::new(self.next_id);
        self.markers.push(PlacedMarker {
            id,
            layer,
            at,
            popup: popup.to_string(),
        });
        id
    }

    fn remove_marker(&mut self, id: MarkerId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        let removed = self.markers.len() != before;
        if removed {
            self.removed.push(id);
        }
        removed
    }

    fn clear_layer(&mut self, layer: MarkerLayer) {
        self.markers.retain(|m| m.layer != layer);
    }

    fn marker_count(&self, layer: MarkerLayer) -> usize {
        self.layer(layer).len()
    }

    fn layer_bounds(&self, layer: MarkerLayer) -> Option<Bounds> {
        Bounds::enclosing(self.layer(layer).into_iter().map(|m| m.at))
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.fitted.push(bounds);
    }
}
