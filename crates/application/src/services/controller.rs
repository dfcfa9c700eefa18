//! Interaction controller
//!
//! Owns the form, the map picker session, the view and the map, and runs the
//! submit cycle:
//!
//! ```text
//! Idle -> Validating -> Querying -> (Success | Failure) -> Idle
//!              |
//!              +-> Idle (field errors, no query)
//! ```
//!
//! The busy flag is raised by a drop guard, so the trigger is re-enabled and
//! the loading indicator hidden even when an in-flight submit is dropped.

use std::sync::Arc;

use domain::{
    Coordinate, DepartureTime, Field, QueryResult, RawQueryInput, ResultLimit, ValidationErrors,
    validate,
};
use tracing::{debug, info, instrument, warn};

use super::map_picker::{MapPicker, PickerStep};
use super::presenter::ResultPresenter;
use crate::error::ApplicationError;
use crate::ports::{DeparturesPort, MapPort, MarkerLayer, PointRole, StatusTone, ViewPort};

/// Shown while a query is in flight
pub const SEARCHING_MESSAGE: &str = "Searching for departures...";
/// Shown after a third map click restarted the picker
pub const PICK_DESTINATION_MESSAGE: &str = "Now click to set destination";

/// Where the controller is in the submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Waiting for input
    #[default]
    Idle,
    /// Checking the form
    Validating,
    /// Waiting for the departures query
    Querying,
}

/// Observable UI state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// A query is outstanding and submissions are refused
    pub busy: bool,
    /// Current status line
    pub status_message: String,
    /// Tone of the status line
    pub status_tone: StatusTone,
    /// Most recent query outcome
    pub last_result: Option<QueryResult>,
}

/// Result of a submit attempt
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The form was rejected; no query was sent
    Invalid(ValidationErrors),
    /// The query ran and its result was presented
    Completed(QueryResult),
    /// Another query is still outstanding
    Busy,
}

/// Initial view and form defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    /// Initial map center
    pub map_center: Coordinate,
    /// Initial map zoom
    pub zoom: u8,
    /// Limit pre-filled in the form
    pub default_limit: ResultLimit,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            map_center: Coordinate::wroclaw(),
            zoom: 13,
            default_limit: ResultLimit::DEFAULT,
        }
    }
}

/// Drives validation, the departures query and presentation
pub struct InteractionController<V, M> {
    departures: Arc<dyn DeparturesPort>,
    presenter: ResultPresenter,
    settings: ControllerSettings,
    view: V,
    map: M,
    form: RawQueryInput,
    picker: MapPicker,
    ui: UiState,
    state: ControllerState,
}

impl<V: ViewPort, M: MapPort> InteractionController<V, M> {
    /// Create a controller and put the view and map in their initial state
    pub fn new(
        departures: Arc<dyn DeparturesPort>,
        view: V,
        map: M,
        settings: ControllerSettings,
    ) -> Self {
        let mut controller = Self {
            departures,
            presenter: ResultPresenter::new(),
            settings,
            view,
            map,
            form: RawQueryInput::default(),
            picker: MapPicker::new(),
            ui: UiState::default(),
            state: ControllerState::Idle,
        };
        controller.reset();
        controller
    }

    /// Use a different presenter (e.g. one with a fixed time zone)
    #[must_use]
    pub fn with_presenter(mut self, presenter: ResultPresenter) -> Self {
        self.presenter = presenter;
        self
    }

    /// Back to the initial state: default form, no picked points, no
    /// results or departure markers, map at the configured view
    pub fn reset(&mut self) {
        self.map.set_view(self.settings.map_center, self.settings.zoom);
        self.picker.reset(&mut self.map);
        self.map.clear_layer(MarkerLayer::Departures);
        self.view.clear_results();

        self.form = RawQueryInput {
            departure_time: DepartureTime::now_local().as_str().to_string(),
            limit: self.settings.default_limit.to_string(),
            ..RawQueryInput::default()
        };
        self.view.set_point_display(PointRole::Start, "");
        self.view.set_point_display(PointRole::Destination, "");
        self.view.clear_field_errors();
        self.view.set_trigger_enabled(true);
        self.view.set_loading(false);

        self.ui = UiState::default();
        self.state = ControllerState::Idle;
    }

    /// Overwrite one form field (typed input)
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validate the form and, if it is valid, run the query
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.ui.busy {
            warn!("Submission refused, a query is still in flight");
            return SubmitOutcome::Busy;
        }

        self.state = ControllerState::Validating;
        self.view.clear_field_errors();
        let request = match validate(&self.form) {
            Ok(request) => request,
            Err(errors) => {
                debug!(errors = %errors, "Form rejected");
                self.view.show_field_errors(&errors);
                self.state = ControllerState::Idle;
                return SubmitOutcome::Invalid(errors);
            },
        };

        let response = {
            let guard = BusyGuard::engage(self);
            let departures = Arc::clone(&guard.controller.departures);
            departures.fetch(&request).await
        };

        let result = &response.result;
        match result {
            QueryResult::Success(departures) => {
                info!(count = departures.len(), "Departures query finished");
            },
            QueryResult::Failure(reason) => warn!(%reason, "Departures query failed"),
        }

        let rendered = self.presenter.present(&response, &mut self.view, &mut self.map);
        let (message, tone) = rendered.status();
        self.ui.status_message = message;
        self.ui.status_tone = tone;
        self.ui.last_result = Some(response.result.clone());

        SubmitOutcome::Completed(response.result)
    }

    /// Handle a click on the map at (`latitude`, `longitude`)
    ///
    /// # Errors
    ///
    /// Returns a domain error if the click lies outside the valid
    /// coordinate ranges.
    pub fn map_click(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> Result<PickerStep, ApplicationError> {
        let at = Coordinate::new(latitude, longitude)?;
        let step = self.picker.click(at, &mut self.map);
        let point = step.point();

        let (lat_field, lon_field) = match step.role() {
            PointRole::Start => (Field::StartLatitude, Field::StartLongitude),
            PointRole::Destination => (Field::EndLatitude, Field::EndLongitude),
        };
        self.form.set(lat_field, format!("{:.6}", point.latitude()));
        self.form.set(lon_field, format!("{:.6}", point.longitude()));
        self.view.set_point_display(step.role(), &point.to_string());

        if let PickerStep::Restarted(_) = step {
            self.form.set(Field::EndLatitude, "");
            self.form.set(Field::EndLongitude, "");
            self.view.set_point_display(PointRole::Destination, "");
            self.set_status(PICK_DESTINATION_MESSAGE, StatusTone::Info);
        }

        Ok(step)
    }

    /// Current form values
    pub const fn form(&self) -> &RawQueryInput {
        &self.form
    }

    /// Picker session
    pub const fn picker(&self) -> &MapPicker {
        &self.picker
    }

    /// Observable UI state
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Position in the submit cycle
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Settings the controller was created with
    pub const fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// The view
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// The map
    pub const fn map(&self) -> &M {
        &self.map
    }

    fn set_status(&mut self, message: &str, tone: StatusTone) {
        self.view.set_status(message, tone);
        self.ui.status_message = message.to_string();
        self.ui.status_tone = tone;
    }
}

/// Holds the controller busy for as long as it lives
struct BusyGuard<'a, V: ViewPort, M: MapPort> {
    controller: &'a mut InteractionController<V, M>,
}

impl<'a, V: ViewPort, M: MapPort> BusyGuard<'a, V, M> {
    fn engage(controller: &'a mut InteractionController<V, M>) -> Self {
        controller.ui.busy = true;
        controller.state = ControllerState::Querying;
        controller.view.set_trigger_enabled(false);
        controller.view.set_loading(true);
        controller.set_status(SEARCHING_MESSAGE, StatusTone::Info);
        Self { controller }
    }
}

impl<V: ViewPort, M: MapPort> Drop for BusyGuard<'_, V, M> {
    fn drop(&mut self) {
        let controller = &mut *self.controller;
        controller.ui.busy = false;
        controller.state = ControllerState::Idle;
        controller.view.set_trigger_enabled(true);
        controller.view.set_loading(false);
    }
}
