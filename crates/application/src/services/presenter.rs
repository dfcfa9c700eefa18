//! Result presentation
//!
//! Turns a [`QueryResponse`] into cards, departure markers, a status line
//! and the raw JSON view. [`ResultPresenter::render`] is the pure step;
//! [`ResultPresenter::present`] pushes the rendered view into the ports.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, NaiveTime, TimeZone};
use domain::{Coordinate, Departure, QueryResponse, QueryResult};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::ports::{DepartureCard, MapPort, MarkerLayer, StatusTone, ViewPort};

/// Shown when a query succeeded with zero departures
pub const NO_RESULTS_MESSAGE: &str = "No departures found";
/// Shown in the result area when a query failed
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load departures";
/// Fallback for missing route, headsign, or time
pub const PLACEHOLDER: &str = "N/A";
/// Fallback for a missing stop name
pub const UNKNOWN_STOP: &str = "Unknown Stop";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A departure marker to place on the map
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// Stop position
    pub at: Coordinate,
    /// Popup text
    pub popup: String,
}

/// Outcome of rendering a [`QueryResult`]
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedView {
    /// The query succeeded but found nothing
    NoResults,
    /// One card per departure, markers only for those with coordinates
    Departures {
        cards: Vec<DepartureCard>,
        markers: Vec<MarkerSpec>,
    },
    /// The query failed
    Error { reason: String },
}

impl RenderedView {
    /// Status line and tone for this view
    #[must_use]
    pub fn status(&self) -> (String, StatusTone) {
        match self {
            Self::NoResults => (NO_RESULTS_MESSAGE.to_string(), StatusTone::Warning),
            Self::Departures { cards, .. } => (
                format!("Found {} departure(s)", cards.len()),
                StatusTone::Success,
            ),
            Self::Error { reason } => (format!("Error: {reason}"), StatusTone::Error),
        }
    }

    /// Rendered cards; empty unless departures were found
    #[must_use]
    pub fn cards(&self) -> &[DepartureCard] {
        match self {
            Self::Departures { cards, .. } => cards,
            _ => &[],
        }
    }

    /// Markers to place; empty unless departures were found
    #[must_use]
    pub fn markers(&self) -> &[MarkerSpec] {
        match self {
            Self::Departures { markers, .. } => markers,
            _ => &[],
        }
    }
}

/// Renders query results in a fixed time zone
///
/// Defaults to the local zone of the machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultPresenter {
    offset: Option<FixedOffset>,
}

impl ResultPresenter {
    /// Presenter showing times in the local zone
    #[must_use]
    pub const fn new() -> Self {
        Self { offset: None }
    }

    /// Presenter showing times at a fixed UTC offset
    #[must_use]
    pub const fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }

    /// Format a departure time as "HH:MM" in this presenter's zone
    #[must_use]
    pub fn format_time(&self, value: Option<&str>) -> String {
        match self.offset {
            Some(offset) => format_time_in(value, &offset),
            None => format_time_in(value, &Local),
        }
    }

    /// Build the card for a single departure
    #[must_use]
    pub fn card(&self, departure: &Departure) -> DepartureCard {
        DepartureCard {
            stop_name: text_or(departure.stop.name.as_deref(), UNKNOWN_STOP),
            route: text_or(departure.route_id.as_deref(), PLACEHOLDER),
            headsign: text_or(departure.trip_headsign.as_deref(), PLACEHOLDER),
            departure_time: self.format_time(departure.stop.departure_time.as_deref()),
        }
    }

    /// Pure rendering step
    #[must_use]
    pub fn render(&self, result: &QueryResult) -> RenderedView {
        match result {
            QueryResult::Failure(reason) => RenderedView::Error {
                reason: reason.clone(),
            },
            QueryResult::Success(departures) if departures.is_empty() => RenderedView::NoResults,
            QueryResult::Success(departures) => {
                let mut cards = Vec::with_capacity(departures.len());
                let mut markers = Vec::with_capacity(departures.len());

                for departure in departures {
                    let card = self.card(departure);
                    match departure.coordinates() {
                        Some(at) => markers.push(MarkerSpec {
                            at,
                            popup: popup_text(&card),
                        }),
                        None => warn!(
                            stop = %card.stop_name,
                            "Skipping marker for departure without valid coordinates"
                        ),
                    }
                    cards.push(card);
                }

                RenderedView::Departures { cards, markers }
            },
        }
    }

    /// Render `response` and push it into the view and the map
    ///
    /// Previous departure markers are always cleared. After placing new
    /// markers the viewport is fitted to them, unless none were placed.
    pub fn present(
        &self,
        response: &QueryResponse,
        view: &mut dyn ViewPort,
        map: &mut dyn MapPort,
    ) -> RenderedView {
        let rendered = self.render(&response.result);

        map.clear_layer(MarkerLayer::Departures);
        match &rendered {
            RenderedView::NoResults => view.render_no_results(NO_RESULTS_MESSAGE),
            RenderedView::Departures { cards, markers } => {
                view.render_cards(cards);
                for marker in markers {
                    map.add_marker(MarkerLayer::Departures, marker.at, &marker.popup);
                }
                if let Some(bounds) = map.layer_bounds(MarkerLayer::Departures) {
                    map.fit_bounds(bounds);
                }
            },
            RenderedView::Error { .. } => view.render_error(LOAD_FAILED_MESSAGE),
        }

        let (message, tone) = rendered.status();
        view.set_status(&message, tone);
        view.show_raw_output(&raw_output(response));

        debug!(
            cards = rendered.cards().len(),
            markers = rendered.markers().len(),
            "Presented query result"
        );
        rendered
    }
}

/// Format a departure time as "HH:MM" in the local zone
///
/// `None` or blank gives "N/A"; anything unparsable comes back unchanged.
#[must_use]
pub fn format_time(value: Option<&str>) -> String {
    format_time_in(value, &Local)
}

/// Format a departure time as "HH:MM" in `tz`
///
/// Instants with an offset are converted to `tz`. Date-times and times
/// without an offset are already wall-clock values and are shown as-is.
#[must_use]
pub fn format_time_in<Tz: TimeZone>(value: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(raw) = value else {
        return PLACEHOLDER.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return instant.with_timezone(tz).format("%H:%M").to_string();
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return naive.format("%H:%M").to_string();
    }
    if let Ok(time) = NaiveTime::parse_from_str(trimmed, "%H:%M:%S") {
        return time.format("%H:%M").to_string();
    }

    raw.to_string()
}

/// Text for the raw view
///
/// The response body is shown as sent, pretty-printed when it is JSON.
/// Without a body the parsed departures are serialized instead.
#[must_use]
pub fn raw_output(response: &QueryResponse) -> String {
    match (&response.result, response.raw_body.as_deref()) {
        (QueryResult::Failure(reason), _) => format!("Error: {reason}"),
        (QueryResult::Success(_), Some(body)) => serde_json::from_str::<Value>(body)
            .and_then(|value| serde_json::to_string_pretty(&value))
            .unwrap_or_else(|_| body.to_string()),
        (QueryResult::Success(departures), None) => {
            serde_json::to_string_pretty(&json!({ "departures": departures }))
                .unwrap_or_else(|e| format!("Error: {e}"))
        },
    }
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn popup_text(card: &DepartureCard) -> String {
    format!(
        "{}\nLine: {}\nDirection: {}\nDeparture: {}",
        card.stop_name, card.route, card.headsign, card.departure_time
    )
}
