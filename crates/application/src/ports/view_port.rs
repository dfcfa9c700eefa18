//! View port
//!
//! Everything the controller and presenter show outside the map: the status
//! line, the trigger control, field errors, the picked-point fields, and the
//! result list.

use domain::ValidationErrors;
use serde::{Deserialize, Serialize};

use super::PointRole;

/// Visual tone of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    /// Neutral progress or hint
    #[default]
    Info,
    /// Results were found
    Success,
    /// Nothing went wrong, but nothing was found either
    Warning,
    /// The query failed
    Error,
}

/// One rendered departure in the result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureCard {
    /// Stop name
    pub stop_name: String,
    /// Route identifier
    pub route: String,
    /// Trip headsign
    pub headsign: String,
    /// Formatted departure time
    pub departure_time: String,
}

/// Port for the non-map part of the user interface
pub trait ViewPort {
    /// Replace the status line
    fn set_status(&mut self, message: &str, tone: StatusTone);

    /// Enable or disable the submit control
    fn set_trigger_enabled(&mut self, enabled: bool);

    /// Show or hide the loading indicator
    fn set_loading(&mut self, visible: bool);

    /// Show one message per invalid field
    fn show_field_errors(&mut self, errors: &ValidationErrors);

    /// Remove all field error messages
    fn clear_field_errors(&mut self);

    /// Update the display field of a picked point (empty text clears it)
    fn set_point_display(&mut self, role: PointRole, text: &str);

    /// Replace the result list with these cards
    fn render_cards(&mut self, cards: &[DepartureCard]);

    /// Replace the result list with the explicit "no results" state
    fn render_no_results(&mut self, message: &str);

    /// Replace the result list with an error notice
    fn render_error(&mut self, message: &str);

    /// Replace the raw response output
    fn show_raw_output(&mut self, text: &str);

    /// Empty the result list and the raw output
    fn clear_results(&mut self);
}
