//! ViewPort that prints to the terminal

use application::{DepartureCard, PointRole, StatusTone, ViewPort};
use domain::ValidationErrors;
use tracing::debug;

/// Prints status lines, field errors and departure cards
#[derive(Debug, Default)]
pub struct TerminalView {
    show_raw: bool,
}

impl TerminalView {
    /// Create a view; `show_raw` also prints the raw JSON output
    pub const fn new(show_raw: bool) -> Self {
        Self { show_raw }
    }
}

const fn tone_icon(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Info => "🔎",
        StatusTone::Success => "✅",
        StatusTone::Warning => "⚠️ ",
        StatusTone::Error => "❌",
    }
}

/// Two-line rendering of a card, numbered from 1
fn format_card(number: usize, card: &DepartureCard) -> String {
    format!(
        "{number:>2}. {}  Line {}  → {}\n    🚏 {}",
        card.departure_time, card.route, card.headsign, card.stop_name
    )
}

impl ViewPort for TerminalView {
    fn set_status(&mut self, message: &str, tone: StatusTone) {
        println!("{} {message}", tone_icon(tone));
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        debug!(enabled, "Search trigger toggled");
    }

    fn set_loading(&mut self, visible: bool) {
        debug!(visible, "Loading indicator toggled");
    }

    fn show_field_errors(&mut self, errors: &ValidationErrors) {
        println!("❌ Please correct the following fields:");
        for error in errors {
            println!("   {}: {}", error.field, error.message);
        }
    }

    fn clear_field_errors(&mut self) {}

    fn set_point_display(&mut self, role: PointRole, text: &str) {
        if !text.is_empty() {
            println!("📍 {}: {text}", role.label());
        }
    }

    fn render_cards(&mut self, cards: &[DepartureCard]) {
        println!();
        for (index, card) in cards.iter().enumerate() {
            println!("{}", format_card(index + 1, card));
        }
        println!();
    }

    // the status line already says so
    fn render_no_results(&mut self, message: &str) {
        debug!(message, "No results");
    }

    fn render_error(&mut self, message: &str) {
        debug!(message, "Result area shows an error");
    }

    fn show_raw_output(&mut self, text: &str) {
        if self.show_raw {
            println!("{text}");
        }
    }

    fn clear_results(&mut self) {
        debug!("Result area cleared");
    }
}
