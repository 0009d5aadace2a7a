pub mod alerts;
pub mod chart;
pub mod glossary;
pub mod stats;
pub mod status;
pub mod tour;

pub use alerts::AlertBanner;
pub use chart::ChartWidget;
pub use glossary::GlossaryPanel;
pub use stats::StatsWidget;
pub use status::StatusWidget;
pub use tour::TourPanel;

use dash_core::AppState;
use dash_theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
};

/// Every dashboard section implements this trait.
///
/// Widgets are purely reactive: they receive a read-only view of `AppState`
/// and draw into the area the layout hands them.  Line-oriented widgets
/// only provide [`DashWidget::lines`]; an empty result hides the widget.
pub trait DashWidget: std::fmt::Debug {
    /// Unique string identifier, e.g. `"chart"` or `"alerts"`.
    fn id(&self) -> &str;

    fn lines(&self, _state: &AppState, _theme: &Theme) -> Vec<Line<'static>> {
        Vec::new()
    }

    /// Vertical space wanted for the current state, `None` when hidden.
    fn constraint(&self, state: &AppState, theme: &Theme) -> Option<Constraint> {
        let height = self.lines(state, theme).len();
        (height > 0).then(|| Constraint::Length(height as u16))
    }

    fn render(&self, state: &AppState, theme: &Theme, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines(state, theme)).render(area, buf);
    }
}

/// Format a sample value with a fixed sign column, e.g. `"+1.25"`.
pub fn format_value(value: f64) -> String {
    format!("{value:+.2}")
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{draw, rows, state};

    #[test]
    fn values_carry_sign() {
        assert_eq!(format_value(1.254), "+1.25");
        assert_eq!(format_value(-0.5), "-0.50");
        assert_eq!(format_value(0.0), "+0.00");
    }

    #[test]
    fn line_widgets_size_themselves() {
        let s = state(1);
        let status = StatusWidget::new();
        assert_eq!(status.constraint(&s, &Theme::plain()), Some(Constraint::Length(1)));
        assert_eq!(GlossaryPanel::new().constraint(&s, &Theme::plain()), None);

        let buf = draw(&status, &s, &Theme::plain(), 80, 1);
        assert!(rows(&buf)[0].contains("streams 1/5"));
    }
}
