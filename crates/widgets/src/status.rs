use crate::DashWidget;
use dash_core::{stream::MAX_STREAMS, AppState};
use dash_theme::Theme;
use ratatui::text::{Line, Span};

/// One-line summary: clock state, rate, stream count and counters.
#[derive(Debug, Default)]
pub struct StatusWidget;

impl StatusWidget {
    pub fn new() -> Self {
        Self
    }
}

impl DashWidget for StatusWidget {
    fn id(&self) -> &str {
        "status"
    }

    fn lines(&self, state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
        let clock = if state.clock.is_running() {
            Span::styled("● running", theme.accent())
        } else {
            Span::styled("○ paused", theme.muted())
        };

        let mut summary = format!(
            "  {} Hz  │  streams {}/{MAX_STREAMS}  │  ticks {}  │  samples {}",
            state.clock.rate(),
            state.streams.len(),
            state.ticks,
            state.total_samples,
        );

        let uploads = &state.uploads;
        if uploads.completed + uploads.failed > 0 {
            summary.push_str(&format!(
                "  │  stored {} / failed {}",
                uploads.completed, uploads.failed
            ));
            if let Some(tx) = &uploads.last_transaction {
                summary.push_str(&format!(" (last {tx})"));
            }
        }

        vec![Line::from(vec![clock, Span::styled(summary, theme.text())])]
    }
}
