use crate::{format_value, DashWidget};
use dash_core::{stats::StreamStats, AppState};
use dash_theme::Theme;
use ratatui::text::Line;

/// Statistics for the selected stream and the comparison set.
#[derive(Debug, Default)]
pub struct StatsWidget;

impl StatsWidget {
    pub fn new() -> Self {
        Self
    }

    fn line(stats: &StreamStats, theme: &Theme) -> Line<'static> {
        Line::styled(
            format!(
                "  #{}  last {}  min {}  max {}  mean {}  σ {:.2}",
                stats.id,
                format_value(stats.latest),
                format_value(stats.min),
                format_value(stats.max),
                format_value(stats.mean),
                stats.std_dev,
            ),
            theme.text(),
        )
    }
}

impl DashWidget for StatsWidget {
    fn id(&self) -> &str {
        "stats"
    }

    fn lines(&self, state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if let Some(stats) = state.selected_stats() {
            lines.push(Line::styled("Selected", theme.accent()));
            lines.push(Self::line(&stats, theme));
        }

        if let Some(cmp) = state.comparison() {
            lines.push(Line::styled("Comparison", theme.accent()));
            lines.extend(cmp.streams.iter().map(|s| Self::line(s, theme)));
            lines.push(Line::styled(
                format!("  spread of means {:.2}", cmp.mean_spread()),
                theme.muted(),
            ));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{state, t0, text};

    #[test]
    fn empty_without_selection() {
        assert!(StatsWidget::new().lines(&state(2), &Theme::plain()).is_empty());
    }

    #[test]
    fn selection_and_comparison_sections() {
        let mut s = state(3);
        s.tick(t0());
        s.select_stream(1).unwrap();
        s.select_streams_for_comparison(&[0, 2]).unwrap();

        let lines = text(&StatsWidget::new().lines(&s, &Theme::plain()));
        assert_eq!(lines[0], "Selected");
        assert!(lines[1].trim_start().starts_with("#1 "));
        assert_eq!(lines[2], "Comparison");
        assert!(lines[3].trim_start().starts_with("#0 "));
        assert!(lines[4].trim_start().starts_with("#2 "));
        assert!(lines[5].contains("spread of means"));
    }
}
