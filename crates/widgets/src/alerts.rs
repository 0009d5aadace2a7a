use crate::DashWidget;
use dash_core::{AlertKind, AppState};
use dash_theme::Theme;
use ratatui::text::{Line, Span};

/// Banner listing every pending alert, oldest first.
#[derive(Debug, Default)]
pub struct AlertBanner;

impl AlertBanner {
    pub fn new() -> Self {
        Self
    }
}

impl DashWidget for AlertBanner {
    fn id(&self) -> &str {
        "alerts"
    }

    fn lines(&self, state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
        state
            .alerts
            .iter()
            .map(|alert| {
                let (icon, color) = match alert.kind {
                    AlertKind::Error => ("✖ ", theme.error),
                    AlertKind::Info => ("ℹ ", theme.info),
                };
                Line::from(vec![
                    Span::styled(icon, theme.fg(color)),
                    Span::styled(alert.message.clone(), theme.fg(color)),
                ])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{state, t0, text};
    use ratatui::style::Color as TermColor;

    #[test]
    fn hidden_without_alerts() {
        let banner = AlertBanner::new();
        assert!(banner.lines(&state(1), &Theme::plain()).is_empty());
        assert_eq!(banner.constraint(&state(1), &Theme::plain()), None);
    }

    #[test]
    fn marks_alert_kind() {
        let mut s = state(1);
        s.remove_stream(t0()).unwrap_err();
        s.post_alert("rate set to 20", AlertKind::Info, t0());

        let lines = AlertBanner::new().lines(&s, &Theme::default());
        let rows = text(&lines);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with('✖'));
        assert_eq!(rows[1], "ℹ rate set to 20");

        let theme = Theme::default();
        assert_eq!(lines[0].spans[1].style.fg, Some(TermColor::from(theme.error)));
        assert_eq!(lines[1].spans[1].style.fg, Some(TermColor::from(theme.info)));
    }
}
