use crate::DashWidget;
use dash_core::{tour::TOUR_STEPS, AppState};
use dash_theme::Theme;
use ratatui::text::Line;

/// Current step of the guided tour while it is visible.
#[derive(Debug, Default)]
pub struct TourPanel;

impl TourPanel {
    pub fn new() -> Self {
        Self
    }
}

impl DashWidget for TourPanel {
    fn id(&self) -> &str {
        "tour"
    }

    fn lines(&self, state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
        let Some(step) = state.tour.current() else {
            return Vec::new();
        };

        let position = state.tour.step() + 1;
        let last = position == TOUR_STEPS.len();
        let hint = if last { "next: finish · skip: close" } else { "next · skip" };

        vec![
            Line::styled(
                format!("Tour {position}/{}: {}", TOUR_STEPS.len(), step.title),
                theme.accent(),
            ),
            Line::styled(step.body, theme.text()),
            Line::styled(format!("({hint})"), theme.muted()),
        ]
    }
}
