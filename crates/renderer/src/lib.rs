//! Layout engine: stacks the configured sections inside the frame area.

use dash_config::{LayoutConfig, Section};
use dash_core::AppState;
use dash_theme::Theme;
use dash_widgets::{
    AlertBanner, ChartWidget, DashWidget, GlossaryPanel, StatsWidget, StatusWidget, TourPanel,
};
use ratatui::{
    buffer::Buffer,
    layout::{Layout, Rect},
};

/// Ordered set of widgets built from a [`LayoutConfig`].
#[derive(Debug)]
pub struct DashLayout {
    widgets: Vec<Box<dyn DashWidget + Send + Sync>>,
}

impl DashLayout {
    /// Build a [`DashLayout`] from the loaded configuration.
    pub fn from_config(config: &LayoutConfig) -> Self {
        let widgets = config
            .sections
            .iter()
            .map(|section| -> Box<dyn DashWidget + Send + Sync> {
                match section {
                    Section::Status => Box::new(StatusWidget::new()),
                    Section::Alerts => Box::new(AlertBanner::new()),
                    Section::Chart => Box::new(ChartWidget::new(config.show_timestamps)),
                    Section::Stats => Box::new(StatsWidget::new()),
                    Section::Tour => Box::new(TourPanel::new()),
                    Section::Glossary => Box::new(GlossaryPanel::new()),
                }
            })
            .collect();

        Self { widgets }
    }

    /// Widget ids in render order.
    pub fn ids(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.id()).collect()
    }

    /// Draw every visible widget top to bottom, one blank row apart.
    /// Hidden widgets take no space.
    pub fn render(&self, state: &AppState, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let visible: Vec<_> = self
            .widgets
            .iter()
            .filter_map(|w| w.constraint(state, theme).map(|c| (w, c)))
            .collect();

        let areas = Layout::vertical(visible.iter().map(|(_, c)| *c))
            .spacing(1)
            .split(area);

        for ((widget, _), slot) in visible.iter().zip(areas.iter()) {
            widget.render(state, theme, *slot, buf);
        }
    }
}

impl Default for DashLayout {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}
