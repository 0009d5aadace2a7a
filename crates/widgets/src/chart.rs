use crate::{format_value, DashWidget};
use dash_core::{
    stream::{SeriesView, X_DOMAIN, Y_DOMAIN},
    AppState,
};
use dash_theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

/// Rows below which the braille plot becomes unreadable.
const MIN_HEIGHT: u16 = 10;

/// Chart coordinates of one series, oldest sample first: x is the sample
/// offset, y its value.
pub fn points(series: &SeriesView) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .rev()
        .map(|p| (f64::from(p.offset), p.value))
        .collect()
}

/// Line chart with one dataset per stream.
///
/// The x-axis spans offsets `X_DOMAIN` and the y-axis `Y_DOMAIN`, both
/// fixed so lines are comparable across streams and over time.
#[derive(Debug, Default)]
pub struct ChartWidget {
    show_timestamps: bool,
}

impl ChartWidget {
    pub fn new(show_timestamps: bool) -> Self {
        Self { show_timestamps }
    }

    fn block(&self, series: &[SeriesView], theme: &Theme) -> Block<'static> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.muted())
            .title(Line::styled(" Streams ", theme.accent()));

        let newest = series.first().and_then(|s| s.points.first());
        match newest {
            Some(p) if self.show_timestamps => block.title_bottom(Line::styled(
                format!(" newest {} ", p.captured_at.format("%H:%M:%S%.3f")),
                theme.muted(),
            )),
            _ => block,
        }
    }
}

impl DashWidget for ChartWidget {
    fn id(&self) -> &str {
        "chart"
    }

    fn constraint(&self, _state: &AppState, _theme: &Theme) -> Option<Constraint> {
        Some(Constraint::Min(MIN_HEIGHT))
    }

    fn render(&self, state: &AppState, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let series = state.series();
        let data: Vec<Vec<(f64, f64)>> = series.iter().map(points).collect();

        let datasets = series
            .iter()
            .zip(&data)
            .map(|(s, d)| {
                let latest = s.points.first().map(|p| format_value(p.value)).unwrap_or_default();
                Dataset::default()
                    .name(format!("#{} {latest}", s.id))
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(theme.stream(&s.color))
                    .data(d)
            })
            .collect::<Vec<_>>();

        let (x_lo, x_hi) = X_DOMAIN;
        let (y_lo, y_hi) = Y_DOMAIN;

        Chart::new(datasets)
            .block(self.block(&series, theme))
            .x_axis(
                Axis::default()
                    .title(Span::styled("offset", theme.muted()))
                    .style(theme.muted())
                    .bounds([f64::from(x_lo), f64::from(x_hi)])
                    .labels(vec![
                        Line::from(x_lo.to_string()),
                        Line::from(((x_lo + x_hi) / 2).to_string()),
                        Line::from(x_hi.to_string()),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .style(theme.muted())
                    .bounds([y_lo, y_hi])
                    .labels(vec![
                        Line::from(format!("{y_lo:+.1}")),
                        Line::from("0"),
                        Line::from(format!("{y_hi:+.1}")),
                    ]),
            )
            .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(1, 1)))
            .render(area, buf);
    }
}
