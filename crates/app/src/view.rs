use crate::{command::HELP, prompt::Prompt, Dashboard};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Top-level render callback handed to [`ratatui::Terminal::draw`].
///
/// The dashboard sections fill the screen above a one-row command prompt.
/// While help is open it is drawn as a popup over the sections.
pub fn draw(frame: &mut Frame, dashboard: &Dashboard, prompt: &Prompt) {
    let [body, input] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    dashboard.render(body, frame.buffer_mut());
    prompt.render(frame, input, dashboard.theme());

    if dashboard.help_visible() {
        draw_help(frame, body, dashboard);
    }
}

fn draw_help(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let theme = dashboard.theme();
    let lines: Vec<Line> = HELP.lines().map(|l| Line::styled(l, theme.text())).collect();

    let width = HELP.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 4;
    let popup = centered(area, width, lines.len() as u16 + 2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .title(Line::styled(" Help (type 'help' to close) ", theme.accent()));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A `width` x `height` rectangle centred in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use dash_config::DashConfig;
    use dash_core::Message;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn screen(dashboard: &Dashboard, prompt: &Prompt) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(f, dashboard, prompt)).unwrap();

        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    fn dashboard() -> Dashboard {
        let mut cfg = DashConfig::default();
        cfg.simulation.seed = Some(3);
        cfg.tour.show_on_start = false;
        let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        Dashboard::new(PathBuf::from("/nonexistent/streamdash.toml"), cfg, t0)
    }

    #[test]
    fn prompt_sits_on_the_last_row() {
        let mut prompt = Prompt::default();
        for c in "rate 2".chars() {
            prompt.handle(&Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
        }
        let rows = screen(&dashboard(), &prompt);

        assert!(rows[29].starts_with("> rate 2"));
        assert!(rows[0].contains("streams 1/5"));
    }

    #[test]
    fn help_opens_as_a_popup() {
        let mut d = dashboard();
        assert!(!screen(&d, &Prompt::default()).iter().any(|r| r.contains("Help")));

        d.update(Message::Help, Utc::now());
        let rows = screen(&d, &Prompt::default());
        assert!(rows.iter().any(|r| r.contains("Help")));
        assert!(rows.iter().any(|r| r.contains("rate <1-100>")));
    }

    #[test]
    fn centered_popup_is_clipped() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 50, 50), area);
    }
}
