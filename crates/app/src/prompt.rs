use crate::command::parse_command;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dash_core::Message;
use dash_theme::Theme;
use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::warn;

const PROMPT: &str = "> ";

/// What the event loop should do after a terminal event.
#[derive(Debug, PartialEq)]
pub enum PromptAction {
    /// Nothing visible changed.
    Ignored,
    /// The input line changed or the terminal was resized.
    Redraw,
    /// A command was entered.
    Send(Message),
}

/// Single-line command input drawn at the bottom of the screen.
#[derive(Debug, Default)]
pub struct Prompt {
    input: String,
}

impl Prompt {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle(&mut self, event: &Event) -> PromptAction {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.key(key),
            Event::Resize(..) => PromptAction::Redraw,
            _ => PromptAction::Ignored,
        }
    }

    fn key(&mut self, key: &KeyEvent) -> PromptAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => {
                PromptAction::Send(Message::Shutdown)
            }
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                PromptAction::Redraw
            }
            KeyCode::Backspace => match self.input.pop() {
                Some(_) => PromptAction::Redraw,
                None => PromptAction::Ignored,
            },
            KeyCode::Esc => self.clear(),
            KeyCode::Enter => self.submit(),
            _ => PromptAction::Ignored,
        }
    }

    fn clear(&mut self) -> PromptAction {
        if self.input.is_empty() {
            return PromptAction::Ignored;
        }
        self.input.clear();
        PromptAction::Redraw
    }

    fn submit(&mut self) -> PromptAction {
        let line = std::mem::take(&mut self.input);
        match parse_command(&line) {
            Ok(Some(msg)) => PromptAction::Send(msg),
            Ok(None) => PromptAction::Redraw,
            Err(e) => {
                warn!("{e}");
                PromptAction::Send(Message::InvalidCommand(e.to_string()))
            }
        }
    }

    /// Draw the input line into `area` and place the cursor after it.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let line = Line::from(vec![
            Span::styled(PROMPT, theme.accent()),
            Span::styled(self.input.as_str(), theme.text()),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        let typed = (PROMPT.chars().count() + self.input.chars().count()) as u16;
        let x = area.x.saturating_add(typed).min(area.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_line(prompt: &mut Prompt, text: &str) {
        for c in text.chars() {
            assert_eq!(prompt.handle(&key(KeyCode::Char(c))), PromptAction::Redraw);
        }
    }

    #[test]
    fn enter_sends_parsed_command_and_clears() {
        let mut p = Prompt::default();
        type_line(&mut p, "rate 25");
        assert_eq!(p.input(), "rate 25");

        assert_eq!(p.handle(&key(KeyCode::Enter)), PromptAction::Send(Message::SetRate(25)));
        assert_eq!(p.input(), "");
    }

    #[test]
    fn editing_keys() {
        let mut p = Prompt::default();
        assert_eq!(p.handle(&key(KeyCode::Backspace)), PromptAction::Ignored);

        type_line(&mut p, "addd");
        p.handle(&key(KeyCode::Backspace));
        assert_eq!(p.input(), "add");

        assert_eq!(p.handle(&key(KeyCode::Esc)), PromptAction::Redraw);
        assert_eq!(p.input(), "");
        assert_eq!(p.handle(&key(KeyCode::Enter)), PromptAction::Redraw);
    }

    #[test]
    fn bad_command_becomes_invalid_command_message() {
        let mut p = Prompt::default();
        type_line(&mut p, "warp 9");
        match p.handle(&key(KeyCode::Enter)) {
            PromptAction::Send(Message::InvalidCommand(reason)) => assert!(reason.contains("warp")),
            other => panic!("expected an invalid command, got {other:?}"),
        }
    }

    #[test]
    fn control_keys_do_not_type() {
        let mut p = Prompt::default();
        type_line(&mut p, "sto");
        assert_eq!(p.handle(&ctrl('u')), PromptAction::Redraw);
        assert_eq!(p.input(), "");
        assert_eq!(p.handle(&ctrl('c')), PromptAction::Send(Message::Shutdown));
        assert_eq!(p.handle(&ctrl('d')), PromptAction::Send(Message::Shutdown));
    }

    #[test]
    fn key_releases_and_focus_are_ignored() {
        let mut p = Prompt::default();
        let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(p.handle(&Event::Key(release)), PromptAction::Ignored);
        assert_eq!(p.handle(&Event::FocusGained), PromptAction::Ignored);
        assert_eq!(p.handle(&Event::Resize(80, 24)), PromptAction::Redraw);
        assert_eq!(p.input(), "");
    }
}
