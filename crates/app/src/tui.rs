use crate::{prompt::Prompt, view, Dashboard};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Once;

static PANIC_HOOK: Once = Once::new();

/// Raw-mode alternate screen owned for the lifetime of the dashboard.
/// Dropping it hands the terminal back in its original state.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = restore();
            return Err(e);
        }

        // Restore the terminal before the default hook prints the panic.
        PANIC_HOOK.call_once(|| {
            let original = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore();
                original(info);
            }));
        });

        match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = restore();
                Err(e)
            }
        }
    }

    pub fn draw(&mut self, dashboard: &Dashboard, prompt: &Prompt) -> io::Result<()> {
        self.terminal.draw(|f| view::draw(f, dashboard, prompt))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = restore();
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}
