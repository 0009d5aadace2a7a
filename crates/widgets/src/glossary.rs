use crate::DashWidget;
use dash_core::{glossary::GLOSSARY, AppState};
use dash_theme::Theme;
use ratatui::text::{Line, Span};

/// Term list, shown while `state.glossary_visible` is set.
#[derive(Debug, Default)]
pub struct GlossaryPanel;

impl GlossaryPanel {
    pub fn new() -> Self {
        Self
    }
}

impl DashWidget for GlossaryPanel {
    fn id(&self) -> &str {
        "glossary"
    }

    fn lines(&self, state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
        if !state.glossary_visible {
            return Vec::new();
        }

        let width = GLOSSARY.iter().map(|e| e.term.len()).max().unwrap_or(0);
        let entries = GLOSSARY.iter().map(|e| {
            Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{:<width$}", e.term), theme.accent()),
                Span::raw("  "),
                Span::styled(e.definition, theme.text()),
            ])
        });

        std::iter::once(Line::styled("Glossary", theme.accent()))
            .chain(entries)
            .collect()
    }
}
