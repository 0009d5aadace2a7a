pub mod colors;

pub use colors::Color;

use dash_config::ThemeConfig;
use ratatui::style::{Modifier, Style};

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings.  Calling
/// [`Theme::from_config`] is infallible; invalid color strings fall back to
/// safe defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub foreground: Color,
    pub accent:     Color,
    pub error:      Color,
    pub info:       Color,
    pub muted:      Color,
    /// When `false`, every style leaves the terminal's own colors alone.
    pub color:      bool,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::TEXT),
            accent:     Color::from_hex(&cfg.accent).unwrap_or(Color::MAUVE),
            error:      Color::from_hex(&cfg.error).unwrap_or(Color::RED),
            info:       Color::from_hex(&cfg.info).unwrap_or(Color::BLUE),
            muted:      Color::from_hex(&cfg.muted).unwrap_or(Color::SUBTLE),
            color:      cfg.color,
        }
    }

    /// Monochrome theme.
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    /// Foreground style for `color`.
    pub fn fg(&self, color: Color) -> Style {
        if self.color {
            Style::default().fg(color.into())
        } else {
            Style::default()
        }
    }

    pub fn text(&self) -> Style {
        self.fg(self.foreground)
    }

    /// Headings and highlights.
    pub fn accent(&self) -> Style {
        self.fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        self.fg(self.muted)
    }

    /// Style for a stream's `#rrggbb` tag, falling back to the foreground color.
    pub fn stream(&self, hex: &str) -> Style {
        self.fg(Color::from_hex(hex).unwrap_or(self.foreground))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color as TermColor;

    #[test]
    fn invalid_colors_fall_back() {
        let cfg = ThemeConfig {
            accent: "not-a-color".into(),
            ..ThemeConfig::default()
        };
        assert_eq!(Theme::from_config(&cfg).accent, Color::MAUVE);
    }

    #[test]
    fn plain_theme_leaves_colors_alone() {
        let theme = Theme::plain();
        assert_eq!(theme.fg(Color::RED).fg, None);
        assert_eq!(theme.stream("#000000").fg, None);
        assert!(theme.accent().add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn colored_theme_maps_to_rgb() {
        let theme = Theme::default();
        assert_eq!(theme.fg(Color::RED).fg, Some(TermColor::Rgb(0xf3, 0x8b, 0xa8)));
        assert_eq!(theme.stream("#102030").fg, Some(TermColor::Rgb(0x10, 0x20, 0x30)));
        assert_eq!(theme.stream("bogus").fg, Some(TermColor::from(Color::TEXT)));
    }
}
