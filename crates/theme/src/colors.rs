use ratatui::style::Color as TermColor;

/// 8-bit-per-channel RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TEXT:   Self = Self { r: 0xcd, g: 0xd6, b: 0xf4 }; // #cdd6f4
    pub const MAUVE:  Self = Self { r: 0xcb, g: 0xa6, b: 0xf7 }; // #cba6f7
    pub const RED:    Self = Self { r: 0xf3, g: 0x8b, b: 0xa8 }; // #f38ba8
    pub const BLUE:   Self = Self { r: 0x89, g: 0xb4, b: 0xfa }; // #89b4fa
    pub const SUBTLE: Self = Self { r: 0x6c, g: 0x70, b: 0x86 }; // #6c7086

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RGB`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
            }),
            3 => {
                let nibble = |i: usize| byte(&hex[i..i + 1]).map(|n| n * 17);
                Some(Self {
                    r: nibble(0)?,
                    g: nibble(1)?,
                    b: nibble(2)?,
                })
            }
            _ => None,
        }
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for TermColor {
    fn from(c: Color) -> Self {
        TermColor::Rgb(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::from_hex("#cdd6f4"), Some(Color::TEXT));
        assert_eq!(Color::from_hex("fff"), Some(Color { r: 255, g: 255, b: 255 }));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn hex_round_trips_through_formatting() {
        assert_eq!(Color::MAUVE.to_hex(), "#cba6f7");
        assert_eq!(TermColor::from(Color::BLUE), TermColor::Rgb(137, 180, 250));
    }
}
