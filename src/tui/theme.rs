//! Theme color handling.
//!
//! The configured theme color arrives as a `#rrggbb` hex string (web
//! heritage). Malformed values fall back to the default green rather than
//! failing startup.

use log::warn;
use ratatui::style::Color;

use crate::core::config;

/// Presentational theme derived from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Accent color: app name, submit control, borders while streaming.
    pub primary: Color,
}

impl Theme {
    pub fn from_hex(hex: &str) -> Self {
        let primary = parse_hex_color(hex).unwrap_or_else(|| {
            warn!("Malformed theme color {hex:?}, using default");
            parse_hex_color(config::DEFAULT_THEME_COLOR)
                .expect("default theme color is valid")
        });
        Self { primary }
    }
}

/// Parses `#rrggbb` into an RGB color. Returns None for anything else.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_green() {
        assert_eq!(
            parse_hex_color(config::DEFAULT_THEME_COLOR),
            Some(Color::Rgb(0x22, 0xc5, 0x5e))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_hex_color("22c55e"), None); // missing '#'
        assert_eq!(parse_hex_color("#22c5"), None); // too short
        assert_eq!(parse_hex_color("#22c55e00"), None); // too long
        assert_eq!(parse_hex_color("#gggggg"), None); // not hex
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn test_theme_falls_back_on_malformed() {
        let theme = Theme::from_hex("not-a-color");
        assert_eq!(theme, Theme::from_hex(config::DEFAULT_THEME_COLOR));
    }
}
