use ratatui::style::Color;
use tracing::warn;
use wheelpick_core::config::ThemeConfig;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    /// Rows away from the selection band
    pub dimmed: Color,
    pub selection: Color,
    /// Focused wheel border and selected text
    pub accent: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            background: Color::Rgb(0x28, 0x28, 0x28),
            foreground: Color::Rgb(0xd4, 0xbe, 0x98),
            dimmed: Color::Rgb(0x92, 0x83, 0x74),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            border: Color::Rgb(0x7c, 0x6f, 0x64),
        }
    }
}

impl Theme {
    /// Default theme with any configured overrides applied
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();
        apply(&mut theme.background, config.background.as_deref(), "background");
        apply(&mut theme.foreground, config.foreground.as_deref(), "foreground");
        apply(&mut theme.dimmed, config.dimmed.as_deref(), "dimmed");
        apply(&mut theme.selection, config.selection.as_deref(), "selection");
        apply(&mut theme.accent, config.accent.as_deref(), "accent");
        theme
    }
}

fn apply(slot: &mut Color, value: Option<&str>, name: &str) {
    let Some(value) = value else {
        return;
    };
    match parse_hex_color(value) {
        Some(color) => *slot = color,
        None => warn!("Invalid color '{}' for theme.{}, keeping default", value, name),
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
    }

    #[test]
    fn test_overrides_applied() {
        let config = ThemeConfig {
            accent: Some("#010203".to_string()),
            dimmed: Some("not-a-color".to_string()),
            ..Default::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.accent, Color::Rgb(1, 2, 3));
        assert_eq!(theme.dimmed, Theme::default().dimmed);
    }
}
