//! Role-to-color binding.
//!
//! The palette is built once at session start from the configured color
//! map. Runtime toggles change which sections render, never the palette;
//! it is re-bound only on restart.

use std::str::FromStr;

use ratatui::style::{Color, Style};
use tracing::warn;

use crate::config::ColorMap;
use crate::view::TextRole;

/// Immutable role-to-color table for one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    title: Color,
    label: Color,
    value: Color,
    ascii: Color,
    bar_filled: Color,
    bar_empty: Color,
    warning: Color,
    critical: Color,
    good: Color,
    info: Color,
}

impl Palette {
    /// Binds configured color names to terminal colors.
    ///
    /// A name that fails to parse falls back to the role's built-in
    /// default instead of erroring the session.
    pub fn bind(colors: &ColorMap) -> Self {
        Self {
            title: parse_color(&colors.title, Color::Cyan),
            label: parse_color(&colors.label, Color::Green),
            value: parse_color(&colors.value, Color::White),
            ascii: parse_color(&colors.ascii, Color::Yellow),
            bar_filled: parse_color(&colors.bar_filled, Color::Green),
            bar_empty: parse_color(&colors.bar_empty, Color::White),
            warning: parse_color(&colors.warning, Color::Yellow),
            critical: parse_color(&colors.critical, Color::Red),
            good: parse_color(&colors.good, Color::Green),
            info: parse_color(&colors.info, Color::Blue),
        }
    }

    /// Style for a text role. `Help` is always dimmed and not
    /// user-configurable.
    pub fn style(&self, role: TextRole) -> Style {
        let color = match role {
            TextRole::Title => self.title,
            TextRole::Label => self.label,
            TextRole::Value => self.value,
            TextRole::Ascii => self.ascii,
            TextRole::BarFilled => self.bar_filled,
            TextRole::BarEmpty => self.bar_empty,
            TextRole::Warning => self.warning,
            TextRole::Critical => self.critical,
            TextRole::Good => self.good,
            TextRole::Info => self.info,
            TextRole::Help => Color::DarkGray,
        };
        Style::default().fg(color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::bind(&ColorMap::default())
    }
}

fn parse_color(name: &str, fallback: Color) -> Color {
    match Color::from_str(name) {
        Ok(color) => color,
        Err(_) => {
            warn!(name, "unrecognized color name, using built-in default");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_matches_config_defaults() {
        let palette = Palette::default();
        assert_eq!(palette.style(TextRole::Title).fg, Some(Color::Cyan));
        assert_eq!(palette.style(TextRole::Critical).fg, Some(Color::Red));
        assert_eq!(palette.style(TextRole::Help).fg, Some(Color::DarkGray));
    }

    #[test]
    fn configured_colors_override_defaults() {
        let mut colors = ColorMap::default();
        colors.bar_filled = "magenta".to_string();
        let palette = Palette::bind(&colors);
        assert_eq!(palette.style(TextRole::BarFilled).fg, Some(Color::Magenta));
    }

    #[test]
    fn unknown_color_falls_back_per_role() {
        let mut colors = ColorMap::default();
        colors.title = "no-such-color".to_string();
        let palette = Palette::bind(&colors);
        assert_eq!(palette.style(TextRole::Title).fg, Some(Color::Cyan));
    }
}
