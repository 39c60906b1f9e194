//! Color palettes for the prompt.
//!
//! The palette only decides three things: how the query line looks, how an
//! ordinary candidate row looks, and how the highlighted row stands out.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::error::ConfigError;

pub mod colors {
    use ratatui::style::Color;

    /// Highlighted row foreground (xterm "yellow2", #d7d700)
    pub const HIGHLIGHT_YELLOW: Color = Color::Rgb(215, 215, 0);

    /// Primary text on dark terminals
    pub const TEXT_PRIMARY: Color = Color::Rgb(192, 202, 245); // #c0caf5

    /// Muted text - the query label
    pub const TEXT_MUTED: Color = Color::Rgb(105, 114, 158); // #696e9e

    /// Primary accent - the typed query
    pub const ACCENT_PRIMARY: Color = Color::Rgb(122, 162, 247); // #7aa2f7
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemePalette {
    pub accent: Color,
    pub fg: Color,
    pub hint: Color,
    pub highlight: Color,
}

impl ThemePalette {
    /// Dark theme - the default
    pub fn dark() -> Self {
        Self {
            accent: colors::ACCENT_PRIMARY,
            fg: colors::TEXT_PRIMARY,
            hint: colors::TEXT_MUTED,
            highlight: colors::HIGHLIGHT_YELLOW,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(47, 107, 231),    // Rich blue
            fg: Color::Rgb(36, 41, 46),          // Near-black
            hint: Color::Rgb(125, 134, 144),     // Medium gray
            highlight: Color::Rgb(177, 133, 41), // Amber
        }
    }

    /// High contrast - plain ANSI colors only
    pub fn high_contrast() -> Self {
        Self {
            accent: Color::White,
            fg: Color::White,
            hint: Color::Gray,
            highlight: Color::LightYellow,
        }
    }

    /// The "Searching for: " label.
    pub fn label_style(self) -> Style {
        Style::default().fg(self.hint)
    }

    /// The typed query text.
    pub fn query_style(self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// An unselected candidate row.
    pub fn item_style(self) -> Style {
        Style::default().fg(self.fg)
    }

    /// The selected candidate row.
    pub fn highlight_style(self) -> Style {
        Style::default().fg(self.highlight)
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Named palettes selectable from config, environment or the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ThemePreset {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl ThemePreset {
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::HighContrast => "high-contrast",
        }
    }

    pub fn to_palette(self) -> ThemePalette {
        match self {
            Self::Dark => ThemePalette::dark(),
            Self::Light => ThemePalette::light(),
            Self::HighContrast => ThemePalette::high_contrast(),
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Dark, Self::Light, Self::HighContrast]
    }
}

impl FromStr for ThemePreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownTheme(s.to_string()))
    }
}
