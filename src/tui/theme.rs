//! TUI styles derived from the active theme.
//!
//! The session hands over a [`Palette`] (four parsed tokens). This module
//! turns it, plus an output [`Tone`], into ratatui styles.
//!
//! Color semantics:
//! - Foreground on background: normal text
//! - Accent: prompt marker, headings, links
//! - Secondary: header bar
//! - Red: errors, whatever the theme
//! - Dim: de-emphasized (descriptions, hints)

use ratatui::style::{Color, Modifier, Style};

use crate::themes::{Palette, Rgb};
use crate::types::Tone;

/// Error text: red-400, readable on every built-in background.
pub const STYLE_ERROR: Style = Style::new().fg(Color::Rgb(0xf8, 0x71, 0x71));

/// De-emphasis modifier layered on top of the theme foreground.
pub const STYLE_DIM: Style = Style::new().add_modifier(Modifier::DIM);

/// Important text.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

pub fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(r, g, b)
}

/// Foreground on background: the base of every screen.
pub fn base(palette: &Palette) -> Style {
    Style::new().fg(color(palette.foreground)).bg(color(palette.background))
}

/// Title bar.
pub fn header(palette: &Palette) -> Style {
    Style::new().fg(color(palette.foreground)).bg(color(palette.secondary))
}

/// The `>` marker in front of prompts.
pub fn prompt_marker(palette: &Palette) -> Style {
    Style::new().fg(color(palette.accent)).add_modifier(Modifier::BOLD)
}

/// Style for a run of output text.
pub fn tone(palette: &Palette, tone: Tone) -> Style {
    match tone {
        Tone::Normal => Style::new(),
        Tone::Bold => STYLE_IMPORTANT,
        Tone::Dim => STYLE_DIM,
        Tone::Accent => Style::new().fg(color(palette.accent)),
        Tone::Heading => Style::new().fg(color(palette.accent)).add_modifier(Modifier::BOLD),
        Tone::Error => STYLE_ERROR,
    }
}

// ============================================================================
// TESTS
// ============================================================================
