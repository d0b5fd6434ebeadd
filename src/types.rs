//! Domain types for terminal-folio.
//!
//! Plain data shared by the session core, the content handlers and the
//! rendering layer. Nothing here performs I/O.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

// ============================================================================
// THEMES
// ============================================================================

/// Catalog key of a theme, e.g. `"blue-matrix"`.
pub type ThemeKey = String;

/// A named set of four color tokens.
///
/// Tokens are `#rrggbb` strings. A Theme is immutable once it is part of
/// a catalog; the store hands out shared references only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Display name ("Blue Matrix").
    pub name: String,
    /// Page background.
    pub background: String,
    /// Main text color.
    pub foreground: String,
    /// Prompt marker, headings, links.
    pub accent: String,
    /// Panel / frame color.
    pub secondary: String,
}

impl Theme {
    pub fn new(name: &str, background: &str, foreground: &str, accent: &str, secondary: &str) -> Self {
        Theme {
            name: name.to_string(),
            background: background.to_string(),
            foreground: foreground.to_string(),
            accent: accent.to_string(),
            secondary: secondary.to_string(),
        }
    }
}

// ============================================================================
// RENDERABLE OUTPUT
// ============================================================================

/// Semantic weight of a run of text.
///
/// The rendering surface decides what each tone looks like under the
/// active theme; handlers never pick colors directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Normal,
    Bold,
    Dim,
    Accent,
    Heading,
    Error,
}

/// A run of text with a single tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub tone: Tone,
}

/// One visual line of command output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputLine {
    pub segments: Vec<Segment>,
}

impl OutputLine {
    /// An empty spacer line.
    pub fn blank() -> Self {
        OutputLine::default()
    }

    /// A line made of a single segment.
    pub fn of(text: impl Into<String>, tone: Tone) -> Self {
        OutputLine::default().push(text, tone)
    }

    /// Append a segment (builder style).
    pub fn push(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.segments.push(Segment { text: text.into(), tone });
        self
    }

    /// Concatenated text of all segments, tones dropped.
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Rendered result of a command: an ordered list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Output {
    pub lines: Vec<OutputLine>,
}

impl Output {
    pub fn new(lines: Vec<OutputLine>) -> Self {
        Output { lines }
    }

    /// True when any segment carries the error tone.
    pub fn is_error(&self) -> bool {
        self.lines
            .iter()
            .flat_map(|l| &l.segments)
            .any(|s| s.tone == Tone::Error)
    }

    /// Plain text, one line per `OutputLine`.
    pub fn plain(&self) -> String {
        self.lines.iter().map(OutputLine::plain).collect::<Vec<_>>().join("\n")
    }
}

// ============================================================================
// TRANSCRIPT
// ============================================================================

/// One processed submission, as shown in the scrollback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    /// The line exactly as typed (not trimmed, not lowercased).
    pub input: String,
    /// What the command produced.
    pub output: Output,
    /// When the submission was processed.
    pub timestamp: DateTime<Local>,
}

impl TranscriptEntry {
    pub fn new(input: &str, output: Output) -> Self {
        TranscriptEntry {
            input: input.to_string(),
            output,
            timestamp: Local::now(),
        }
    }
}

// ============================================================================
// SESSION ENUMS
// ============================================================================

/// Boot phase of the session. `Ready` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootState {
    #[default]
    Booting,
    Ready,
}

/// History navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards older entries.
    Up,
    /// Towards newer entries, then back to the live buffer.
    Down,
}

/// Output format for the non-interactive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable plain text.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
