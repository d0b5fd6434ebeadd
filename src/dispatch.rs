//! Command Dispatcher: resolve a submitted line to an effect.
//!
//! Matching works on the trimmed, lowercased line; the transcript always
//! echoes the raw line. Priority:
//!
//! 1. blank → [`Command::Empty`]
//! 2. a name the content registry answers → [`Command::Content`]
//! 3. `themes set <key>` → [`Command::ThemeSet`]
//! 4. `clear` → [`Command::Clear`]
//! 5. anything else → [`Command::Unknown`]
//!
//! The dispatcher holds no command content. Content lives behind the
//! [`ContentRegistry`] seam, supplied by the host.

use std::time::{Duration, Instant};

use crate::themes::{ThemeError, ThemeStore};
use crate::types::{Output, OutputLine, Tone, TranscriptEntry};

/// Prefix of the parametrized theme command (after normalization).
pub const THEME_SET_PREFIX: &str = "themes set ";

/// Built-in command that resets the transcript.
pub const CLEAR: &str = "clear";

// ============================================================================
// CONTENT REGISTRY
// ============================================================================

/// Host-supplied zero-argument commands.
///
/// Handlers receive the theme store read-only so listings can mark the
/// active theme; they cannot change it.
pub trait ContentRegistry {
    /// Whether `name` (already normalized) is a registered command.
    fn contains(&self, name: &str) -> bool;

    /// Render `name`, or `None` if it is not registered.
    fn resolve(&self, name: &str, themes: &ThemeStore) -> Option<Output>;
}

// ============================================================================
// COMMANDS & EFFECTS
// ============================================================================

/// Every shape a submitted line can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing but whitespace.
    Empty,
    /// A registered zero-argument command, by normalized name.
    Content(String),
    /// `themes set <key>`; the key is whatever follows the prefix.
    ThemeSet(String),
    /// Reset the transcript.
    Clear,
    /// Unmatched; carries the raw line for the error message.
    Unknown(String),
}

impl Command {
    /// Classify a raw line.
    pub fn parse(raw: &str, content: &dyn ContentRegistry) -> Command {
        let normalized = normalize(raw);

        if normalized.is_empty() {
            Command::Empty
        } else if content.contains(&normalized) {
            Command::Content(normalized)
        } else if let Some(key) = normalized.strip_prefix(THEME_SET_PREFIX) {
            Command::ThemeSet(key.to_string())
        } else if normalized == CLEAR {
            Command::Clear
        } else {
            Command::Unknown(raw.to_string())
        }
    }
}

/// What the session must do with a dispatched line.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Add this entry to the transcript.
    Append(TranscriptEntry),
    /// Empty the transcript; no entry is added.
    ClearTranscript,
    /// Nothing to do (blank line, or ignored during cooldown).
    NoOp,
}

/// Trim and lowercase for matching.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ============================================================================
// DISPATCHER
// ============================================================================

/// Resolves lines to effects, one submission at a time.
///
/// After each non-blank dispatch a cooldown starts; dispatches arriving
/// before it ends are ignored.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    cooldown: Duration,
    busy_until: Option<Instant>,
}

impl Dispatcher {
    pub fn new(cooldown: Duration) -> Self {
        Dispatcher {
            cooldown,
            busy_until: None,
        }
    }

    /// Whether a previous submission's cooldown is still running at `now`.
    pub fn is_busy(&self, now: Instant) -> bool {
        self.busy_until.is_some_and(|until| now < until)
    }

    /// When the current cooldown ends, if one is running.
    pub fn busy_until(&self) -> Option<Instant> {
        self.busy_until
    }

    /// Resolve `raw` and apply any theme change.
    ///
    /// The theme store is the only state touched here; transcript changes
    /// are returned as the effect for the caller to apply.
    pub fn dispatch(
        &mut self,
        raw: &str,
        now: Instant,
        themes: &mut ThemeStore,
        content: &dyn ContentRegistry,
    ) -> Effect {
        if self.is_busy(now) {
            tracing::debug!(input = %raw, "submission ignored during cooldown");
            return Effect::NoOp;
        }

        let command = Command::parse(raw, content);
        if command == Command::Empty {
            return Effect::NoOp;
        }
        self.busy_until = Some(now + self.cooldown);

        match command {
            Command::Empty => Effect::NoOp,
            Command::Clear => Effect::ClearTranscript,
            Command::Content(name) => match content.resolve(&name, themes) {
                Some(output) => Effect::Append(TranscriptEntry::new(raw, output)),
                None => Effect::Append(TranscriptEntry::new(raw, unknown_command(raw))),
            },
            Command::ThemeSet(key) => {
                let output = match themes.set_active(&key) {
                    Ok(theme) => theme_changed(&theme.name),
                    Err(ThemeError::KeyNotFound(key)) => theme_not_found(&key),
                    Err(other) => error_line(&other.to_string()),
                };
                Effect::Append(TranscriptEntry::new(raw, output))
            }
            Command::Unknown(raw_line) => {
                tracing::info!(input = %raw_line, "unknown command");
                Effect::Append(TranscriptEntry::new(raw, unknown_command(&raw_line)))
            }
        }
    }
}

// ============================================================================
// BUILT-IN MESSAGES
// ============================================================================

fn theme_changed(name: &str) -> Output {
    Output::new(vec![
        OutputLine::of("Theme changed to: ", Tone::Normal).push(name, Tone::Bold),
    ])
}

fn theme_not_found(key: &str) -> Output {
    Output::new(vec![OutputLine::of(
        format!("Theme '{}' not found. Type 'themes' to see available options.", key),
        Tone::Error,
    )])
}

fn unknown_command(raw: &str) -> Output {
    Output::new(vec![
        OutputLine::of("Command not found: ", Tone::Error).push(raw, Tone::Bold),
        OutputLine::of("Type ", Tone::Normal)
            .push("'help'", Tone::Bold)
            .push(" for available commands.", Tone::Normal),
    ])
}

fn error_line(message: &str) -> Output {
    Output::new(vec![OutputLine::of(message, Tone::Error)])
}

// ============================================================================
// TESTS
// ============================================================================
