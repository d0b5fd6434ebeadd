//! The session context: one object owning all mutable session state.
//!
//! Created at session start, dropped when the session ends. The TUI and
//! the one-shot CLI both drive it through these methods; nothing else
//! holds the transcript, history or active theme.
//!
//! Input methods are inert while booting: the shell is not reachable
//! until the boot controller reports `Ready`.

use std::time::Instant;

use crate::boot::{BootController, BANNER};
use crate::config::{ConfigError, SessionConfig};
use crate::dispatch::{ContentRegistry, Dispatcher, Effect};
use crate::history::InputSession;
use crate::themes::ThemeStore;
use crate::transcript::Transcript;
use crate::types::{BootState, Direction};

/// What a submission did to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// One entry was appended.
    Appended,
    /// The transcript was emptied.
    Cleared,
    /// Nothing happened: blank line, booting, or cooldown active.
    Ignored,
}

pub struct Session {
    themes: ThemeStore,
    input: InputSession,
    dispatcher: Dispatcher,
    transcript: Transcript,
    boot: BootController,
    content: Box<dyn ContentRegistry>,
}

impl Session {
    /// Build a session from config and start the boot banner at `now`.
    pub fn new(
        config: &SessionConfig,
        content: Box<dyn ContentRegistry>,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        let themes = config.theme_store()?;
        let mut boot = if config.skip_boot {
            BootController::ready()
        } else {
            BootController::new(BANNER, config.char_interval(), config.settle_delay())
        };
        boot.start(now);

        Ok(Session {
            themes,
            input: InputSession::new(),
            dispatcher: Dispatcher::new(config.submit_cooldown()),
            transcript: Transcript::new(),
            boot,
            content,
        })
    }

    // -- Time --

    /// Advance timers. Returns true if the boot sequence finished on this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.boot.poll(now)
    }

    /// The next instant at which [`poll`](Self::poll) or a re-render has
    /// something to do: a banner tick, or the end of the cooldown.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let cooldown = self.dispatcher.busy_until().filter(|t| *t > now);
        match (self.boot.next_deadline(), cooldown) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // -- Editing --

    pub fn insert(&mut self, c: char) {
        if self.boot.is_ready() {
            self.input.insert(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.boot.is_ready() {
            self.input.backspace();
        }
    }

    pub fn clear_line(&mut self) {
        if self.boot.is_ready() {
            self.input.clear_line();
        }
    }

    pub fn navigate(&mut self, direction: Direction) {
        if self.boot.is_ready() {
            self.input.navigate(direction);
        }
    }

    // -- Submission --

    /// Commit the edit buffer and dispatch it.
    ///
    /// While the previous submission's cooldown runs the buffer is left
    /// intact, as if the input field were disabled.
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        if !self.boot.is_ready() || self.dispatcher.is_busy(now) {
            return SubmitOutcome::Ignored;
        }
        match self.input.submit() {
            Some(line) => self.dispatch(&line, now),
            None => SubmitOutcome::Ignored,
        }
    }

    /// Dispatch a line without touching the edit buffer or history.
    pub fn execute(&mut self, line: &str, now: Instant) -> SubmitOutcome {
        if !self.boot.is_ready() {
            return SubmitOutcome::Ignored;
        }
        self.dispatch(line, now)
    }

    fn dispatch(&mut self, line: &str, now: Instant) -> SubmitOutcome {
        match self
            .dispatcher
            .dispatch(line, now, &mut self.themes, self.content.as_ref())
        {
            Effect::Append(entry) => {
                self.transcript.push(entry);
                SubmitOutcome::Appended
            }
            Effect::ClearTranscript => {
                self.transcript.clear();
                SubmitOutcome::Cleared
            }
            Effect::NoOp => SubmitOutcome::Ignored,
        }
    }

    // -- Teardown --

    /// Release the banner timers. Called when the session is left.
    pub fn shutdown(&mut self) {
        self.boot.cancel();
    }

    // -- Read access for the rendering surface --

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn themes(&self) -> &ThemeStore {
        &self.themes
    }

    pub fn input(&self) -> &InputSession {
        &self.input
    }

    pub fn boot_state(&self) -> BootState {
        self.boot.state()
    }

    pub fn is_ready(&self) -> bool {
        self.boot.is_ready()
    }

    /// Revealed part of the boot banner.
    pub fn banner(&self) -> &str {
        self.boot.banner()
    }

    /// Whether input is currently disabled by the cooldown.
    pub fn is_busy(&self, now: Instant) -> bool {
        self.dispatcher.is_busy(now)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("boot", &self.boot.state())
            .field("theme", &self.themes.active_key())
            .field("transcript_len", &self.transcript.len())
            .field("history_len", &self.input.history().len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
