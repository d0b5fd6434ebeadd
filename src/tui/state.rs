//! TUI state: the app model, loop events and semantic actions.
//!
//! The session owns all shell state. The App adds only what belongs to
//! the terminal front end: the prompt identity, the manual scroll offset
//! and the quit flag.

use crossterm::event::KeyEvent;

use crate::session::Session;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// A key reader thread is the only producer. Timer work (banner ticks,
/// cooldown expiry) is not an event; the loop wakes itself at the
/// session's next deadline.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The terminal was resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub session: Session,

    /// Login shown in the header and prompt.
    pub user: String,

    /// Rows scrolled up from the bottom of the transcript. Reset to 0
    /// after every submission so the newest entry is visible.
    pub scroll: u16,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, user: impl Into<String>) -> Self {
        App {
            session,
            user: user.into(),
            scroll: 0,
            should_quit: false,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Type a character into the edit buffer.
    Insert(char),
    /// Delete the last character.
    Backspace,
    /// Discard the whole edit buffer.
    ClearLine,
    /// Submit the edit buffer.
    Submit,
    /// Older history entry.
    HistoryUp,
    /// Newer history entry.
    HistoryDown,
    /// Scroll the transcript up one page.
    ScrollUp,
    /// Scroll the transcript down one page.
    ScrollDown,
    /// Clear the line, or quit if it is already empty.
    Escape,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::config::SessionConfig;
    use crate::content::{PortfolioContent, Profile};
    use crate::platform::EnvironmentInfo;

    #[test]
    fn new_app_starts_unscrolled() {
        let content = PortfolioContent::new(Profile::default(), EnvironmentInfo::default());
        let session = Session::new(&SessionConfig::default(), Box::new(content), Instant::now()).unwrap();
        let app = App::new(session, "guest");
        assert_eq!(app.scroll, 0);
        assert!(!app.should_quit);
        assert_eq!(app.user, "guest");
    }

    #[test]
    fn action_equality_for_matching() {
        assert_eq!(Action::Insert('a'), Action::Insert('a'));
        assert_ne!(Action::Insert('a'), Action::Insert('b'));
        assert_ne!(Action::HistoryUp, Action::HistoryDown);
    }
}
