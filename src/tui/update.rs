//! State transitions: (App, Action) → App.
//!
//! Fully testable without a terminal. The session guards its own
//! invariants (booting, cooldown); this layer only maps actions onto it
//! and keeps the scroll position sensible.

use std::time::Instant;

use crate::session::SubmitOutcome;
use crate::types::Direction;

use super::state::{Action, App};

/// Rows moved by one PageUp / PageDown.
pub const SCROLL_PAGE: u16 = 10;

/// Apply one action at time `now`.
pub fn update(app: &mut App, action: &Action, now: Instant) {
    // Booting: only Quit is meaningful.
    if !app.session.is_ready() {
        if *action == Action::Quit {
            app.should_quit = true;
        }
        return;
    }

    // Cooldown: the input field is disabled; scrolling and quit still work.
    let editing = matches!(
        action,
        Action::Insert(_) | Action::Backspace | Action::ClearLine | Action::HistoryUp | Action::HistoryDown
    );
    if editing && app.session.is_busy(now) {
        return;
    }

    match action {
        Action::Insert(c) => app.session.insert(*c),
        Action::Backspace => app.session.backspace(),
        Action::ClearLine => app.session.clear_line(),
        Action::HistoryUp => app.session.navigate(Direction::Up),
        Action::HistoryDown => app.session.navigate(Direction::Down),
        Action::Submit => {
            if app.session.submit(now) != SubmitOutcome::Ignored {
                app.scroll = 0;
            }
        }
        Action::ScrollUp => app.scroll = app.scroll.saturating_add(SCROLL_PAGE),
        Action::ScrollDown => app.scroll = app.scroll.saturating_sub(SCROLL_PAGE),
        Action::Escape => {
            if app.session.input().buffer().is_empty() {
                app.should_quit = true;
            } else {
                app.session.clear_line();
            }
        }
        Action::Quit => app.should_quit = true,
    }
}

// ============================================================================
// TESTS
// ============================================================================
