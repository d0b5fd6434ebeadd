//! Input/History Session: the edit buffer, submitted lines, and the
//! navigation cursor.
//!
//! The cursor is `None` while editing the live buffer and `Some(i)` while
//! browsing `history[i]`; `i` always satisfies `i < history.len()`.

use crate::types::Direction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSession {
    buffer: String,
    history: Vec<String>,
    cursor: Option<usize>,
}

impl InputSession {
    pub fn new() -> Self {
        InputSession::default()
    }

    // -- Edit buffer --

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Discard the buffer contents (Ctrl+U). Does not touch history.
    pub fn clear_line(&mut self) {
        self.buffer.clear();
    }

    // -- Submission --

    /// Commit the buffer.
    ///
    /// Returns the raw line and resets buffer and cursor. A blank buffer
    /// is not a submission: nothing changes and `None` is returned.
    pub fn submit(&mut self) -> Option<String> {
        if self.buffer.trim().is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.buffer);
        self.history.push(line.clone());
        self.cursor = None;
        Some(line)
    }

    // -- History navigation --

    /// Move through history, loading the selected entry into the buffer.
    ///
    /// Up clamps at the oldest entry. Down past the newest entry returns
    /// to an empty live buffer. With no history, or Down while not
    /// navigating, nothing changes.
    pub fn navigate(&mut self, direction: Direction) {
        let n = self.history.len();
        if n == 0 {
            return;
        }

        let next = match (direction, self.cursor) {
            (Direction::Up, None) => Some(n - 1),
            (Direction::Up, Some(i)) => Some(i.saturating_sub(1)),
            (Direction::Down, None) => return,
            (Direction::Down, Some(i)) if i + 1 >= n => None,
            (Direction::Down, Some(i)) => Some(i + 1),
        };

        self.cursor = next;
        self.buffer = match next {
            Some(i) => self.history[i].clone(),
            None => String::new(),
        };
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}

// ============================================================================
// TESTS
// ============================================================================
