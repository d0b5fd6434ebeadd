//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the session and
//! the pure layers (update, view) to the real terminal via crossterm and
//! ratatui.
//!
//! Architecture: a key reader thread feeds an mpsc channel. The event
//! loop blocks on that channel until the session's next deadline (banner
//! tick, settle delay, cooldown end), then polls the session and redraws.
//! All session mutation happens on the loop thread, one event at a time.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::state::{Action, App, AppEvent};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action, and for key
/// release/repeat reports on platforms that send them.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::ClearLine),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Up => Some(Action::HistoryUp),
        KeyCode::Down => Some(Action::HistoryDown),
        KeyCode::PageUp => Some(Action::ScrollUp),
        KeyCode::PageDown => Some(Action::ScrollDown),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Esc => Some(Action::Escape),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => Some(Action::Insert(c)),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue, // ignore mouse, focus, paste
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event read failed");
                    break;
                }
            };
            if tx.send(forwarded).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the interactive session until the user quits.
pub fn run(mut app: App) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);

    loop {
        let now = Instant::now();
        app.session.poll(now);

        terminal.draw(|frame| render(&app, frame, now))?;

        if app.should_quit {
            break;
        }

        // Sleep until the next key or the next session deadline
        let event = match app.session.next_deadline(now) {
            Some(deadline) => {
                match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Ok(e) => Some(e),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match rx.recv() {
                Ok(e) => Some(e),
                Err(_) => break, // reader thread gone
            },
        };

        if let Some(AppEvent::Key(key)) = event {
            if let Some(action) = map_key(key) {
                update(&mut app, &action, Instant::now());
            }
        }
    }

    app.session.shutdown();
    restore_terminal()?;
    tracing::info!(entries = app.session.transcript().len(), "session ended");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
    }

    #[test]
    fn ctrl_u_clears_line() {
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::ClearLine));
    }

    #[test]
    fn other_ctrl_chords_are_ignored() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn arrow_keys_map_to_history() {
        assert_eq!(map_key(key(KeyCode::Up)), Some(Action::HistoryUp));
        assert_eq!(map_key(key(KeyCode::Down)), Some(Action::HistoryDown));
    }

    #[test]
    fn page_keys_scroll() {
        assert_eq!(map_key(key(KeyCode::PageUp)), Some(Action::ScrollUp));
        assert_eq!(map_key(key(KeyCode::PageDown)), Some(Action::ScrollDown));
    }

    #[test]
    fn printable_chars_insert_including_shifted() {
        assert_eq!(map_key(key(KeyCode::Char('a'))), Some(Action::Insert('a')));
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(map_key(shifted), Some(Action::Insert('A')));
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(Action::Insert(' ')));
    }

    #[test]
    fn enter_submits_and_esc_escapes() {
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Action::Submit));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Action::Escape));
        assert_eq!(map_key(key(KeyCode::Backspace)), Some(Action::Backspace));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(key(KeyCode::F(5))), None);
    }
}
