//! Streaming Text Renderer: typewriter reveal of a fixed string.
//!
//! Clock-driven rather than callback-driven. The owner calls
//! [`StreamingText::poll`] with the current instant; every reveal tick that
//! has come due is committed in order, one character at a time, and the
//! single completion is reported once the settle delay after the last tick
//! has elapsed. The event loop learns when to wake up from
//! [`StreamingText::next_deadline`].
//!
//! Each run carries a [`RunId`]. Mounting, restarting or changing the text
//! or interval replaces the run; cancelling drops it. Pending ticks live
//! inside the run, so a replaced or cancelled run has nothing left that
//! could fire.

use std::time::{Duration, Instant};

/// Identity of one reveal run. Doubles as its cancellation token: once a
/// run is replaced its id is never reported again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for the next reveal tick at `due`.
    Revealing,
    /// Full text shown; completion fires at `due`.
    Settling,
    /// Completion already reported.
    Completed,
}

#[derive(Debug, Clone)]
struct Run {
    id: RunId,
    /// Number of characters revealed so far.
    revealed: usize,
    due: Instant,
    phase: Phase,
}

/// A lazily revealed string with a one-shot completion signal.
#[derive(Debug, Clone)]
pub struct StreamingText {
    text: String,
    /// Byte offset just past each character, so prefixes stay on char
    /// boundaries.
    ends: Vec<usize>,
    interval: Duration,
    settle: Duration,
    run: Option<Run>,
    next_id: u64,
}

impl StreamingText {
    /// Create an unmounted renderer. Nothing is revealed until [`start`](Self::start).
    pub fn new(text: impl Into<String>, interval: Duration, settle: Duration) -> Self {
        let text = text.into();
        let ends = char_ends(&text);
        StreamingText {
            text,
            ends,
            interval,
            settle,
            run: None,
            next_id: 0,
        }
    }

    /// Mount: begin a fresh run at the empty prefix, replacing any current run.
    pub fn start(&mut self, now: Instant) -> RunId {
        if let Some(old) = self.run.take() {
            tracing::debug!(run = old.id.0, "stream run replaced");
        }

        let id = RunId(self.next_id);
        self.next_id += 1;

        let (phase, due) = if self.ends.is_empty() {
            (Phase::Settling, now + self.settle)
        } else {
            (Phase::Revealing, now + self.interval)
        };
        self.run = Some(Run { id, revealed: 0, due, phase });
        id
    }

    /// Unmount: release the pending tick / settle timer. The cancelled run
    /// never completes.
    pub fn cancel(&mut self) {
        if let Some(run) = self.run.take() {
            if run.phase != Phase::Completed {
                tracing::debug!(run = run.id.0, revealed = run.revealed, "stream run cancelled");
            }
        }
    }

    /// Replace the text. A mounted renderer restarts from the empty
    /// prefix if the text differs; an unmounted one stays unmounted.
    pub fn set_text(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if text != self.text {
            self.ends = char_ends(&text);
            self.text = text;
            self.restart_if_mounted(now);
        }
    }

    /// Replace the per-character interval. Restarts a mounted renderer if
    /// it differs.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        if interval != self.interval {
            self.interval = interval;
            self.restart_if_mounted(now);
        }
    }

    fn restart_if_mounted(&mut self, now: Instant) {
        if self.run.is_some() {
            self.start(now);
        }
    }

    /// Commit every tick due at or before `now`.
    ///
    /// Returns the run id exactly once, on the poll that observes the
    /// settle delay elapsing.
    pub fn poll(&mut self, now: Instant) -> Option<RunId> {
        let total = self.ends.len();
        let run = self.run.as_mut()?;

        while run.phase == Phase::Revealing && run.due <= now {
            run.revealed += 1;
            if run.revealed == total {
                run.phase = Phase::Settling;
                run.due += self.settle;
            } else {
                run.due += self.interval;
            }
        }

        if run.phase == Phase::Settling && run.due <= now {
            run.phase = Phase::Completed;
            return Some(run.id);
        }
        None
    }

    /// When the next tick or the settle timer is due, if anything is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.run {
            Some(run) if run.phase != Phase::Completed => Some(run.due),
            _ => None,
        }
    }

    /// Currently revealed prefix. Empty when unmounted.
    pub fn visible(&self) -> &str {
        match &self.run {
            Some(run) if run.revealed > 0 => &self.text[..self.ends[run.revealed - 1]],
            _ => "",
        }
    }

    /// Revealed character count of the current run.
    pub fn revealed(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.revealed)
    }

    /// Id of the current run, if mounted.
    pub fn run_id(&self) -> Option<RunId> {
        self.run.as_ref().map(|r| r.id)
    }

    pub fn is_complete(&self) -> bool {
        matches!(&self.run, Some(run) if run.phase == Phase::Completed)
    }
}

fn char_ends(text: &str) -> Vec<usize> {
    text.char_indices().map(|(i, c)| i + c.len_utf8()).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration::from_millis(10);
    const SETTLE: Duration = Duration::from_millis(100);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn unmounted_renderer_shows_nothing() {
        let r = StreamingText::new("hello", D, SETTLE);
        assert_eq!(r.visible(), "");
        assert_eq!(r.next_deadline(), None);
    }

    #[test]
    fn reveals_one_char_per_interval() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("hello", D, SETTLE);
        r.start(t0);

        assert_eq!(r.poll(t0 + ms(9)), None);
        assert_eq!(r.visible(), "");
        r.poll(t0 + ms(10));
        assert_eq!(r.visible(), "h");
        r.poll(t0 + ms(35));
        assert_eq!(r.visible(), "hel");
        assert_eq!(r.next_deadline(), Some(t0 + ms(40)));
    }

    #[test]
    fn prefixes_grow_monotonically() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("abcde", D, SETTLE);
        r.start(t0);
        let mut last = 0;
        for step in 0..20 {
            r.poll(t0 + ms(step * 5));
            assert!(r.revealed() >= last);
            assert!("abcde".starts_with(r.visible()));
            last = r.revealed();
        }
    }

    #[test]
    fn completion_fires_once_after_settle() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("hello", D, SETTLE);
        let id = r.start(t0);

        // 5 * 10ms of reveal plus the settle delay
        assert_eq!(r.poll(t0 + ms(50)), None);
        assert_eq!(r.visible(), "hello");
        assert_eq!(r.poll(t0 + ms(149)), None);
        assert_eq!(r.poll(t0 + ms(150)), Some(id));
        assert_eq!(r.poll(t0 + ms(500)), None);
        assert!(r.is_complete());
        assert_eq!(r.next_deadline(), None);
    }

    #[test]
    fn late_poll_catches_up_and_completes() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("hello", D, SETTLE);
        let id = r.start(t0);
        assert_eq!(r.poll(t0 + ms(1_000)), Some(id));
        assert_eq!(r.visible(), "hello");
    }

    #[test]
    fn cancel_mid_run_never_completes() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("hello", D, SETTLE);
        r.start(t0);
        r.poll(t0 + ms(30));
        assert_eq!(r.visible(), "hel");

        r.cancel();
        assert_eq!(r.next_deadline(), None);
        assert_eq!(r.poll(t0 + ms(10_000)), None);
        assert_eq!(r.visible(), "");
    }

    #[test]
    fn empty_text_completes_after_exactly_settle() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("", D, SETTLE);
        let id = r.start(t0);
        assert_eq!(r.next_deadline(), Some(t0 + SETTLE));
        assert_eq!(r.poll(t0 + ms(99)), None);
        assert_eq!(r.poll(t0 + SETTLE), Some(id));
        assert_eq!(r.revealed(), 0);
    }

    #[test]
    fn text_change_restarts_from_empty_prefix() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("hello", D, SETTLE);
        let first = r.start(t0);
        r.poll(t0 + ms(30));

        let t1 = t0 + ms(30);
        r.set_text("world", t1);
        assert_eq!(r.visible(), "");
        assert_ne!(r.run_id(), Some(first));

        r.poll(t1 + ms(10));
        assert_eq!(r.visible(), "w");
    }

    #[test]
    fn changes_while_unmounted_do_not_mount() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("hello", D, SETTLE);
        r.set_text("world", t0);
        r.set_interval(ms(50), t0);
        assert_eq!(r.run_id(), None);
        assert_eq!(r.poll(t0 + ms(10_000)), None);

        r.start(t0);
        r.cancel();
        r.set_text("again", t0);
        assert_eq!(r.run_id(), None);
        assert_eq!(r.next_deadline(), None);

        r.start(t0);
        r.poll(t0 + ms(50));
        assert_eq!(r.visible(), "a");
    }

    #[test]
    fn same_text_does_not_restart() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("hello", D, SETTLE);
        let id = r.start(t0);
        r.poll(t0 + ms(20));
        r.set_text("hello", t0 + ms(20));
        assert_eq!(r.run_id(), Some(id));
        assert_eq!(r.visible(), "he");
    }

    #[test]
    fn interval_change_restarts_and_drops_old_completion() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("hi", D, SETTLE);
        let old = r.start(t0);
        r.poll(t0 + ms(20));

        let t1 = t0 + ms(20);
        r.set_interval(ms(50), t1);
        // The old run would have completed at t0 + 120ms.
        assert_eq!(r.poll(t0 + ms(120)), None);
        let done = r.poll(t1 + ms(100) + SETTLE);
        assert!(done.is_some());
        assert_ne!(done, Some(old));
    }

    #[test]
    fn remount_after_completion_runs_again() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("ab", D, SETTLE);
        let first = r.start(t0);
        assert_eq!(r.poll(t0 + ms(200)), Some(first));

        let t1 = t0 + ms(200);
        let second = r.start(t1);
        assert_eq!(r.visible(), "");
        assert_eq!(r.poll(t1 + ms(120)), Some(second));
    }

    #[test]
    fn multibyte_characters_reveal_whole() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("╔═╗", D, SETTLE);
        r.start(t0);
        r.poll(t0 + ms(20));
        assert_eq!(r.visible(), "╔═");
    }

    #[test]
    fn zero_interval_reveals_everything_on_first_poll() {
        let t0 = Instant::now();
        let mut r = StreamingText::new("abc", Duration::ZERO, SETTLE);
        r.start(t0);
        assert_eq!(r.poll(t0), None);
        assert_eq!(r.visible(), "abc");
        assert!(r.poll(t0 + SETTLE).is_some());
    }
}
