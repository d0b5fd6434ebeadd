//! Boot Sequence Controller: `Booting` → `Ready`, exactly once.
//!
//! Owns the banner renderer. The only way to reach `Ready` is the
//! banner run's completion, observed through [`BootController::poll`] or
//! signalled via [`BootController::complete`]; repeats are ignored.

use std::time::{Duration, Instant};

use crate::stream::{RunId, StreamingText};
use crate::types::BootState;

/// The boot banner revealed before the shell becomes interactive.
pub const BANNER: &str = r"

  System Booting...

  ╔══════════════════════════════════════════════════════════════════════════╗
  ║                                                                          ║
  ║   ████████╗███████╗██████╗ ███╗   ███╗██╗███╗   ██╗ █████╗ ██╗           ║
  ║   ╚══██╔══╝██╔════╝██╔══██╗████╗ ████║██║████╗  ██║██╔══██╗██║           ║
  ║      ██║   █████╗  ██████╔╝██╔████╔██║██║██╔██╗ ██║███████║██║           ║
  ║      ██║   ██╔══╝  ██╔══██╗██║╚██╔╝██║██║██║╚██╗██║██╔══██║██║           ║
  ║      ██║   ███████╗██║  ██║██║ ╚═╝ ██║██║██║ ╚████║██║  ██║███████╗      ║
  ║      ╚═╝   ╚══════╝╚═╝  ╚═╝╚═╝     ╚═╝╚═╝╚═╝  ╚═══╝╚═╝  ╚═╝╚══════╝      ║
  ║                                                                          ║
  ║              P O R T F O L I O   v 1 . 0                                 ║
  ║                                                                          ║
  ╚══════════════════════════════════════════════════════════════════════════╝

  System Initialized

";

/// Two-state boot machine driven by the banner's completion signal.
#[derive(Debug, Clone)]
pub struct BootController {
    state: BootState,
    banner: StreamingText,
}

impl BootController {
    /// A controller in `Booting` with an unmounted banner.
    pub fn new(banner: impl Into<String>, interval: Duration, settle: Duration) -> Self {
        BootController {
            state: BootState::Booting,
            banner: StreamingText::new(banner, interval, settle),
        }
    }

    /// A controller that is already `Ready` (banner skipped).
    pub fn ready() -> Self {
        BootController {
            state: BootState::Ready,
            banner: StreamingText::new("", Duration::ZERO, Duration::ZERO),
        }
    }

    /// Mount the banner. No-op once `Ready`.
    pub fn start(&mut self, now: Instant) {
        if self.state == BootState::Booting {
            self.banner.start(now);
        }
    }

    /// Drive the banner; transitions to `Ready` when its run completes.
    ///
    /// Returns true only on the poll that performed the transition.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.banner.poll(now) {
            Some(run) => self.complete(run),
            None => false,
        }
    }

    /// Completion signal from the banner run `run`.
    ///
    /// Only the banner's current run counts; a signal for a replaced run,
    /// or any signal after `Ready`, has no effect.
    pub fn complete(&mut self, run: RunId) -> bool {
        if self.state == BootState::Ready || self.banner.run_id() != Some(run) {
            return false;
        }
        self.state = BootState::Ready;
        tracing::info!("boot sequence complete, shell ready");
        true
    }

    /// Tear down the banner (unmount). The session stays in its current state.
    pub fn cancel(&mut self) {
        self.banner.cancel();
    }

    pub fn state(&self) -> BootState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == BootState::Ready
    }

    /// Revealed banner text so far.
    pub fn banner(&self) -> &str {
        self.banner.visible()
    }

    /// When the banner next needs a poll, while booting.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            BootState::Booting => self.banner.next_deadline(),
            BootState::Ready => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
