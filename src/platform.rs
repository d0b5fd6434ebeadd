//! Environment info provider for the `neofetch` command.
//!
//! A read-only snapshot of where the session is running: OS, terminal
//! program, terminal size and locale. Only the content handlers see it;
//! the session core never does.
//!
//! Structure:
//! - Constants: environment variables consulted, in priority order
//! - Types: the snapshot
//! - Pure functions: snapshot construction from an injected lookup
//! - Effect functions: detection from the real process environment

use std::env;

use serde::Serialize;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Variables naming the terminal emulator, most specific first.
pub const TERMINAL_VARS: [&str; 2] = ["TERM_PROGRAM", "TERM"];

/// Locale variables in POSIX precedence order.
pub const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Shown when a value cannot be determined.
pub const UNKNOWN: &str = "unknown";

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentInfo {
    /// "linux x86_64", "macos aarch64", ...
    pub platform: String,
    /// Terminal program, e.g. "iTerm.app" or "xterm-256color".
    pub terminal: String,
    /// Terminal size as "<cols>x<rows>".
    pub resolution: String,
    /// BCP-47-ish tag, e.g. "en-US".
    pub locale: String,
}

impl Default for EnvironmentInfo {
    fn default() -> Self {
        EnvironmentInfo {
            platform: platform_string(env::consts::OS, env::consts::ARCH),
            terminal: UNKNOWN.to_string(),
            resolution: UNKNOWN.to_string(),
            locale: UNKNOWN.to_string(),
        }
    }
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

pub fn platform_string(os: &str, arch: &str) -> String {
    format!("{} {}", os, arch)
}

/// Convert a POSIX locale ("en_US.UTF-8", "de_DE@euro") to "en-US".
///
/// "C" and "POSIX" carry no language and map to `None`.
pub fn locale_tag(posix: &str) -> Option<String> {
    let base = posix.split(['.', '@']).next().unwrap_or("");
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Build a snapshot from a variable lookup and an optional terminal size.
///
/// Separated from [`detect`] so tests can inject the environment.
pub fn snapshot_with(lookup: impl Fn(&str) -> Option<String>, size: Option<(u16, u16)>) -> EnvironmentInfo {
    let first = |names: &[&str]| {
        names
            .iter()
            .filter_map(|name| lookup(name))
            .find(|v| !v.trim().is_empty())
    };

    let terminal = first(&TERMINAL_VARS).unwrap_or_else(|| UNKNOWN.to_string());
    let locale = first(&LOCALE_VARS)
        .and_then(|v| locale_tag(&v))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let resolution = size
        .map(|(cols, rows)| format!("{}x{}", cols, rows))
        .unwrap_or_else(|| UNKNOWN.to_string());

    EnvironmentInfo {
        platform: platform_string(env::consts::OS, env::consts::ARCH),
        terminal,
        resolution,
        locale,
    }
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Snapshot the current process environment and terminal size.
pub fn detect() -> EnvironmentInfo {
    let size = crossterm::terminal::size().ok();
    snapshot_with(|name| env::var(name).ok(), size)
}

// ============================================================================
// TESTS
// ============================================================================
