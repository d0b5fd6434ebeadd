//! terminal-folio: a simulated shell session for a terminal portfolio.

pub mod boot;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod history;
pub mod platform;
pub mod report;
pub mod session;
pub mod stream;
pub mod themes;
pub mod transcript;
pub mod tui;
pub mod types;
