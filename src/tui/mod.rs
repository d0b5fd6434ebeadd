//! TUI module for the interactive terminal session.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: App model, loop events, semantic actions
//! - `update`: action → session transitions
//! - `view`: pure rendering
//! - `theme`: palette → styles
//! - `run`: effects (terminal lifecycle, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
