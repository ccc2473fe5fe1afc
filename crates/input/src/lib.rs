//! Terminal input module (scorekeeper-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::ScoreAction`]. Each key press is
//! one action; terminal auto-repeat is left to the caller to ignore.

pub mod map;

pub use tui_bowling_types as types;

pub use map::{handle_key_event, should_quit};
