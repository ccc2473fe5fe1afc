//! Key mapping from terminal events to scorekeeping actions.

use crate::types::ScoreAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to scorekeeping actions.
pub fn handle_key_event(key: KeyEvent) -> Option<ScoreAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Pin counts
        KeyCode::Char(c @ '0'..='9') => c.to_digit(10).map(|d| ScoreAction::Pins(d as u8)),
        KeyCode::Char('-') => Some(ScoreAction::Pins(0)),

        // Marks
        KeyCode::Char('x') | KeyCode::Char('X') => Some(ScoreAction::Strike),
        KeyCode::Char('/') => Some(ScoreAction::Spare),

        // Corrections
        KeyCode::Backspace | KeyCode::Char('u') | KeyCode::Char('U') => Some(ScoreAction::Undo),

        // Game list
        KeyCode::Char('n') | KeyCode::Char('N') => Some(ScoreAction::NewGame),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char(']') => Some(ScoreAction::NextGame),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('[') => Some(ScoreAction::PrevGame),
        KeyCode::Delete => Some(ScoreAction::DeleteGame),

        _ => None,
    }
}

/// Check if key should quit the scorekeeper.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
