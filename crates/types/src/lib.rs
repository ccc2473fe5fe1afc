//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the scorekeeper.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (score engine, terminal rendering, lane feed protocol).
//!
//! # Game Dimensions
//!
//! Standard ten-pin bowling:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_COUNT` | 10 | Frames per game |
//! | `TENTH_FRAME` | 9 | Index of the last frame |
//! | `PIN_COUNT` | 10 | Pins in a full rack |
//! | `MAX_ROLLS_REGULAR` | 2 | Balls in frames 1-9 |
//! | `MAX_ROLLS_TENTH` | 3 | Balls in the tenth frame (with strike or spare) |
//! | `PERFECT_GAME` | 300 | Twelve strikes in a row |
//!
//! # Examples
//!
//! ```
//! use tui_bowling_types::{ScoreAction, RollMark, FRAME_COUNT, PIN_COUNT};
//!
//! // Parse an action (case-insensitive)
//! let action = ScoreAction::from_str("strike").unwrap();
//! assert_eq!(action, ScoreAction::Strike);
//!
//! // Pin counts parse as pin actions
//! assert_eq!(ScoreAction::from_str("7"), Some(ScoreAction::Pins(7)));
//!
//! // Marks render as scorecard glyphs
//! assert_eq!(RollMark::Strike.as_char(), 'X');
//!
//! assert_eq!(FRAME_COUNT, 10);
//! assert_eq!(PIN_COUNT, 10);
//! ```

/// Frames per game
pub const FRAME_COUNT: usize = 10;

/// Index of the tenth (last) frame
pub const TENTH_FRAME: usize = FRAME_COUNT - 1;

/// Pins in a full rack
pub const PIN_COUNT: u8 = 10;

/// Maximum balls in frames 1-9
pub const MAX_ROLLS_REGULAR: usize = 2;

/// Maximum balls in the tenth frame
pub const MAX_ROLLS_TENTH: usize = 3;

/// Highest possible game score
pub const PERFECT_GAME: u32 = 300;

/// Maximum number of games a ledger keeps at once
pub const MAX_GAMES: usize = 64;

/// Which scoring rule resolved a frame.
///
/// - **Open**: fewer than 10 pins with both balls, no bonus
/// - **Spare**: 10 pins with two balls, bonus is the next ball
/// - **Strike**: 10 pins with the first ball, bonus is the next two balls
/// - **Tenth**: the last frame, scored as the plain sum of its balls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Open,
    Spare,
    Strike,
    Tenth,
}

impl FrameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameKind::Open => "open",
            FrameKind::Spare => "spare",
            FrameKind::Strike => "strike",
            FrameKind::Tenth => "tenth",
        }
    }
}

/// Scorecard mark for a single roll slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RollMark {
    /// Slot not rolled yet
    #[default]
    Empty,
    /// All pins with a fresh rack
    Strike,
    /// Remaining pins with the second ball on a rack
    Spare,
    /// Zero pins
    Gutter,
    /// 1-9 pins
    Pins(u8),
}

impl RollMark {
    /// Glyph used on a printed scorecard.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_bowling_types::RollMark;
    ///
    /// assert_eq!(RollMark::Spare.as_char(), '/');
    /// assert_eq!(RollMark::Gutter.as_char(), '-');
    /// assert_eq!(RollMark::Pins(7).as_char(), '7');
    /// assert_eq!(RollMark::Empty.as_char(), ' ');
    /// ```
    pub fn as_char(&self) -> char {
        match self {
            RollMark::Empty => ' ',
            RollMark::Strike => 'X',
            RollMark::Spare => '/',
            RollMark::Gutter => '-',
            RollMark::Pins(n) => char::from_digit(u32::from(*n), 10).unwrap_or('?'),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RollMark::Empty)
    }
}

/// Scorekeeping actions, shared by the keyboard and the lane feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreAction {
    /// Record a ball that knocked down this many pins
    Pins(u8),
    /// Record all standing pins on a fresh rack
    Strike,
    /// Record all remaining pins with the second ball
    Spare,
    /// Remove the last recorded ball
    Undo,
    NewGame,
    NextGame,
    PrevGame,
    DeleteGame,
}

impl ScoreAction {
    /// Parse an action from string (case-insensitive).
    ///
    /// Bare integers parse as [`ScoreAction::Pins`]; `x` and `/` are accepted
    /// as the scorecard shorthands for strike and spare.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_bowling_types::ScoreAction;
    ///
    /// assert_eq!(ScoreAction::from_str("X"), Some(ScoreAction::Strike));
    /// assert_eq!(ScoreAction::from_str("/"), Some(ScoreAction::Spare));
    /// assert_eq!(ScoreAction::from_str("newGame"), Some(ScoreAction::NewGame));
    /// assert_eq!(ScoreAction::from_str("10"), Some(ScoreAction::Pins(10)));
    /// assert_eq!(ScoreAction::from_str("bogus"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(pins) = s.parse::<u8>() {
            return Some(ScoreAction::Pins(pins));
        }
        match s.to_lowercase().as_str() {
            "strike" | "x" => Some(ScoreAction::Strike),
            "spare" | "/" => Some(ScoreAction::Spare),
            "gutter" | "-" => Some(ScoreAction::Pins(0)),
            "undo" => Some(ScoreAction::Undo),
            "newgame" => Some(ScoreAction::NewGame),
            "nextgame" => Some(ScoreAction::NextGame),
            "prevgame" => Some(ScoreAction::PrevGame),
            "deletegame" => Some(ScoreAction::DeleteGame),
            _ => None,
        }
    }

    /// Canonical wire name. Pin counts have no fixed name and report `"pins"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreAction::Pins(_) => "pins",
            ScoreAction::Strike => "strike",
            ScoreAction::Spare => "spare",
            ScoreAction::Undo => "undo",
            ScoreAction::NewGame => "newGame",
            ScoreAction::NextGame => "nextGame",
            ScoreAction::PrevGame => "prevGame",
            ScoreAction::DeleteGame => "deleteGame",
        }
    }

    /// Whether the action records a ball on the active game.
    pub fn is_roll(&self) -> bool {
        matches!(
            self,
            ScoreAction::Pins(_) | ScoreAction::Strike | ScoreAction::Spare
        )
    }
}

/// Slot on the scorecard: frame index 0-9 and ball index within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RollPosition {
    pub frame: usize,
    pub roll: usize,
}

impl RollPosition {
    pub const fn new(frame: usize, roll: usize) -> Self {
        Self { frame, roll }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenth_frame_is_last_index() {
        assert_eq!(TENTH_FRAME, 9);
        assert_eq!(MAX_ROLLS_REGULAR + 1, MAX_ROLLS_TENTH);
    }

    #[test]
    fn action_names_round_trip() {
        for action in [
            ScoreAction::Strike,
            ScoreAction::Spare,
            ScoreAction::Undo,
            ScoreAction::NewGame,
            ScoreAction::NextGame,
            ScoreAction::PrevGame,
            ScoreAction::DeleteGame,
        ] {
            assert_eq!(ScoreAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn pin_actions_parse_from_numbers() {
        assert_eq!(ScoreAction::from_str("0"), Some(ScoreAction::Pins(0)));
        assert_eq!(ScoreAction::from_str(" 9 "), Some(ScoreAction::Pins(9)));
        assert_eq!(ScoreAction::from_str("-"), Some(ScoreAction::Pins(0)));
        assert!(ScoreAction::Pins(3).is_roll());
        assert!(!ScoreAction::Undo.is_roll());
    }

    #[test]
    fn marks_render_digits() {
        assert_eq!(RollMark::Pins(1).as_char(), '1');
        assert_eq!(RollMark::Pins(9).as_char(), '9');
        assert!(RollMark::default().is_empty());
    }
}
