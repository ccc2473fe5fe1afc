//! Errors raised by scorecard bookkeeping.
//!
//! The score engine itself has no error cases; these cover recording balls on
//! a game and managing the ledger of games.

use thiserror::Error;

use crate::game::GameId;
use crate::types::{RollPosition, ScoreAction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is complete")]
    GameComplete,

    #[error("{pins} pins recorded but only {standing} standing")]
    TooManyPins { pins: u8, standing: u8 },

    #[error("strike needs a fresh rack")]
    StrikeUnavailable,

    #[error("spare needs a second ball on the rack")]
    SpareUnavailable,

    #[error("action {0:?} does not record a ball")]
    NotARoll(ScoreAction),

    #[error("frame {0} is out of range")]
    FrameOutOfRange(usize),

    #[error("no roll at frame {} ball {}", .0.frame, .0.roll)]
    RollOutOfRange(RollPosition),

    #[error("no rolls to undo")]
    NothingToUndo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("unknown game {0}")]
    UnknownGame(GameId),

    #[error("no game selected")]
    NoActiveGame,

    #[error("ledger is full ({0} games)")]
    Full(usize),

    #[error(transparent)]
    Game(#[from] GameError),
}
