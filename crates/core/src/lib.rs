//! Core scoring logic - pure, deterministic, and testable
//!
//! This crate contains the ten-pin scoring rules and the bookkeeping around a
//! scorecard. It has **no dependencies** on UI, networking, or I/O:
//!
//! - **Stateless scoring**: every score is a function of the recorded rolls
//! - **Total**: empty, partial and malformed cards never panic; unknown scores
//!   are `None` ("undetermined")
//! - **Full recompute**: after every change the whole card is rescored, so an
//!   edit to an early ball can never leave stale totals behind
//!
//! # Module Structure
//!
//! - [`frame`]: roll slots of a single frame
//! - [`scoring`]: `frame_score` / `total_score` with strike and spare lookahead
//! - [`game`]: one scorecard with cursor, pins standing, edits and undo
//! - [`ledger`]: the caller-owned list of games and the active selection
//! - [`marks`]: `X` / `/` / `-` scorecard glyphs
//! - [`snapshot`]: plain data for rendering and the lane feed
//!
//! # Scoring Rules
//!
//! - **Open frame**: pins of both balls
//! - **Spare**: 10 plus the next ball
//! - **Strike**: 10 plus the next two balls (spanning frames on a double)
//! - **Tenth frame**: plain sum of its two or three balls
//!
//! # Example
//!
//! ```
//! use tui_bowling_core::{Game, GameId};
//! use tui_bowling_types::ScoreAction;
//!
//! let mut game = Game::new(GameId(1), "2024-05-04T19:00:00Z");
//!
//! game.record_action(ScoreAction::Strike).unwrap();
//! game.record_roll(3).unwrap();
//! game.record_roll(4).unwrap();
//!
//! assert_eq!(game.frames()[0].score, Some(17));
//! assert_eq!(game.total(), 24);
//! ```

pub mod error;
pub mod frame;
pub mod game;
pub mod ledger;
pub mod marks;
pub mod scoring;
pub mod snapshot;

pub use tui_bowling_types as types;

// Re-export commonly used types for convenience
pub use error::{GameError, LedgerError};
pub use frame::{empty_frames, Frame, Frames};
pub use game::{Game, GameId};
pub use ledger::{ActionOutcome, GameLedger};
pub use marks::{frame_marks, marks_string};
pub use scoring::{cumulative_scores, frame_kind, frame_score, score_frames, total_score};
pub use snapshot::{FrameSnapshot, ScorecardSnapshot};
