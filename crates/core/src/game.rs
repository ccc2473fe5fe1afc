//! Game - one scorecard plus the bookkeeping for entering balls
//!
//! The score engine in [`crate::scoring`] only reads rolls. Everything that
//! decides *where* the next ball goes (cursor, pins standing, strike/spare
//! shorthands, edits and undo) lives here, and every mutation ends with a full
//! recompute of the card.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::GameError;
use crate::frame::{empty_frames, Frame, Frames};
use crate::scoring::score_frames;
use crate::types::{RollPosition, ScoreAction, FRAME_COUNT, PIN_COUNT, TENTH_FRAME};

/// Ledger-assigned game identifier, displayed as `game-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "game-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    started_at: String,
    frames: Frames,
    total: u32,
    /// Opaque per-frame video references; never read by scoring.
    videos: BTreeMap<usize, String>,
}

impl Game {
    pub fn new(id: GameId, started_at: impl Into<String>) -> Self {
        Self {
            id,
            started_at: started_at.into(),
            frames: empty_frames(),
            total: 0,
            videos: BTreeMap::new(),
        }
    }

    /// Build a game from per-frame pin counts (missing frames stay empty).
    pub fn from_frames(id: GameId, rolls: &[&[u8]]) -> Self {
        let mut game = Self::new(id, "");
        for (frame, pins) in game.frames.iter_mut().zip(rolls) {
            *frame = Frame::from_pins(pins);
        }
        game.recompute();
        game
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn started_at(&self) -> &str {
        &self.started_at
    }

    pub fn frames(&self) -> &Frames {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Last determined cumulative score, or 0.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of roll slots recorded across all frames.
    pub fn roll_count(&self) -> usize {
        self.frames.iter().map(Frame::roll_count).sum()
    }

    /// Recompute every frame score from scratch.
    pub fn recompute(&mut self) -> u32 {
        self.total = score_frames(&mut self.frames);
        self.total
    }

    /// Next slot to fill, `None` once the game is complete.
    ///
    /// Frames 0-8 take balls until a strike or two balls. The tenth takes a
    /// third ball after a strike or spare in its first two.
    pub fn cursor(&self) -> Option<RollPosition> {
        for (i, frame) in self.frames.iter().enumerate() {
            if !frame.is_complete(i) {
                return Some(RollPosition::new(i, frame.roll_count()));
            }
        }
        None
    }

    pub fn is_complete(&self) -> bool {
        self.cursor().is_none()
    }

    /// Pins standing for the ball at the cursor, 0 once the game is complete.
    pub fn pins_standing(&self) -> u8 {
        match self.cursor() {
            Some(pos) => self.pins_standing_at(pos),
            None => 0,
        }
    }

    fn pins_standing_at(&self, pos: RollPosition) -> u8 {
        if self.is_fresh_rack(pos) {
            return PIN_COUNT;
        }
        let frame = &self.frames[pos.frame];
        let previous = frame.roll(pos.roll - 1).unwrap_or(0);
        PIN_COUNT.saturating_sub(previous)
    }

    /// Whether the ball at `pos` is thrown at a full rack of ten.
    fn is_fresh_rack(&self, pos: RollPosition) -> bool {
        let frame = &self.frames[pos.frame];
        match pos.roll {
            0 => true,
            1 => pos.frame == TENTH_FRAME && frame.is_strike(),
            _ => {
                // Third ball of the tenth: fresh after two strikes or after a spare.
                let second_strike = frame.is_strike() && frame.roll(1) == Some(PIN_COUNT);
                second_strike || frame.is_spare()
            }
        }
    }

    /// Record a ball at the cursor and rescore the card.
    pub fn record_roll(&mut self, pins: u8) -> Result<RollPosition, GameError> {
        let pos = self.cursor().ok_or(GameError::GameComplete)?;
        let standing = self.pins_standing_at(pos);
        if pins > standing {
            debug!(game = %self.id, pins, standing, "roll rejected");
            return Err(GameError::TooManyPins { pins, standing });
        }

        self.frames[pos.frame]
            .push(Some(pins))
            .map_err(|_| GameError::RollOutOfRange(pos))?;
        let total = self.recompute();
        debug!(game = %self.id, frame = pos.frame, roll = pos.roll, pins, total, "roll recorded");
        Ok(pos)
    }

    /// Record a ball from a keyboard or feed action.
    ///
    /// `Strike` takes a full fresh rack and `Spare` takes whatever is left on
    /// the second ball of a rack. Non-ball actions are rejected.
    pub fn record_action(&mut self, action: ScoreAction) -> Result<RollPosition, GameError> {
        let pos = self.cursor().ok_or(GameError::GameComplete)?;
        let pins = match action {
            ScoreAction::Pins(pins) => pins,
            ScoreAction::Strike => {
                if !self.is_fresh_rack(pos) {
                    return Err(GameError::StrikeUnavailable);
                }
                PIN_COUNT
            }
            ScoreAction::Spare => {
                if self.is_fresh_rack(pos) {
                    return Err(GameError::SpareUnavailable);
                }
                self.pins_standing_at(pos)
            }
            other => return Err(GameError::NotARoll(other)),
        };
        self.record_roll(pins)
    }

    /// Overwrite an already recorded slot and rescore the whole card.
    ///
    /// Only the position is checked. The new value is not validated against the
    /// rest of the frame, so an edit can leave a frame malformed; scoring still
    /// produces a number for it.
    pub fn set_roll(&mut self, pos: RollPosition, pins: Option<u8>) -> Result<(), GameError> {
        let frame = self
            .frames
            .get_mut(pos.frame)
            .ok_or(GameError::FrameOutOfRange(pos.frame))?;
        if !frame.set(pos.roll, pins) {
            return Err(GameError::RollOutOfRange(pos));
        }
        let total = self.recompute();
        debug!(game = %self.id, frame = pos.frame, roll = pos.roll, ?pins, total, "roll edited");
        Ok(())
    }

    /// Remove the most recent ball (the last slot of the last rolled frame).
    pub fn undo(&mut self) -> Result<RollPosition, GameError> {
        let index = self
            .frames
            .iter()
            .rposition(|f| !f.is_empty())
            .ok_or(GameError::NothingToUndo)?;
        let frame = &mut self.frames[index];
        frame.pop();
        let pos = RollPosition::new(index, frame.roll_count());
        self.recompute();
        Ok(pos)
    }

    /// Attach an opaque video reference to a frame. Replaces any previous one.
    pub fn attach_video(
        &mut self,
        frame: usize,
        reference: impl Into<String>,
    ) -> Result<Option<String>, GameError> {
        if frame >= FRAME_COUNT {
            return Err(GameError::FrameOutOfRange(frame));
        }
        Ok(self.videos.insert(frame, reference.into()))
    }

    pub fn video(&self, frame: usize) -> Option<&str> {
        self.videos.get(&frame).map(String::as_str)
    }

    pub fn has_video(&self, frame: usize) -> bool {
        self.videos.contains_key(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(GameId(1), "2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_new_game_is_empty() {
        let g = game();
        assert_eq!(g.total(), 0);
        assert_eq!(g.roll_count(), 0);
        assert_eq!(g.cursor(), Some(RollPosition::new(0, 0)));
        assert_eq!(g.pins_standing(), 10);
        assert!(!g.is_complete());
        assert_eq!(g.id().to_string(), "game-1");
    }

    #[test]
    fn test_cursor_advances_past_strike() {
        let mut g = game();
        g.record_roll(10).unwrap();
        assert_eq!(g.cursor(), Some(RollPosition::new(1, 0)));

        g.record_roll(4).unwrap();
        assert_eq!(g.cursor(), Some(RollPosition::new(1, 1)));
        assert_eq!(g.pins_standing(), 6);
    }

    #[test]
    fn test_record_rejects_more_than_standing() {
        let mut g = game();
        g.record_roll(7).unwrap();
        assert_eq!(
            g.record_roll(4),
            Err(GameError::TooManyPins {
                pins: 4,
                standing: 3
            })
        );
        assert_eq!(g.roll_count(), 1);
    }

    #[test]
    fn test_strike_and_spare_shorthands() {
        let mut g = game();
        assert_eq!(
            g.record_action(ScoreAction::Spare),
            Err(GameError::SpareUnavailable)
        );
        g.record_action(ScoreAction::Strike).unwrap();
        g.record_action(ScoreAction::Pins(6)).unwrap();
        assert_eq!(
            g.record_action(ScoreAction::Strike),
            Err(GameError::StrikeUnavailable)
        );
        g.record_action(ScoreAction::Spare).unwrap();

        assert_eq!(g.frames()[1].rolls(), &[Some(6), Some(4)]);
        assert_eq!(g.frames()[0].score, Some(20));
        assert_eq!(
            g.record_action(ScoreAction::Undo),
            Err(GameError::NotARoll(ScoreAction::Undo))
        );
    }

    #[test]
    fn test_tenth_frame_pins_standing() {
        let mut g = Game::from_frames(
            GameId(2),
            &[&[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0]],
        );
        assert_eq!(g.cursor(), Some(RollPosition::new(9, 0)));

        g.record_roll(10).unwrap();
        assert_eq!(g.pins_standing(), 10);
        g.record_roll(3).unwrap();
        assert_eq!(g.pins_standing(), 7);
        g.record_roll(7).unwrap();
        assert!(g.is_complete());
        assert_eq!(g.pins_standing(), 0);
        assert_eq!(g.record_roll(0), Err(GameError::GameComplete));
        assert_eq!(g.total(), 20);
    }

    #[test]
    fn test_tenth_frame_spare_earns_fresh_rack() {
        let mut g = Game::from_frames(
            GameId(3),
            &[&[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[6]],
        );
        assert_eq!(g.pins_standing(), 4);
        g.record_action(ScoreAction::Spare).unwrap();
        assert_eq!(g.pins_standing(), 10);
        g.record_action(ScoreAction::Strike).unwrap();
        assert!(g.is_complete());
        assert_eq!(g.total(), 20);
    }

    #[test]
    fn test_tenth_frame_open_ends_after_two() {
        let mut g = Game::from_frames(
            GameId(4),
            &[&[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[0, 0], &[6]],
        );
        g.record_roll(3).unwrap();
        assert!(g.is_complete());
        assert_eq!(g.total(), 9);
    }

    #[test]
    fn test_edit_rescores_downstream_frames() {
        let mut g = game();
        for pins in [3, 4, 5, 2] {
            g.record_roll(pins).unwrap();
        }
        assert_eq!(g.total(), 14);

        g.set_roll(RollPosition::new(0, 1), Some(7)).unwrap();
        assert_eq!(g.frames()[0].score, Some(15));
        assert_eq!(g.frames()[1].score, Some(22));
        assert_eq!(g.total(), 22);

        assert_eq!(
            g.set_roll(RollPosition::new(2, 0), Some(1)),
            Err(GameError::RollOutOfRange(RollPosition::new(2, 0)))
        );
        assert_eq!(
            g.set_roll(RollPosition::new(10, 0), Some(1)),
            Err(GameError::FrameOutOfRange(10))
        );
    }

    #[test]
    fn test_clearing_a_slot_keeps_it_unset() {
        let mut g = game();
        g.record_roll(10).unwrap();
        g.record_roll(3).unwrap();
        g.record_roll(4).unwrap();
        g.set_roll(RollPosition::new(1, 0), None).unwrap();
        assert_eq!(g.frames()[1].roll(0), None);
        assert_eq!(g.frames()[0].score, Some(14));
    }

    #[test]
    fn test_undo_removes_latest_ball() {
        let mut g = game();
        assert_eq!(g.undo(), Err(GameError::NothingToUndo));

        g.record_roll(10).unwrap();
        g.record_roll(3).unwrap();
        g.record_roll(4).unwrap();
        assert_eq!(g.frames()[0].score, Some(17));

        assert_eq!(g.undo(), Ok(RollPosition::new(1, 1)));
        assert_eq!(g.frames()[0].score, None);
        assert_eq!(g.cursor(), Some(RollPosition::new(1, 1)));
    }

    #[test]
    fn test_video_references_do_not_affect_scoring() {
        let mut g = game();
        g.record_roll(8).unwrap();
        assert_eq!(g.attach_video(0, "clip-1"), Ok(None));
        assert_eq!(g.attach_video(0, "clip-2"), Ok(Some("clip-1".to_string())));
        assert_eq!(g.video(0), Some("clip-2"));
        assert!(!g.has_video(1));
        assert_eq!(g.attach_video(10, "x"), Err(GameError::FrameOutOfRange(10)));
        assert_eq!(g.total(), 8);
    }
}
