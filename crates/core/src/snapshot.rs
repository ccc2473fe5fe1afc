use crate::game::{Game, GameId};
use crate::marks::frame_marks;
use crate::types::{RollMark, RollPosition, FRAME_COUNT, MAX_ROLLS_TENTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameSnapshot {
    pub marks: [RollMark; MAX_ROLLS_TENTH],
    /// Cumulative score through this frame.
    pub score: Option<u32>,
    pub roll_count: u8,
    pub complete: bool,
    pub has_video: bool,
}

/// Plain-data view of a scorecard for rendering and the lane feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScorecardSnapshot {
    pub game_id: Option<GameId>,
    pub frames: [FrameSnapshot; FRAME_COUNT],
    pub cursor: Option<RollPosition>,
    pub pins_standing: u8,
    pub total: u32,
    pub complete: bool,
    /// 1-based position of the game in its ledger, 0 when none is active.
    pub game_index: usize,
    pub game_count: usize,
}

impl ScorecardSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_game(&self) -> bool {
        self.game_id.is_some()
    }

    /// Accepting balls: a game is selected and it is not finished.
    pub fn playable(&self) -> bool {
        self.has_game() && !self.complete
    }
}

impl Game {
    pub fn snapshot(&self) -> ScorecardSnapshot {
        let mut snap = ScorecardSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill `out` from this game. Ledger position fields are left untouched.
    pub fn snapshot_into(&self, out: &mut ScorecardSnapshot) {
        out.game_id = Some(self.id());
        for (i, (frame, snap)) in self.frames().iter().zip(out.frames.iter_mut()).enumerate() {
            *snap = FrameSnapshot {
                marks: frame_marks(frame, i),
                score: frame.score,
                roll_count: frame.roll_count() as u8,
                complete: frame.is_complete(i),
                has_video: self.has_video(i),
            };
        }
        out.cursor = self.cursor();
        out.pins_standing = self.pins_standing();
        out.total = self.total();
        out.complete = out.cursor.is_none();
    }
}
