//! Frame storage: up to three optional roll slots plus the cumulative score.

use arrayvec::ArrayVec;

use crate::types::{FRAME_COUNT, MAX_ROLLS_REGULAR, MAX_ROLLS_TENTH, PIN_COUNT, TENTH_FRAME};

/// Roll slots of a frame. A slot is `None` when it exists but holds no pin count.
pub type Rolls = ArrayVec<Option<u8>, MAX_ROLLS_TENTH>;

/// The ten frames of a game, index 0-9.
pub type Frames = [Frame; FRAME_COUNT];

/// One scoring unit of a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    rolls: Rolls,
    /// Cumulative running total through this frame, `None` while undetermined.
    pub score: Option<u32>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from recorded pin counts (extra values past three are dropped).
    pub fn from_pins(pins: &[u8]) -> Self {
        let mut frame = Self::new();
        for &p in pins {
            if frame.push(Some(p)).is_err() {
                break;
            }
        }
        frame
    }

    pub fn rolls(&self) -> &[Option<u8>] {
        &self.rolls
    }

    pub fn roll_count(&self) -> usize {
        self.rolls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Pin count of a slot, `None` if the slot is missing or unset.
    pub fn roll(&self, index: usize) -> Option<u8> {
        self.rolls.get(index).copied().flatten()
    }

    /// Pin count of a slot with missing and unset slots counted as zero.
    #[inline]
    pub fn pins(&self, index: usize) -> u32 {
        self.roll(index).map(u32::from).unwrap_or(0)
    }

    /// Append a roll slot. Fails once the frame holds three slots.
    pub fn push(&mut self, pins: Option<u8>) -> Result<(), Option<u8>> {
        self.rolls.try_push(pins).map_err(|e| e.element())
    }

    pub fn pop(&mut self) -> Option<Option<u8>> {
        self.rolls.pop()
    }

    /// Overwrite an existing slot. Returns false if the slot does not exist.
    pub fn set(&mut self, index: usize, pins: Option<u8>) -> bool {
        match self.rolls.get_mut(index) {
            Some(slot) => {
                *slot = pins;
                true
            }
            None => false,
        }
    }

    /// First ball took the full rack.
    pub fn is_strike(&self) -> bool {
        self.roll(0) == Some(PIN_COUNT)
    }

    /// First two slots add up to a full rack without a first-ball strike.
    pub fn is_spare(&self) -> bool {
        !self.is_strike() && self.pins(0) + self.pins(1) == u32::from(PIN_COUNT)
    }

    /// Whether every ball this frame allows has been rolled.
    ///
    /// Frames 0-8 end on a strike or after two balls. The tenth frame takes a
    /// third ball after a strike or spare, otherwise it ends after two.
    pub fn is_complete(&self, index: usize) -> bool {
        let count = self.roll_count();
        if index == TENTH_FRAME {
            let bonus_ball = self.is_strike() || self.is_spare();
            if bonus_ball {
                count >= MAX_ROLLS_TENTH
            } else {
                count >= MAX_ROLLS_REGULAR
            }
        } else {
            self.is_strike() || count >= MAX_ROLLS_REGULAR
        }
    }

    /// Sum of the recorded slots, unset slots counted as zero.
    pub fn pin_total(&self) -> u32 {
        (0..self.roll_count()).map(|i| self.pins(i)).sum()
    }
}

/// Fresh set of ten empty frames.
pub fn empty_frames() -> Frames {
    std::array::from_fn(|_| Frame::new())
}
