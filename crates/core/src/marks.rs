//! Scorecard marks: `X` for strikes, `/` for spares, `-` for gutters.

use crate::frame::Frame;
use crate::types::{RollMark, MAX_ROLLS_TENTH, PIN_COUNT, TENTH_FRAME};

/// Marks for each roll slot of `frame` at position `index` in the game.
///
/// Frames 0-8 use the first two slots. In the tenth every strike ball is an
/// `X`, and a ball that clears the rest of a rack is a `/`.
pub fn frame_marks(frame: &Frame, index: usize) -> [RollMark; MAX_ROLLS_TENTH] {
    let mut marks = [RollMark::Empty; MAX_ROLLS_TENTH];
    for (slot, mark) in marks.iter_mut().enumerate().take(frame.roll_count()) {
        *mark = slot_mark(frame, index, slot);
    }
    marks
}

fn slot_mark(frame: &Frame, index: usize, slot: usize) -> RollMark {
    let Some(pins) = frame.roll(slot) else {
        return RollMark::Empty;
    };
    let fresh_rack = match slot {
        0 => true,
        1 => index == TENTH_FRAME && frame.is_strike(),
        _ => frame.is_spare() || (frame.is_strike() && frame.roll(1) == Some(PIN_COUNT)),
    };

    if fresh_rack {
        if pins == PIN_COUNT {
            return RollMark::Strike;
        }
    } else {
        let previous = frame.roll(slot - 1).unwrap_or(0);
        if u32::from(previous) + u32::from(pins) == u32::from(PIN_COUNT) {
            return RollMark::Spare;
        }
    }
    pin_mark(pins)
}

fn pin_mark(pins: u8) -> RollMark {
    match pins {
        0 => RollMark::Gutter,
        n => RollMark::Pins(n),
    }
}

/// Render marks as a compact string, e.g. `"X"`, `"7/"`, `"XX9"`.
pub fn marks_string(marks: &[RollMark]) -> String {
    marks
        .iter()
        .filter(|m| !m.is_empty())
        .map(RollMark::as_char)
        .collect()
}
