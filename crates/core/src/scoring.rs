//! Scoring module - ten-pin frame scoring with strike and spare lookahead
//!
//! Every function here is a pure function of the frame sequence. There is no
//! incremental state: callers recompute the whole card after each change.
//!
//! Compatibility notes:
//! - The tenth frame scores as the plain sum of its balls, even while incomplete.
//! - An open frame with a single ball scores that ball provisionally.
//! - Strike and spare frames stay undetermined until their bonus balls exist.
//! - A frame scored while an earlier frame is still undetermined builds on the
//!   previous frame's stored score, or 0 when that is undetermined.

use crate::frame::{Frame, Frames};
use crate::types::{FrameKind, FRAME_COUNT, PIN_COUNT, TENTH_FRAME};

const RACK: u32 = PIN_COUNT as u32;

/// Which rule scores `frames[index]`, `None` for an empty or out-of-range frame.
pub fn frame_kind(frames: &Frames, index: usize) -> Option<FrameKind> {
    let frame = frames.get(index)?;
    if frame.is_empty() {
        return None;
    }
    let kind = if index == TENTH_FRAME {
        FrameKind::Tenth
    } else if frame.is_strike() {
        FrameKind::Strike
    } else if frame.is_spare() {
        FrameKind::Spare
    } else {
        FrameKind::Open
    };
    Some(kind)
}

/// Score of a single frame (not cumulative), `None` while undetermined.
///
/// The whole sequence is required because strikes and spares look ahead into
/// the following frames.
pub fn frame_score(frames: &Frames, index: usize) -> Option<u32> {
    let frame = frames.get(index)?;
    match frame_kind(frames, index)? {
        FrameKind::Tenth => Some(frame.pins(0) + frame.pins(1) + frame.pins(2)),
        FrameKind::Strike => strike_bonus(frames, index).map(|bonus| RACK + bonus),
        FrameKind::Spare => spare_bonus(frames, index).map(|bonus| RACK + bonus),
        FrameKind::Open => Some(frame.pins(0) + frame.pins(1)),
    }
}

/// Next two balls after a strike in frames 0-8.
fn strike_bonus(frames: &Frames, index: usize) -> Option<u32> {
    let next = next_rolled(frames, index)?;

    if next.is_strike() {
        if index + 1 == TENTH_FRAME {
            // Back-to-back strikes into the tenth: the second bonus ball is the
            // tenth frame's own second ball.
            if next.roll_count() < 2 {
                return None;
            }
            return Some(RACK + next.pins(1));
        }
        let after = next_rolled(frames, index + 1)?;
        return Some(RACK + after.pins(0));
    }

    if next.roll_count() < 2 {
        return None;
    }
    Some(next.pins(0) + next.pins(1))
}

/// Next ball after a spare in frames 0-8.
fn spare_bonus(frames: &Frames, index: usize) -> Option<u32> {
    next_rolled(frames, index).map(|next| next.pins(0))
}

/// The frame after `index` if it has at least one roll slot.
fn next_rolled(frames: &Frames, index: usize) -> Option<&Frame> {
    frames.get(index + 1).filter(|f| !f.is_empty())
}

/// Cumulative score through each frame, `None` where undetermined.
pub fn cumulative_scores(frames: &Frames) -> [Option<u32>; FRAME_COUNT] {
    let mut out: [Option<u32>; FRAME_COUNT] = [None; FRAME_COUNT];
    for i in 0..FRAME_COUNT {
        if let Some(score) = frame_score(frames, i) {
            let prev = if i > 0 { out[i - 1].unwrap_or(0) } else { 0 };
            out[i] = Some(prev.saturating_add(score));
        }
    }
    out
}

/// Game total: the last determined cumulative score, or 0 when none is.
pub fn total_score(frames: &Frames) -> u32 {
    last_determined(&cumulative_scores(frames))
}

/// Recompute every frame's stored score in place and return the game total.
///
/// Always a full pass over all ten frames; edits to earlier rolls are picked
/// up the same way as appended rolls.
pub fn score_frames(frames: &mut Frames) -> u32 {
    let scores = cumulative_scores(frames);
    for (frame, score) in frames.iter_mut().zip(scores) {
        frame.score = score;
    }
    last_determined(&scores)
}

fn last_determined(scores: &[Option<u32>; FRAME_COUNT]) -> u32 {
    scores.iter().rev().find_map(|s| *s).unwrap_or(0)
}
