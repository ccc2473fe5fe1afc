//! ScorecardView: maps a `core::ScorecardSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{FrameSnapshot, ScorecardSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{RollMark, RollPosition, FRAME_COUNT, TENTH_FRAME};

/// Inner width of frames 1-9 (two ball slots).
const FRAME_W: u16 = 5;
/// Inner width of the tenth frame (three ball slots).
const TENTH_W: u16 = 7;
/// Outer width of the whole card including borders.
pub const CARD_WIDTH: u16 = 1 + (FRAME_W + 1) * (FRAME_COUNT as u16 - 1) + TENTH_W + 1;
const CARD_HEIGHT: u16 = 5;
/// Rows used by the card plus the status lines below it.
pub const VIEW_HEIGHT: u16 = CARD_HEIGHT + 6;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Lane feed state shown under the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedStatusView {
    pub enabled: bool,
    pub client_count: u16,
    pub controller_id: Option<usize>,
}

impl FeedStatusView {
    pub fn label(&self) -> String {
        if !self.enabled {
            return "feed: off".to_string();
        }
        match (self.client_count, self.controller_id) {
            (0, _) => "feed: listening".to_string(),
            (n, Some(id)) => format!("feed: {n} client(s), controller #{id}"),
            (n, None) => format!("feed: {n} client(s)"),
        }
    }
}

struct Palette {
    border: CellStyle,
    label: CellStyle,
    mark: CellStyle,
    strike: CellStyle,
    score: CellStyle,
    cursor: CellStyle,
    muted: CellStyle,
    banner: CellStyle,
}

impl Palette {
    fn new() -> Self {
        Self {
            border: CellStyle::fg(Rgb::new(150, 150, 160)),
            label: CellStyle::fg(Rgb::new(120, 120, 130)).dim(),
            mark: CellStyle::fg(Rgb::new(230, 230, 230)),
            strike: CellStyle::fg(Rgb::new(240, 200, 60)).bold(),
            score: CellStyle::fg(Rgb::new(120, 220, 140)).bold(),
            cursor: CellStyle::plain(Rgb::BLACK, Rgb::new(90, 160, 240)),
            muted: CellStyle::fg(Rgb::new(140, 140, 140)),
            banner: CellStyle::fg(Rgb::new(240, 90, 90)).bold(),
        }
    }
}

/// Renders a single scorecard centered in the viewport.
#[derive(Debug, Default)]
pub struct ScorecardView;

impl ScorecardView {
    pub fn new() -> Self {
        Self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &ScorecardSnapshot,
        feed: Option<&FeedStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let palette = Palette::new();
        let x = viewport.width.saturating_sub(CARD_WIDTH) / 2;
        let y = viewport.height.saturating_sub(VIEW_HEIGHT) / 2;

        self.draw_title(fb, snap, x, y, &palette);
        self.draw_card(fb, snap, x, y + 1, &palette);

        let status_y = y + 1 + CARD_HEIGHT + 1;
        self.draw_status(fb, snap, x, status_y, &palette);

        if let Some(feed) = feed {
            fb.put_str(x, status_y + 3, &feed.label(), palette.muted);
        }
        fb.put_str(
            x,
            status_y + 4,
            "0-9 pins  x strike  / spare  u undo  n new  tab next  del delete  q quit",
            palette.label,
        );
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &ScorecardSnapshot,
        feed: Option<&FeedStatusView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, feed, viewport, &mut fb);
        fb
    }

    fn draw_title(&self, fb: &mut FrameBuffer, snap: &ScorecardSnapshot, x: u16, y: u16, p: &Palette) {
        let end = fb.put_str(x, y, "BOWLING", p.score);
        if snap.game_count > 0 {
            let games = match snap.game_id {
                Some(id) => format!("  {id} ({}/{})", snap.game_index, snap.game_count),
                None => format!("  {} game(s)", snap.game_count),
            };
            fb.put_str(end, y, &games, p.muted);
        }
    }

    fn draw_card(&self, fb: &mut FrameBuffer, snap: &ScorecardSnapshot, x: u16, y: u16, p: &Palette) {
        fb.draw_box(x, y, CARD_WIDTH, CARD_HEIGHT, p.border);

        for (i, frame) in snap.frames.iter().enumerate() {
            let fx = frame_x(x, i);
            let w = frame_width(i);

            if i < TENTH_FRAME {
                fb.draw_divider(fx + w, y, CARD_HEIGHT, p.border);
            }

            let number = format!("{}{}", i + 1, if frame.has_video { "*" } else { "" });
            let active = snap.cursor.map(|c| c.frame) == Some(i);
            let number_style = if active { p.mark.bold() } else { p.label };
            fb.put_str_centered(fx, y + 1, w, &number, number_style);

            self.draw_marks(fb, frame, i, snap.cursor, fx, y + 2, p);

            if let Some(score) = frame.score {
                fb.put_str_centered(fx, y + 3, w, &score.to_string(), p.score);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_marks(
        &self,
        fb: &mut FrameBuffer,
        frame: &FrameSnapshot,
        index: usize,
        cursor: Option<RollPosition>,
        fx: u16,
        y: u16,
        p: &Palette,
    ) {
        let slots = if index == TENTH_FRAME { 3 } else { 2 };
        for (slot, mark) in frame.marks.iter().take(slots).enumerate() {
            let sx = fx + 1 + 2 * slot as u16;
            if cursor == Some(RollPosition::new(index, slot)) {
                fb.put_char(sx, y, '_', p.cursor);
                continue;
            }
            let style = match mark {
                RollMark::Strike | RollMark::Spare => p.strike,
                _ => p.mark,
            };
            let ch = if mark.is_empty() { ' ' } else { mark.as_char() };
            fb.put_char(sx, y, ch, style);
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &ScorecardSnapshot, x: u16, y: u16, p: &Palette) {
        if !snap.has_game() {
            fb.put_str(x, y, "No game selected - press n to start", p.muted);
            return;
        }

        match snap.cursor {
            Some(pos) => {
                let prompt = format!(
                    "Frame {}, Ball {} - {} pins standing",
                    pos.frame + 1,
                    pos.roll + 1,
                    snap.pins_standing
                );
                fb.put_str(x, y, &prompt, p.mark);
            }
            None => {
                fb.put_str(x, y, "GAME OVER", p.banner);
            }
        }

        let end = fb.put_str(x, y + 1, "Total: ", p.label);
        fb.put_str(end, y + 1, &snap.total.to_string(), p.score);
    }
}

fn frame_x(card_x: u16, index: usize) -> u16 {
    card_x + 1 + (FRAME_W + 1) * index as u16
}

fn frame_width(index: usize) -> u16 {
    if index == TENTH_FRAME {
        TENTH_W
    } else {
        FRAME_W
    }
}
