//! Terminal scorecard renderer.
//!
//! Renders into a plain framebuffer which is then flushed to a crossterm
//! backend, diffing row spans between frames.
//!
//! - [`fb`]: styled cell grid
//! - [`scorecard_view`]: snapshot to framebuffer, no I/O
//! - [`renderer`]: framebuffer to terminal

pub mod fb;
pub mod renderer;
pub mod scorecard_view;

pub use tui_bowling_core as core;
pub use tui_bowling_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use scorecard_view::{FeedStatusView, ScorecardView, Viewport, CARD_WIDTH, VIEW_HEIGHT};
