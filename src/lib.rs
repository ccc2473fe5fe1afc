//! TUI Bowling (workspace facade crate).
//!
//! Re-exports the member crates under one `tui_bowling::{adapter,core,input,term,types}`
//! path so binaries, tests and benches share a single import root.

pub use tui_bowling_adapter as adapter;
pub use tui_bowling_core as core;
pub use tui_bowling_input as input;
pub use tui_bowling_term as term;
pub use tui_bowling_types as types;
