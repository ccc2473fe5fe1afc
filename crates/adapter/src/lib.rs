//! Lane feed - scorecard streaming and remote scorekeeping over TCP
//!
//! Lets a lane console or a second screen follow the scorecard and, for one
//! client at a time, enter balls remotely.
//!
//! # Protocol Overview
//!
//! **Line-delimited JSON** over TCP (default: 127.0.0.1:7878):
//!
//! 1. **Handshake**: client sends `hello`, server answers `welcome`
//! 2. **Controller assignment**: first client to hello becomes the controller;
//!    when it disconnects the lowest remaining client id is promoted
//! 3. **Commanding**: the controller sends `command` with an `actions` list;
//!    the game loop replies `ack` or `error` once the list is applied
//! 4. **Observation streaming**: clients that asked for
//!    `stream_observations` get an `observation` after every change
//!
//! `seq` must strictly increase per client after the handshake.
//!
//! # Error Codes
//!
//! `handshake_required`, `protocol_mismatch`, `not_controller`,
//! `invalid_command`, `rejected_roll`, `backpressure`.
//!
//! # Environment Variables
//!
//! - `BOWLING_FEED_HOST`: bind address (default "127.0.0.1")
//! - `BOWLING_FEED_PORT`: port (default 7878)
//! - `BOWLING_FEED_MAX_PENDING`: command queue depth (default 10)
//! - `BOWLING_FEED_DISABLED`: "1" or "true" disables the feed
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"ts":0,"client":{"name":"lane-7","version":"1.0"},"protocol_version":"1.0.0","requested":{"stream_observations":true}}
//! Server -> Client: {"type":"welcome","seq":1,"ts":...,"protocol_version":"1.0.0","client_id":1,"role":"controller","controller_id":1,"game_id":"tui-bowling"}
//! Server -> Client: {"type":"observation","seq":1,...,"frames":[...],"total":0,...}
//! Client -> Server: {"type":"command","seq":2,"ts":0,"actions":["x",7,"/"]}
//! Server -> Client: {"type":"ack","seq":2,"ts":...,"status":"ok"}
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use tui_bowling_core as core;
pub use tui_bowling_types as types;

pub use protocol::*;
pub use runtime::{
    Adapter, ClientCommand, FeedSession, InboundCommand, InboundPayload, OutboundMessage,
};
pub use server::{run_server, run_server_with_status, FeedStatus, ServerConfig};
