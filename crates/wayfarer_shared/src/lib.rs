//! # WAYFARER Shared
//!
//! Types used by both the multiplayer server and its clients.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - the async runtime
//! - the procedural world crate
//! - anything terminal-related
//!
//! Tiles travel as plain ordinals; decoding them into tile kinds is the
//! receiver's business.

#![deny(unsafe_code)]

pub mod constants;
pub mod protocol;

pub use constants::{HOST_INDEX, MAX_LINE_LEN, MAX_PLAYERS, SERVER_BIND, SERVER_PORT, TICK_RATE};
pub use protocol::{
    Frame, FrameDecoder, FrameEncoder, PlayerRecord, ProtocolError, ProtocolResult, Record,
    TileRecord, END_TAG,
};
