//! # Network Constants
//!
//! Defaults shared by server and client. The config file overrides the
//! server-side ones.

/// Default server port.
pub const SERVER_PORT: u16 = 7777;

/// Default server bind address (all interfaces).
pub const SERVER_BIND: &str = "0.0.0.0:7777";

/// Default world broadcasts per second.
pub const TICK_RATE: u32 = 10;

/// Default maximum players, host included.
pub const MAX_PLAYERS: usize = 8;

/// Player index of the host.
pub const HOST_INDEX: u32 = 0;

/// Longest record line a decoder accepts, newline excluded.
///
/// `PLAYER` with four `i32`-sized fields is the longest legal record.
pub const MAX_LINE_LEN: usize = 64;
