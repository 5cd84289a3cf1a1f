//! # Networking Error Types

use thiserror::Error;
use wayfarer_shared::ProtocolError;

/// Errors raised by the server and client.
#[derive(Error, Debug)]
pub enum NetError {
    /// Socket failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Peer sent a malformed record.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Peer closed the connection.
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// Server settings that cannot work.
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for networking operations.
pub type NetResult<T> = Result<T, NetError>;
