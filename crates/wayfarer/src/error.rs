//! # Game Error Types

use std::path::PathBuf;

use thiserror::Error;
use wayfarer_networking::NetError;

/// Errors in a game configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for a game config.
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Load radius outside `0..=MAX_LOAD_RADIUS`.
    #[error("load_radius must be in 0..={max}, got {value}")]
    InvalidLoadRadius {
        /// Configured radius.
        value: i32,
        /// Largest accepted radius.
        max: i32,
    },

    /// Spawn point too far from the origin.
    #[error("spawn ({x}, {y}) is outside the world limit of {limit}")]
    SpawnOutOfBounds {
        /// Configured X.
        x: i32,
        /// Configured Y.
        y: i32,
        /// Largest accepted distance per axis.
        limit: i32,
    },

    /// Viewport dimension outside `1..=MAX_SIDE`.
    #[error("viewport must be between 1x1 and {max}x{max}, got {width}x{height}")]
    InvalidViewport {
        /// Configured width.
        width: i32,
        /// Configured height.
        height: i32,
        /// Largest accepted side.
        max: i32,
    },

    /// Zero tick rate.
    #[error("tick_rate must be positive")]
    InvalidTickRate,

    /// No room for the host.
    #[error("max_players must be at least 1")]
    InvalidMaxPlayers,

    /// Bind address did not parse.
    #[error("invalid bind address {0:?}")]
    InvalidBind(String),

    /// A key entry that is not one ASCII character.
    #[error("key {key:?} for {action} must be a single ASCII character")]
    InvalidKey {
        /// Action the key was bound to.
        action: &'static str,
        /// Raw entry.
        key: String,
    },

    /// The same key bound to two actions.
    #[error("key {key:?} bound to both {first} and {second}")]
    DuplicateKey {
        /// The key.
        key: char,
        /// Action bound first.
        first: &'static str,
        /// Action bound second.
        second: &'static str,
    },
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level errors of the game binaries.
#[derive(Error, Debug)]
pub enum GameError {
    /// Bad configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Multiplayer transport failure.
    #[error(transparent)]
    Net(#[from] NetError),

    /// Terminal I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
