//! # Integration Traits
//!
//! The server never touches game state directly. The game crate implements
//! [`WorldHost`] and the server drives it, always under one coarse lock.
//!
//! ```text
//! networking defines:     game implements:
//! ┌────────────────┐      ┌────────────────────┐
//! │ trait WorldHost│  <── │ impl WorldHost for │
//! └────────────────┘      │ MultiplayerWorld   │
//!                         └────────────────────┘
//! ```

/// Index of a connected player. The host is always 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerIndex(pub u32);

impl PlayerIndex {
    /// The hosting player.
    pub const HOST: Self = Self(wayfarer_shared::HOST_INDEX);
}

impl std::fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the connection should do after an input byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Keep reading.
    Continue,
    /// The player asked to leave.
    Disconnect,
}

/// A world the server can host.
///
/// Every call happens with the world's lock held, so one call sees the
/// effects of all earlier calls from every connection.
pub trait WorldHost: Send {
    /// Adds a remote player. `None` when the world is full.
    fn join(&mut self) -> Option<PlayerIndex>;

    /// Removes a remote player.
    fn leave(&mut self, player: PlayerIndex);

    /// Applies one raw key byte from `player`.
    fn apply_input(&mut self, player: PlayerIndex, key: u8) -> Control;

    /// Encodes the current tick as a complete record frame.
    fn encode_frame(&self) -> String;

    /// Players currently present, host included.
    fn player_count(&self) -> usize;
}
