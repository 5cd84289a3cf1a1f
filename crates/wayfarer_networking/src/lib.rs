//! # WAYFARER Networking
//!
//! Multiplayer transport for a shared WAYFARER world.
//!
//! ## Architecture
//!
//! - One host owns the world and is player 0
//! - Remote players connect over TCP and send raw key bytes
//! - The server broadcasts the whole resident world as a text frame at a
//!   fixed rate
//!
//! ## Modules
//!
//! - `integration`: the [`WorldHost`] seam the game implements
//! - `server`: listener, per-connection tasks, broadcast ticker
//! - `client`: frame-reading client

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;
pub mod integration;
pub mod server;

pub use client::GameClient;
pub use error::{NetError, NetResult};
pub use integration::{Control, PlayerIndex, WorldHost};
pub use server::{GameServer, ServerConfig};
