//! # Multiplayer World
//!
//! The host's [`Session`] shared with remote players.
//!
//! Remote players live inside the host's streamed world: they spawn on the
//! host, pass the same walkability gate against the host's resident chunks
//! and never stream chunks themselves. Tiles outside the host's window
//! answer the impassable sentinel, so remote players cannot leave it.
//!
//! The server wraps this in one `parking_lot::Mutex`; each input and each
//! broadcast runs with the whole world locked.

use std::collections::BTreeMap;

use tracing::{debug, info};
use wayfarer_networking::{Control, PlayerIndex, WorldHost};
use wayfarer_procedural::TILES_PER_CHUNK;
use wayfarer_shared::{FrameEncoder, PlayerRecord, TileRecord};

use crate::input::{Action, InputOutcome};
use crate::render::{self, player_glyph, Surface, REMOTE_COLOR, VIEWER_COLOR, VIEWER_GLYPH};
use crate::session::Session;

/// Position of a remote player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemotePlayer {
    /// World X.
    pub x: i32,
    /// World Y.
    pub y: i32,
}

/// A host session plus remote players.
pub struct MultiplayerWorld {
    host: Session,
    remotes: BTreeMap<u32, RemotePlayer>,
    max_players: usize,
}

impl MultiplayerWorld {
    /// Wraps a host session. `max_players` counts the host.
    #[must_use]
    pub fn new(host: Session, max_players: usize) -> Self {
        Self {
            host,
            remotes: BTreeMap::new(),
            max_players: max_players.max(1),
        }
    }

    /// The host session.
    #[must_use]
    pub const fn host(&self) -> &Session {
        &self.host
    }

    /// Mutable host session.
    pub fn host_mut(&mut self) -> &mut Session {
        &mut self.host
    }

    /// A remote player's position.
    #[must_use]
    pub fn remote(&self, player: PlayerIndex) -> Option<RemotePlayer> {
        self.remotes.get(&player.0).copied()
    }

    /// Remote players in index order.
    pub fn remotes(&self) -> impl Iterator<Item = (PlayerIndex, RemotePlayer)> + '_ {
        self.remotes.iter().map(|(&i, &p)| (PlayerIndex(i), p))
    }

    /// Capacity, host included.
    #[must_use]
    pub const fn max_players(&self) -> usize {
        self.max_players
    }

    /// Lowest index not in use, starting at 1.
    fn free_index(&self) -> u32 {
        let mut index = 1;
        for &used in self.remotes.keys() {
            if used != index {
                break;
            }
            index += 1;
        }
        index
    }

    /// Moves or otherwise acts for a remote player.
    ///
    /// Unknown players get [`InputOutcome::Unbound`].
    pub fn apply_remote_action(&mut self, player: PlayerIndex, action: Action) -> InputOutcome {
        let world = self.host.world();
        let Some(remote) = self.remotes.get_mut(&player.0) else {
            return InputOutcome::Unbound;
        };
        let Some((dx, dy)) = action.delta() else {
            return match action {
                Action::Quit => InputOutcome::Quit,
                _ => InputOutcome::Waited,
            };
        };

        let target = remote.x.checked_add(dx).zip(remote.y.checked_add(dy));
        if let Some((tx, ty)) = target.filter(|&(x, y)| world.is_walkable_at(x, y)) {
            remote.x = tx;
            remote.y = ty;
            InputOutcome::Moved
        } else {
            debug!("Player {} blocked at ({}, {})", player, remote.x, remote.y);
            InputOutcome::Blocked
        }
    }

    /// Draws the host's view with every visible player on top. The host is
    /// drawn last.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let world = self.host.world();
        render::draw_tiles(world, surface);
        for (index, remote) in self.remotes() {
            render::draw_marker(world, surface, (remote.x, remote.y), player_glyph(index.0), REMOTE_COLOR);
        }
        let viewer = world.viewer();
        render::draw_marker(world, surface, (viewer.x, viewer.y), VIEWER_GLYPH, VIEWER_COLOR);
    }
}

impl WorldHost for MultiplayerWorld {
    fn join(&mut self) -> Option<PlayerIndex> {
        if self.player_count() >= self.max_players {
            return None;
        }
        let index = self.free_index();
        let viewer = self.host.viewer();
        self.remotes.insert(index, RemotePlayer { x: viewer.x, y: viewer.y });
        info!("Player #{} spawned at ({}, {})", index, viewer.x, viewer.y);
        Some(PlayerIndex(index))
    }

    fn leave(&mut self, player: PlayerIndex) {
        self.remotes.remove(&player.0);
    }

    fn apply_input(&mut self, player: PlayerIndex, key: u8) -> Control {
        let outcome = if player == PlayerIndex::HOST {
            self.host.process_input(key)
        } else {
            match self.host.bindings().action_for(key) {
                Some(action) => self.apply_remote_action(player, action),
                None => InputOutcome::Unbound,
            }
        };
        match outcome {
            InputOutcome::Quit => Control::Disconnect,
            _ => Control::Continue,
        }
    }

    /// Tiles in chunk order (y, then x), row-major inside each chunk, then
    /// the host, then remote players by index.
    fn encode_frame(&self) -> String {
        let world = self.host.world();
        let chunks = world.chunks_sorted();
        let mut encoder = FrameEncoder::with_capacity(chunks.len() * TILES_PER_CHUNK + self.player_count());

        for chunk in chunks {
            let (base_x, base_y) = (chunk.coord.world_x(), chunk.coord.world_y());
            let difficulty = chunk.difficulty_level();
            for (x, y, tile) in chunk.iter() {
                encoder.push_tile(TileRecord {
                    world_x: base_x + x as i32,
                    world_y: base_y + y as i32,
                    tile: tile.ordinal(),
                    difficulty,
                });
            }
        }

        let viewer = self.host.viewer();
        encoder.push_player(PlayerRecord {
            index: PlayerIndex::HOST.0,
            x: viewer.x,
            y: viewer.y,
            is_host: true,
        });
        for (index, remote) in self.remotes() {
            encoder.push_player(PlayerRecord {
                index: index.0,
                x: remote.x,
                y: remote.y,
                is_host: false,
            });
        }
        encoder.finish()
    }

    fn player_count(&self) -> usize {
        1 + self.remotes.len()
    }
}
