//! # World Manager
//!
//! Owns every resident chunk and keeps the resident set bounded around the
//! viewer while the world itself is unbounded.
//!
//! ## Window
//!
//! ```text
//!            load square (Chebyshev <= load_radius)
//!          +---+---+---+---+---+
//!          |   |   |   |   |   |      every cell here is generated on
//!          +---+---+---+---+---+      the next window update
//!          |   |   |   |   |   |
//!          +---+---+---+---+---+
//!          |   |   | V |   |   |      V = viewer's chunk
//!          +---+---+---+---+---+
//!          |   |   |   |   |   |      anything with Manhattan distance
//!          +---+---+---+---+---+      > unload_radius is evicted
//!          |   |   |   |   |   |
//!          +---+---+---+---+---+
//! ```
//!
//! `unload_radius = load_radius + 2`, so chunks just left behind stay
//! resident and walking back and forth over a border does not thrash.
//!
//! ## Residency
//!
//! `absent -> generated (resident) -> absent`. Evicted chunks are dropped.
//! Coming back regenerates them with the viewer's level *at that moment*,
//! which may differ from the level of the first visit.

use std::collections::HashMap;

use crate::chunk::Chunk;
use crate::coords::{in_world_bounds, world_to_chunk, world_to_local, ChunkCoord, WORLD_LIMIT};
use crate::seed::WorldSeed;
use crate::terrain::TerrainGenerator;
use crate::tile::TileType;
use crate::viewer::{Camera, Viewer, Viewport};

/// Streaming configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldManagerConfig {
    /// Chebyshev radius (in chunks) that is always resident.
    pub load_radius: i32,
    /// Viewport the camera centers the viewer in.
    pub viewport: Viewport,
    /// World seed.
    pub seed: WorldSeed,
}

impl WorldManagerConfig {
    /// Default load radius.
    pub const DEFAULT_LOAD_RADIUS: i32 = 2;
    /// Largest load radius; bounds the work of one window update.
    pub const MAX_LOAD_RADIUS: i32 = 16;
    /// Extra chunks kept beyond the load radius before eviction.
    pub const UNLOAD_MARGIN: i32 = 2;

    /// Manhattan radius beyond which chunks are evicted.
    #[inline]
    #[must_use]
    pub const fn unload_radius(&self) -> i32 {
        self.load_radius.saturating_add(Self::UNLOAD_MARGIN)
    }

    /// Number of chunks in the load square.
    #[inline]
    #[must_use]
    pub const fn window_size(&self) -> usize {
        let side = (2 * self.clamped().load_radius + 1) as usize;
        side * side
    }
}

impl WorldManagerConfig {
    /// Same config with the radius in `0..=MAX_LOAD_RADIUS` and a clamped
    /// viewport.
    #[must_use]
    pub const fn clamped(self) -> Self {
        let load_radius = if self.load_radius < 0 {
            0
        } else if self.load_radius > Self::MAX_LOAD_RADIUS {
            Self::MAX_LOAD_RADIUS
        } else {
            self.load_radius
        };
        Self {
            load_radius,
            viewport: self.viewport.clamped(),
            seed: self.seed,
        }
    }
}

impl Default for WorldManagerConfig {
    fn default() -> Self {
        Self {
            load_radius: Self::DEFAULT_LOAD_RADIUS,
            viewport: Viewport::default(),
            seed: WorldSeed::default(),
        }
    }
}

/// Streaming statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Chunks generated since the manager was created.
    pub generated_total: u64,
    /// Chunks evicted since the manager was created.
    pub evicted_total: u64,
    /// Number of window updates run.
    pub window_updates: u64,
    /// Chunks currently resident.
    pub resident: usize,
}

/// Outcome of [`WorldManager::try_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// The viewer moved.
    Moved {
        /// The move changed the viewer's chunk and the window was updated.
        crossed_chunk: bool,
    },
    /// The target tile is not walkable; nothing changed.
    Blocked,
}

impl MoveResult {
    /// Whether the viewer moved.
    #[inline]
    #[must_use]
    pub const fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Chunk store and streaming manager.
pub struct WorldManager {
    /// Resident chunks, stored by value.
    chunks: HashMap<ChunkCoord, Chunk>,
    /// Fills newly entered chunks.
    generator: TerrainGenerator,
    /// The viewer the window follows.
    viewer: Viewer,
    /// Viewport offset, recentered after every accepted move.
    camera: Camera,
    /// Configuration.
    config: WorldManagerConfig,
    /// Counters.
    stats: WorldStats,
}

impl WorldManager {
    /// Creates a manager and loads the initial window around `viewer`.
    ///
    /// The config is clamped (see [`WorldManagerConfig::clamped`]) and the
    /// viewer is pulled inside [`WORLD_LIMIT`].
    #[must_use]
    pub fn new(config: WorldManagerConfig, mut viewer: Viewer) -> Self {
        let config = config.clamped();
        viewer.x = clamp_to_world(viewer.x);
        viewer.y = clamp_to_world(viewer.y);
        let mut manager = Self {
            chunks: HashMap::with_capacity(config.window_size() * 2),
            generator: TerrainGenerator::new(config.seed),
            viewer,
            camera: Camera::centered_on(viewer.x, viewer.y, config.viewport),
            config,
            stats: WorldStats::default(),
        };
        manager.update_window();
        manager
    }

    /// Creates a manager with default configuration.
    #[must_use]
    pub fn with_seed(seed: WorldSeed) -> Self {
        Self::new(
            WorldManagerConfig {
                seed,
                ..WorldManagerConfig::default()
            },
            Viewer::default(),
        )
    }

    /// Chunk containing the viewer.
    #[inline]
    #[must_use]
    pub fn player_chunk_coord(&self) -> ChunkCoord {
        world_to_chunk(self.viewer.x, self.viewer.y)
    }

    /// Generates every missing chunk in the load square, then evicts every
    /// chunk farther than the unload radius.
    ///
    /// Resident chunks are never regenerated in place.
    pub fn update_window(&mut self) {
        let center = self.player_chunk_coord();
        let radius = self.config.load_radius;
        let level = self.viewer.level;

        let mut generated = 0u64;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let coord = center.offset(dx, dy);
                if !self.chunks.contains_key(&coord) {
                    let chunk = self.generator.generate(coord, level);
                    self.chunks.insert(coord, chunk);
                    generated += 1;
                }
            }
        }

        let unload_radius = self.config.unload_radius();
        let before = self.chunks.len();
        self.chunks
            .retain(|coord, _| coord.manhattan(center) <= unload_radius);
        let evicted = (before - self.chunks.len()) as u64;

        self.stats.generated_total += generated;
        self.stats.evicted_total += evicted;
        self.stats.window_updates += 1;
        self.stats.resident = self.chunks.len();

        tracing::debug!(
            center_x = center.x,
            center_y = center.y,
            generated,
            evicted,
            resident = self.chunks.len(),
            "window updated"
        );
    }

    /// Tile at a world position.
    ///
    /// Non-resident chunks answer [`TileType::SENTINEL`]; nothing is
    /// generated on demand.
    #[must_use]
    pub fn tile_at(&self, world_x: i32, world_y: i32) -> TileType {
        match self.chunks.get(&world_to_chunk(world_x, world_y)) {
            Some(chunk) => chunk.tile_at(world_to_local(world_x, world_y)),
            None => TileType::SENTINEL,
        }
    }

    /// Whether the tile at a world position can be stood on.
    #[inline]
    #[must_use]
    pub fn is_walkable_at(&self, world_x: i32, world_y: i32) -> bool {
        self.tile_at(world_x, world_y).is_walkable()
    }

    /// Moves the viewer by `(dx, dy)` if the target tile is walkable.
    ///
    /// On success the camera is recentered, and the window is updated if the
    /// viewer's chunk changed.
    ///
    /// Targets past [`WORLD_LIMIT`] are blocked like any other obstacle.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> MoveResult {
        let target = |pos: i32, delta: i32| pos.checked_add(delta).filter(|&v| in_world_bounds(v));
        let (Some(target_x), Some(target_y)) = (target(self.viewer.x, dx), target(self.viewer.y, dy)) else {
            return MoveResult::Blocked;
        };
        if !self.is_walkable_at(target_x, target_y) {
            return MoveResult::Blocked;
        }

        let old_chunk = self.player_chunk_coord();
        self.viewer.x = target_x;
        self.viewer.y = target_y;
        self.recenter_camera();

        let crossed_chunk = self.player_chunk_coord() != old_chunk;
        if crossed_chunk {
            self.update_window();
        }
        MoveResult::Moved { crossed_chunk }
    }

    /// Places the viewer without a walkability check and refreshes the
    /// camera and window. Positions are clamped to [`WORLD_LIMIT`].
    pub fn teleport(&mut self, world_x: i32, world_y: i32) {
        self.viewer.x = clamp_to_world(world_x);
        self.viewer.y = clamp_to_world(world_y);
        self.recenter_camera();
        self.update_window();
    }

    /// Sets the viewer's level. Only chunks generated afterwards see it.
    pub fn set_level(&mut self, level: i32) {
        self.viewer.level = level;
    }

    /// Sets the viewer's health.
    pub fn set_health(&mut self, health: i32) {
        self.viewer.health = health;
    }

    fn recenter_camera(&mut self) {
        self.camera = Camera::centered_on(self.viewer.x, self.viewer.y, self.config.viewport);
    }

    /// Resident chunk at `coord`.
    #[inline]
    #[must_use]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Resident chunk under the viewer.
    #[inline]
    #[must_use]
    pub fn viewer_chunk(&self) -> Option<&Chunk> {
        self.chunk(self.player_chunk_coord())
    }

    /// Whether `coord` is resident.
    #[inline]
    #[must_use]
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of resident chunks.
    #[inline]
    #[must_use]
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Resident chunks in ascending `(y, x)` coordinate order.
    #[must_use]
    pub fn chunks_sorted(&self) -> Vec<&Chunk> {
        let mut chunks: Vec<&Chunk> = self.chunks.values().collect();
        chunks.sort_unstable_by_key(|chunk| (chunk.coord.y, chunk.coord.x));
        chunks
    }

    /// Resident chunk coordinates, unordered.
    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// The viewer.
    #[inline]
    #[must_use]
    pub const fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Current camera.
    #[inline]
    #[must_use]
    pub const fn camera(&self) -> Camera {
        self.camera
    }

    /// Viewport the camera centers on.
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &WorldManagerConfig {
        &self.config
    }

    /// Counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> WorldStats {
        self.stats
    }

    /// The terrain generator.
    #[inline]
    #[must_use]
    pub const fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }
}

fn clamp_to_world(value: i32) -> i32 {
    value.clamp(-WORLD_LIMIT, WORLD_LIMIT)
}
