//! # WAYFARER Procedural World
//!
//! Infinite, deterministically generated tile world streamed around a
//! moving viewer.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same seed, coordinate and level give the same chunk
//! 2. **Chunked**: the world is generated in fixed 32x32 chunks
//! 3. **Streamable**: chunks are generated on entry and dropped on exit
//! 4. **Total**: every world coordinate has an answer, unloaded ones are walls
//!
//! ## Core Components
//!
//! - `coords`: world <-> chunk <-> local conversions
//! - `TileType` / `BiomeType`: static property tables
//! - `TerrainGenerator`: produces chunks from a coordinate-seeded stream
//! - `WorldManager`: load/evict window, tile queries, viewer movement
//!
//! ## Example
//!
//! ```rust
//! use wayfarer_procedural::{Viewer, WorldManager, WorldManagerConfig};
//!
//! let mut world = WorldManager::new(WorldManagerConfig::default(), Viewer::new(16, 16));
//! assert_eq!(world.loaded_chunk_count(), 25);
//!
//! // Blocked moves leave the viewer where it was
//! let result = world.try_move(1, 0);
//! let _ = result.moved();
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod chunk;
pub mod coords;
pub mod seed;
pub mod terrain;
pub mod tile;
pub mod viewer;
pub mod world_manager;

pub use biome::BiomeType;
pub use chunk::Chunk;
pub use coords::{
    chunk_local_to_world, in_world_bounds, world_to_chunk, world_to_local, ChunkCoord, LocalPos,
    CHUNK_SIZE, CHUNK_SIZE_I32, TILES_PER_CHUNK, WORLD_LIMIT,
};
pub use seed::WorldSeed;
pub use terrain::TerrainGenerator;
pub use tile::{Color, TileType};
pub use viewer::{Camera, Viewer, Viewport};
pub use world_manager::{MoveResult, WorldManager, WorldManagerConfig, WorldStats};
