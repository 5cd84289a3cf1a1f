//! # Terrain Generator
//!
//! Turns `(chunk coordinate, viewer level)` into a fully populated chunk.
//!
//! ## Passes
//!
//! 1. Biome: Plains within distance 1 of the origin, otherwise a uniform
//!    pick from the level-tiered pool.
//! 2. Difficulty: `level + distance / 3`.
//! 3. Base fill: 70% primary tile, 30% secondary tile, per tile.
//! 4. Paths: 2-5 random walks of 5-15 cardinal steps.
//! 5. Features: 30% chance of one square pond, then stone scattered with
//!    probability `min(0.4, difficulty * 0.02)`.
//!
//! Every draw comes from one stream seeded by the chunk coordinate, in the
//! order above. The walls laid down by [`Chunk::new`] are overwritten by the
//! base fill.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::biome::BiomeType;
use crate::chunk::Chunk;
use crate::coords::{ChunkCoord, CHUNK_SIZE};
use crate::seed::WorldSeed;
use crate::tile::TileType;

/// Chunk generator.
///
/// Holds nothing but the world seed, so it is `Copy` and freely shared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainGenerator {
    /// World seed mixed into every chunk stream.
    seed: WorldSeed,
}

impl TerrainGenerator {
    /// Chunks closer than this to the origin are always Plains.
    pub const SAFE_SPAWN_DISTANCE: i32 = 2;
    /// Chance a tile gets the biome's primary tile.
    const PRIMARY_CHANCE: f64 = 0.7;
    /// Number of random walks carved per chunk.
    const PATH_COUNT: std::ops::RangeInclusive<usize> = 2..=5;
    /// Steps per random walk.
    const PATH_LENGTH: std::ops::RangeInclusive<usize> = 5..=15;
    /// Chance of a pond.
    const WATER_CHANCE: f64 = 0.3;
    /// Pond side length.
    const WATER_SIZE: std::ops::RangeInclusive<usize> = 2..=4;
    /// Stone chance added per difficulty level.
    const STONE_PER_DIFFICULTY: f64 = 0.02;
    /// Upper bound on stone chance.
    const STONE_MAX: f64 = 0.4;

    /// Cardinal steps: up, down, left, right.
    const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

    /// Creates a new generator for a world seed.
    #[must_use]
    pub const fn new(seed: WorldSeed) -> Self {
        Self { seed }
    }

    /// Returns the world seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Generates the chunk at `coord` for a viewer at `level`.
    ///
    /// Pure: identical `(seed, coord, level)` always yields an identical chunk.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord, level: i32) -> Chunk {
        let mut rng = self.seed.chunk_rng(coord);
        let mut chunk = Chunk::new(coord);

        let distance = coord.distance_from_origin();
        let biome = Self::pick_biome(&mut rng, distance, level);
        let difficulty_level = level.saturating_add(distance / 3);

        Self::fill_base(&mut rng, &mut chunk, biome);
        Self::carve_paths(&mut rng, &mut chunk, biome);
        Self::place_water(&mut rng, &mut chunk);
        Self::scatter_stone(&mut rng, &mut chunk, difficulty_level);

        chunk.mark_generated(biome, difficulty_level);
        tracing::trace!(
            x = coord.x,
            y = coord.y,
            biome = %biome,
            difficulty = difficulty_level,
            "chunk generated"
        );
        chunk
    }

    /// Stone probability for a difficulty level.
    #[must_use]
    pub fn stone_chance(difficulty_level: i32) -> f64 {
        (f64::from(difficulty_level) * Self::STONE_PER_DIFFICULTY).clamp(0.0, Self::STONE_MAX)
    }

    fn pick_biome(rng: &mut ChaCha8Rng, distance: i32, level: i32) -> BiomeType {
        if distance < Self::SAFE_SPAWN_DISTANCE {
            return BiomeType::Plains;
        }
        let pool = BiomeType::pool_for_level(level);
        pool[rng.gen_range(0..pool.len())]
    }

    fn fill_base(rng: &mut ChaCha8Rng, chunk: &mut Chunk, biome: BiomeType) {
        let primary = biome.primary_tile();
        let secondary = biome.secondary_tile();
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let tile = if rng.gen::<f64>() < Self::PRIMARY_CHANCE {
                    primary
                } else {
                    secondary
                };
                chunk.set_tile(x, y, tile);
            }
        }
    }

    /// Random walks, clamped to the chunk edge.
    fn carve_paths(rng: &mut ChaCha8Rng, chunk: &mut Chunk, biome: BiomeType) {
        let path_tile = biome.path_tile();
        let max = CHUNK_SIZE as i32 - 1;

        let paths = rng.gen_range(Self::PATH_COUNT);
        for _ in 0..paths {
            let mut x = rng.gen_range(0..CHUNK_SIZE) as i32;
            let mut y = rng.gen_range(0..CHUNK_SIZE) as i32;
            let length = rng.gen_range(Self::PATH_LENGTH);

            for _ in 0..length {
                chunk.set_tile(x as usize, y as usize, path_tile);
                let (dx, dy) = Self::DIRECTIONS[rng.gen_range(0..Self::DIRECTIONS.len())];
                x = (x + dx).clamp(0, max);
                y = (y + dy).clamp(0, max);
            }
        }
    }

    /// One square pond away from the chunk edge.
    fn place_water(rng: &mut ChaCha8Rng, chunk: &mut Chunk) {
        if rng.gen::<f64>() >= Self::WATER_CHANCE {
            return;
        }
        let size = rng.gen_range(Self::WATER_SIZE);
        let left = rng.gen_range(1..CHUNK_SIZE - size);
        let top = rng.gen_range(1..CHUNK_SIZE - size);
        for y in top..top + size {
            for x in left..left + size {
                chunk.set_tile(x, y, TileType::Water);
            }
        }
    }

    fn scatter_stone(rng: &mut ChaCha8Rng, chunk: &mut Chunk, difficulty_level: i32) {
        let chance = Self::stone_chance(difficulty_level);
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                if rng.gen::<f64>() < chance {
                    chunk.set_tile(x, y, TileType::Stone);
                }
            }
        }
    }
}
