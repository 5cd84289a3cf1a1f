//! # Chunk
//!
//! A fixed 32x32 block of tiles plus the biome and difficulty it was
//! generated with. The grid is stored inline, so a chunk is one flat value
//! that lives directly in the store's map.

use crate::biome::BiomeType;
use crate::coords::{ChunkCoord, LocalPos, CHUNK_SIZE};
use crate::tile::TileType;

/// A chunk of world data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk position in the world.
    pub coord: ChunkCoord,
    /// Tile data (indexed as [y][x]).
    tiles: [[TileType; CHUNK_SIZE]; CHUNK_SIZE],
    /// Biome picked at generation time.
    biome: BiomeType,
    /// Difficulty derived from viewer level and distance at generation time.
    difficulty_level: i32,
    /// Whether the terrain generator has filled this chunk.
    generated: bool,
}

impl Chunk {
    /// Creates an ungenerated chunk: walls around the border, empty inside.
    #[must_use]
    pub fn new(coord: ChunkCoord) -> Self {
        let mut tiles = [[TileType::Empty; CHUNK_SIZE]; CHUNK_SIZE];
        for (y, row) in tiles.iter_mut().enumerate() {
            for (x, tile) in row.iter_mut().enumerate() {
                if x == 0 || y == 0 || x == CHUNK_SIZE - 1 || y == CHUNK_SIZE - 1 {
                    *tile = TileType::Wall;
                }
            }
        }

        Self {
            coord,
            tiles,
            biome: BiomeType::Plains,
            difficulty_level: 0,
            generated: false,
        }
    }

    /// Gets a tile at local coordinates.
    ///
    /// Out-of-range coordinates return [`TileType::SENTINEL`].
    #[inline]
    #[must_use]
    pub fn tile(&self, x: usize, y: usize) -> TileType {
        if x < CHUNK_SIZE && y < CHUNK_SIZE {
            self.tiles[y][x]
        } else {
            TileType::SENTINEL
        }
    }

    /// Gets a tile at a local position.
    #[inline]
    #[must_use]
    pub fn tile_at(&self, local: LocalPos) -> TileType {
        self.tile(local.x, local.y)
    }

    /// Sets a tile at local coordinates. Out-of-range writes are ignored.
    #[inline]
    pub fn set_tile(&mut self, x: usize, y: usize, tile: TileType) {
        if x < CHUNK_SIZE && y < CHUNK_SIZE {
            self.tiles[y][x] = tile;
        }
    }

    /// Row-major view of the grid.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[[TileType; CHUNK_SIZE]; CHUNK_SIZE] {
        &self.tiles
    }

    /// Iterates `(local_x, local_y, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileType)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, &tile)| (x, y, tile))
        })
    }

    /// Number of tiles of the given kind.
    #[must_use]
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().flatten().filter(|&&t| t == tile).count()
    }

    /// Biome picked at generation time.
    #[inline]
    #[must_use]
    pub const fn biome(&self) -> BiomeType {
        self.biome
    }

    /// Difficulty recorded at generation time.
    #[inline]
    #[must_use]
    pub const fn difficulty_level(&self) -> i32 {
        self.difficulty_level
    }

    /// Whether the terrain generator has filled this chunk.
    #[inline]
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.generated
    }

    /// Stamps generation results. Only the terrain generator calls this.
    pub(crate) fn mark_generated(&mut self, biome: BiomeType, difficulty_level: i32) {
        self.biome = biome;
        self.difficulty_level = difficulty_level;
        self.generated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_walled() {
        let chunk = Chunk::new(ChunkCoord::new(3, -4));
        assert!(!chunk.is_generated());
        assert_eq!(chunk.tile(0, 0), TileType::Wall);
        assert_eq!(chunk.tile(CHUNK_SIZE - 1, 10), TileType::Wall);
        assert_eq!(chunk.tile(10, CHUNK_SIZE - 1), TileType::Wall);
        assert_eq!(chunk.tile(1, 1), TileType::Empty);
        assert_eq!(chunk.count(TileType::Wall), 4 * (CHUNK_SIZE - 1));
    }

    #[test]
    fn test_out_of_range_is_sentinel() {
        let mut chunk = Chunk::new(ChunkCoord::ORIGIN);
        chunk.set_tile(5, 5, TileType::Grass);
        assert_eq!(chunk.tile(5, 5), TileType::Grass);
        assert_eq!(chunk.tile(CHUNK_SIZE, 5), TileType::SENTINEL);
        assert_eq!(chunk.tile(5, usize::MAX), TileType::SENTINEL);

        // Ignored, must not panic
        chunk.set_tile(CHUNK_SIZE, CHUNK_SIZE, TileType::Lava);
        assert_eq!(chunk.count(TileType::Lava), 0);
    }

    #[test]
    fn test_iter_covers_grid() {
        let chunk = Chunk::new(ChunkCoord::ORIGIN);
        assert_eq!(chunk.iter().count(), CHUNK_SIZE * CHUNK_SIZE);
        let (x, y, _) = chunk.iter().nth(CHUNK_SIZE + 2).unwrap_or_default();
        assert_eq!((x, y), (2, 1));
    }
}
