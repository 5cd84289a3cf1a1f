//! # Coordinate System
//!
//! The world is an unbounded integer lattice split into square chunks.
//!
//! ```text
//!  world x:  ... -33 -32 | -31 ... -1 | 0 ... 31 | 32 ... 63 | ...
//!  chunk x:       -2     |     -1     |    0     |     1     |
//!  local x:  ...  31  0  |  1  ...  31 | 0 ... 31 | 0  ...  31 |
//! ```
//!
//! Conversions use floor division / floor modulo (`div_euclid` / `rem_euclid`)
//! so negative world coordinates land in the chunk below/left of zero, and
//! local coordinates are always in `[0, CHUNK_SIZE)`.

/// Chunk width/height in tiles.
pub const CHUNK_SIZE: usize = 32;

/// [`CHUNK_SIZE`] as a signed world-space quantity.
pub const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;

/// Total tiles per chunk.
pub const TILES_PER_CHUNK: usize = CHUNK_SIZE * CHUNK_SIZE;

/// Largest distance from the origin, per axis, a viewer may stand at.
///
/// Leaves enough headroom that chunk origins, window offsets and camera
/// cells around any in-bounds viewer stay inside `i32`.
pub const WORLD_LIMIT: i32 = 1 << 30;

/// Whether a world coordinate is within [`WORLD_LIMIT`].
#[inline]
#[must_use]
pub const fn in_world_bounds(value: i32) -> bool {
    value >= -WORLD_LIMIT && value <= WORLD_LIMIT
}

/// Chunk coordinate (identifies a chunk in the world lattice).
///
/// Equality is component-wise. The derived `Hash` is only used for map
/// indexing; the terrain seed comes from [`ChunkCoord::seed_hash`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not tiles).
    pub x: i32,
    /// Y coordinate (in chunks, not tiles).
    pub y: i32,
}

impl ChunkCoord {
    /// The chunk containing the world origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts world tile coordinates to the chunk containing them.
    #[inline]
    #[must_use]
    pub const fn from_world_pos(world_x: i32, world_y: i32) -> Self {
        Self {
            x: world_x.div_euclid(CHUNK_SIZE_I32),
            y: world_y.div_euclid(CHUNK_SIZE_I32),
        }
    }

    /// Returns the world X coordinate of the chunk's top-left tile.
    #[inline]
    #[must_use]
    pub const fn world_x(self) -> i32 {
        self.x * CHUNK_SIZE_I32
    }

    /// Returns the world Y coordinate of the chunk's top-left tile.
    #[inline]
    #[must_use]
    pub const fn world_y(self) -> i32 {
        self.y * CHUNK_SIZE_I32
    }

    /// Manhattan distance between two chunk coordinates.
    #[inline]
    #[must_use]
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Manhattan distance from the origin chunk.
    #[inline]
    #[must_use]
    pub const fn distance_from_origin(self) -> i32 {
        self.manhattan(Self::ORIGIN)
    }

    /// Returns the coordinate offset by `(dx, dy)` chunks.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Fast combining hash of both axes, used to seed terrain generation.
    ///
    /// Not cryptographic. Stable across platforms and runs.
    #[inline]
    #[must_use]
    pub const fn seed_hash(self) -> u64 {
        let hx = (self.x as u32 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let hy = (self.y as u32 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
        let mut h = hx ^ hy.rotate_left(31);
        h ^= h >> 29;
        h
    }
}

/// Position of a tile inside its chunk. Both axes are in `[0, CHUNK_SIZE)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// Column inside the chunk.
    pub x: usize,
    /// Row inside the chunk.
    pub y: usize,
}

impl LocalPos {
    /// Converts world tile coordinates to the position inside their chunk.
    #[inline]
    #[must_use]
    pub const fn from_world_pos(world_x: i32, world_y: i32) -> Self {
        Self {
            x: world_x.rem_euclid(CHUNK_SIZE_I32) as usize,
            y: world_y.rem_euclid(CHUNK_SIZE_I32) as usize,
        }
    }
}

/// Floor-divides a world position into its chunk coordinate.
#[inline]
#[must_use]
pub const fn world_to_chunk(world_x: i32, world_y: i32) -> ChunkCoord {
    ChunkCoord::from_world_pos(world_x, world_y)
}

/// Floor-modulos a world position into its in-chunk position.
#[inline]
#[must_use]
pub const fn world_to_local(world_x: i32, world_y: i32) -> LocalPos {
    LocalPos::from_world_pos(world_x, world_y)
}

/// Inverse of [`world_to_chunk`] + [`world_to_local`].
#[inline]
#[must_use]
pub const fn chunk_local_to_world(chunk: ChunkCoord, local: LocalPos) -> (i32, i32) {
    (
        chunk.world_x() + local.x as i32,
        chunk.world_y() + local.y as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_coord_from_world() {
        assert_eq!(world_to_chunk(0, 0), ChunkCoord::new(0, 0));
        assert_eq!(world_to_chunk(31, 31), ChunkCoord::new(0, 0));
        assert_eq!(world_to_chunk(32, 32), ChunkCoord::new(1, 1));
        assert_eq!(world_to_chunk(-1, -1), ChunkCoord::new(-1, -1));
        assert_eq!(world_to_chunk(-32, -32), ChunkCoord::new(-1, -1));
        assert_eq!(world_to_chunk(-33, -33), ChunkCoord::new(-2, -2));
    }

    #[test]
    fn test_negative_world_maps_to_last_local() {
        let chunk = world_to_chunk(-1, 5);
        let local = world_to_local(-1, 5);
        assert_eq!(chunk, ChunkCoord::new(-1, 0));
        assert_eq!(local, LocalPos { x: 31, y: 5 });
    }

    #[test]
    fn test_round_trip_over_range() {
        for wy in -100..100 {
            for wx in -100..100 {
                let chunk = world_to_chunk(wx, wy);
                let local = world_to_local(wx, wy);
                assert!(local.x < CHUNK_SIZE && local.y < CHUNK_SIZE);
                assert_eq!(chunk_local_to_world(chunk, local), (wx, wy));
            }
        }
    }

    #[test]
    fn test_round_trip_extremes() {
        for &w in &[i32::MIN, i32::MIN + 1, -1_000_003, 1_000_003, i32::MAX - 1, i32::MAX] {
            let chunk = world_to_chunk(w, w);
            let local = world_to_local(w, w);
            assert!(local.x < CHUNK_SIZE);
            assert_eq!(chunk_local_to_world(chunk, local), (w, w));
        }
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(ChunkCoord::new(0, 0).manhattan(ChunkCoord::new(-2, 3)), 5);
        assert_eq!(ChunkCoord::new(1, 1).distance_from_origin(), 2);
    }

    #[test]
    fn test_seed_hash_distinguishes_axes() {
        assert_ne!(
            ChunkCoord::new(1, 2).seed_hash(),
            ChunkCoord::new(2, 1).seed_hash()
        );
        assert_eq!(
            ChunkCoord::new(-7, 9).seed_hash(),
            ChunkCoord::new(-7, 9).seed_hash()
        );
    }
}
