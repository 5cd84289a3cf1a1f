//! # World Seed
//!
//! All terrain derives from one `u64`. Each chunk gets its own stream by
//! mixing the world seed with the chunk coordinate's hash, so chunks can be
//! generated in any order and regenerated after eviction.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::coords::ChunkCoord;

/// World seed for deterministic generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Seed of the pseudorandom stream for one chunk.
    #[inline]
    #[must_use]
    pub const fn for_chunk(self, coord: ChunkCoord) -> Self {
        self.derive(coord.seed_hash())
    }

    /// Pseudorandom stream for one chunk.
    #[must_use]
    pub fn chunk_rng(self, coord: ChunkCoord) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.for_chunk(coord).value())
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(0xDEAD_BEEF)
    }
}
