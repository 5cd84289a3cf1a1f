//! # Biome Model
//!
//! A biome decides which two tiles fill a chunk. Which biomes may appear
//! depends on the viewer's level when the chunk is generated.

use crate::tile::TileType;

/// Biome types in the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BiomeType {
    /// Open grassland. Always used around the spawn.
    #[default]
    Plains = 0,
    /// Grass broken up by trees.
    Forest = 1,
    /// Peaks with snowy passes.
    Mountains = 2,
    /// Sand with rock outcrops.
    Desert = 3,
    /// Snowfields and frozen-over water.
    Tundra = 4,
    /// Lava fields.
    Volcanic = 5,
}

/// Biomes available below level 5.
const POOL_NOVICE: [BiomeType; 2] = [BiomeType::Plains, BiomeType::Forest];

/// Biomes available from level 5 to 14.
const POOL_ADEPT: [BiomeType; 4] = [
    BiomeType::Plains,
    BiomeType::Forest,
    BiomeType::Mountains,
    BiomeType::Desert,
];

/// Biomes available from level 15.
const POOL_VETERAN: [BiomeType; 4] = [
    BiomeType::Mountains,
    BiomeType::Desert,
    BiomeType::Tundra,
    BiomeType::Volcanic,
];

impl BiomeType {
    /// All biomes in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Plains,
        Self::Forest,
        Self::Mountains,
        Self::Desert,
        Self::Tundra,
        Self::Volcanic,
    ];

    /// Tile used for ~70% of the chunk.
    #[must_use]
    pub const fn primary_tile(self) -> TileType {
        match self {
            Self::Plains | Self::Forest => TileType::Grass,
            Self::Mountains => TileType::Mountain,
            Self::Desert => TileType::Desert,
            Self::Tundra => TileType::Snow,
            Self::Volcanic => TileType::Lava,
        }
    }

    /// Tile used for the rest of the chunk.
    #[must_use]
    pub const fn secondary_tile(self) -> TileType {
        match self {
            Self::Plains => TileType::Empty,
            Self::Forest => TileType::Tree,
            Self::Mountains => TileType::Snow,
            Self::Desert | Self::Volcanic => TileType::Stone,
            Self::Tundra => TileType::Water,
        }
    }

    /// Tile painted along carved paths.
    #[must_use]
    pub const fn path_tile(self) -> TileType {
        match self {
            Self::Desert => TileType::Desert,
            _ => TileType::Empty,
        }
    }

    /// Biomes a chunk may pick from for the given viewer level.
    #[must_use]
    pub fn pool_for_level(level: i32) -> &'static [Self] {
        if level < 5 {
            &POOL_NOVICE
        } else if level < 15 {
            &POOL_ADEPT
        } else {
            &POOL_VETERAN
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plains => "Plains",
            Self::Forest => "Forest",
            Self::Mountains => "Mountains",
            Self::Desert => "Desert",
            Self::Tundra => "Tundra",
            Self::Volcanic => "Volcanic",
        }
    }
}

impl std::fmt::Display for BiomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
