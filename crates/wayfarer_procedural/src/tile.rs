//! # Tile Model
//!
//! Closed set of terrain kinds with immutable glyph, color and walkability.
//! Properties come from static tables indexed by the tile's ordinal.

/// One of the 16 standard terminal colors.
///
/// Renderers map these onto whatever output mechanism they use; nothing in
/// this crate knows about escape sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    /// Black.
    Black = 0,
    /// Red.
    Red = 1,
    /// Green.
    Green = 2,
    /// Yellow.
    Yellow = 3,
    /// Blue.
    Blue = 4,
    /// Magenta.
    Magenta = 5,
    /// Cyan.
    Cyan = 6,
    /// White.
    #[default]
    White = 7,
    /// Bright black (dark gray).
    BrightBlack = 8,
    /// Bright red.
    BrightRed = 9,
    /// Bright green.
    BrightGreen = 10,
    /// Bright yellow.
    BrightYellow = 11,
    /// Bright blue.
    BrightBlue = 12,
    /// Bright magenta.
    BrightMagenta = 13,
    /// Bright cyan.
    BrightCyan = 14,
    /// Bright white.
    BrightWhite = 15,
}

/// Terrain kind of a single tile.
///
/// The discriminant is the wire ordinal; do not reorder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileType {
    /// Bare ground.
    #[default]
    Empty = 0,
    /// Wall. Also the sentinel for unknown or unloaded tiles.
    Wall = 1,
    /// Grass.
    Grass = 2,
    /// Stone outcrop.
    Stone = 3,
    /// Water.
    Water = 4,
    /// Tree.
    Tree = 5,
    /// Mountain.
    Mountain = 6,
    /// Sand.
    Desert = 7,
    /// Snow.
    Snow = 8,
    /// Lava.
    Lava = 9,
}

/// Number of tile kinds.
pub const TILE_TYPE_COUNT: usize = 10;

const GLYPHS: [char; TILE_TYPE_COUNT] = ['.', '#', '"', 'o', '~', 'T', '^', ':', '*', '%'];

const COLORS: [Color; TILE_TYPE_COUNT] = [
    Color::BrightBlack,
    Color::White,
    Color::Green,
    Color::BrightBlack,
    Color::Blue,
    Color::BrightGreen,
    Color::White,
    Color::Yellow,
    Color::BrightWhite,
    Color::Red,
];

const WALKABLE: [bool; TILE_TYPE_COUNT] = [
    true,  // Empty
    false, // Wall
    true,  // Grass
    false, // Stone
    false, // Water
    false, // Tree
    false, // Mountain
    true,  // Desert
    true,  // Snow
    false, // Lava
];

impl TileType {
    /// All tile kinds in ordinal order.
    pub const ALL: [Self; TILE_TYPE_COUNT] = [
        Self::Empty,
        Self::Wall,
        Self::Grass,
        Self::Stone,
        Self::Water,
        Self::Tree,
        Self::Mountain,
        Self::Desert,
        Self::Snow,
        Self::Lava,
    ];

    /// Impassable tile returned for anything outside loaded terrain.
    ///
    /// Callers must not treat it as real gameplay data.
    pub const SENTINEL: Self = Self::Wall;

    /// Wire ordinal of this tile.
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Tile for a wire ordinal, if it names one.
    #[inline]
    #[must_use]
    pub const fn from_ordinal(value: u8) -> Option<Self> {
        if (value as usize) < TILE_TYPE_COUNT {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Display glyph.
    #[inline]
    #[must_use]
    pub const fn glyph(self) -> char {
        GLYPHS[self as usize]
    }

    /// Display color.
    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        COLORS[self as usize]
    }

    /// Whether a viewer may stand on this tile.
    #[inline]
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        WALKABLE[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_four_tiles_walkable() {
        let walkable: Vec<TileType> = TileType::ALL
            .iter()
            .copied()
            .filter(|t| t.is_walkable())
            .collect();
        assert_eq!(
            walkable,
            vec![TileType::Empty, TileType::Grass, TileType::Desert, TileType::Snow]
        );
    }

    #[test]
    fn test_ordinal_round_trip() {
        for tile in TileType::ALL {
            assert_eq!(TileType::from_ordinal(tile.ordinal()), Some(tile));
        }
        assert_eq!(TileType::from_ordinal(10), None);
    }

    #[test]
    fn test_sentinel_blocks() {
        assert!(!TileType::SENTINEL.is_walkable());
    }

    #[test]
    fn test_glyphs_unique() {
        let mut glyphs: Vec<char> = TileType::ALL.iter().map(|t| t.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), TILE_TYPE_COUNT);
    }
}
