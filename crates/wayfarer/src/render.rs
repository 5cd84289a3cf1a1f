//! # Render Projection
//!
//! Projects the streamed world onto an abstract [`Surface`]: one glyph and
//! one color per viewport cell, then player markers on top. The HUD line is
//! a plain [`Display`] value.
//!
//! No escape sequences are produced here. A terminal front end implements
//! [`Surface`] and maps [`Color`] however it likes.
//!
//! [`Display`]: std::fmt::Display

use std::fmt;

use wayfarer_procedural::{BiomeType, Color, Viewport, WorldManager};

/// Glyph of the local viewer.
pub const VIEWER_GLYPH: char = '@';
/// Color of the local viewer.
pub const VIEWER_COLOR: Color = Color::BrightYellow;
/// Color of other players.
pub const REMOTE_COLOR: Color = Color::BrightCyan;

/// Something cells can be drawn into.
pub trait Surface {
    /// Columns.
    fn width(&self) -> i32;
    /// Rows.
    fn height(&self) -> i32;
    /// Writes a glyph. Out-of-range cells are ignored.
    fn put(&mut self, x: i32, y: i32, glyph: char);
    /// Sets a cell's color. Out-of-range cells are ignored.
    fn fill_color(&mut self, x: i32, y: i32, color: Color);
}

/// Marker for a player index: `@` for the host, `1`-`9`, then `+`.
#[must_use]
pub fn player_glyph(index: u32) -> char {
    match index {
        0 => VIEWER_GLYPH,
        1..=9 => char::from_digit(index, 10).unwrap_or('+'),
        _ => '+',
    }
}

/// Draws every viewport cell from the world's tile query.
///
/// Cells outside resident chunks show the sentinel wall.
pub fn draw_tiles<S: Surface + ?Sized>(world: &WorldManager, surface: &mut S) {
    let camera = world.camera();
    let viewport = world.viewport();
    let width = viewport.width.min(surface.width());
    let height = viewport.height.min(surface.height());

    for sy in 0..height {
        for sx in 0..width {
            let (wx, wy) = camera.to_world(sx, sy);
            let tile = world.tile_at(wx, wy);
            surface.put(sx, sy, tile.glyph());
            surface.fill_color(sx, sy, tile.color());
        }
    }
}

/// Draws a marker at a world position if the camera shows it.
///
/// Returns whether anything was drawn.
pub fn draw_marker<S: Surface + ?Sized>(
    world: &WorldManager,
    surface: &mut S,
    world_pos: (i32, i32),
    glyph: char,
    color: Color,
) -> bool {
    match world.camera().to_screen(world_pos.0, world_pos.1, world.viewport()) {
        Some((sx, sy)) => {
            surface.put(sx, sy, glyph);
            surface.fill_color(sx, sy, color);
            true
        }
        None => false,
    }
}

/// Tiles plus the viewer's own marker.
pub fn draw_world<S: Surface + ?Sized>(world: &WorldManager, surface: &mut S) {
    draw_tiles(world, surface);
    let viewer = world.viewer();
    draw_marker(world, surface, (viewer.x, viewer.y), VIEWER_GLYPH, VIEWER_COLOR);
}

/// In-memory glyph and color grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSurface {
    width: i32,
    height: i32,
    glyphs: Vec<char>,
    colors: Vec<Color>,
}

impl TextSurface {
    /// Blank surface. Each side is clamped to `0..=Viewport::MAX_SIDE`.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(0, Viewport::MAX_SIDE);
        let height = height.clamp(0, Viewport::MAX_SIDE);
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            glyphs: vec![' '; cells],
            colors: vec![Color::default(); cells],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Glyph at a cell.
    #[must_use]
    pub fn glyph(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|i| self.glyphs[i])
    }

    /// Color at a cell.
    #[must_use]
    pub fn color(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.colors[i])
    }

    /// One row as a string; empty for rows out of range.
    #[must_use]
    pub fn row_string(&self, y: i32) -> String {
        if y < 0 || y >= self.height {
            return String::new();
        }
        let start = (y * self.width) as usize;
        self.glyphs[start..start + self.width as usize].iter().collect()
    }

    /// Resets every cell to a blank.
    pub fn clear(&mut self) {
        self.glyphs.fill(' ');
        self.colors.fill(Color::default());
    }
}

impl Surface for TextSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn put(&mut self, x: i32, y: i32, glyph: char) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    fn fill_color(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.colors[i] = color;
        }
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            writeln!(f, "{}", self.row_string(y))?;
        }
        Ok(())
    }
}

/// Status line contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudInfo {
    /// Viewer health.
    pub health: i32,
    /// Viewer world X.
    pub x: i32,
    /// Viewer world Y.
    pub y: i32,
    /// Chunk X under the viewer.
    pub chunk_x: i32,
    /// Chunk Y under the viewer.
    pub chunk_y: i32,
    /// Biome of that chunk, if resident.
    pub biome: Option<BiomeType>,
    /// Resident chunk count.
    pub resident_chunks: usize,
    /// Difficulty of that chunk, if resident.
    pub difficulty: Option<i32>,
}

impl HudInfo {
    /// Reads the HUD fields from a world.
    #[must_use]
    pub fn from_world(world: &WorldManager) -> Self {
        let viewer = world.viewer();
        let coord = world.player_chunk_coord();
        let chunk = world.viewer_chunk();
        Self {
            health: viewer.health,
            x: viewer.x,
            y: viewer.y,
            chunk_x: coord.x,
            chunk_y: coord.y,
            biome: chunk.map(|c| c.biome()),
            resident_chunks: world.loaded_chunk_count(),
            difficulty: chunk.map(|c| c.difficulty_level()),
        }
    }
}

impl fmt::Display for HudInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP:{} Pos:({},{}) Chunk:({},{}) ",
            self.health, self.x, self.y, self.chunk_x, self.chunk_y
        )?;
        match self.biome {
            Some(biome) => write!(f, "Biome:{biome} ")?,
            None => f.write_str("Biome:? ")?,
        }
        write!(f, "Chunks:{} ", self.resident_chunks)?;
        match self.difficulty {
            Some(difficulty) => write!(f, "Diff:{difficulty}"),
            None => f.write_str("Diff:?"),
        }
    }
}
