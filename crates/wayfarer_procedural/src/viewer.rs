//! # Viewer & Camera
//!
//! The viewer is the one entity the streaming window follows. Its level is
//! read whenever a chunk is generated; its position drives the window and
//! the camera.

use crate::coords::ChunkCoord;

/// The player the world streams around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewer {
    /// World X.
    pub x: i32,
    /// World Y.
    pub y: i32,
    /// Level, owned by the external stat system.
    pub level: i32,
    /// Health, owned by the external stat system. Only reported.
    pub health: i32,
}

impl Viewer {
    /// Starting health.
    pub const DEFAULT_HEALTH: i32 = 100;

    /// Creates a level-1 viewer at full health.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            level: 1,
            health: Self::DEFAULT_HEALTH,
        }
    }

    /// Sets the level.
    #[must_use]
    pub const fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Chunk containing the viewer.
    #[inline]
    #[must_use]
    pub const fn chunk(&self) -> ChunkCoord {
        ChunkCoord::from_world_pos(self.x, self.y)
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// World-space top-left corner of the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Camera {
    /// World X of the leftmost viewport column.
    pub x: i32,
    /// World Y of the topmost viewport row.
    pub y: i32,
}

impl Camera {
    /// Camera that puts `(x, y)` at the viewport center.
    #[inline]
    #[must_use]
    pub const fn centered_on(x: i32, y: i32, viewport: Viewport) -> Self {
        Self {
            x: x - viewport.width / 2,
            y: y - viewport.height / 2,
        }
    }

    /// World position under a viewport cell.
    #[inline]
    #[must_use]
    pub const fn to_world(self, screen_x: i32, screen_y: i32) -> (i32, i32) {
        (self.x + screen_x, self.y + screen_y)
    }

    /// Viewport cell showing a world position, if it is on screen.
    #[inline]
    #[must_use]
    pub const fn to_screen(self, world_x: i32, world_y: i32, viewport: Viewport) -> Option<(i32, i32)> {
        let sx = world_x - self.x;
        let sy = world_y - self.y;
        if sx >= 0 && sy >= 0 && sx < viewport.width && sy < viewport.height {
            Some((sx, sy))
        } else {
            None
        }
    }
}

/// Viewport size in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Columns.
    pub width: i32,
    /// Rows.
    pub height: i32,
}

impl Viewport {
    /// Largest width or height a viewport may have.
    pub const MAX_SIDE: i32 = 1024;

    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Same viewport with each side forced into `1..=MAX_SIDE`.
    #[must_use]
    pub const fn clamped(self) -> Self {
        Self {
            width: clamp_side(self.width),
            height: clamp_side(self.height),
        }
    }
}

const fn clamp_side(side: i32) -> i32 {
    if side < 1 {
        1
    } else if side > Viewport::MAX_SIDE {
        Viewport::MAX_SIDE
    } else {
        side
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(60, 20)
    }
}
