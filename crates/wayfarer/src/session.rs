//! # Session
//!
//! One player's game: the streamed world, the viewer inside it, and the
//! keybinding table. Everything a frame or an input needs is reached through
//! this value; there is no global state.

use tracing::{debug, info};
use wayfarer_procedural::{MoveResult, Viewer, WorldManager, WorldManagerConfig};

use crate::config::GameConfig;
use crate::error::ConfigResult;
use crate::input::{Action, InputOutcome, KeyBindings};
use crate::render::{self, HudInfo, Surface};

/// A single-viewer game session.
pub struct Session {
    world: WorldManager,
    bindings: KeyBindings,
}

impl Session {
    /// Starts a session and streams in the window around `viewer`.
    #[must_use]
    pub fn new(config: WorldManagerConfig, viewer: Viewer, bindings: KeyBindings) -> Self {
        let world = WorldManager::new(config, viewer);
        info!(
            "Session started at ({}, {}) seed {:#x}, {} chunks resident",
            viewer.x,
            viewer.y,
            config.seed.value(),
            world.loaded_chunk_count()
        );
        Self { world, bindings }
    }

    /// Starts a session from a validated config.
    ///
    /// # Errors
    ///
    /// Fails when the config's keybindings are invalid.
    pub fn from_config(config: &GameConfig) -> ConfigResult<Self> {
        let bindings = config.keys.bindings()?;
        Ok(Self::new(config.world_config(), config.spawn_viewer(), bindings))
    }

    /// Resolves a raw key byte through the bindings and applies it.
    pub fn process_input(&mut self, key: u8) -> InputOutcome {
        match self.bindings.action_for(key) {
            Some(action) => self.apply_action(action),
            None => InputOutcome::Unbound,
        }
    }

    /// Applies an action directly.
    pub fn apply_action(&mut self, action: Action) -> InputOutcome {
        let Some((dx, dy)) = action.delta() else {
            return match action {
                Action::Quit => InputOutcome::Quit,
                _ => InputOutcome::Waited,
            };
        };

        match self.world.try_move(dx, dy) {
            MoveResult::Moved { crossed_chunk } => {
                if crossed_chunk {
                    let coord = self.world.player_chunk_coord();
                    debug!(
                        "Entered chunk ({}, {}), {} resident",
                        coord.x,
                        coord.y,
                        self.world.loaded_chunk_count()
                    );
                }
                InputOutcome::Moved
            }
            MoveResult::Blocked => {
                let viewer = self.world.viewer();
                debug!(
                    "Move {:?} blocked at ({}, {})",
                    action, viewer.x, viewer.y
                );
                InputOutcome::Blocked
            }
        }
    }

    /// Draws the viewport and the viewer.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        render::draw_world(&self.world, surface);
    }

    /// Current HUD values.
    #[must_use]
    pub fn hud(&self) -> HudInfo {
        HudInfo::from_world(&self.world)
    }

    /// The streamed world.
    #[must_use]
    pub const fn world(&self) -> &WorldManager {
        &self.world
    }

    /// Mutable world access, for stat changes and teleports.
    pub fn world_mut(&mut self) -> &mut WorldManager {
        &mut self.world
    }

    /// The viewer.
    #[must_use]
    pub const fn viewer(&self) -> &Viewer {
        self.world.viewer()
    }

    /// The keybinding table.
    #[must_use]
    pub const fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextSurface;

    fn session() -> Session {
        Session::new(
            WorldManagerConfig::default(),
            Viewer::new(16, 16),
            KeyBindings::default(),
        )
    }

    #[test]
    fn test_unbound_key() {
        let mut session = session();
        assert_eq!(session.process_input(b'z'), InputOutcome::Unbound);
        assert_eq!(session.process_input(0xff), InputOutcome::Unbound);
    }

    #[test]
    fn test_wait_and_quit_do_not_move() {
        let mut session = session();
        let before = *session.viewer();
        assert_eq!(session.process_input(b'.'), InputOutcome::Waited);
        assert_eq!(session.process_input(b'q'), InputOutcome::Quit);
        assert_eq!(*session.viewer(), before);
    }

    #[test]
    fn test_move_follows_walkability() {
        let mut session = session();
        for (key, (dx, dy)) in [(b'd', (1, 0)), (b'a', (-1, 0)), (b's', (0, 1)), (b'w', (0, -1))] {
            let before = *session.viewer();
            let walkable = session.world().is_walkable_at(before.x + dx, before.y + dy);
            let outcome = session.process_input(key);
            if walkable {
                assert_eq!(outcome, InputOutcome::Moved);
                assert_eq!((session.viewer().x, session.viewer().y), (before.x + dx, before.y + dy));
            } else {
                assert_eq!(outcome, InputOutcome::Blocked);
                assert_eq!(*session.viewer(), before);
            }
        }
    }

    #[test]
    fn test_blocked_move_keeps_position() {
        let mut session = session();
        // Find an obstacle with open ground to its west inside chunk (0, 0)
        let world = session.world();
        let spot = (1..31)
            .flat_map(|y| (1..31).map(move |x| (x, y)))
            .find(|&(x, y)| world.is_walkable_at(x, y) && !world.is_walkable_at(x + 1, y));

        if let Some((x, y)) = spot {
            session.world_mut().teleport(x, y);
            assert_eq!(session.process_input(b'd'), InputOutcome::Blocked);
            assert_eq!((session.viewer().x, session.viewer().y), (x, y));
        }
    }

    #[test]
    fn test_hud_tracks_viewer() {
        let mut session = session();
        session.world_mut().set_health(42);
        let hud = session.hud();
        assert_eq!(hud.health, 42);
        assert_eq!((hud.x, hud.y), (16, 16));
        assert_eq!(hud.resident_chunks, 25);
    }

    #[test]
    fn test_draw_puts_viewer_in_center() {
        let session = session();
        let mut surface = TextSurface::new(60, 20);
        session.draw(&mut surface);
        assert_eq!(surface.glyph(30, 10), Some('@'));
    }

    #[test]
    fn test_from_config() {
        let config = GameConfig::from_toml_str("[world]\nstart_x = -5\nstart_y = 40\n").unwrap();
        let session = Session::from_config(&config).unwrap();
        assert_eq!((session.viewer().x, session.viewer().y), (-5, 40));
        assert_eq!(session.world().player_chunk_coord().x, -1);
        assert_eq!(session.world().player_chunk_coord().y, 1);
    }
}
