//! # Game Configuration
//!
//! TOML config file. Every field has a default, so an empty file is a valid
//! config.
//!
//! ```toml
//! [world]
//! seed = 3735928559
//! load_radius = 2
//!
//! [keys]
//! up = ["w", "k"]
//!
//! [server]
//! bind = "0.0.0.0:7777"
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wayfarer_networking::ServerConfig;
use wayfarer_procedural::{in_world_bounds, Viewer, Viewport, WorldManagerConfig, WorldSeed, WORLD_LIMIT};

use crate::error::{ConfigError, ConfigResult};
use crate::input::{Action, KeyBindings};

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// World generation and streaming.
    pub world: WorldSection,
    /// Visible area.
    pub viewport: ViewportSection,
    /// Keybindings.
    pub keys: KeySection,
    /// Multiplayer host.
    pub server: ServerSection,
}

/// `[world]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldSection {
    /// World seed.
    pub seed: u64,
    /// Chunks kept resident around the viewer. Unload radius is this + 2.
    pub load_radius: i32,
    /// Viewer level at start.
    pub start_level: i32,
    /// Spawn X.
    pub start_x: i32,
    /// Spawn Y.
    pub start_y: i32,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            seed: WorldSeed::default().value(),
            load_radius: WorldManagerConfig::DEFAULT_LOAD_RADIUS,
            start_level: 1,
            start_x: 16,
            start_y: 16,
        }
    }
}

/// `[viewport]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportSection {
    /// Columns.
    pub width: i32,
    /// Rows.
    pub height: i32,
}

impl Default for ViewportSection {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            width: viewport.width,
            height: viewport.height,
        }
    }
}

/// `[keys]`: one-character strings per action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeySection {
    /// Step north.
    pub up: Vec<String>,
    /// Step south.
    pub down: Vec<String>,
    /// Step west.
    pub left: Vec<String>,
    /// Step east.
    pub right: Vec<String>,
    /// Skip a turn.
    pub wait: Vec<String>,
    /// Leave.
    pub quit: Vec<String>,
}

impl KeySection {
    fn keys(&self, action: Action) -> &[String] {
        match action {
            Action::MoveUp => &self.up,
            Action::MoveDown => &self.down,
            Action::MoveLeft => &self.left,
            Action::MoveRight => &self.right,
            Action::Wait => &self.wait,
            Action::Quit => &self.quit,
        }
    }

    /// Builds the binding table.
    ///
    /// # Errors
    ///
    /// Fails on a key that is not one ASCII character or is bound to two
    /// actions.
    pub fn bindings(&self) -> ConfigResult<KeyBindings> {
        let mut bindings = KeyBindings::empty();
        for action in Action::ALL {
            for key in self.keys(action) {
                bindings.bind_str(key, action)?;
            }
        }
        Ok(bindings)
    }
}

impl Default for KeySection {
    fn default() -> Self {
        let defaults = |action: Action| -> Vec<String> {
            KeyBindings::DEFAULTS
                .iter()
                .filter(|(_, a)| *a == action)
                .map(|(key, _)| char::from(*key).to_string())
                .collect()
        };
        Self {
            up: defaults(Action::MoveUp),
            down: defaults(Action::MoveDown),
            left: defaults(Action::MoveLeft),
            right: defaults(Action::MoveRight),
            wait: defaults(Action::Wait),
            quit: defaults(Action::Quit),
        }
    }
}

/// `[server]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    /// Listen address.
    pub bind: String,
    /// World broadcasts per second.
    pub tick_rate: u32,
    /// Players including the host.
    pub max_players: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: wayfarer_shared::SERVER_BIND.to_string(),
            tick_rate: wayfarer_shared::TICK_RATE,
            max_players: wayfarer_shared::MAX_PLAYERS,
        }
    }
}

impl GameConfig {
    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates config text.
    ///
    /// # Errors
    ///
    /// Fails on invalid TOML, unknown fields, or values rejected by
    /// [`GameConfig::validate`].
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value a session or server depends on.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> ConfigResult<()> {
        let max_radius = WorldManagerConfig::MAX_LOAD_RADIUS;
        if !(0..=max_radius).contains(&self.world.load_radius) {
            return Err(ConfigError::InvalidLoadRadius {
                value: self.world.load_radius,
                max: max_radius,
            });
        }
        if !in_world_bounds(self.world.start_x) || !in_world_bounds(self.world.start_y) {
            return Err(ConfigError::SpawnOutOfBounds {
                x: self.world.start_x,
                y: self.world.start_y,
                limit: WORLD_LIMIT,
            });
        }
        let sides = 1..=Viewport::MAX_SIDE;
        if !sides.contains(&self.viewport.width) || !sides.contains(&self.viewport.height) {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
                max: Viewport::MAX_SIDE,
            });
        }
        if self.server.tick_rate == 0 {
            return Err(ConfigError::InvalidTickRate);
        }
        if self.server.max_players == 0 {
            return Err(ConfigError::InvalidMaxPlayers);
        }
        self.bind_address()?;
        self.keys.bindings()?;
        Ok(())
    }

    /// Streaming settings for the world manager.
    #[must_use]
    pub fn world_config(&self) -> WorldManagerConfig {
        WorldManagerConfig {
            load_radius: self.world.load_radius,
            viewport: Viewport::new(self.viewport.width, self.viewport.height),
            seed: WorldSeed::new(self.world.seed),
        }
    }

    /// The viewer at its spawn point.
    #[must_use]
    pub fn spawn_viewer(&self) -> Viewer {
        Viewer::new(self.world.start_x, self.world.start_y).with_level(self.world.start_level)
    }

    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidBind`] when the address does not parse.
    pub fn bind_address(&self) -> ConfigResult<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.server.bind.clone()))
    }

    /// Settings for the session server.
    ///
    /// # Errors
    ///
    /// See [`GameConfig::bind_address`].
    pub fn server_config(&self) -> ConfigResult<ServerConfig> {
        Ok(ServerConfig {
            bind_address: self.bind_address()?,
            tick_rate: self.server.tick_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.world.load_radius, 2);
        assert_eq!(config.viewport.width, 60);
        assert_eq!(config.viewport.height, 20);
        assert_eq!(config.keys.up, vec!["w".to_string(), "k".to_string()]);
        assert_eq!(config.server.tick_rate, 10);
    }

    #[test]
    fn test_default_keys_match_default_bindings() {
        let bindings = KeySection::default().bindings().unwrap();
        assert_eq!(bindings, KeyBindings::default());
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_toml_str(
            r#"
            [world]
            seed = 99
            load_radius = 1

            [keys]
            wait = ["x", " "]
            "#,
        )
        .unwrap();
        assert_eq!(config.world.seed, 99);
        assert_eq!(config.world.start_x, 16);
        let world = config.world_config();
        assert_eq!(world.load_radius, 1);
        assert_eq!(world.seed, WorldSeed::new(99));

        let bindings = config.keys.bindings().unwrap();
        assert_eq!(bindings.action_for(b' '), Some(Action::Wait));
        assert_eq!(bindings.action_for(b'.'), None);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let err = GameConfig::from_toml_str("[world]\nload_radius = -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLoadRadius { value: -1, .. }));
    }

    #[test]
    fn test_huge_radius_rejected() {
        let err = GameConfig::from_toml_str("[world]\nload_radius = 2000000000\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLoadRadius { value: 2_000_000_000, max: 16 }));
        assert!(GameConfig::from_toml_str("[world]\nload_radius = 16\n").is_ok());
        assert!(GameConfig::from_toml_str("[world]\nload_radius = 17\n").is_err());
    }

    #[test]
    fn test_far_spawn_rejected() {
        let err = GameConfig::from_toml_str("[world]\nstart_x = 2147483600\n").unwrap_err();
        assert!(matches!(err, ConfigError::SpawnOutOfBounds { x: 2_147_483_600, .. }));
        let err = GameConfig::from_toml_str("[world]\nstart_y = -2147483648\n").unwrap_err();
        assert!(matches!(err, ConfigError::SpawnOutOfBounds { .. }));
        assert!(GameConfig::from_toml_str("[world]\nstart_x = 1073741824\n").is_ok());
    }

    #[test]
    fn test_oversized_viewport_rejected() {
        let err = GameConfig::from_toml_str("[viewport]\nwidth = 2147483647\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewport { max: 1024, .. }));
    }

    #[test]
    fn test_zero_viewport_rejected() {
        let err = GameConfig::from_toml_str("[viewport]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewport { width: 0, .. }));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let err = GameConfig::from_toml_str("[server]\ntick_rate = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTickRate));
    }

    #[test]
    fn test_bad_bind_rejected() {
        let err = GameConfig::from_toml_str("[server]\nbind = \"nowhere\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind(_)));
    }

    #[test]
    fn test_conflicting_keys_rejected() {
        let err = GameConfig::from_toml_str("[keys]\nquit = [\"w\"]\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateKey { key: 'w', first: "up", second: "quit" }
        ));
    }

    #[test]
    fn test_long_key_rejected() {
        let err = GameConfig::from_toml_str("[keys]\nup = [\"up\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKey { action: "up", .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = GameConfig::from_toml_str("[world]\nradius = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_server_config() {
        let config = GameConfig::default();
        let server = config.server_config().unwrap();
        assert_eq!(server.bind_address.port(), 7777);
        assert_eq!(server.tick_rate, 10);
    }

    #[test]
    fn test_spawn_viewer() {
        let viewer = GameConfig::default().spawn_viewer();
        assert_eq!((viewer.x, viewer.y, viewer.level, viewer.health), (16, 16, 1, 100));
    }
}
