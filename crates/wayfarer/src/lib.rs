//! # WAYFARER
//!
//! The game crate: sessions, input, rendering, config and the multiplayer
//! host, on top of the streamed procedural world.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        WAYFARER                            │
//! ├────────────────────────────────────────────────────────────┤
//! │  key byte ──> KeyBindings ──> Session ──> WorldManager     │
//! │                                  │       (procedural)      │
//! │                                  ▼                         │
//! │                        render::Surface / HudInfo           │
//! │                                                            │
//! │  MultiplayerWorld (host Session + remotes)                 │
//! │        │ impl WorldHost                                    │
//! │        ▼                                                   │
//! │  GameServer (networking) ──> text frames (shared)          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML game config
//! - `input`: actions and keybindings
//! - `session`: the explicit per-player context
//! - `render`: surface projection and HUD
//! - `multiplayer`: shared host world for the session server

pub mod config;
pub mod error;
pub mod input;
pub mod multiplayer;
pub mod render;
pub mod session;

pub use wayfarer_networking as networking;
pub use wayfarer_procedural as procedural;
pub use wayfarer_shared as shared;

pub use config::GameConfig;
pub use error::{ConfigError, ConfigResult, GameError, GameResult};
pub use input::{Action, InputOutcome, KeyBindings};
pub use multiplayer::{MultiplayerWorld, RemotePlayer};
pub use render::{HudInfo, Surface, TextSurface};
pub use session::Session;

use tracing_subscriber::EnvFilter;

/// Installs the log subscriber for a binary.
///
/// `RUST_LOG` selects the filter, `info` otherwise. Logs go to stderr so
/// frames on stdout stay clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads the config at `path`, or the defaults when there is none.
///
/// # Errors
///
/// See [`GameConfig::load`].
pub fn load_config(path: Option<&str>) -> ConfigResult<GameConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path);
            GameConfig::load(path)
        }
        None => Ok(GameConfig::default()),
    }
}

/// What a binary was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Run, with an optional config path.
    Run {
        /// Config file, if one was given.
        config: Option<String>,
    },
    /// Print usage and exit.
    Help,
}

/// Parses command-line arguments: `--config <path>`, `-c <path>` or a bare
/// first argument, and `--help`.
#[must_use]
pub fn parse_args(args: &[String]) -> Invocation {
    let mut config = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => return Invocation::Help,
            other if config.is_none() && !other.starts_with('-') => {
                config = Some(other.to_string());
            }
            _ => {}
        }
        i += 1;
    }
    Invocation::Run { config }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&args(&["bin"])), Invocation::Run { config: None });
        assert_eq!(
            parse_args(&args(&["bin", "game.toml"])),
            Invocation::Run { config: Some("game.toml".to_string()) }
        );
        assert_eq!(
            parse_args(&args(&["bin", "-c", "a.toml"])),
            Invocation::Run { config: Some("a.toml".to_string()) }
        );
        assert_eq!(parse_args(&args(&["bin", "--help"])), Invocation::Help);
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(load_config(None).is_ok());
    }
}
