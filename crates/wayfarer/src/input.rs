//! Keybinding table.
//!
//! Raw key bytes resolve to an [`Action`] through a flat 128-entry table.
//! Only ASCII keys can be bound.

use crate::error::{ConfigError, ConfigResult};

/// Something a key can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Step north.
    MoveUp,
    /// Step south.
    MoveDown,
    /// Step west.
    MoveLeft,
    /// Step east.
    MoveRight,
    /// Skip a turn.
    Wait,
    /// Leave the session.
    Quit,
}

impl Action {
    /// Every action.
    pub const ALL: [Self; 6] = [
        Self::MoveUp,
        Self::MoveDown,
        Self::MoveLeft,
        Self::MoveRight,
        Self::Wait,
        Self::Quit,
    ];

    /// Movement delta, for movement actions.
    #[must_use]
    pub const fn delta(self) -> Option<(i32, i32)> {
        match self {
            Self::MoveUp => Some((0, -1)),
            Self::MoveDown => Some((0, 1)),
            Self::MoveLeft => Some((-1, 0)),
            Self::MoveRight => Some((1, 0)),
            Self::Wait | Self::Quit => None,
        }
    }

    /// Config-file name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveUp => "up",
            Self::MoveDown => "down",
            Self::MoveLeft => "left",
            Self::MoveRight => "right",
            Self::Wait => "wait",
            Self::Quit => "quit",
        }
    }
}

/// Result of feeding one key to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The viewer stepped.
    Moved,
    /// The target tile was not walkable.
    Blocked,
    /// A wait key.
    Waited,
    /// A quit key.
    Quit,
    /// No action is bound to the key.
    Unbound,
}

/// Key byte to action table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    table: [Option<Action>; 128],
}

impl KeyBindings {
    /// Default keys: WASD plus vi keys, `.` to wait, `q` to quit.
    pub const DEFAULTS: [(u8, Action); 10] = [
        (b'w', Action::MoveUp),
        (b'k', Action::MoveUp),
        (b's', Action::MoveDown),
        (b'j', Action::MoveDown),
        (b'a', Action::MoveLeft),
        (b'h', Action::MoveLeft),
        (b'd', Action::MoveRight),
        (b'l', Action::MoveRight),
        (b'.', Action::Wait),
        (b'q', Action::Quit),
    ];

    /// A table with nothing bound.
    #[must_use]
    pub const fn empty() -> Self {
        Self { table: [None; 128] }
    }

    /// Binds `key` to `action`.
    ///
    /// Rebinding a key to the action it already has is a no-op.
    ///
    /// # Errors
    ///
    /// Non-ASCII keys and keys already bound to another action are rejected.
    pub fn bind(&mut self, key: u8, action: Action) -> ConfigResult<()> {
        let Some(slot) = self.table.get_mut(usize::from(key)) else {
            return Err(ConfigError::InvalidKey {
                action: action.name(),
                key: char::from(key).to_string(),
            });
        };
        match *slot {
            Some(existing) if existing != action => Err(ConfigError::DuplicateKey {
                key: char::from(key),
                first: existing.name(),
                second: action.name(),
            }),
            _ => {
                *slot = Some(action);
                Ok(())
            }
        }
    }

    /// Binds a config-file key entry, which must be one ASCII character.
    ///
    /// # Errors
    ///
    /// See [`KeyBindings::bind`].
    pub fn bind_str(&mut self, key: &str, action: Action) -> ConfigResult<()> {
        let bytes = key.as_bytes();
        if bytes.len() != 1 || !bytes[0].is_ascii() {
            return Err(ConfigError::InvalidKey {
                action: action.name(),
                key: key.to_string(),
            });
        }
        self.bind(bytes[0], action)
    }

    /// Action bound to a key byte.
    #[inline]
    #[must_use]
    pub fn action_for(&self, key: u8) -> Option<Action> {
        self.table.get(usize::from(key)).copied().flatten()
    }

    /// Keys bound to an action, ascending.
    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = u8> + '_ {
        (0u8..128).filter(move |&key| self.action_for(key) == Some(action))
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        for (key, action) in Self::DEFAULTS {
            bindings.table[usize::from(key)] = Some(action);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for(b'w'), Some(Action::MoveUp));
        assert_eq!(keys.action_for(b'l'), Some(Action::MoveRight));
        assert_eq!(keys.action_for(b'.'), Some(Action::Wait));
        assert_eq!(keys.action_for(b'q'), Some(Action::Quit));
        assert_eq!(keys.action_for(b'x'), None);
        assert_eq!(keys.action_for(0xff), None);
    }

    #[test]
    fn test_deltas() {
        assert_eq!(Action::MoveUp.delta(), Some((0, -1)));
        assert_eq!(Action::MoveDown.delta(), Some((0, 1)));
        assert_eq!(Action::MoveLeft.delta(), Some((-1, 0)));
        assert_eq!(Action::MoveRight.delta(), Some((1, 0)));
        assert_eq!(Action::Wait.delta(), None);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut keys = KeyBindings::empty();
        keys.bind(b'x', Action::Wait).unwrap();
        keys.bind(b'x', Action::Wait).unwrap();
        let err = keys.bind(b'x', Action::Quit).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateKey { key: 'x', .. }));
    }

    #[test]
    fn test_bind_str_validation() {
        let mut keys = KeyBindings::empty();
        assert!(keys.bind_str("ab", Action::Wait).is_err());
        assert!(keys.bind_str("", Action::Wait).is_err());
        assert!(keys.bind_str("é", Action::Wait).is_err());
        assert!(keys.bind(200, Action::Wait).is_err());
        keys.bind_str("z", Action::Wait).unwrap();
        assert_eq!(keys.action_for(b'z'), Some(Action::Wait));
    }

    #[test]
    fn test_keys_for() {
        let keys = KeyBindings::default();
        let up: Vec<u8> = keys.keys_for(Action::MoveUp).collect();
        assert_eq!(up, vec![b'k', b'w']);
    }
}
