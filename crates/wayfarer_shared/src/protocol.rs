//! # World Record Stream
//!
//! Line-oriented frame the server broadcasts every tick.
//!
//! ## Format
//!
//! ```text
//! TILE <world_x> <world_y> <tile_ordinal> <chunk_difficulty>   one per resident tile
//! ...
//! PLAYER <index> <x> <y> <is_host 0|1>                         one per active player
//! ...
//! END
//! ```
//!
//! Fields are separated by single spaces and lines by `\n`. There is no
//! escaping and no version field: every field is an integer, and any change
//! to the layout breaks existing clients.
//!
//! Client to server traffic is raw key bytes, one per key press.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use thiserror::Error;

use crate::constants::MAX_LINE_LEN;

/// Tag of tile records.
pub const TILE_TAG: &str = "TILE";
/// Tag of player records.
pub const PLAYER_TAG: &str = "PLAYER";
/// Frame terminator.
pub const END_TAG: &str = "END";

/// Errors raised while decoding record lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Blank line where a record was expected.
    #[error("empty record line")]
    EmptyLine,

    /// Line did not start with a known tag.
    #[error("unknown record tag: {0}")]
    UnknownTag(String),

    /// Wrong number of fields after the tag.
    #[error("{tag} record expects {expected} fields, got {found}")]
    FieldCount {
        /// Record tag.
        tag: &'static str,
        /// Fields the tag requires.
        expected: usize,
        /// Fields present.
        found: usize,
    },

    /// A field was not a valid integer for its slot.
    #[error("invalid {name} field {value:?} in {tag} record")]
    InvalidField {
        /// Record tag.
        tag: &'static str,
        /// Field name.
        name: &'static str,
        /// Raw text.
        value: String,
    },

    /// Line longer than any legal record.
    #[error("record line exceeds {max} bytes")]
    LineTooLong {
        /// Limit in bytes.
        max: usize,
    },
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// One resident tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileRecord {
    /// World X.
    pub world_x: i32,
    /// World Y.
    pub world_y: i32,
    /// Tile ordinal.
    pub tile: u8,
    /// Difficulty of the chunk the tile belongs to.
    pub difficulty: i32,
}

/// One active player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerRecord {
    /// Player index. The host is index 0.
    pub index: u32,
    /// World X.
    pub x: i32,
    /// World Y.
    pub y: i32,
    /// Whether this player is the host.
    pub is_host: bool,
}

/// A single decoded line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Record {
    /// `TILE` line.
    Tile(TileRecord),
    /// `PLAYER` line.
    Player(PlayerRecord),
    /// `END` line.
    End,
}

impl fmt::Display for TileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{TILE_TAG} {} {} {} {}",
            self.world_x, self.world_y, self.tile, self.difficulty
        )
    }
}

impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PLAYER_TAG} {} {} {} {}",
            self.index,
            self.x,
            self.y,
            u8::from(self.is_host)
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tile(tile) => tile.fmt(f),
            Self::Player(player) => player.fmt(f),
            Self::End => f.write_str(END_TAG),
        }
    }
}

fn parse_field<T: FromStr>(tag: &'static str, name: &'static str, raw: &str) -> ProtocolResult<T> {
    raw.parse().map_err(|_| ProtocolError::InvalidField {
        tag,
        name,
        value: raw.to_owned(),
    })
}

fn expect_fields(tag: &'static str, fields: &[&str], expected: usize) -> ProtocolResult<()> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ProtocolError::FieldCount {
            tag,
            expected,
            found: fields.len(),
        })
    }
}

impl FromStr for Record {
    type Err = ProtocolError;

    fn from_str(line: &str) -> ProtocolResult<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.len() > MAX_LINE_LEN {
            return Err(ProtocolError::LineTooLong { max: MAX_LINE_LEN });
        }

        let mut parts = line.split(' ');
        let tag = match parts.next() {
            Some(tag) if !tag.is_empty() => tag,
            _ => return Err(ProtocolError::EmptyLine),
        };
        let fields: Vec<&str> = parts.collect();

        match tag {
            TILE_TAG => {
                expect_fields(TILE_TAG, &fields, 4)?;
                Ok(Self::Tile(TileRecord {
                    world_x: parse_field(TILE_TAG, "world_x", fields[0])?,
                    world_y: parse_field(TILE_TAG, "world_y", fields[1])?,
                    tile: parse_field(TILE_TAG, "tile", fields[2])?,
                    difficulty: parse_field(TILE_TAG, "difficulty", fields[3])?,
                }))
            }
            PLAYER_TAG => {
                expect_fields(PLAYER_TAG, &fields, 4)?;
                let is_host = match fields[3] {
                    "0" => false,
                    "1" => true,
                    other => {
                        return Err(ProtocolError::InvalidField {
                            tag: PLAYER_TAG,
                            name: "is_host",
                            value: other.to_owned(),
                        })
                    }
                };
                Ok(Self::Player(PlayerRecord {
                    index: parse_field(PLAYER_TAG, "index", fields[0])?,
                    x: parse_field(PLAYER_TAG, "x", fields[1])?,
                    y: parse_field(PLAYER_TAG, "y", fields[2])?,
                    is_host,
                }))
            }
            END_TAG => {
                expect_fields(END_TAG, &fields, 0)?;
                Ok(Self::End)
            }
            other => Err(ProtocolError::UnknownTag(other.to_owned())),
        }
    }
}

/// A complete tick of world state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Resident tiles.
    pub tiles: Vec<TileRecord>,
    /// Active players.
    pub players: Vec<PlayerRecord>,
}

impl Frame {
    /// Player record by index.
    #[must_use]
    pub fn player(&self, index: u32) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.index == index)
    }

    /// The host's record.
    #[must_use]
    pub fn host(&self) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.is_host)
    }

    /// Encodes the frame, `END` line included.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut encoder = FrameEncoder::with_capacity(self.tiles.len() + self.players.len());
        for tile in &self.tiles {
            encoder.push_tile(*tile);
        }
        for player in &self.players {
            encoder.push_player(*player);
        }
        encoder.finish()
    }
}

/// Writes records straight into a text buffer.
///
/// Callers push every tile before any player; [`FrameEncoder::finish`]
/// appends the terminator.
#[derive(Debug, Default)]
pub struct FrameEncoder {
    buf: String,
}

impl FrameEncoder {
    /// Rough bytes per encoded record, used for preallocation.
    const BYTES_PER_RECORD: usize = 20;

    /// Creates an encoder sized for about `records` lines.
    #[must_use]
    pub fn with_capacity(records: usize) -> Self {
        Self {
            buf: String::with_capacity((records + 1) * Self::BYTES_PER_RECORD),
        }
    }

    /// Appends a tile record.
    pub fn push_tile(&mut self, tile: TileRecord) {
        // Writing to a String cannot fail
        let _ = writeln!(self.buf, "{tile}");
    }

    /// Appends a player record.
    pub fn push_player(&mut self, player: PlayerRecord) {
        let _ = writeln!(self.buf, "{player}");
    }

    /// Appends `END` and returns the encoded frame.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.buf.push_str(END_TAG);
        self.buf.push('\n');
        self.buf
    }
}

/// Reassembles frames from a stream of lines.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    pending: Frame,
}

impl FrameDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line. Returns the finished frame when the line is `END`.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed lines. The partially decoded frame is
    /// kept, so the caller may skip the line and continue.
    pub fn feed_line(&mut self, line: &str) -> ProtocolResult<Option<Frame>> {
        match line.parse::<Record>()? {
            Record::Tile(tile) => {
                self.pending.tiles.push(tile);
                Ok(None)
            }
            Record::Player(player) => {
                self.pending.players.push(player);
                Ok(None)
            }
            Record::End => Ok(Some(std::mem::take(&mut self.pending))),
        }
    }

    /// Decodes every complete frame in `text`.
    ///
    /// # Errors
    ///
    /// Returns the first malformed line's error.
    pub fn decode_all(text: &str) -> ProtocolResult<Vec<Frame>> {
        let mut decoder = Self::new();
        let mut frames = Vec::new();
        for line in text.lines() {
            if let Some(frame) = decoder.feed_line(line)? {
                frames.push(frame);
            }
        }
        Ok(frames)
    }
}
