//! Error types.
//!
//! Nothing here is fatal to a session. Audio and bridge errors stay inside
//! their modules, which log them and degrade. Configuration errors surface
//! at construction time.

use thiserror::Error;

use crate::catalog::MiniGameId;

/// Invalid gate configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A session needs at least one life.
    #[error("max_lives must be at least 1")]
    NoLives,

    /// A session needs at least one game.
    #[error("active_games must be at least 1")]
    NoGames,

    /// The configured opener is not in the catalog.
    #[error("opener {0} is not in the catalog")]
    UnknownOpener(MiniGameId),

    /// No catalog entry has a working widget.
    #[error("no implemented mini-games in the catalog")]
    EmptyCatalog,

    /// The bridge URL could not be parsed.
    #[error("invalid bridge url {url}: {reason}")]
    BridgeUrl {
        /// The rejected URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// JSON configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A mini-game key that names no catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown mini-game id {0:?}")]
pub struct UnknownGameId(pub String);

/// Audio output failures.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The environment has no usable output device.
    #[error("audio output unavailable: {0}")]
    Unavailable(String),

    /// The output was closed.
    #[error("audio output closed")]
    Closed,

    /// The device rejected a buffer.
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Hardware bridge failures.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The socket could not be opened.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connecting took longer than the configured timeout.
    #[error("connection timed out")]
    Timeout,

    /// The client is not connected.
    #[error("not connected")]
    NotConnected,

    /// A frame could not be sent.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// A frame could not be parsed.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A session snapshot that breaks a state machine invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Lives outside `0..=max_lives`.
    #[error("lives {lives} outside 0..={max_lives}")]
    LivesOutOfRange {
        /// Current lives.
        lives: u32,
        /// Maximum lives.
        max_lives: u32,
    },

    /// Cursor outside the sequence while playing.
    #[error("current index {index} outside sequence of {total}")]
    IndexOutOfRange {
        /// Current index.
        index: usize,
        /// Sequence length.
        total: usize,
    },

    /// `total_games` disagrees with the sequence length.
    #[error("total_games {total} but sequence has {len} entries")]
    TotalMismatch {
        /// Recorded total.
        total: usize,
        /// Actual length.
        len: usize,
    },

    /// The same game appears twice in the sequence.
    #[error("duplicate game {0} in sequence")]
    DuplicateGame(MiniGameId),
}

/// Umbrella error for hosts that want a single type.
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Audio failure.
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Bridge failure.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Broken session invariant.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
