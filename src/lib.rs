//! # consent-gate
//!
//! A gate game engine: the player clears a sequence of small mini-games
//! under a shared pool of lives, and clearing them all unlocks a
//! destination.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: The core never reads the wall clock or draws.
//!    Hosts feed inputs, ticks with a virtual timestamp, and bridge
//!    events, then render `Screen` and the typed widget state.
//!
//! 2. **Pure Session Transitions**: `SessionState` is an immutable
//!    snapshot; every change returns a new one. O(1) clones via `im-rs`.
//!
//! 3. **Widgets Know Nothing of the Session**: A widget gets its props and
//!    a one-shot `Completion`, owns its timers, and reports once.
//!
//! ## Modules
//!
//! - `core`: virtual clock, RNG, configuration
//! - `catalog`: mini-game definitions, registry, terms text
//! - `session`: session state machine
//! - `widgets`: widget contract, timers and the 19 games
//! - `manager`: orchestrator and screens
//! - `audio`: game-over sound effect
//! - `bridge`: NFC bridge WebSocket client
//! - `logging`: tracing subscriber setup
//! - `debug`: key jumps between games (`debug-jump` feature)

pub mod audio;
pub mod bridge;
pub mod catalog;
pub mod core;
pub mod error;
pub mod logging;
pub mod manager;
pub mod session;
pub mod widgets;

#[cfg(feature = "debug-jump")]
pub mod debug;

// Re-export commonly used types
pub use crate::core::{AfterFailure, BridgeConfig, GateConfig, GateRng, Millis};

pub use crate::catalog::{
    ConsentArticle, Difficulty, MiniGameDefinition, MiniGameId, MiniGameRegistry,
};

pub use crate::session::{SessionEvent, SessionState, SessionStatus};

pub use crate::widgets::{Completion, Input, MiniGame, Outcome, WidgetProps};

pub use crate::manager::{GameManager, Screen};

pub use crate::audio::{ExplosionSound, Playback};

pub use crate::bridge::{BridgeClient, BridgeEvent, BridgeMessage};

pub use crate::error::{
    AudioError, BridgeError, ConfigError, GateError, InvariantViolation,
    UnknownGameId,
};
