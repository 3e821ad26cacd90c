//! Gate configuration.
//!
//! Hosts configure a playthrough at startup by providing:
//! - `GateConfig`: lives, sequence length, opener, destination
//! - `BridgeConfig`: optional hardware bridge connection
//!
//! Configuration is plain data. It can be built in code with the
//! `with_*` builders or deserialized from JSON.

use serde::{Deserialize, Serialize};

use crate::audio::ExplosionSound;
use crate::catalog::{MiniGameId, MiniGameRegistry};
use crate::error::ConfigError;

/// Where a non-terminal failure leaves the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AfterFailure {
    /// Wait on the resume screen (manual button or bridge card).
    #[default]
    WaitForResume,
    /// Drop back to the idle screen; resume re-enters the same game.
    ReturnToIdle,
}

/// Hardware bridge connection settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Connect at all. Play never depends on the bridge.
    pub enabled: bool,

    /// WebSocket URL of the local bridge process.
    pub url: String,

    /// Delay before reconnecting after a disconnect.
    pub reconnect_delay_ms: u64,

    /// Upper bound on a single connect attempt.
    pub connect_timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "ws://localhost:8787".to_string(),
            reconnect_delay_ms: 3000,
            connect_timeout_ms: 5000,
        }
    }
}

impl BridgeConfig {
    /// Enabled bridge at the given URL.
    pub fn enabled(url: impl Into<String>) -> Self {
        Self {
            enabled: true,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the reconnect delay.
    #[must_use]
    pub fn with_reconnect_delay_ms(mut self, delay: u64) -> Self {
        self.reconnect_delay_ms = delay;
        self
    }

    /// Check the URL parses as `ws://` or `wss://`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.url).map_err(|e| ConfigError::BridgeUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "ws" | "wss" => Ok(()),
            other => Err(ConfigError::BridgeUrl {
                url: self.url.clone(),
                reason: format!("unsupported scheme {other}"),
            }),
        }
    }
}

/// Complete gate configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Lives at session start.
    pub max_lives: u32,

    /// Games per playthrough (truncates the shuffled catalog).
    pub active_games: usize,

    /// Fixed warm-up game played first, if any.
    pub opener: Option<MiniGameId>,

    /// Where a non-terminal failure leaves the session.
    pub after_failure: AfterFailure,

    /// Link offered on the game-over screen.
    pub destination_url: String,

    /// Pin the RNG seed. `None` draws from entropy.
    pub seed: Option<u64>,

    /// Hardware bridge settings.
    pub bridge: BridgeConfig,

    /// Sound played when the session reaches game over.
    pub game_over_sound: ExplosionSound,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_lives: 3,
            active_games: 10,
            opener: Some(MiniGameId::BasicAgree),
            after_failure: AfterFailure::WaitForResume,
            destination_url: "https://portfolio-nine-green-82.vercel.app/".to_string(),
            seed: None,
            bridge: BridgeConfig::default(),
            game_over_sound: ExplosionSound {
                base_frequency: 220.0,
                duration: 0.5,
                gain: 0.4,
            },
        }
    }
}

impl GateConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the number of lives.
    #[must_use]
    pub fn with_max_lives(mut self, lives: u32) -> Self {
        self.max_lives = lives;
        self
    }

    /// Set the number of games per playthrough.
    #[must_use]
    pub fn with_active_games(mut self, count: usize) -> Self {
        self.active_games = count;
        self
    }

    /// Set or clear the opener.
    #[must_use]
    pub fn with_opener(mut self, opener: Option<MiniGameId>) -> Self {
        self.opener = opener;
        self
    }

    /// Set the post-failure behaviour.
    #[must_use]
    pub fn with_after_failure(mut self, after: AfterFailure) -> Self {
        self.after_failure = after;
        self
    }

    /// Pin the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the game-over destination.
    #[must_use]
    pub fn with_destination(mut self, url: impl Into<String>) -> Self {
        self.destination_url = url.into();
        self
    }

    /// Set the bridge configuration.
    #[must_use]
    pub fn with_bridge(mut self, bridge: BridgeConfig) -> Self {
        self.bridge = bridge;
        self
    }

    /// Validate against the catalog the session will be built from.
    pub fn validate(&self, registry: &MiniGameRegistry) -> Result<(), ConfigError> {
        if self.max_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.active_games == 0 {
            return Err(ConfigError::NoGames);
        }
        if registry.implemented().next().is_none() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(opener) = self.opener {
            if !registry.has_widget(opener) {
                return Err(ConfigError::UnknownOpener(opener));
            }
        }
        if self.bridge.enabled {
            self.bridge.validate()?;
        }
        Ok(())
    }
}
