//! What the host should display.

use serde::Serialize;

use crate::catalog::{ConsentArticle, MiniGameDefinition};

/// Lives as shown in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LifeDisplay {
    pub current: u32,
    pub max: u32,
}

/// The current screen, derived from the session and the mounted widget.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "kebab-case")]
pub enum Screen {
    /// Start screen. `returning` after a return-to-idle failure.
    Idle { lives: LifeDisplay, returning: bool },
    /// A game is mounted.
    Playing {
        definition: MiniGameDefinition,
        /// 1-based position in the sequence.
        progress: usize,
        total: usize,
        lives: LifeDisplay,
        /// Terms article shown alongside the opening games.
        #[serde(skip)]
        article: Option<&'static ConsentArticle>,
        /// Set when the game has no widget.
        placeholder: Option<String>,
    },
    /// Lost a life. Resume by button or card tap.
    WaitingToResume { lives: LifeDisplay },
    /// Every game cleared. Offers reset.
    Cleared {
        cleared: usize,
        elapsed_ms: Option<u64>,
    },
    /// Out of lives.
    GameOver { destination: String },
}

impl Screen {
    /// True for the playing screen.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, Screen::Playing { .. })
    }
}
