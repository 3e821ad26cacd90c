//! Pure session transitions.
//!
//! Every transition takes `&SessionState` and returns a new state. An
//! event that does not apply in the current status returns an unchanged
//! clone and is logged at debug.
//!
//! ## Status Graph
//!
//! ```text
//! Idle ──start──▶ Playing ──succeed (last)──▶ Cleared
//!                  │  ▲
//!          succeed │  │ resume
//!       (advance)  ▼  │
//!                 Playing ──fail (lives left)──▶ WaitingToResume | Idle
//!                    └──────fail (no lives)────▶ GameOver
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::{SessionState, SessionStatus};
use crate::catalog::MiniGameDefinition;
use crate::core::{AfterFailure, Millis};

/// Input to `SessionState::apply`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionEvent {
    Start,
    Success,
    Failure,
    Resume,
}

impl SessionState {
    /// Dispatch an event to its transition.
    #[must_use]
    pub fn apply(&self, event: SessionEvent, now: Millis) -> SessionState {
        match event {
            SessionEvent::Start => self.start(now),
            SessionEvent::Success => self.succeed(now),
            SessionEvent::Failure => self.fail(now),
            SessionEvent::Resume => self.resume(),
        }
    }

    /// `Idle → Playing`.
    ///
    /// A fresh session records its start time. An idle session that was
    /// already started (return-to-idle after a failure) re-enters the same
    /// game.
    #[must_use]
    pub fn start(&self, now: Millis) -> SessionState {
        if self.status != SessionStatus::Idle || self.total_games == 0 {
            return self.ignored("start");
        }
        let mut next = self.clone();
        next.status = SessionStatus::Playing;
        next.started_at.get_or_insert(now);
        debug!(index = next.current_index, total = next.total_games, "session started");
        next
    }

    /// The current game was cleared.
    ///
    /// Marks it cleared, then moves to the next game or to `Cleared`.
    #[must_use]
    pub fn succeed(&self, now: Millis) -> SessionState {
        if self.status != SessionStatus::Playing {
            return self.ignored("success");
        }
        let mut next = self.clone();
        if let Some(game) = self.current_game() {
            next.cleared_games.insert(game.id);
            debug!(game = %game.id, "game cleared");
        }

        let following = self.current_index + 1;
        if following < self.total_games {
            next.advance_to(following)
        } else {
            next.status = SessionStatus::Cleared;
            next.ended_at = Some(now);
            debug!(cleared = next.cleared_games.len(), "session cleared");
            next
        }
    }

    /// The current game was failed. Costs one life.
    #[must_use]
    pub fn fail(&self, now: Millis) -> SessionState {
        if self.status != SessionStatus::Playing {
            return self.ignored("failure");
        }
        let mut next = self.clone();
        next.lives = self.lives.saturating_sub(1);
        next.failed_attempts = self.failed_attempts + 1;

        if next.lives == 0 {
            next.status = SessionStatus::GameOver;
            next.ended_at = Some(now);
            debug!(failed_attempts = next.failed_attempts, "game over");
        } else {
            next.status = match self.after_failure {
                AfterFailure::WaitForResume => SessionStatus::WaitingToResume,
                AfterFailure::ReturnToIdle => SessionStatus::Idle,
            };
            debug!(
                lives = next.lives,
                failed_attempts = next.failed_attempts,
                status = ?next.status,
                "life lost"
            );
        }
        next
    }

    /// Back to the same game after a non-terminal failure.
    ///
    /// Accepts `WaitingToResume`, and `Idle` once the session has started
    /// (the return-to-idle variant). The failure counter is kept.
    #[must_use]
    pub fn resume(&self) -> SessionState {
        let resumable = match self.status {
            SessionStatus::WaitingToResume => true,
            SessionStatus::Idle => self.has_started(),
            _ => false,
        };
        if !resumable {
            return self.ignored("resume");
        }
        let mut next = self.clone();
        next.status = SessionStatus::Playing;
        debug!(index = next.current_index, "session resumed");
        next
    }

    /// Move the cursor to game `index` and play it.
    ///
    /// Shared by normal advancement and the debug jump. Resets the
    /// per-game failure counter. Out-of-range indices and terminal
    /// sessions are ignored.
    #[must_use]
    pub fn advance_to(&self, index: usize) -> SessionState {
        if index >= self.total_games || self.status.is_terminal() {
            return self.ignored("advance");
        }
        let mut next = self.clone();
        next.current_index = index;
        next.failed_attempts = 0;
        next.status = SessionStatus::Playing;
        debug!(index, total = next.total_games, "advanced");
        next
    }

    /// Append a game to the sequence, growing `total_games` to match.
    ///
    /// Ignored when the game is already in the sequence.
    #[must_use]
    pub fn with_appended(&self, game: MiniGameDefinition) -> SessionState {
        if self.game_sequence.iter().any(|d| d.id == game.id) {
            return self.ignored("append");
        }
        let mut next = self.clone();
        debug!(game = %game.id, "appended to sequence");
        next.game_sequence.push_back(game);
        next.total_games = next.game_sequence.len();
        next
    }

    fn ignored(&self, event: &str) -> SessionState {
        debug!(event, status = ?self.status, "event ignored in current status");
        self.clone()
    }
}
