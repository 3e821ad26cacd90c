//! Session state: lives, sequence cursor and progress.
//!
//! ## SessionState
//!
//! One immutable snapshot of a playthrough:
//! - Status (idle, playing, waiting to resume, cleared, game over)
//! - Lives and the per-game failure counter
//! - The ordered game sequence and the cursor into it
//! - The set of cleared games
//!
//! Every change goes through a pure transition in `transitions`, which
//! returns a new snapshot. The `im` collections make a clone O(1).

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use super::sequence::{build_sequence, SequencePlan};
use crate::catalog::{MiniGameDefinition, MiniGameId, MiniGameRegistry};
use crate::core::{AfterFailure, GateConfig, GateRng, Millis};
use crate::error::InvariantViolation;

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    /// Not started, or back at the start screen after a failure.
    #[default]
    Idle,
    /// A mini-game is mounted.
    Playing,
    /// Lost a life; waiting for a manual resume or a bridge card.
    WaitingToResume,
    /// Every game in the sequence was cleared.
    Cleared,
    /// Out of lives.
    GameOver,
}

impl SessionStatus {
    /// True for `Cleared` and `GameOver`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Cleared | SessionStatus::GameOver)
    }
}

/// Immutable playthrough snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub(super) status: SessionStatus,
    pub(super) lives: u32,
    pub(super) max_lives: u32,
    pub(super) game_sequence: Vector<MiniGameDefinition>,
    pub(super) current_index: usize,
    pub(super) total_games: usize,
    pub(super) cleared_games: ImHashSet<MiniGameId>,
    pub(super) failed_attempts: u32,
    pub(super) after_failure: AfterFailure,
    pub(super) started_at: Option<Millis>,
    pub(super) ended_at: Option<Millis>,
}

impl SessionState {
    /// Fresh idle session over an explicit sequence.
    #[must_use]
    pub fn new(
        game_sequence: Vector<MiniGameDefinition>,
        max_lives: u32,
        after_failure: AfterFailure,
    ) -> Self {
        Self {
            status: SessionStatus::Idle,
            lives: max_lives,
            max_lives,
            total_games: game_sequence.len(),
            game_sequence,
            current_index: 0,
            cleared_games: ImHashSet::new(),
            failed_attempts: 0,
            after_failure,
            started_at: None,
            ended_at: None,
        }
    }

    /// Fresh idle session with a new sequence drawn from the implemented
    /// catalog. Used on construction and on reset.
    pub fn from_config(config: &GateConfig, registry: &MiniGameRegistry, rng: &mut GateRng) -> Self {
        let catalog: Vec<MiniGameDefinition> = registry.implemented().cloned().collect();
        let plan = SequencePlan::new(config.opener, config.active_games);
        let sequence = build_sequence(&catalog, plan, rng);
        Self::new(sequence, config.max_lives, config.after_failure)
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Remaining lives.
    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    /// The ordered games of this playthrough.
    #[must_use]
    pub fn game_sequence(&self) -> &Vector<MiniGameDefinition> {
        &self.game_sequence
    }

    /// Cursor into the sequence.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn total_games(&self) -> usize {
        self.total_games
    }

    /// The game under the cursor.
    #[must_use]
    pub fn current_game(&self) -> Option<&MiniGameDefinition> {
        self.game_sequence.get(self.current_index)
    }

    /// Ids of cleared games.
    #[must_use]
    pub fn cleared_games(&self) -> &ImHashSet<MiniGameId> {
        &self.cleared_games
    }

    /// True if `id` was cleared in this session.
    #[must_use]
    pub fn is_cleared(&self, id: MiniGameId) -> bool {
        self.cleared_games.contains(&id)
    }

    /// Failures of the current game since it was reached.
    #[must_use]
    pub fn failed_attempts_for_current_game(&self) -> u32 {
        self.failed_attempts
    }

    /// Post-failure behaviour for this session.
    #[must_use]
    pub fn after_failure(&self) -> AfterFailure {
        self.after_failure
    }

    /// Progress shown to the player, 1-based and capped at the total.
    #[must_use]
    pub fn progress(&self) -> usize {
        (self.current_index + 1).min(self.total_games)
    }

    /// When the session was started.
    #[must_use]
    pub fn started_at(&self) -> Option<Millis> {
        self.started_at
    }

    /// When the session reached a terminal status.
    #[must_use]
    pub fn ended_at(&self) -> Option<Millis> {
        self.ended_at
    }

    /// True once `start` has been applied.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Play duration in milliseconds, once the session has ended.
    #[must_use]
    pub fn elapsed(&self) -> Option<u64> {
        Some(self.ended_at?.since(self.started_at?))
    }

    /// Check the state machine invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.lives > self.max_lives {
            return Err(InvariantViolation::LivesOutOfRange {
                lives: self.lives,
                max_lives: self.max_lives,
            });
        }
        if self.total_games != self.game_sequence.len() {
            return Err(InvariantViolation::TotalMismatch {
                total: self.total_games,
                len: self.game_sequence.len(),
            });
        }
        if self.status == SessionStatus::Playing && self.current_index >= self.total_games {
            return Err(InvariantViolation::IndexOutOfRange {
                index: self.current_index,
                total: self.total_games,
            });
        }
        let mut seen = ImHashSet::new();
        for def in &self.game_sequence {
            if seen.insert(def.id).is_some() {
                return Err(InvariantViolation::DuplicateGame(def.id));
            }
        }
        Ok(())
    }
}
