//! Development-only keyboard jumps between games.
//!
//! Compiled only with the `debug-jump` feature. A mapped key jumps
//! straight to its game, appending it to the sequence when this
//! playthrough did not draw it.

use tracing::{info, warn};

use crate::catalog::MiniGameId;
use crate::core::Millis;
use crate::manager::GameManager;
use crate::session::SessionStatus;

/// Key → game map.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugKeys;

impl DebugKeys {
    const MAP: [(char, MiniGameId); 19] = [
        ('1', MiniGameId::BasicAgree),
        ('2', MiniGameId::EscapeButton),
        ('3', MiniGameId::RapidClick),
        ('4', MiniGameId::TimingGame),
        ('5', MiniGameId::LongPress),
        ('6', MiniGameId::Clicker),
        ('7', MiniGameId::MathQuiz),
        ('8', MiniGameId::MemoryGame),
        ('9', MiniGameId::ReflexTest),
        ('0', MiniGameId::TwoChoiceQuiz),
        ('q', MiniGameId::ColorMatch),
        ('w', MiniGameId::WordSearch),
        ('e', MiniGameId::DragDrop),
        ('a', MiniGameId::Maze),
        ('s', MiniGameId::SlotMachine),
        ('d', MiniGameId::SlidePuzzle),
        ('f', MiniGameId::ChessBoard),
        ('g', MiniGameId::DodgeGame),
        ('r', MiniGameId::RhythmGame),
    ];

    /// The game bound to `key`, case-insensitive.
    #[must_use]
    pub fn game_for(key: char) -> Option<MiniGameId> {
        let key = key.to_ascii_lowercase();
        Self::MAP.iter().find(|(k, _)| *k == key).map(|(_, id)| *id)
    }
}

impl GameManager {
    /// Jump to the game bound to `key`. Returns true if the session moved.
    ///
    /// Terminal sessions stay put.
    pub fn debug_jump(&mut self, key: char, now: Millis) -> bool {
        let Some(target) = DebugKeys::game_for(key) else {
            return false;
        };

        let mut next = self.state().clone();
        if next.status() == SessionStatus::Idle && !next.has_started() {
            next = next.start(now);
        }
        let index = match next.game_sequence().iter().position(|d| d.id == target) {
            Some(index) => index,
            None => {
                let Some(definition) = self.registry().implemented().find(|d| d.id == target) else {
                    warn!(game = %target, "debug jump target not in catalog");
                    return false;
                };
                next = next.with_appended(definition.clone());
                next.total_games() - 1
            }
        };
        let next = next.advance_to(index);
        if next.status() != SessionStatus::Playing || next.current_index() != index {
            return false;
        }

        info!(game = %target, index, %key, "debug jump");
        self.commit(next, now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GateConfig;

    #[test]
    fn test_key_map() {
        assert_eq!(DebugKeys::game_for('1'), Some(MiniGameId::BasicAgree));
        assert_eq!(DebugKeys::game_for('R'), Some(MiniGameId::RhythmGame));
        assert_eq!(DebugKeys::game_for('z'), None);
    }

    #[test]
    fn test_jump_appends_missing_game() {
        let config = GateConfig::default().with_seed(5).with_active_games(1);
        let mut manager = GameManager::with_standard_catalog(config).unwrap();

        assert!(manager.debug_jump('a', Millis::ZERO));
        assert_eq!(manager.state().total_games(), 2);
        assert_eq!(manager.widget().map(|w| w.id()), Some(MiniGameId::Maze));
        assert!(manager.state().check_invariants().is_ok());

        // Jumping back to the opener reuses its slot
        assert!(manager.debug_jump('1', Millis::new(1)));
        assert_eq!(manager.state().current_index(), 0);
        assert_eq!(manager.state().total_games(), 2);
    }
}
