//! End-to-end session scenarios through `GameManager`.

mod common;

use common::{clear_current, registry_of, SOLVABLE};
use consent_gate::catalog::{MiniGameId, MiniGameRegistry};
use consent_gate::core::{AfterFailure, GateConfig, Millis};
use consent_gate::manager::{GameManager, Screen};
use consent_gate::session::SessionStatus;
use consent_gate::widgets::Input;
use proptest::prelude::*;

fn solvable_manager(seed: u64) -> GameManager {
    let config = GateConfig::default()
        .with_seed(seed)
        .with_active_games(SOLVABLE.len());
    GameManager::new(config, registry_of(&SOLVABLE)).unwrap()
}

// =============================================================================
// Full Playthroughs
// =============================================================================

#[test]
fn test_clear_whole_sequence() {
    let mut manager = solvable_manager(42);
    let mut now = 1_000;
    manager.start(Millis::new(now));

    for expected_index in 0..SOLVABLE.len() {
        assert_eq!(manager.state().current_index(), expected_index);
        assert!(manager.screen().is_playing());
        now += 10;
        // Idle ticks between inputs must not disturb the mounted game
        manager.tick(Millis::new(now));
        clear_current(&mut manager, &mut now);
    }

    let state = manager.state();
    assert_eq!(state.status(), SessionStatus::Cleared);
    assert_eq!(state.cleared_games().len(), SOLVABLE.len());
    assert_eq!(state.lives(), 3);
    assert_eq!(state.elapsed(), Some(now - 1_000));
    assert!(manager.widget().is_none());
    assert!(matches!(manager.screen(), Screen::Cleared { cleared: 8, .. }));
}

#[test]
fn test_cleared_session_resets_to_fresh_idle() {
    let mut manager = solvable_manager(3);
    let mut now = 0;
    manager.start(Millis::ZERO);
    while manager.state().status() == SessionStatus::Playing {
        clear_current(&mut manager, &mut now);
    }

    manager.reset(Millis::new(now));

    let state = manager.state();
    assert_eq!(state.status(), SessionStatus::Idle);
    assert_eq!(state.current_index(), 0);
    assert!(state.cleared_games().is_empty());
    assert!(!state.has_started());
    assert_eq!(state.game_sequence()[0].id, MiniGameId::BasicAgree);
}

// =============================================================================
// Failures and Lives
// =============================================================================

#[test]
fn test_timeouts_drain_lives_to_game_over() {
    let config = GateConfig::default()
        .with_seed(1)
        .with_active_games(2)
        .with_destination("https://example.test/after");
    let mut manager =
        GameManager::new(config, registry_of(&[MiniGameId::BasicAgree, MiniGameId::MathQuiz])).unwrap();

    manager.start(Millis::ZERO);
    manager.input(&Input::Press, Millis::ZERO);
    assert_eq!(manager.state().current_game().map(|d| d.id), Some(MiniGameId::MathQuiz));

    // Math quiz has a 20 s limit in the catalog
    let mut now = 0;
    for lives_left in [2, 1] {
        now += 20_000;
        manager.tick(Millis::new(now));
        assert_eq!(manager.state().status(), SessionStatus::WaitingToResume);
        assert_eq!(manager.state().lives(), lives_left);
        manager.resume(Millis::new(now));
    }
    now += 20_000;
    manager.tick(Millis::new(now));

    assert_eq!(manager.state().status(), SessionStatus::GameOver);
    assert_eq!(manager.state().lives(), 0);
    assert_eq!(
        manager.screen(),
        Screen::GameOver {
            destination: "https://example.test/after".to_string()
        }
    );

    // Nothing revives a finished session except reset
    manager.resume(Millis::new(now + 1));
    manager.start(Millis::new(now + 1));
    assert_eq!(manager.state().status(), SessionStatus::GameOver);
}

#[test]
fn test_retry_carries_failure_count_into_props() {
    let config = GateConfig::default().with_seed(8).with_active_games(2);
    let mut manager =
        GameManager::new(config, registry_of(&[MiniGameId::BasicAgree, MiniGameId::DragDrop])).unwrap();
    manager.start(Millis::ZERO);
    manager.input(&Input::Press, Millis::ZERO);

    manager.input(&Input::Drop("nope".to_string()), Millis::new(1));
    manager.resume(Millis::new(2));
    manager.input(&Input::Drop("nope".to_string()), Millis::new(3));
    manager.resume(Millis::new(4));

    assert_eq!(manager.state().failed_attempts_for_current_game(), 2);
    assert_eq!(manager.state().lives(), 1);

    let mut now = 5;
    clear_current(&mut manager, &mut now);
    assert_eq!(manager.state().status(), SessionStatus::Cleared);
    assert_eq!(manager.state().lives(), 1);
}

#[test]
fn test_return_to_idle_configuration() {
    let config = GateConfig::default()
        .with_seed(8)
        .with_active_games(2)
        .with_after_failure(AfterFailure::ReturnToIdle);
    let mut manager =
        GameManager::new(config, registry_of(&[MiniGameId::BasicAgree, MiniGameId::DragDrop])).unwrap();
    manager.start(Millis::ZERO);
    manager.input(&Input::Press, Millis::ZERO);
    manager.input(&Input::Drop("nope".to_string()), Millis::new(1));

    assert!(matches!(manager.screen(), Screen::Idle { returning: true, .. }));
    manager.start(Millis::new(2));
    assert_eq!(manager.state().current_index(), 1);
    assert_eq!(manager.state().started_at(), Some(Millis::ZERO));
}

// =============================================================================
// Sequence Selection
// =============================================================================

#[test]
fn test_standard_sequence_shape() {
    let config = GateConfig::default().with_seed(2024);
    let manager = GameManager::with_standard_catalog(config).unwrap();
    let sequence = manager.state().game_sequence();

    assert_eq!(sequence.len(), 10);
    assert_eq!(sequence[0].id, MiniGameId::BasicAgree);
    assert!(sequence.iter().all(|d| d.id != MiniGameId::FinalChallenge));
}

#[test]
fn test_same_seed_same_sequence() {
    let ids = |seed| {
        let manager =
            GameManager::with_standard_catalog(GateConfig::default().with_seed(seed)).unwrap();
        manager
            .state()
            .game_sequence()
            .iter()
            .map(|d| d.id)
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(77), ids(77));
}

proptest! {
    #[test]
    fn prop_sequences_are_unique_and_implemented(seed in any::<u64>(), games in 1usize..25) {
        let config = GateConfig::default().with_seed(seed).with_active_games(games);
        let manager = GameManager::with_standard_catalog(config).unwrap();
        let registry = MiniGameRegistry::standard();
        let sequence = manager.state().game_sequence();

        prop_assert_eq!(sequence.len(), games.min(19));
        prop_assert_eq!(sequence[0].id, MiniGameId::BasicAgree);
        for (i, def) in sequence.iter().enumerate() {
            prop_assert!(registry.has_widget(def.id));
            prop_assert!(sequence.iter().skip(i + 1).all(|other| other.id != def.id));
        }
    }
}
