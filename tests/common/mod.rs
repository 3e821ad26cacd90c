//! Shared helpers for integration tests.

#![allow(dead_code)]

use consent_gate::catalog::{MiniGameId, MiniGameRegistry};
use consent_gate::core::Millis;
use consent_gate::manager::GameManager;
use consent_gate::widgets::games::{
    BasicAgree, Clicker, ColorMatch, DragDrop, LongPress, MathQuiz, ReflexTest, Side,
    TwoChoiceQuiz, CORRECT_PAYLOAD,
};
use consent_gate::widgets::Input;

/// Games every helper here knows how to clear.
pub const SOLVABLE: [MiniGameId; 8] = [
    MiniGameId::BasicAgree,
    MiniGameId::Clicker,
    MiniGameId::DragDrop,
    MiniGameId::ColorMatch,
    MiniGameId::TwoChoiceQuiz,
    MiniGameId::MathQuiz,
    MiniGameId::LongPress,
    MiniGameId::ReflexTest,
];

/// Standard definitions and widgets, restricted to `ids`.
pub fn registry_of(ids: &[MiniGameId]) -> MiniGameRegistry {
    let standard = MiniGameRegistry::standard();
    let mut registry = MiniGameRegistry::new();
    for &id in ids {
        if let Some(def) = standard.get(id) {
            registry.register(def.clone());
        }
    }
    for &id in ids {
        match id {
            MiniGameId::BasicAgree => {
                registry.register_widget(id, |p, c, r| Box::new(BasicAgree::new(p, c, r)))
            }
            MiniGameId::Clicker => {
                registry.register_widget(id, |p, c, r| Box::new(Clicker::new(p, c, r)))
            }
            MiniGameId::DragDrop => {
                registry.register_widget(id, |p, c, r| Box::new(DragDrop::new(p, c, r)))
            }
            MiniGameId::ColorMatch => {
                registry.register_widget(id, |p, c, r| Box::new(ColorMatch::new(p, c, r)))
            }
            MiniGameId::TwoChoiceQuiz => {
                registry.register_widget(id, |p, c, r| Box::new(TwoChoiceQuiz::new(p, c, r)))
            }
            MiniGameId::MathQuiz => {
                registry.register_widget(id, |p, c, r| Box::new(MathQuiz::new(p, c, r)))
            }
            MiniGameId::LongPress => {
                registry.register_widget(id, |p, c, r| Box::new(LongPress::new(p, c, r)))
            }
            MiniGameId::ReflexTest => {
                registry.register_widget(id, |p, c, r| Box::new(ReflexTest::new(p, c, r)))
            }
            _ => {}
        }
    }
    registry
}

/// Clear the mounted game.
///
/// `now` must be within 450 ms of the mount time (the reflex window). It
/// is advanced to the time of the winning input.
pub fn clear_current(manager: &mut GameManager, now: &mut u64) {
    let id = manager
        .state()
        .current_game()
        .map(|d| d.id)
        .expect("a game is mounted");

    match id {
        MiniGameId::BasicAgree => manager.input(&Input::Press, Millis::new(*now)),
        MiniGameId::Clicker => {
            for _ in 0..10 {
                manager.input(&Input::Press, Millis::new(*now));
            }
        }
        MiniGameId::DragDrop => manager.input(
            &Input::Drop(CORRECT_PAYLOAD.to_string()),
            Millis::new(*now),
        ),
        MiniGameId::ColorMatch => {
            let target = manager.widget_as::<ColorMatch>().unwrap().target_index();
            manager.input(&Input::Choose(target), Millis::new(*now));
        }
        MiniGameId::TwoChoiceQuiz => {
            let side = manager.widget_as::<TwoChoiceQuiz>().unwrap().question().correct;
            let index = match side {
                Side::Left => 0,
                Side::Right => 1,
            };
            manager.input(&Input::Choose(index), Millis::new(*now));
        }
        MiniGameId::MathQuiz => {
            let answer = manager.widget_as::<MathQuiz>().unwrap().problem().answer();
            manager.input(&Input::Text(answer.to_string()), Millis::new(*now));
            manager.input(&Input::Submit, Millis::new(*now));
        }
        MiniGameId::LongPress => {
            manager.input(&Input::PressStart, Millis::new(*now));
            *now += 3000;
            manager.tick(Millis::new(*now));
        }
        MiniGameId::ReflexTest => {
            *now += manager.widget_as::<ReflexTest>().unwrap().delay_ms();
            manager.tick(Millis::new(*now));
            manager.input(&Input::Press, Millis::new(*now));
        }
        other => panic!("no solver for {other}"),
    }
}
