//! Pick the right one of two answers.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

/// Which of the two buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }
}

/// A two-answer question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    pub prompt: &'static str,
    pub left: &'static str,
    pub right: &'static str,
    pub correct: Side,
}

const QUESTIONS: [Question; 3] = [
    Question {
        prompt: "Choose \"I agree\"",
        left: "I agree",
        right: "I do not agree",
        correct: Side::Left,
    },
    Question {
        prompt: "Will you pretend to read the terms?",
        left: "Yes",
        right: "No",
        correct: Side::Right,
    },
    Question {
        prompt: "Which one is kinder to developers?",
        left: "Kind",
        right: "Strict",
        correct: Side::Left,
    },
];

/// `Choose(0)` picks left, `Choose(1)` picks right.
#[derive(Debug)]
pub struct TwoChoiceQuiz {
    core: WidgetCore<()>,
    question: Question,
}

impl TwoChoiceQuiz {
    /// Create the widget with a random question.
    pub fn new(props: WidgetProps, completion: Completion, mut rng: GateRng) -> Self {
        let question = QUESTIONS[rng.gen_range_usize(0..QUESTIONS.len())];
        Self {
            core: WidgetCore::new(props, completion),
            question,
        }
    }

    /// The question for this mount.
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }
}

impl MiniGame for TwoChoiceQuiz {
    widget_bookkeeping!(MiniGameId::TwoChoiceQuiz);

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        let Some(side) = (match *input {
            Input::Choose(index) => Side::from_index(index),
            _ => None,
        }) else {
            return;
        };
        if side == self.question.correct {
            self.core.succeed();
        } else {
            self.core.fail();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::games::testing::recorder;
    use crate::widgets::Outcome;

    fn index_of(side: Side) -> usize {
        match side {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    #[test]
    fn test_correct_side_succeeds() {
        for seed in 0..8 {
            let (completion, log) = recorder();
            let mut widget = TwoChoiceQuiz::new(WidgetProps::default(), completion, GateRng::new(seed));
            let correct = index_of(widget.question().correct);

            widget.handle(&Input::Choose(correct), Millis::ZERO);
            assert_eq!(*log.borrow(), vec![Outcome::Success]);
        }
    }

    #[test]
    fn test_wrong_side_fails_and_out_of_range_is_ignored() {
        let (completion, log) = recorder();
        let mut widget = TwoChoiceQuiz::new(WidgetProps::default(), completion, GateRng::new(2));
        let wrong = 1 - index_of(widget.question().correct);

        widget.handle(&Input::Choose(7), Millis::ZERO);
        assert!(log.borrow().is_empty());

        widget.handle(&Input::Choose(wrong), Millis::new(1));
        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
    }
}
