//! Answer a two-digit arithmetic problem before time runs out.

use std::fmt;

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const DEFAULT_LIMIT_SECS: u32 = 12;

/// Arithmetic operator of a problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
}

/// A generated `left op right` problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Problem {
    pub left: i32,
    pub right: i32,
    pub operator: Operator,
}

impl Problem {
    /// Draw operands in 10..=99 and a random operator.
    pub fn generate(rng: &mut GateRng) -> Self {
        let left = rng.gen_range(10..100);
        let right = rng.gen_range(10..100);
        let operator = if rng.gen_bool(0.5) {
            Operator::Add
        } else {
            Operator::Sub
        };
        Self {
            left,
            right,
            operator,
        }
    }

    /// The expected answer.
    #[must_use]
    pub fn answer(&self) -> i32 {
        match self.operator {
            Operator::Add => self.left + self.right,
            Operator::Sub => self.left - self.right,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.operator {
            Operator::Add => '+',
            Operator::Sub => '-',
        };
        write!(f, "{} {} {} = ?", self.left, symbol, self.right)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Deadline;

/// Type the answer, then submit. Wrong, unparsable or late answers fail.
#[derive(Debug)]
pub struct MathQuiz {
    core: WidgetCore<Deadline>,
    problem: Problem,
    answer: String,
}

impl MathQuiz {
    /// Create the widget with a freshly generated problem.
    pub fn new(props: WidgetProps, completion: Completion, mut rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            problem: Problem::generate(&mut rng),
            answer: String::new(),
        }
    }

    /// The problem shown for this mount.
    #[must_use]
    pub fn problem(&self) -> Problem {
        self.problem
    }

    /// Current contents of the answer field.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl MiniGame for MathQuiz {
    widget_bookkeeping!(MiniGameId::MathQuiz);

    fn mount(&mut self, now: Millis) {
        let limit = self.core.props.time_limit_ms(DEFAULT_LIMIT_SECS);
        self.core.timers.schedule_after(now, limit, Deadline);
    }

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        match input {
            Input::Text(text) => self.answer.clone_from(text),
            Input::Submit => {
                let correct = self
                    .answer
                    .trim()
                    .parse::<i32>()
                    .is_ok_and(|value| value == self.problem.answer());
                if correct {
                    self.core.succeed();
                } else {
                    self.core.fail();
                }
            }
            _ => {}
        }
    }

    fn tick(&mut self, now: Millis) {
        if let Some((_, Deadline)) = self.core.next_due(now) {
            self.core.fail();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::games::testing::recorder;
    use crate::widgets::Outcome;
    use proptest::prelude::*;

    #[test]
    fn test_correct_answer_succeeds() {
        let (completion, log) = recorder();
        let mut widget = MathQuiz::new(WidgetProps::default(), completion, GateRng::new(9));
        widget.mount(Millis::ZERO);

        let answer = widget.problem().answer().to_string();
        widget.handle(&Input::Text(format!(" {answer} ")), Millis::new(100));
        widget.handle(&Input::Submit, Millis::new(200));

        assert_eq!(*log.borrow(), vec![Outcome::Success]);
    }

    #[test]
    fn test_wrong_or_garbage_answer_fails() {
        let (completion, log) = recorder();
        let mut widget = MathQuiz::new(WidgetProps::default(), completion, GateRng::new(9));
        widget.mount(Millis::ZERO);

        widget.handle(&Input::Text("twelve".into()), Millis::new(100));
        widget.handle(&Input::Submit, Millis::new(200));

        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
    }

    #[test]
    fn test_timeout_fails() {
        let (completion, log) = recorder();
        let mut widget = MathQuiz::new(WidgetProps::new(Some(20), 0), completion, GateRng::new(9));
        widget.mount(Millis::ZERO);

        widget.tick(Millis::new(19_999));
        assert!(log.borrow().is_empty());
        widget.tick(Millis::new(20_000));
        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
    }

    proptest! {
        #[test]
        fn prop_operands_are_two_digit(seed in any::<u64>()) {
            let mut rng = GateRng::new(seed);
            let problem = Problem::generate(&mut rng);
            prop_assert!((10..=99).contains(&problem.left));
            prop_assert!((10..=99).contains(&problem.right));
        }
    }
}
