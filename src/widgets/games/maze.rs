//! Walk from the top-left corner to the bottom-right one.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Direction, Input, MiniGame, WidgetCore, WidgetProps};

const SIZE: usize = 10;
const DEFAULT_LIMIT_SECS: u32 = 45;
const GOAL: (usize, usize) = (SIZE - 1, SIZE - 1);

/// 1 is a wall. Indexed `[y][x]`.
const LAYOUT: [[u8; SIZE]; SIZE] = [
    [0, 1, 1, 0, 0, 0, 1, 0, 0, 0],
    [0, 0, 1, 0, 1, 0, 1, 0, 1, 0],
    [1, 0, 0, 0, 1, 0, 0, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 0, 1, 0],
    [0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
    [0, 1, 1, 1, 1, 0, 1, 1, 1, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    [1, 1, 1, 0, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 0, 0, 0],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Deadline;

/// Fixed maze driven by `Input::Move`. Blocked moves are ignored.
#[derive(Debug)]
pub struct Maze {
    core: WidgetCore<Deadline>,
    position: (usize, usize),
}

impl Maze {
    /// Create the widget at the start square.
    pub fn new(props: WidgetProps, completion: Completion, _rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            position: (0, 0),
        }
    }

    /// Player position as `(x, y)`.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    /// Goal position as `(x, y)`.
    #[must_use]
    pub fn goal(&self) -> (usize, usize) {
        GOAL
    }

    /// True if `(x, y)` is a wall or off the board.
    #[must_use]
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        LAYOUT.get(y).and_then(|row| row.get(x)).map_or(true, |&cell| cell == 1)
    }

    fn step(&self, direction: Direction) -> Option<(usize, usize)> {
        let (x, y) = self.position;
        let next = match direction {
            Direction::Up => (x, y.checked_sub(1)?),
            Direction::Down => (x, y + 1),
            Direction::Left => (x.checked_sub(1)?, y),
            Direction::Right => (x + 1, y),
        };
        (!self.is_blocked(next.0, next.1)).then_some(next)
    }
}

impl MiniGame for Maze {
    widget_bookkeeping!(MiniGameId::Maze);

    fn mount(&mut self, now: Millis) {
        let limit = self.core.props.time_limit_ms(DEFAULT_LIMIT_SECS);
        self.core.timers.schedule_after(now, limit, Deadline);
    }

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        let Input::Move(direction) = *input else {
            return;
        };
        if let Some(next) = self.step(direction) {
            self.position = next;
            if next == GOAL {
                self.core.succeed();
            }
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
    use Direction::{Down as D, Left as L, Right as R, Up as U};

    const SOLUTION: [Direction; 22] = [
        D, R, D, R, R, U, U, R, R, D, D, R, R, D, D, R, R, D, D, D, D, D,
    ];

    #[test]
    fn test_solution_reaches_goal() {
        let (completion, log) = recorder();
        let mut widget = Maze::new(WidgetProps::default(), completion, GateRng::new(1));
        widget.mount(Millis::ZERO);

        for (i, direction) in SOLUTION.iter().enumerate() {
            widget.handle(&Input::Move(*direction), Millis::new(i as u64 * 100));
        }

        assert_eq!(widget.position(), GOAL);
        assert_eq!(*log.borrow(), vec![Outcome::Success]);
        assert_eq!(widget.pending_timers(), 0);
    }

    #[test]
    fn test_walls_and_edges_are_ignored() {
        let (completion, log) = recorder();
        let mut widget = Maze::new(WidgetProps::default(), completion, GateRng::new(1));

        widget.handle(&Input::Move(U), Millis::ZERO);
        widget.handle(&Input::Move(L), Millis::ZERO);
        widget.handle(&Input::Move(R), Millis::ZERO);
        assert_eq!(widget.position(), (0, 0));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_time_limit_fails() {
        let (completion, log) = recorder();
        let mut widget = Maze::new(WidgetProps::new(Some(45), 0), completion, GateRng::new(1));
        widget.mount(Millis::new(1_000));

        widget.tick(Millis::new(46_000));
        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
    }
}
