//! Stop three spinning reels on the same symbol.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

/// Reel symbols.
pub const SYMBOLS: [&str; 5] = ["cherry", "lemon", "orange", "star", "grape"];

const REELS: usize = 3;
const SPIN_INTERVAL_MS: u64 = 300;
const AUTO_STOP_MS: u64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    Spin(usize),
    AutoStop,
}

/// Each spinning reel re-rolls every 300 ms. `Choose(i)` stops reel `i`.
///
/// Once every reel is stopped the result is judged: three equal symbols
/// win. Reels still spinning after three seconds are stopped where they
/// are.
#[derive(Debug)]
pub struct SlotMachine {
    core: WidgetCore<Timer>,
    rng: GateRng,
    reels: [usize; REELS],
    spinning: [bool; REELS],
}

impl SlotMachine {
    /// Create the widget with all reels spinning.
    pub fn new(props: WidgetProps, completion: Completion, rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            rng,
            reels: [0, 1, 2],
            spinning: [true; REELS],
        }
    }

    /// Symbol index currently shown on each reel.
    #[must_use]
    pub fn reels(&self) -> [usize; REELS] {
        self.reels
    }

    /// Symbol names currently shown.
    #[must_use]
    pub fn symbols(&self) -> [&'static str; REELS] {
        self.reels.map(|s| SYMBOLS[s])
    }

    /// True while reel `index` spins.
    #[must_use]
    pub fn is_spinning(&self, index: usize) -> bool {
        self.spinning.get(index).copied().unwrap_or(false)
    }

    fn stop(&mut self, index: usize) {
        self.spinning[index] = false;
        self.core.timers.cancel_key(&Timer::Spin(index));
    }

    fn judge_if_stopped(&mut self) {
        if self.spinning.iter().any(|&s| s) {
            return;
        }
        let [a, b, c] = self.reels;
        if a == b && b == c {
            self.core.succeed();
        } else {
            self.core.fail();
        }
    }
}

impl MiniGame for SlotMachine {
    widget_bookkeeping!(MiniGameId::SlotMachine);

    fn mount(&mut self, now: Millis) {
        for reel in 0..REELS {
            self.core
                .timers
                .schedule_after(now, SPIN_INTERVAL_MS, Timer::Spin(reel));
        }
        self.core
            .timers
            .schedule_after(now, AUTO_STOP_MS, Timer::AutoStop);
    }

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        if let Input::Choose(index) = *input {
            if self.is_spinning(index) {
                self.stop(index);
                self.judge_if_stopped();
            }
        }
    }

    fn tick(&mut self, now: Millis) {
        while let Some((at, timer)) = self.core.next_due(now) {
            match timer {
                Timer::Spin(reel) => {
                    self.reels[reel] = self.rng.gen_range_usize(0..SYMBOLS.len());
                    self.core
                        .timers
                        .schedule_after(at, SPIN_INTERVAL_MS, Timer::Spin(reel));
                }
                Timer::AutoStop => {
                    for reel in 0..REELS {
                        self.stop(reel);
                    }
                    self.judge_if_stopped();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::games::testing::recorder;
    use crate::widgets::Outcome;

    #[test]
    fn test_mismatched_stop_fails() {
        let (completion, log) = recorder();
        let mut widget = SlotMachine::new(WidgetProps::default(), completion, GateRng::new(1));
        widget.mount(Millis::ZERO);

        // Stopped before the first spin, the reels still show 0, 1, 2
        for reel in 0..3 {
            widget.handle(&Input::Choose(reel), Millis::new(10));
        }

        assert_eq!(widget.reels(), [0, 1, 2]);
        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
        assert_eq!(widget.pending_timers(), 0);
    }

    #[test]
    fn test_stopped_reel_stays_put() {
        let (completion, _log) = recorder();
        let mut widget = SlotMachine::new(WidgetProps::default(), completion, GateRng::new(1));
        widget.mount(Millis::ZERO);

        widget.handle(&Input::Choose(1), Millis::new(10));
        widget.tick(Millis::new(2_900));

        assert!(!widget.is_spinning(1));
        assert!(widget.is_spinning(0));
        assert_eq!(widget.reels()[1], 1);
    }

    #[test]
    fn test_auto_stop_judges_result() {
        for seed in 0..20 {
            let (completion, log) = recorder();
            let mut widget = SlotMachine::new(WidgetProps::default(), completion, GateRng::new(seed));
            widget.mount(Millis::ZERO);

            widget.tick(Millis::new(3_000));

            let [a, b, c] = widget.reels();
            let expected = if a == b && b == c {
                Outcome::Success
            } else {
                Outcome::Failure
            };
            assert_eq!(*log.borrow(), vec![expected]);
            assert!((0..3).all(|reel| !widget.is_spinning(reel)));
        }
    }
}
