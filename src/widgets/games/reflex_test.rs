//! Press as soon as the signal lights up.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const MIN_DELAY_MS: u64 = 700;
const MAX_DELAY_MS: u64 = 1800;
const REACTION_WINDOW_MS: u64 = 450;

/// Visible phase of the signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReflexPhase {
    /// Waiting for the signal. Pressing now is too early.
    Waiting,
    /// The signal is lit.
    Ready,
    /// The player pressed too early.
    TooEarly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    Go,
    WindowClosed,
}

/// Random delay, then a short reaction window.
#[derive(Debug)]
pub struct ReflexTest {
    core: WidgetCore<Timer>,
    delay_ms: u64,
    phase: ReflexPhase,
}

impl ReflexTest {
    /// Create the widget, drawing the signal delay.
    pub fn new(props: WidgetProps, completion: Completion, mut rng: GateRng) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            delay_ms: rng.gen_range_u64(MIN_DELAY_MS..MAX_DELAY_MS),
            phase: ReflexPhase::Waiting,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ReflexPhase {
        self.phase
    }

    /// Delay before the signal, drawn at construction.
    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

impl MiniGame for ReflexTest {
    widget_bookkeeping!(MiniGameId::ReflexTest);

    fn mount(&mut self, now: Millis) {
        self.core.timers.schedule_after(now, self.delay_ms, Timer::Go);
    }

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() || !matches!(input, Input::Press) {
            return;
        }
        match self.phase {
            ReflexPhase::Waiting => {
                self.phase = ReflexPhase::TooEarly;
                self.core.fail();
            }
            ReflexPhase::Ready => {
                self.core.succeed();
            }
            ReflexPhase::TooEarly => {}
        }
    }

    fn tick(&mut self, now: Millis) {
        while let Some((at, timer)) = self.core.next_due(now) {
            match timer {
                Timer::Go => {
                    self.phase = ReflexPhase::Ready;
                    self.core
                        .timers
                        .schedule_after(at, REACTION_WINDOW_MS, Timer::WindowClosed);
                }
                Timer::WindowClosed => {
                    self.core.fail();
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

    fn mounted() -> (ReflexTest, std::rc::Rc<std::cell::RefCell<Vec<Outcome>>>) {
        let (completion, log) = recorder();
        let mut widget = ReflexTest::new(WidgetProps::default(), completion, GateRng::new(11));
        widget.mount(Millis::ZERO);
        (widget, log)
    }

    #[test]
    fn test_delay_in_range() {
        let (widget, _log) = mounted();
        assert!((MIN_DELAY_MS..MAX_DELAY_MS).contains(&widget.delay_ms()));
    }

    #[test]
    fn test_early_press_fails() {
        let (mut widget, log) = mounted();
        widget.handle(&Input::Press, Millis::new(100));

        assert_eq!(widget.phase(), ReflexPhase::TooEarly);
        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
        assert_eq!(widget.pending_timers(), 0);
    }

    #[test]
    fn test_press_in_window_succeeds() {
        let (mut widget, log) = mounted();
        let go = widget.delay_ms();
        widget.tick(Millis::new(go));
        assert_eq!(widget.phase(), ReflexPhase::Ready);

        widget.handle(&Input::Press, Millis::new(go + 200));
        widget.tick(Millis::new(go + 1_000));
        assert_eq!(*log.borrow(), vec![Outcome::Success]);
    }

    #[test]
    fn test_missed_window_fails() {
        let (mut widget, log) = mounted();
        let go = widget.delay_ms();
        widget.tick(Millis::new(go + REACTION_WINDOW_MS));
        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
    }
}
