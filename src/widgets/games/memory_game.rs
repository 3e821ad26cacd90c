//! Watch a flashing sequence, then repeat it.

use smallvec::SmallVec;

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

/// Number of tiles on the board.
pub const TILE_COUNT: usize = 4;

const TILE_NAMES: [&str; TILE_COUNT] = ["mint", "sky", "rose", "amber"];
const SEQUENCE_LENGTH: usize = 4;
const INTRO_MS: u64 = 2000;
const SHOW_MS: u64 = 450;
const GAP_MS: u64 = 350;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    Show(usize),
    Hide(usize),
}

/// Four flashes drawn with repetition from four tiles.
///
/// Picks are ignored until the reveal has finished. The first wrong pick
/// fails.
#[derive(Debug)]
pub struct MemoryGame {
    core: WidgetCore<Timer>,
    sequence: SmallVec<[usize; SEQUENCE_LENGTH]>,
    step: usize,
    revealing: bool,
    active: Option<usize>,
}

impl MemoryGame {
    /// Create the widget with a random sequence.
    pub fn new(props: WidgetProps, completion: Completion, mut rng: GateRng) -> Self {
        let sequence = (0..SEQUENCE_LENGTH)
            .map(|_| rng.gen_range_usize(0..TILE_COUNT))
            .collect();
        Self {
            core: WidgetCore::new(props, completion),
            sequence,
            step: 0,
            revealing: true,
            active: None,
        }
    }

    /// The sequence to repeat, as tile indices.
    #[must_use]
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Tile names by index.
    #[must_use]
    pub fn tile_names(&self) -> &'static [&'static str] {
        &TILE_NAMES
    }

    /// Tile currently lit during the reveal.
    #[must_use]
    pub fn active_tile(&self) -> Option<usize> {
        self.active
    }

    /// True until the whole sequence has been shown.
    #[must_use]
    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    /// Number of correct picks so far.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }
}

impl MiniGame for MemoryGame {
    widget_bookkeeping!(MiniGameId::MemoryGame);

    fn mount(&mut self, now: Millis) {
        self.core.timers.schedule_after(now, INTRO_MS, Timer::Show(0));
    }

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() || self.revealing {
            return;
        }
        let Input::Choose(tile) = *input else {
            return;
        };
        if self.sequence.get(self.step) == Some(&tile) {
            self.step += 1;
            if self.step >= self.sequence.len() {
                self.core.succeed();
            }
        } else {
            self.core.fail();
        }
    }

    fn tick(&mut self, now: Millis) {
        while let Some((at, timer)) = self.core.next_due(now) {
            match timer {
                Timer::Show(index) => match self.sequence.get(index) {
                    Some(&tile) => {
                        self.active = Some(tile);
                        self.core
                            .timers
                            .schedule_after(at, SHOW_MS, Timer::Hide(index));
                    }
                    None => {
                        self.active = None;
                        self.revealing = false;
                    }
                },
                Timer::Hide(index) => {
                    self.active = None;
                    self.core
                        .timers
                        .schedule_after(at, GAP_MS, Timer::Show(index + 1));
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

    /// Intro plus four show/gap cycles.
    const REVEAL_END: u64 = INTRO_MS + 4 * (SHOW_MS + GAP_MS);

    #[test]
    fn test_reveal_timing() {
        let (completion, _log) = recorder();
        let mut widget = MemoryGame::new(WidgetProps::default(), completion, GateRng::new(5));
        widget.mount(Millis::ZERO);
        let first = widget.sequence()[0];

        widget.tick(Millis::new(1_999));
        assert_eq!(widget.active_tile(), None);

        widget.tick(Millis::new(2_000));
        assert_eq!(widget.active_tile(), Some(first));

        widget.tick(Millis::new(2_450));
        assert_eq!(widget.active_tile(), None);
        assert!(widget.is_revealing());

        widget.tick(Millis::new(REVEAL_END));
        assert!(!widget.is_revealing());
        assert_eq!(widget.pending_timers(), 0);
    }

    #[test]
    fn test_picks_during_reveal_are_ignored() {
        let (completion, log) = recorder();
        let mut widget = MemoryGame::new(WidgetProps::default(), completion, GateRng::new(5));
        widget.mount(Millis::ZERO);

        let wrong = (widget.sequence()[0] + 1) % TILE_COUNT;
        widget.handle(&Input::Choose(wrong), Millis::new(100));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_correct_sequence_succeeds() {
        let (completion, log) = recorder();
        let mut widget = MemoryGame::new(WidgetProps::default(), completion, GateRng::new(5));
        widget.mount(Millis::ZERO);
        widget.tick(Millis::new(REVEAL_END));

        let sequence = widget.sequence().to_vec();
        for tile in sequence {
            widget.handle(&Input::Choose(tile), Millis::new(REVEAL_END + 10));
        }
        assert_eq!(*log.borrow(), vec![Outcome::Success]);
    }

    #[test]
    fn test_deviation_fails_immediately() {
        let (completion, log) = recorder();
        let mut widget = MemoryGame::new(WidgetProps::default(), completion, GateRng::new(5));
        widget.mount(Millis::ZERO);
        widget.tick(Millis::new(REVEAL_END));

        let first = widget.sequence()[0];
        widget.handle(&Input::Choose(first), Millis::new(REVEAL_END + 10));
        let wrong = (widget.sequence()[1] + 1) % TILE_COUNT;
        widget.handle(&Input::Choose(wrong), Millis::new(REVEAL_END + 20));

        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
        assert_eq!(widget.step(), 1);
    }
}
