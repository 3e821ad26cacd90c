//! Find the hidden keyword in a grid of letters.

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const GRID_SIZE: usize = 8;
const KEYWORDS: [&str; 5] = ["AGREE", "ACCEPT", "ALLOW", "ASSENT", "CONFIRM"];
/// Decoys reuse keyword letters so the keyword does not stand out.
const DECOYS: &[u8] = b"ACEFGILMNOPRSTW";
const LIMIT_SECS: u32 = 15;
const COUNTDOWN_INTERVAL_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Countdown;

/// 8×8 letters with one keyword hidden left to right inside a row.
///
/// Choosing the first letter of the keyword succeeds. Other cells are
/// ignored. The countdown always runs 15 seconds.
#[derive(Debug)]
pub struct WordSearch {
    core: WidgetCore<Countdown>,
    keyword: &'static str,
    grid: [u8; GRID_SIZE * GRID_SIZE],
    answer: usize,
    seconds_left: u32,
}

impl WordSearch {
    /// Create the widget with a fresh grid.
    pub fn new(props: WidgetProps, completion: Completion, mut rng: GateRng) -> Self {
        let keyword = KEYWORDS[rng.gen_range_usize(0..KEYWORDS.len())];
        let mut grid = [0u8; GRID_SIZE * GRID_SIZE];
        for cell in &mut grid {
            *cell = DECOYS[rng.gen_range_usize(0..DECOYS.len())];
        }

        let row = rng.gen_range_usize(0..GRID_SIZE);
        let col = rng.gen_range_usize(0..GRID_SIZE - keyword.len() + 1);
        let answer = row * GRID_SIZE + col;
        grid[answer..answer + keyword.len()].copy_from_slice(keyword.as_bytes());

        Self {
            core: WidgetCore::new(props, completion),
            keyword,
            grid,
            answer,
            seconds_left: LIMIT_SECS,
        }
    }

    /// The word to find.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    /// Letter at `index` (row-major).
    #[must_use]
    pub fn letter(&self, index: usize) -> Option<char> {
        self.grid.get(index).map(|&b| char::from(b))
    }

    /// Grid rows as strings.
    pub fn rows(&self) -> impl Iterator<Item = &str> + '_ {
        self.grid
            .chunks(GRID_SIZE)
            .map(|row| std::str::from_utf8(row).unwrap_or_default())
    }

    /// Index of the keyword's first letter.
    #[must_use]
    pub fn answer_index(&self) -> usize {
        self.answer
    }

    /// Whole seconds left.
    #[must_use]
    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    fn keyword_starts_at(&self, index: usize) -> bool {
        let col = index % GRID_SIZE;
        if index >= self.grid.len() || col + self.keyword.len() > GRID_SIZE {
            return false;
        }
        &self.grid[index..index + self.keyword.len()] == self.keyword.as_bytes()
    }
}

impl MiniGame for WordSearch {
    widget_bookkeeping!(MiniGameId::WordSearch);

    fn mount(&mut self, now: Millis) {
        self.core
            .timers
            .schedule_after(now, COUNTDOWN_INTERVAL_MS, Countdown);
    }

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        if let Input::Choose(index) = *input {
            if self.keyword_starts_at(index) {
                self.core.succeed();
            }
        }
    }

    fn tick(&mut self, now: Millis) {
        while let Some((at, Countdown)) = self.core.next_due(now) {
            if self.seconds_left <= 1 {
                self.seconds_left = 0;
                self.core.fail();
            } else {
                self.seconds_left -= 1;
                self.core
                    .timers
                    .schedule_after(at, COUNTDOWN_INTERVAL_MS, Countdown);
            }
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
    fn test_start_cell_succeeds() {
        let (completion, log) = recorder();
        let mut widget = WordSearch::new(WidgetProps::default(), completion, GateRng::new(21));
        widget.mount(Millis::ZERO);

        widget.handle(&Input::Choose(widget.answer_index()), Millis::new(500));
        assert_eq!(*log.borrow(), vec![Outcome::Success]);
    }

    #[test]
    fn test_out_of_grid_is_ignored() {
        let (completion, log) = recorder();
        let mut widget = WordSearch::new(WidgetProps::default(), completion, GateRng::new(21));
        widget.mount(Millis::ZERO);

        widget.handle(&Input::Choose(500), Millis::new(500));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_countdown_fails_after_fifteen_seconds() {
        let (completion, log) = recorder();
        let mut widget = WordSearch::new(WidgetProps::new(Some(20), 0), completion, GateRng::new(21));
        widget.mount(Millis::ZERO);

        widget.tick(Millis::new(14_000));
        assert_eq!(widget.seconds_left(), 1);
        widget.tick(Millis::new(15_000));
        assert_eq!(*log.borrow(), vec![Outcome::Failure]);
    }

    proptest! {
        #[test]
        fn prop_keyword_stays_in_one_row(seed in any::<u64>()) {
            let (completion, _log) = recorder();
            let widget = WordSearch::new(WidgetProps::default(), completion, GateRng::new(seed));
            let start = widget.answer_index();
            let end = start + widget.keyword().len() - 1;
            prop_assert_eq!(start / GRID_SIZE, end / GRID_SIZE);
            let found: String = (start..=end).filter_map(|i| widget.letter(i)).collect();
            prop_assert_eq!(found.as_str(), widget.keyword());
        }
    }
}
