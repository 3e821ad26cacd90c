//! The 15-puzzle.

use smallvec::SmallVec;

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const SIDE: usize = 4;
const CELLS: usize = SIDE * SIDE;
const SHUFFLE_STEPS: usize = 50;
const SOLVED_DELAY_MS: u64 = 500;

/// A 4×4 board. Tiles are 1..=15, the blank is 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideBoard {
    cells: [u8; CELLS],
}

impl Default for SlideBoard {
    fn default() -> Self {
        Self::solved()
    }
}

impl SlideBoard {
    /// Ascending tiles with the blank in the last cell.
    #[must_use]
    pub fn solved() -> Self {
        let mut cells = [0u8; CELLS];
        for (i, cell) in cells.iter_mut().take(CELLS - 1).enumerate() {
            *cell = (i + 1) as u8;
        }
        Self { cells }
    }

    /// Shuffle by a random walk of the blank from the solved position.
    ///
    /// The walk never steps straight back. Walks that end solved are
    /// thrown away and redrawn.
    pub fn shuffled(rng: &mut GateRng) -> Self {
        loop {
            let mut board = Self::solved();
            let mut previous = None;
            for _ in 0..SHUFFLE_STEPS {
                let blank = board.blank();
                let moves: SmallVec<[usize; 4]> = neighbours(blank)
                    .into_iter()
                    .filter(|&cell| Some(cell) != previous)
                    .collect();
                if let Some(&next) = rng.choose(&moves) {
                    board.cells.swap(blank, next);
                    previous = Some(blank);
                }
            }
            if !board.is_solved() {
                return board;
            }
        }
    }

    /// Build a board from raw cells. Returns None unless it holds each of
    /// 0..=15 exactly once.
    #[must_use]
    pub fn from_cells(cells: [u8; CELLS]) -> Option<Self> {
        let mut seen = [false; CELLS];
        for &cell in &cells {
            let slot = seen.get_mut(usize::from(cell))?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        Some(Self { cells })
    }

    /// Tiles in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// Index of the blank cell.
    #[must_use]
    pub fn blank(&self) -> usize {
        self.cells.iter().position(|&c| c == 0).unwrap_or(CELLS - 1)
    }

    /// True when tiles ascend and the blank is last.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::solved()
    }

    /// Slide the tile at `cell` into the blank. Returns false if it is not
    /// adjacent to the blank.
    pub fn slide(&mut self, cell: usize) -> bool {
        let blank = self.blank();
        if !neighbours(blank).contains(&cell) {
            return false;
        }
        self.cells.swap(blank, cell);
        true
    }
}

fn neighbours(cell: usize) -> SmallVec<[usize; 4]> {
    let (row, col) = (cell / SIDE, cell % SIDE);
    let mut out = SmallVec::new();
    if row > 0 {
        out.push(cell - SIDE);
    }
    if row < SIDE - 1 {
        out.push(cell + SIDE);
    }
    if col > 0 {
        out.push(cell - 1);
    }
    if col < SIDE - 1 {
        out.push(cell + 1);
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Celebrate;

/// Succeeds half a second after the board is solved. Never fails on its
/// own; the session decides what an abandoned puzzle means.
#[derive(Debug)]
pub struct SlidePuzzle {
    core: WidgetCore<Celebrate>,
    board: SlideBoard,
    moves: u32,
    solved: bool,
}

impl SlidePuzzle {
    /// Create the widget with a shuffled board.
    pub fn new(props: WidgetProps, completion: Completion, mut rng: GateRng) -> Self {
        Self::with_board(props, completion, SlideBoard::shuffled(&mut rng))
    }

    /// Create the widget from a known board.
    pub fn with_board(props: WidgetProps, completion: Completion, board: SlideBoard) -> Self {
        Self {
            core: WidgetCore::new(props, completion),
            solved: board.is_solved(),
            board,
            moves: 0,
        }
    }

    #[must_use]
    pub fn board(&self) -> &SlideBoard {
        &self.board
    }

    /// Accepted slides so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }
}

impl MiniGame for SlidePuzzle {
    widget_bookkeeping!(MiniGameId::SlidePuzzle);

    fn handle(&mut self, input: &Input, now: Millis) {
        if self.core.is_inert() || self.solved {
            return;
        }
        let Input::Choose(cell) = *input else {
            return;
        };
        if !self.board.slide(cell) {
            return;
        }
        self.moves += 1;
        if self.board.is_solved() {
            self.solved = true;
            self.core
                .timers
                .schedule_after(now, SOLVED_DELAY_MS, Celebrate);
        }
    }

    fn tick(&mut self, now: Millis) {
        if let Some((_, Celebrate)) = self.core.next_due(now) {
            self.core.succeed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::games::testing::recorder;
    use crate::widgets::Outcome;
    use proptest::prelude::*;

    /// Solved except that 15 and the blank are swapped.
    fn one_move_away() -> SlideBoard {
        let mut cells = *SlideBoard::solved().cells();
        cells.swap(14, 15);
        SlideBoard::from_cells(cells).unwrap()
    }

    #[test]
    fn test_final_slide_succeeds_after_delay() {
        let (completion, log) = recorder();
        let mut widget = SlidePuzzle::with_board(WidgetProps::default(), completion, one_move_away());

        widget.handle(&Input::Choose(15), Millis::new(1_000));
        assert!(widget.is_solved());
        assert!(log.borrow().is_empty());

        widget.tick(Millis::new(1_499));
        assert!(log.borrow().is_empty());
        widget.tick(Millis::new(1_500));
        assert_eq!(*log.borrow(), vec![Outcome::Success]);
        assert_eq!(widget.moves(), 1);
    }

    #[test]
    fn test_non_adjacent_slide_is_ignored() {
        let (completion, _log) = recorder();
        let mut widget = SlidePuzzle::with_board(WidgetProps::default(), completion, one_move_away());

        widget.handle(&Input::Choose(0), Millis::ZERO);
        assert_eq!(widget.moves(), 0);
        assert_eq!(*widget.board(), one_move_away());
    }

    #[test]
    fn test_from_cells_rejects_duplicates() {
        let mut cells = *SlideBoard::solved().cells();
        cells[0] = 2;
        assert!(SlideBoard::from_cells(cells).is_none());
    }

    proptest! {
        #[test]
        fn prop_shuffle_is_a_permutation_and_unsolved(seed in any::<u64>()) {
            let mut rng = GateRng::new(seed);
            let board = SlideBoard::shuffled(&mut rng);
            prop_assert!(!board.is_solved());
            prop_assert!(SlideBoard::from_cells(*board.cells()).is_some());
        }
    }
}
