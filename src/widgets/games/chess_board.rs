//! Find the four knights on a cluttered chess board.

use smallvec::SmallVec;

use crate::catalog::MiniGameId;
use crate::core::{GateRng, Millis};
use crate::widgets::contract::widget_bookkeeping;
use crate::widgets::{Completion, Input, MiniGame, WidgetCore, WidgetProps};

const SQUARES: usize = 64;
const KNIGHTS: usize = 4;
const DECOYS: usize = 10;

/// Kind of chess piece on a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

const DECOY_KINDS: [PieceKind; 4] = [
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// A piece and its square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub square: usize,
    pub is_target: bool,
}

/// `Choose(square)` on a knight marks it found. Everything else is
/// ignored, so the widget can only succeed.
#[derive(Debug)]
pub struct ChessBoard {
    core: WidgetCore<()>,
    pieces: SmallVec<[Piece; KNIGHTS + DECOYS]>,
    found: SmallVec<[usize; KNIGHTS]>,
}

impl ChessBoard {
    /// Create the widget with pieces on distinct random squares.
    pub fn new(props: WidgetProps, completion: Completion, mut rng: GateRng) -> Self {
        let mut squares: Vec<usize> = (0..SQUARES).collect();
        rng.shuffle(&mut squares);

        let mut pieces: SmallVec<[Piece; KNIGHTS + DECOYS]> = squares
            .iter()
            .take(KNIGHTS + DECOYS)
            .enumerate()
            .map(|(i, &square)| {
                if i < KNIGHTS {
                    Piece {
                        kind: PieceKind::Knight,
                        square,
                        is_target: true,
                    }
                } else {
                    Piece {
                        kind: DECOY_KINDS[rng.gen_range_usize(0..DECOY_KINDS.len())],
                        square,
                        is_target: false,
                    }
                }
            })
            .collect();
        pieces.sort_by_key(|p| p.square);

        Self {
            core: WidgetCore::new(props, completion),
            pieces,
            found: SmallVec::new(),
        }
    }

    /// Every piece, ordered by square.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Piece on `square`, if any.
    #[must_use]
    pub fn piece_at(&self, square: usize) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    /// Squares of the knights found so far.
    #[must_use]
    pub fn found(&self) -> &[usize] {
        &self.found
    }
}

impl MiniGame for ChessBoard {
    widget_bookkeeping!(MiniGameId::ChessBoard);

    fn handle(&mut self, input: &Input, _now: Millis) {
        if self.core.is_inert() {
            return;
        }
        let Input::Choose(square) = *input else {
            return;
        };
        let is_new_target = self.piece_at(square).is_some_and(|p| p.is_target)
            && !self.found.contains(&square);
        if !is_new_target {
            return;
        }
        self.found.push(square);
        if self.found.len() == KNIGHTS {
            self.core.succeed();
        }
    }
}
