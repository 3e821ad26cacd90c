//! Mini-game implementations.
//!
//! One module per game. Each widget is built from `WidgetProps`, a
//! `Completion` and its own forked `GateRng`, and satisfies the
//! `MiniGame` contract. None of them share state.

mod basic_agree;
mod chess_board;
mod clicker;
mod color_match;
mod dodge_game;
mod drag_drop;
mod escape_button;
mod long_press;
mod math_quiz;
mod maze;
mod memory_game;
mod rapid_click;
mod reflex_test;
mod rhythm_game;
mod slide_puzzle;
mod slot_machine;
mod timing_game;
mod two_choice_quiz;
mod word_search;

pub use basic_agree::BasicAgree;
pub use chess_board::{ChessBoard, Piece, PieceKind};
pub use clicker::Clicker;
pub use color_match::{ColorMatch, ColorOption, COLORS};
pub use dodge_game::{DodgeGame, Obstacle};
pub use drag_drop::{DragDrop, CORRECT_PAYLOAD};
pub use escape_button::EscapeButton;
pub use long_press::LongPress;
pub use math_quiz::{MathQuiz, Operator, Problem};
pub use maze::Maze;
pub use memory_game::{MemoryGame, TILE_COUNT};
pub use rapid_click::RapidClick;
pub use reflex_test::{ReflexPhase, ReflexTest};
pub use rhythm_game::{Judgement, RhythmGame};
pub use slide_puzzle::{SlideBoard, SlidePuzzle};
pub use slot_machine::{SlotMachine, SYMBOLS};
pub use timing_game::TimingGame;
pub use two_choice_quiz::{Question, Side, TwoChoiceQuiz};
pub use word_search::WordSearch;
