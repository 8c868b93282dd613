//! Noughts and crosses rules: snapshots, episode history, lines and symmetry

pub mod board;
pub mod game;
pub mod lines;
pub mod symmetry;

pub use board::{BOARD_CELLS, BoardState, Cell, DEFAULT_EMPTY_MARKER, Player};
pub use game::{Board, Outcome};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use symmetry::D4Transform;
