//! Winning line analysis

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Player owning every cell of the line, if any
    pub fn line_owner(cells: &[Cell; 9], line: &[usize; 3]) -> Option<Player> {
        let first = cells[line[0]];
        if first != Cell::Empty && line.iter().all(|&idx| cells[idx] == first) {
            first.owner()
        } else {
            None
        }
    }

    /// Every completed line with its owner, in line order
    pub fn completed_lines(cells: &[Cell; 9]) -> Vec<([usize; 3], Player)> {
        WINNING_LINES
            .iter()
            .filter_map(|line| Self::line_owner(cells, line).map(|owner| (*line, owner)))
            .collect()
    }

    /// Winner of the position.
    ///
    /// All eight lines are examined; a player with two completed lines (a
    /// fork finished by one move) is still a single winner.
    pub fn winner(cells: &[Cell; 9]) -> Option<Player> {
        Self::completed_lines(cells)
            .first()
            .map(|&(_, owner)| owner)
    }
}
