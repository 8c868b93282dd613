//! Board snapshots: cells, tokens and the player to move

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Outcome, lines::LineAnalyzer, symmetry::D4Transform};
use crate::{Error, Result};

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// Character used for empty cells in literal encodings
pub const DEFAULT_EMPTY_MARKER: char = '.';

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Literal character of the cell, `.` for empty
    pub fn to_char(self) -> char {
        self.to_char_with(DEFAULT_EMPTY_MARKER)
    }

    /// Character of the cell using a custom empty marker
    pub fn to_char_with(self, empty_marker: char) -> char {
        match self {
            Cell::Empty => empty_marker,
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Parse a cell, accepting the given empty marker as well as `.`
    pub fn from_char(c: char, empty_marker: char) -> Option<Cell> {
        match c {
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            c if c == empty_marker || c == DEFAULT_EMPTY_MARKER => Some(Cell::Empty),
            _ => None,
        }
    }

    /// The player owning this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player token. X is the conventional opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Immutable snapshot of the board: nine cells plus the player to move.
///
/// `Copy` so that episode history can store snapshots rather than references
/// to the live position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; BOARD_CELLS],
    pub to_move: Player,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with the given player to move first
    pub fn new_with_player(first_player: Player) -> Self {
        BoardState {
            cells: [Cell::Empty; BOARD_CELLS],
            to_move: first_player,
        }
    }

    /// Build a snapshot from a slice of cells, inferring the player to move
    /// from the piece counts (X opens when counts are equal).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBoardSize`] unless exactly nine cells are given and
    /// [`Error::InvalidConfiguration`] if the counts differ by more than one.
    pub fn from_cells(cells: &[Cell]) -> Result<Self> {
        let cells: [Cell; BOARD_CELLS] = cells.try_into().map_err(|_| Error::InvalidBoardSize {
            expected: BOARD_CELLS,
            got: cells.len(),
        })?;
        let to_move = Self::infer_turn(&cells)?;
        Ok(BoardState { cells, to_move })
    }

    /// Parse a board from text such as `"XO.X....."` or `"XX.OO...._O"`.
    ///
    /// Whitespace is ignored. An optional `_X`/`_O` suffix names the player to
    /// move; otherwise it is inferred from piece counts.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChar`] for characters that are neither a token nor the
    /// empty marker, [`Error::InvalidBoardSize`] unless there are nine cells.
    pub fn parse(text: &str, empty_marker: char) -> Result<Self> {
        let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, turn) = match cleaned.rsplit_once('_') {
            Some((board, suffix)) if empty_marker != '_' && !board.is_empty() => {
                (board, Some(suffix))
            }
            _ => (cleaned.as_str(), None),
        };

        let mut cells = Vec::with_capacity(BOARD_CELLS);
        for (position, c) in board_part.chars().enumerate() {
            let cell = Cell::from_char(c, empty_marker).ok_or_else(|| Error::InvalidChar {
                character: c,
                position,
                context: text.to_string(),
            })?;
            cells.push(cell);
        }

        let mut state = Self::from_cells(&cells)?;
        if let Some(suffix) = turn {
            state.to_move = match suffix {
                "X" | "x" => Player::X,
                "O" | "o" => Player::O,
                other => {
                    let character = other.chars().next().unwrap_or('_');
                    return Err(Error::InvalidChar {
                        character,
                        position: board_part.chars().count() + 1,
                        context: text.to_string(),
                    });
                }
            };
        }
        Ok(state)
    }

    fn infer_turn(cells: &[Cell; BOARD_CELLS]) -> Result<Player> {
        let x = cells.iter().filter(|&&c| c == Cell::X).count();
        let o = cells.iter().filter(|&&c| c == Cell::O).count();
        if x == o {
            Ok(Player::X)
        } else if x == o + 1 {
            Ok(Player::O)
        } else if o == x + 1 {
            Ok(Player::X)
        } else {
            Err(Error::InvalidConfiguration {
                message: format!("piece counts X={x}, O={o} differ by more than one"),
            })
        }
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Place the mover's token and return the successor snapshot
    #[must_use = "place returns a new board state; the original is unchanged"]
    pub fn place(&self, pos: usize) -> Result<BoardState> {
        if pos >= BOARD_CELLS {
            return Err(Error::invalid_action(pos, "position must be 0-8"));
        }
        if !self.is_empty(pos) {
            return Err(Error::invalid_action(pos, "cell is already occupied"));
        }

        let mut next = *self;
        next.cells[pos] = self.to_move.to_cell();
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    /// Winner of the position, if any line is fully owned
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Terminal outcome: a win takes precedence over a full board
    pub fn outcome(&self) -> Option<Outcome> {
        match self.winner() {
            Some(player) => Some(Outcome::Win(player)),
            None if self.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Literal encoding of the cells in raster order, `.` for empty
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Render the board as three rows using the given empty marker
    pub fn render(&self, empty_marker: char) -> String {
        self.cells
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|&c| c.to_char_with(empty_marker))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Apply a D4 transform to the cells; the player to move is unchanged
    pub fn transform(&self, t: &D4Transform) -> Self {
        BoardState {
            cells: t.apply_to_cells(&self.cells),
            to_move: self.to_move,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(DEFAULT_EMPTY_MARKER))
    }
}
