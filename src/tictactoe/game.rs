//! Live game model with episode history

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BOARD_CELLS, BoardState, DEFAULT_EMPTY_MARKER, Player};
use crate::{Error, Result};

/// Outcome of a finished episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{player} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// The board model driven by the session.
///
/// Keeps an append-only history of snapshots (`plies + 1` entries) and the
/// chosen actions (`plies` entries). A `horizon` is an index into the
/// snapshot history; `None` means the live position.
#[derive(Debug, Clone)]
pub struct Board {
    history: Vec<BoardState>,
    actions: Vec<usize>,
    empty_marker: char,
    episode: u64,
}

impl Board {
    /// Empty board with X to move
    pub fn new() -> Self {
        Self::from_state(BoardState::new())
    }

    /// Start an episode history from an arbitrary position
    pub fn from_state(initial: BoardState) -> Self {
        Board {
            history: vec![initial],
            actions: Vec::new(),
            empty_marker: DEFAULT_EMPTY_MARKER,
            episode: 0,
        }
    }

    /// Empty board whose display uses a custom empty marker.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChar`] unless the marker is exactly one character that
    /// is neither whitespace nor a player token.
    pub fn with_empty_marker(marker: &str) -> Result<Self> {
        let mut chars = marker.chars();
        let character = match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() && !matches!(c, 'X' | 'x' | 'O' | 'o') => c,
            (first, second) => {
                return Err(Error::InvalidChar {
                    character: second.or(first).unwrap_or(' '),
                    position: usize::from(second.is_some()),
                    context: format!("empty marker '{marker}'"),
                });
            }
        };
        let mut board = Self::new();
        board.empty_marker = character;
        Ok(board)
    }

    /// Parse a starting position using this board's empty marker
    pub fn load_position(&mut self, text: &str) -> Result<()> {
        let state = BoardState::parse(text, self.empty_marker)?;
        self.history = vec![state];
        self.actions.clear();
        self.episode += 1;
        Ok(())
    }

    /// Place the current player's token on `index`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAction`] if the index is out of range, the cell is
    /// occupied, or the episode already has an outcome.
    pub fn apply_move(&mut self, index: usize) -> Result<()> {
        let current = self.current();
        if current.outcome().is_some() {
            return Err(Error::invalid_action(index, "the game is already over"));
        }
        let next = current.place(index)?;
        self.history.push(next);
        self.actions.push(index);
        Ok(())
    }

    /// Empty cells of the live position or of the snapshot at `horizon`, ascending
    pub fn legal_actions(&self, horizon: Option<usize>) -> Result<Vec<usize>> {
        Ok(self.state(horizon)?.empty_positions())
    }

    /// Outcome of the live position or of the snapshot at `horizon`
    pub fn terminal_outcome(&self, horizon: Option<usize>) -> Result<Option<Outcome>> {
        Ok(self.state(horizon)?.outcome())
    }

    /// Outcome of the live position
    pub fn outcome(&self) -> Option<Outcome> {
        self.current().outcome()
    }

    /// Snapshot at `horizon`, or the live one
    pub fn state(&self, horizon: Option<usize>) -> Result<&BoardState> {
        match horizon {
            None => Ok(self.current()),
            Some(h) => self.history.get(h).ok_or(Error::InvalidHorizon {
                horizon: h,
                len: self.history.len(),
            }),
        }
    }

    /// Live snapshot
    pub fn current(&self) -> &BoardState {
        // History always holds the initial snapshot
        &self.history[self.history.len() - 1]
    }

    /// Player to move in the live position
    pub fn to_move(&self) -> Player {
        self.current().to_move
    }

    /// All snapshots of the episode, oldest first
    pub fn history(&self) -> &[BoardState] {
        &self.history
    }

    /// Actions chosen so far, `actions()[i]` leads from `history()[i]`
    pub fn actions(&self) -> &[usize] {
        &self.actions
    }

    /// Number of moves made in this episode
    pub fn plies(&self) -> usize {
        self.actions.len()
    }

    /// Episode counter, bumped on every reset
    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// Begin a new episode on an empty board
    pub fn reset(&mut self, first_player: Player) {
        self.history.clear();
        self.history.push(BoardState::new_with_player(first_player));
        self.actions.clear();
        self.episode += 1;
    }

    /// Row-major indices laid out as the board, for prompts
    pub fn index_guide() -> String {
        (0..BOARD_CELLS)
            .collect::<Vec<_>>()
            .chunks(3)
            .map(|row| row.iter().map(|i| i.to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current().render(self.empty_marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_move_records_history() {
        let mut board = Board::new();
        board.apply_move(4).unwrap();
        board.apply_move(0).unwrap();

        assert_eq!(board.plies(), 2);
        assert_eq!(board.history().len(), 3);
        assert_eq!(board.actions(), &[4, 0]);
        assert_eq!(board.to_move(), Player::X);
        // Earlier snapshots are not affected by later moves
        assert!(board.history()[1].is_empty(0));
    }

    #[test]
    fn test_apply_move_errors() {
        let mut board = Board::new();
        assert!(matches!(
            board.apply_move(9),
            Err(Error::InvalidAction { .. })
        ));
        board.apply_move(0).unwrap();
        assert!(matches!(
            board.apply_move(0),
            Err(Error::InvalidAction { .. })
        ));
        // Failed moves leave history untouched
        assert_eq!(board.plies(), 1);
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut board = Board::new();
        for m in [0, 3, 1, 4, 2] {
            board.apply_move(m).unwrap();
        }
        assert_eq!(board.outcome(), Some(Outcome::Win(Player::X)));
        let err = board.apply_move(8).unwrap_err();
        assert!(err.to_string().contains("over"));
    }

    #[test]
    fn test_horizon_queries() {
        let mut board = Board::new();
        for m in [0, 3, 1, 4, 2] {
            board.apply_move(m).unwrap();
        }
        assert_eq!(board.legal_actions(Some(0)).unwrap().len(), 9);
        assert_eq!(
            board.legal_actions(Some(2)).unwrap(),
            vec![1, 2, 4, 5, 6, 7, 8]
        );
        assert_eq!(board.terminal_outcome(Some(4)).unwrap(), None);
        assert_eq!(
            board.terminal_outcome(Some(5)).unwrap(),
            Some(Outcome::Win(Player::X))
        );
        assert!(matches!(
            board.terminal_outcome(Some(6)),
            Err(Error::InvalidHorizon { horizon: 6, len: 6 })
        ));
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        board.apply_move(4).unwrap();
        let episode = board.episode();
        board.reset(Player::O);

        assert_eq!(board.plies(), 0);
        assert_eq!(board.history().len(), 1);
        assert_eq!(board.to_move(), Player::O);
        assert_eq!(board.episode(), episode + 1);
    }

    #[test]
    fn test_empty_marker_validation() {
        let board = Board::with_empty_marker("-").unwrap();
        assert_eq!(format!("{board}"), "---\n---\n---");

        assert!(matches!(
            Board::with_empty_marker("--"),
            Err(Error::InvalidChar { .. })
        ));
        assert!(matches!(
            Board::with_empty_marker(""),
            Err(Error::InvalidChar { .. })
        ));
        assert!(matches!(
            Board::with_empty_marker("X"),
            Err(Error::InvalidChar { .. })
        ));
    }

    #[test]
    fn test_whitespace_marker_is_rejected() {
        // Positions are parsed with whitespace stripped, so a blank marker
        // could never be loaded back
        for marker in [" ", "\t", "\n"] {
            assert!(matches!(
                Board::with_empty_marker(marker),
                Err(Error::InvalidChar { .. })
            ));
        }
    }

    #[test]
    fn test_load_position_uses_marker() {
        let mut board = Board::with_empty_marker("-").unwrap();
        board.load_position("XX-OO----").unwrap();
        assert_eq!(board.to_move(), Player::X);
        assert_eq!(board.legal_actions(None).unwrap(), vec![2, 5, 6, 7, 8]);
    }
}
