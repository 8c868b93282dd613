//! Error types for the noughts crate

use thiserror::Error;

use crate::tictactoe::Player;

/// Main error type for the noughts crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action{}: {reason}", describe_action(.action))]
    InvalidAction {
        action: Option<usize>,
        reason: String,
    },

    #[error("{player} cannot move: it is {to_move}'s turn")]
    MisalignedPlayer { player: Player, to_move: Player },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidChar {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid board size: expected {expected} cells, got {got}")]
    InvalidBoardSize { expected: usize, got: usize },

    #[error("horizon {horizon} is outside the episode history (length {len})")]
    InvalidHorizon { horizon: usize, len: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidAction`]
    pub(crate) fn invalid_action(action: usize, reason: impl Into<String>) -> Self {
        Error::InvalidAction {
            action: Some(action),
            reason: reason.into(),
        }
    }

    /// [`Error::InvalidAction`] raised when a decided position is asked for a move
    pub(crate) fn game_over() -> Self {
        Error::InvalidAction {
            action: None,
            reason: "the game is already over".to_string(),
        }
    }
}

fn describe_action(action: &Option<usize>) -> String {
    action.map(|a| format!(" {a}")).unwrap_or_default()
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "perform I/O".to_string(),
            source,
        }
    }
}
