//! Common test utilities for the noughts test suite.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use noughts::{
    Result,
    ports::Observer,
    session::TallyObserver,
    tictactoe::{Board, BoardState, Outcome, Player},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

/// Parse a position written with `.` for empty cells
pub fn position(text: &str) -> BoardState {
    BoardState::parse(text, '.').expect("valid test position")
}

/// Apply a sequence of moves to a board
pub fn play(board: &mut Board, moves: &[usize]) {
    for &m in moves {
        board.apply_move(m).expect("legal test move");
    }
}

/// Play uniformly random moves from `board` until the game ends
pub fn play_out(board: &mut Board, rng: &mut StdRng) -> Outcome {
    loop {
        if let Some(outcome) = board.outcome() {
            return outcome;
        }
        let legal = board.legal_actions(None).expect("live position");
        let action = *legal.choose(rng).expect("non-terminal position has moves");
        board.apply_move(action).expect("legal random move");
    }
}

/// Random position reached by `plies` random moves, stopping early at a terminal
pub fn random_position(seed: u64, plies: usize) -> BoardState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    for _ in 0..plies {
        if board.outcome().is_some() {
            break;
        }
        let legal = board.legal_actions(None).expect("live position");
        let action = legal[rng.random_range(0..legal.len())];
        board.apply_move(action).expect("legal random move");
    }
    *board.current()
}

/// Observer handle whose tally stays readable after the session takes ownership
#[derive(Clone, Default)]
pub struct SharedTally(pub Arc<Mutex<TallyObserver>>);

impl SharedTally {
    pub fn snapshot(&self) -> TallyObserver {
        self.0.lock().expect("tally lock").clone()
    }
}

impl Observer for SharedTally {
    fn on_move(&mut self, board: &Board, player: Player, action: usize) -> Result<()> {
        self.0
            .lock()
            .expect("tally lock")
            .on_move(board, player, action)
    }

    fn on_learn(&mut self, board: &Board, table_size: usize) -> Result<()> {
        self.0
            .lock()
            .expect("tally lock")
            .on_learn(board, table_size)
    }

    fn on_episode_end(&mut self, episode: u64, outcome: Outcome) -> Result<()> {
        self.0
            .lock()
            .expect("tally lock")
            .on_episode_end(episode, outcome)
    }
}
