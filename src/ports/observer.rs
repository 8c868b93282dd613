//! Observer port - hooks for watching a play session
//!
//! Observers receive session events without the session knowing how they are
//! reported (logs, tallies, test probes).

use crate::{
    Result,
    tictactoe::{Board, Outcome, Player},
};

/// Observer trait for monitoring a session
///
/// # Event Sequence
///
/// 1. `on_episode_start(episode, first_player)`
/// 2. `on_move(board, player, action)` after each applied move
/// 3. `on_learn(board, table_size)` after each learner update
/// 4. `on_episode_end(episode, outcome)` once the episode has an outcome
///
/// All methods default to doing nothing.
pub trait Observer: Send {
    fn on_episode_start(&mut self, _episode: u64, _first_player: Player) -> Result<()> {
        Ok(())
    }

    fn on_move(&mut self, _board: &Board, _player: Player, _action: usize) -> Result<()> {
        Ok(())
    }

    fn on_learn(&mut self, _board: &Board, _table_size: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: u64, _outcome: Outcome) -> Result<()> {
        Ok(())
    }
}
