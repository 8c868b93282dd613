//! Observer adapters for play sessions

use crate::{
    Result,
    ports::Observer,
    tictactoe::{Board, Outcome, Player},
};

/// Emits session events as `tracing` events
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for TracingObserver {
    fn on_episode_start(&mut self, episode: u64, first_player: Player) -> Result<()> {
        tracing::info!(episode, %first_player, "new episode");
        Ok(())
    }

    fn on_move(&mut self, board: &Board, player: Player, action: usize) -> Result<()> {
        tracing::debug!(
            %player,
            action,
            ply = board.plies(),
            position = %board.current().encode(),
            "move applied"
        );
        Ok(())
    }

    fn on_learn(&mut self, board: &Board, table_size: usize) -> Result<()> {
        tracing::debug!(ply = board.plies(), table_size, "learner updated");
        Ok(())
    }

    fn on_episode_end(&mut self, episode: u64, outcome: Outcome) -> Result<()> {
        tracing::info!(episode, %outcome, "episode ended");
        Ok(())
    }
}

/// Tracks results by token and the number of moves and updates seen
#[derive(Debug, Default, Clone)]
pub struct TallyObserver {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub moves: usize,
    pub updates: usize,
}

impl TallyObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total finished episodes
    pub fn episodes(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

impl Observer for TallyObserver {
    fn on_move(&mut self, _board: &Board, _player: Player, _action: usize) -> Result<()> {
        self.moves += 1;
        Ok(())
    }

    fn on_learn(&mut self, _board: &Board, _table_size: usize) -> Result<()> {
        self.updates += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: u64, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Win(Player::X) => self.x_wins += 1,
            Outcome::Win(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
        Ok(())
    }
}
