//! Reward functions injected by the driver

use crate::tictactoe::{Board, Outcome, Player};

/// Reward signal for `player` at `horizon` (or the live position).
///
/// Any `Fn(&Board, Player, Option<usize>) -> f64` closure is a reward function.
pub trait RewardFn {
    fn reward(&self, board: &Board, player: Player, horizon: Option<usize>) -> f64;
}

impl<F> RewardFn for F
where
    F: Fn(&Board, Player, Option<usize>) -> f64,
{
    fn reward(&self, board: &Board, player: Player, horizon: Option<usize>) -> f64 {
        self(board, player, horizon)
    }
}

/// +1 for a win, -1 for a loss, 0 for a draw or a position still in play.
///
/// A horizon past the end of history counts as still in play.
pub fn outcome_reward(board: &Board, player: Player, horizon: Option<usize>) -> f64 {
    match board.terminal_outcome(horizon).ok().flatten() {
        Some(Outcome::Win(winner)) if winner == player => 1.0,
        Some(Outcome::Win(_)) => -1.0,
        Some(Outcome::Draw) | None => 0.0,
    }
}
