//! Epsilon-greedy action selection shared by the tabular learners

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::table::ActionValues;
use crate::{
    Error, Result,
    tictactoe::{Board, Player},
};

/// Values closer than this to the maximum count as ties
pub const TIE_TOLERANCE: f64 = 1e-4;

/// Exploration rate that never explores
pub const NO_EXPLORATION: f64 = -1.0;

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Epsilon-greedy selector: explores uniformly with probability ε, otherwise
/// picks uniformly among the actions within [`TIE_TOLERANCE`] of the best value.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64, seed: Option<u64>) -> Self {
        Self {
            epsilon,
            rng: build_rng(seed),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    /// Reseed the internal generator
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Choose an action for `player` at `horizon` (or the live position).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAction`] when the position is already decided and
    /// [`Error::MisalignedPlayer`] when asked about the live position out of turn.
    pub fn select<V: ActionValues + ?Sized>(
        &mut self,
        values: &V,
        board: &Board,
        horizon: Option<usize>,
        player: Player,
    ) -> Result<usize> {
        let legal = board.legal_actions(horizon)?;
        if legal.is_empty() || board.terminal_outcome(horizon)?.is_some() {
            return Err(Error::game_over());
        }
        if horizon.is_none() && board.to_move() != player {
            return Err(Error::MisalignedPlayer {
                player,
                to_move: board.to_move(),
            });
        }

        if self.rng.random::<f64>() < self.epsilon {
            // Explore
            return Ok(*legal.choose(&mut self.rng).unwrap_or(&legal[0]));
        }

        let state = board.state(horizon)?;
        let scored: Vec<(usize, f64)> = legal
            .iter()
            .map(|&action| (action, values.value(state, action)))
            .collect();
        let best = scored
            .iter()
            .map(|&(_, value)| value)
            .fold(f64::NEG_INFINITY, f64::max);
        let ties: Vec<usize> = scored
            .iter()
            .filter(|&&(_, value)| (best - value).abs() <= TIE_TOLERANCE)
            .map(|&(action, _)| action)
            .collect();

        let action = *ties.choose(&mut self.rng).unwrap_or(&legal[0]);
        tracing::trace!(
            ?horizon,
            action,
            best,
            ties = ties.len(),
            "greedy selection"
        );
        Ok(action)
    }

    /// Run `f` with exploration switched off, restoring ε afterwards
    pub fn with_exploration_disabled<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.epsilon;
        self.epsilon = NO_EXPLORATION;
        let result = f(self);
        self.epsilon = saved;
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::tictactoe::BoardState;

    /// Values by raw action index, ignoring the state
    struct Fixed(HashMap<usize, f64>);

    impl ActionValues for Fixed {
        fn value(&self, _state: &BoardState, action: usize) -> f64 {
            self.0.get(&action).copied().unwrap_or(0.0)
        }
    }

    #[test]
    fn test_greedy_picks_unique_maximum() {
        let values = Fixed([(3, 0.2), (7, 0.9), (0, -0.5)].into());
        let board = Board::new();
        let mut policy = EpsilonGreedy::new(0.0, Some(7));
        for _ in 0..20 {
            assert_eq!(policy.select(&values, &board, None, Player::X).unwrap(), 7);
        }
    }

    #[test]
    fn test_near_ties_are_shared() {
        let values = Fixed([(1, 0.5), (2, 0.5 + TIE_TOLERANCE / 2.0)].into());
        let board = Board::new();
        let mut policy = EpsilonGreedy::new(0.0, Some(11));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(policy.select(&values, &board, None, Player::X).unwrap());
        }
        assert_eq!(seen, [1, 2].into());
    }

    #[test]
    fn test_single_legal_action_always_chosen() {
        let mut board = Board::new();
        board.load_position("XOXXOOOX.").unwrap();
        let values = Fixed(HashMap::new());
        let mut policy = EpsilonGreedy::new(1.0, Some(3));
        for _ in 0..20 {
            assert_eq!(policy.select(&values, &board, None, Player::X).unwrap(), 8);
        }
    }

    #[test]
    fn test_exploration_only_returns_legal_actions() {
        let mut board = Board::new();
        board.apply_move(4).unwrap();
        let values = Fixed(HashMap::new());
        let mut policy = EpsilonGreedy::new(1.0, Some(5));
        for _ in 0..50 {
            let action = policy.select(&values, &board, None, Player::O).unwrap();
            assert_ne!(action, 4);
            assert!(action < 9);
        }
    }

    #[test]
    fn test_misaligned_player() {
        let board = Board::new();
        let values = Fixed(HashMap::new());
        let mut policy = EpsilonGreedy::new(0.0, Some(1));
        let err = policy.select(&values, &board, None, Player::O).unwrap_err();
        assert!(matches!(
            err,
            Error::MisalignedPlayer {
                player: Player::O,
                to_move: Player::X
            }
        ));
        // Historical positions are not turn-checked
        assert!(policy.select(&values, &board, Some(0), Player::O).is_ok());
    }

    #[test]
    fn test_won_position_with_empty_cells_is_rejected() {
        let mut board = Board::new();
        for m in [0, 3, 1, 4, 2] {
            board.apply_move(m).unwrap();
        }
        assert_eq!(board.legal_actions(None).unwrap().len(), 4);

        let values = Fixed(HashMap::new());
        let mut policy = EpsilonGreedy::new(1.0, Some(1));
        assert!(matches!(
            policy.select(&values, &board, None, Player::O),
            Err(Error::InvalidAction { action: None, .. })
        ));
        // Same check at a historical horizon, and earlier positions stay open
        assert!(policy.select(&values, &board, Some(5), Player::O).is_err());
        assert!(policy.select(&values, &board, Some(4), Player::X).is_ok());
    }

    #[test]
    fn test_no_legal_actions() {
        let mut board = Board::new();
        board.load_position("XOXXOOOXX").unwrap();
        let values = Fixed(HashMap::new());
        let mut policy = EpsilonGreedy::new(0.0, Some(1));
        assert!(matches!(
            policy.select(&values, &board, None, Player::O),
            Err(Error::InvalidAction { .. })
        ));
    }

    #[test]
    fn test_exploration_disabled_restores_epsilon() {
        let mut policy = EpsilonGreedy::new(0.3, Some(1));
        let inside = policy.with_exploration_disabled(|p| p.epsilon());
        assert_eq!(inside, NO_EXPLORATION);
        assert_eq!(policy.epsilon(), 0.3);
    }
}
