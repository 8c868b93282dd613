//! State shared by the tabular learners

use super::{policy::EpsilonGreedy, table::ActionValueTable};
use crate::{
    Error, Result,
    tictactoe::{Board, Player},
};

/// Check that a hyperparameter lies in `[0, 1]`
pub(crate) fn validate_unit_interval(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("{name} must be within [0, 1], got {value}"),
        })
    }
}

/// Player token, value table, selector and discount of one agent.
///
/// Both learners embed this and differ only in how `learn` updates the table.
#[derive(Debug, Clone)]
pub struct AgentCore {
    player: Player,
    table: ActionValueTable,
    policy: EpsilonGreedy,
    discount: f64,
}

impl AgentCore {
    pub fn new(
        player: Player,
        epsilon: f64,
        discount: f64,
        default_value: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        validate_unit_interval("epsilon", epsilon)?;
        validate_unit_interval("discount", discount)?;
        if !default_value.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("default value must be finite, got {default_value}"),
            });
        }
        Ok(Self {
            player,
            table: ActionValueTable::new(default_value),
            policy: EpsilonGreedy::new(epsilon, seed),
            discount,
        })
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    pub fn epsilon(&self) -> f64 {
        self.policy.epsilon()
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        validate_unit_interval("epsilon", epsilon)?;
        self.policy.set_epsilon(epsilon);
        Ok(())
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn set_discount(&mut self, discount: f64) -> Result<()> {
        validate_unit_interval("discount", discount)?;
        self.discount = discount;
        Ok(())
    }

    pub fn table(&self) -> &ActionValueTable {
        &self.table
    }

    pub(crate) fn table_mut(&mut self) -> &mut ActionValueTable {
        &mut self.table
    }

    pub fn reseed(&mut self, seed: u64) {
        self.policy.reseed(seed);
    }

    /// Epsilon-greedy choice for this agent's token
    pub fn choose(&mut self, board: &Board, horizon: Option<usize>) -> Result<usize> {
        self.policy.select(&self.table, board, horizon, self.player)
    }

    /// Run `f` with the selector forced greedy, restoring ε afterwards
    pub(crate) fn with_greedy_policy<T>(
        &mut self,
        f: impl FnOnce(&mut EpsilonGreedy, &mut ActionValueTable) -> T,
    ) -> T {
        let table = &mut self.table;
        self.policy.with_exploration_disabled(|policy| f(policy, table))
    }

    /// History indices where `player` was to move, oldest first
    pub(crate) fn plies_of(board: &Board, player: Player) -> Vec<usize> {
        board
            .history()
            .iter()
            .take(board.plies())
            .enumerate()
            .filter(|(_, state)| state.to_move == player)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_hyperparameters() {
        assert!(AgentCore::new(Player::X, 1.5, 0.9, 0.0, None).is_err());
        assert!(AgentCore::new(Player::X, 0.1, -0.1, 0.0, None).is_err());
        assert!(AgentCore::new(Player::X, f64::NAN, 0.9, 0.0, None).is_err());
        assert!(AgentCore::new(Player::X, 0.1, 0.9, f64::INFINITY, None).is_err());

        let mut core = AgentCore::new(Player::X, 0.1, 0.9, 0.0, None).unwrap();
        assert!(core.set_epsilon(2.0).is_err());
        assert_eq!(core.epsilon(), 0.1);
        core.set_discount(1.0).unwrap();
        assert_eq!(core.discount(), 1.0);
    }

    #[test]
    fn test_plies_of_alternate() {
        let mut board = Board::new();
        for m in [4, 0, 8, 2] {
            board.apply_move(m).unwrap();
        }
        assert_eq!(AgentCore::plies_of(&board, Player::X), vec![0, 2]);
        assert_eq!(AgentCore::plies_of(&board, Player::O), vec![1, 3]);
    }

    #[test]
    fn test_greedy_scope_restores_epsilon() {
        let mut core = AgentCore::new(Player::X, 0.4, 0.9, 0.0, Some(1)).unwrap();
        let inner = core.with_greedy_policy(|policy, _| policy.epsilon());
        assert!(inner < 0.0);
        assert_eq!(core.epsilon(), 0.4);
    }
}
