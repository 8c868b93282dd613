//! Off-policy one-step Q-learning applied at episode end

use super::{agent::AgentCore, reward::RewardFn, table::ActionValues};
use crate::{
    Error, Result,
    ports::Learner,
    tictactoe::{Board, Player},
};

/// Q-learning agent (off-policy TD control)
///
/// Updates are deferred until the episode ends and then replayed for both
/// move sequences, so the agent also learns from its opponent's moves. No
/// position repeats within an episode, so replaying the updates offline gives
/// the same values as applying them online.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    core: AgentCore,
    alpha: f64,
}

impl QLearningAgent {
    /// Create a new Q-learning agent
    ///
    /// # Arguments
    ///
    /// * `player` - Token the agent plays
    /// * `epsilon` - Exploration rate (0.0 to 1.0)
    /// * `discount` - γ parameter (0.0 to 1.0)
    /// * `alpha` - Learning rate (non-negative)
    /// * `default_value` - Value reported for unseen keys
    pub fn new(
        player: Player,
        epsilon: f64,
        discount: f64,
        alpha: f64,
        default_value: f64,
    ) -> Result<Self> {
        Self::from_core(
            AgentCore::new(player, epsilon, discount, default_value, None)?,
            alpha,
        )
    }

    pub(crate) fn from_core(core: AgentCore, alpha: f64) -> Result<Self> {
        validate_alpha(alpha)?;
        Ok(Self { core, alpha })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.core.reseed(seed);
        self
    }

    /// Learning rate α
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        validate_alpha(alpha)?;
        self.alpha = alpha;
        Ok(())
    }

    /// Replay the TD updates for one player's moves of a finished episode
    fn update_sequence(
        &mut self,
        board: &Board,
        reward: &dyn RewardFn,
        player: Player,
    ) -> Result<()> {
        let plies = AgentCore::plies_of(board, player);
        let Some((&last, earlier)) = plies.split_last() else {
            return Ok(());
        };
        let alpha = self.alpha;
        let discount = self.core.discount();
        let history = board.history();
        let actions = board.actions();

        self.core.with_greedy_policy(|policy, table| {
            for &i in earlier {
                let next = i + 2;
                let next_action = policy.select(&*table, board, Some(next), player)?;
                let bootstrap = table.value(&history[next], next_action);
                let target = reward.reward(board, player, Some(next)) + discount * bootstrap;

                let key = table.resolve_key(&history[i], actions[i]);
                let value = table.nudge_toward(key.clone(), target, alpha);
                tracing::debug!(%key, ?player, ply = i, target, value, "q-learning update");
            }

            let terminal_reward = reward.reward(board, player, None);
            let key = table.resolve_key(&history[last], actions[last]);
            let value = table.nudge_toward(key.clone(), terminal_reward, alpha);
            tracing::debug!(
                %key,
                ?player,
                ply = last,
                terminal_reward,
                value,
                "q-learning terminal update"
            );
            Ok(())
        })
    }
}

fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && alpha >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("alpha must be non-negative, got {alpha}"),
        })
    }
}

impl Learner for QLearningAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn learn(&mut self, board: &Board, reward: &dyn RewardFn) -> Result<()> {
        if board.outcome().is_none() {
            return Ok(());
        }
        let me = self.core.player();
        for player in [me, me.opponent()] {
            self.update_sequence(board, reward, player)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn alpha(&self) -> Option<f64> {
        Some(self.alpha)
    }

    fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        QLearningAgent::set_alpha(self, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        learning::{StateActionKey, outcome_reward},
        tictactoe::BoardState,
    };

    fn winning_in_two() -> Board {
        // XX.
        // .O.
        // ...  O to move, then X completes the top row
        let mut board = Board::from_state(BoardState::parse("XX..O....", '.').unwrap());
        board.apply_move(8).unwrap();
        board.apply_move(2).unwrap();
        board
    }

    #[test]
    fn test_terminal_update_for_both_players() {
        let mut agent = QLearningAgent::new(Player::X, 0.0, 1.0, 0.5, 0.0).unwrap();
        let board = winning_in_two();
        agent.learn(&board, &outcome_reward).unwrap();

        let history = board.history();
        let table = agent.table();
        assert_eq!(table.get(&StateActionKey::literal(&history[1], 2)), 0.5);
        assert_eq!(table.get(&StateActionKey::literal(&history[0], 8)), -0.5);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_intermediate_update_bootstraps_from_greedy_successor() {
        let mut agent = QLearningAgent::new(Player::X, 0.0, 0.5, 1.0, 0.0).unwrap();
        let mut board = Board::new();
        for m in [0, 3, 1, 4, 2] {
            board.apply_move(m).unwrap();
        }
        agent.learn(&board, &outcome_reward).unwrap();

        let history = board.history();
        let table = agent.table();
        // Forward order: the intermediate updates run before the terminal one,
        // so they bootstrap from unseen successors
        assert_eq!(table.get(&StateActionKey::literal(&history[0], 0)), 0.0);
        assert_eq!(table.get(&StateActionKey::literal(&history[2], 1)), 0.0);
        assert_eq!(table.get(&StateActionKey::literal(&history[4], 2)), 1.0);
        assert_eq!(table.get(&StateActionKey::literal(&history[3], 4)), -1.0);

        // A second identical episode propagates the win one ply back
        board.reset(Player::X);
        for m in [0, 3, 1, 4, 2] {
            board.apply_move(m).unwrap();
        }
        agent.learn(&board, &outcome_reward).unwrap();
        let history = board.history();
        let table = agent.table();
        assert_eq!(table.get(&StateActionKey::literal(&history[2], 1)), 0.5);
    }

    #[test]
    fn test_fresh_board_per_game_keeps_learning() {
        let mut agent = QLearningAgent::new(Player::X, 0.0, 1.0, 0.5, 0.0).unwrap();
        let mut values = Vec::new();
        for _ in 0..3 {
            let board = winning_in_two();
            agent.learn(&board, &outcome_reward).unwrap();
            values.push(agent.table().get(&StateActionKey::literal(&board.history()[1], 2)));
        }
        assert_eq!(values, vec![0.5, 0.75, 0.875]);
    }

    #[test]
    fn test_learn_before_terminal_is_noop() {
        let mut agent = QLearningAgent::new(Player::X, 0.0, 1.0, 0.5, 0.0).unwrap();
        let mut board = Board::new();
        board.apply_move(4).unwrap();
        board.apply_move(0).unwrap();
        agent.learn(&board, &outcome_reward).unwrap();
        assert!(agent.table().is_empty());
    }

    #[test]
    fn test_epsilon_restored_after_learning() {
        let mut agent = QLearningAgent::new(Player::X, 0.3, 1.0, 0.5, 0.0).unwrap();
        agent.learn(&winning_in_two(), &outcome_reward).unwrap();
        assert_eq!(agent.epsilon(), 0.3);
    }

    #[test]
    fn test_alpha_validation() {
        assert!(QLearningAgent::new(Player::X, 0.1, 0.9, -0.1, 0.0).is_err());
        let mut agent = QLearningAgent::new(Player::X, 0.1, 0.9, 0.2, 0.0).unwrap();
        assert!(agent.set_alpha(f64::NAN).is_err());
        agent.set_alpha(0.7).unwrap();
        assert_eq!(agent.alpha(), 0.7);
    }
}
