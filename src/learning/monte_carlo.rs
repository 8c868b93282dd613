//! Every-visit Monte-Carlo control with incremental averaging

use super::{agent::AgentCore, reward::RewardFn};
use crate::{
    Result,
    ports::Learner,
    tictactoe::{Board, Player},
};

/// Monte-Carlo agent.
///
/// Collects one reward per `learn` call during an episode. When the episode
/// ends it walks its own plies backwards, accumulating the discounted return
/// `G = r + γG`, and folds each return into the running mean of its key.
#[derive(Debug, Clone)]
pub struct MonteCarloAgent {
    core: AgentCore,
    rewards: Vec<f64>,
    rewards_episode: Option<u64>,
}

impl MonteCarloAgent {
    /// Create a new Monte-Carlo agent
    ///
    /// # Arguments
    ///
    /// * `player` - Token the agent plays
    /// * `epsilon` - Exploration rate (0.0 to 1.0)
    /// * `discount` - γ parameter (0.0 to 1.0)
    /// * `default_value` - Value reported for unseen keys
    pub fn new(player: Player, epsilon: f64, discount: f64, default_value: f64) -> Result<Self> {
        let core = AgentCore::new(player, epsilon, discount, default_value, None)?;
        Self::from_core(core)
    }

    pub(crate) fn from_core(core: AgentCore) -> Result<Self> {
        Ok(Self {
            core,
            rewards: Vec::new(),
            rewards_episode: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.core.reseed(seed);
        self
    }

    /// Rewards collected so far in the running episode
    pub fn pending_rewards(&self) -> &[f64] {
        &self.rewards
    }

    fn backward_pass(&mut self, board: &Board) {
        let player = self.core.player();
        let discount = self.core.discount();
        let history = board.history();
        let actions = board.actions();

        // Rewards pair with the agent's plies from the end of the episode
        let mut rewards = self.rewards.iter().rev();
        let mut ret = 0.0;
        for i in AgentCore::plies_of(board, player).into_iter().rev() {
            ret = rewards.next().copied().unwrap_or(0.0) + discount * ret;
            let table = self.core.table_mut();
            let key = table.resolve_key(&history[i], actions[i]);
            let value = table.record_return(key.clone(), ret);
            tracing::debug!(%key, ply = i, ret, value, "monte-carlo update");
        }
    }
}

impl Learner for MonteCarloAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn learn(&mut self, board: &Board, reward: &dyn RewardFn) -> Result<()> {
        if self.rewards_episode != Some(board.episode()) {
            self.rewards.clear();
            self.rewards_episode = Some(board.episode());
        }

        self.rewards.push(reward.reward(board, self.core.player(), None));

        if board.outcome().is_some() {
            self.backward_pass(board);
            self.rewards.clear();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Monte-Carlo"
    }
}
