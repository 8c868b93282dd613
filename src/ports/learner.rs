//! Learner port - the capability set a session drives
//!
//! A learner chooses moves with `policy` and updates its value table with
//! `learn`. Everything else on the trait is hyperparameter access, with
//! default implementations routed through the shared [`AgentCore`].

use crate::{
    Error, Result,
    learning::{ActionValueTable, AgentCore, RewardFn},
    tictactoe::{Board, Player},
};

/// Learner trait - unified interface for the tabular agents
///
/// # Examples
///
/// ```
/// use noughts::{
///     learning::{MonteCarloAgent, outcome_reward},
///     ports::Learner,
///     tictactoe::{Board, Player},
/// };
///
/// let mut agent = MonteCarloAgent::new(Player::O, 0.1, 0.9, 0.0)?.with_seed(7);
/// let mut board = Board::new();
/// board.apply_move(4)?;
/// let reply = agent.policy(&board, None)?;
/// board.apply_move(reply)?;
/// agent.learn(&board, &outcome_reward)?;
/// # Ok::<(), noughts::Error>(())
/// ```
pub trait Learner: Send {
    /// Shared agent state
    fn core(&self) -> &AgentCore;

    /// Shared agent state, mutably
    fn core_mut(&mut self) -> &mut AgentCore;

    /// Update the value table from the episode recorded on `board`.
    ///
    /// Called after every ply once the history holds at least two plies, and
    /// once more when the episode ends.
    fn learn(&mut self, board: &Board, reward: &dyn RewardFn) -> Result<()>;

    /// Get the learner's name.
    fn name(&self) -> &str;

    /// Choose an action at `horizon`, or in the live position.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAction`] without legal actions,
    /// [`Error::MisalignedPlayer`] when called for the live position out of turn.
    fn policy(&mut self, board: &Board, horizon: Option<usize>) -> Result<usize> {
        self.core_mut().choose(board, horizon)
    }

    fn player(&self) -> Player {
        self.core().player()
    }

    /// Change the token the agent plays; the driver does this between episodes
    fn set_player(&mut self, player: Player) {
        self.core_mut().set_player(player);
    }

    fn epsilon(&self) -> f64 {
        self.core().epsilon()
    }

    fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        self.core_mut().set_epsilon(epsilon)
    }

    fn discount(&self) -> f64 {
        self.core().discount()
    }

    fn set_discount(&mut self, discount: f64) -> Result<()> {
        self.core_mut().set_discount(discount)
    }

    /// Learning rate, for learners that use one
    fn alpha(&self) -> Option<f64> {
        None
    }

    fn set_alpha(&mut self, _alpha: f64) -> Result<()> {
        Err(Error::InvalidConfiguration {
            message: format!("{} does not use a learning rate", self.name()),
        })
    }

    /// Learned action values
    fn table(&self) -> &ActionValueTable {
        self.core().table()
    }
}
