//! Factory wiring configurations into learners and sessions.

use super::config::{AgentConfig, Algorithm};
use crate::{
    Result,
    learning::{AgentCore, MonteCarloAgent, QLearningAgent, outcome_reward},
    ports::Learner,
    session::{Session, TracingObserver},
    tictactoe::Board,
};

/// Application factory.
///
/// Holds app-wide defaults and builds learners and sessions from
/// [`AgentConfig`] values.
///
/// # Examples
///
/// ```
/// use noughts::app::{AgentConfig, Algorithm, App};
///
/// let app = App::new().with_default_seed(7);
/// let learner = app.create_learner(&AgentConfig::new(Algorithm::QLearning))?;
/// assert_eq!(learner.name(), "Q-Learning");
/// # Ok::<(), noughts::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Seed applied when a config carries none (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed to use for configs without one
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the learner described by `config`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidConfiguration`] for out-of-range hyperparameters.
    pub fn create_learner(&self, config: &AgentConfig) -> Result<Box<dyn Learner>> {
        config.validate()?;
        let seed = config.seed.or(self.default_seed);
        let core = AgentCore::new(
            config.player,
            config.epsilon,
            config.discount,
            config.default_value,
            seed,
        )?;

        let learner: Box<dyn Learner> = match config.algorithm {
            Algorithm::MonteCarlo => Box::new(MonteCarloAgent::from_core(core)?),
            Algorithm::QLearning => Box::new(QLearningAgent::from_core(core, config.alpha)?),
        };
        tracing::debug!(learner = learner.name(), ?seed, "learner created");
        Ok(learner)
    }

    /// Build a session with the reference reward and tracing observer
    pub fn create_session(&self, config: &AgentConfig, board: Board) -> Result<Session> {
        let learner = self.create_learner(config)?;
        Ok(Session::new(board, learner, Box::new(outcome_reward))
            .with_observer(Box::new(TracingObserver::new())))
    }
}
