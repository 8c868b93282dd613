//! Configuration types for agent creation.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, learning::agent::validate_unit_interval, tictactoe::Player};

/// Which value-update rule the agent uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    MonteCarlo,
    #[default]
    QLearning,
}

/// Configuration for creating a learning agent.
///
/// # Examples
///
/// ```
/// use noughts::app::{AgentConfig, Algorithm};
/// use noughts::tictactoe::Player;
///
/// let config = AgentConfig::new(Algorithm::MonteCarlo)
///     .with_player(Player::O)
///     .with_epsilon(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Value-update rule
    pub algorithm: Algorithm,
    /// Token the agent plays
    pub player: Player,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Discount factor γ
    pub discount: f64,
    /// Learning rate α (Q-learning only)
    pub alpha: f64,
    /// Value reported for unseen state/action keys
    pub default_value: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration for the given algorithm with default hyperparameters:
    /// ε = 0.1, γ = 0.9, α = 0.5, default value 0.0, agent plays O.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            player: Player::O,
            epsilon: 0.1,
            discount: 0.9,
            alpha: 0.5,
            default_value: 0.0,
            seed: None,
        }
    }

    pub fn with_player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_default_value(mut self, value: f64) -> Self {
        self.default_value = value;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check hyperparameter ranges.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if ε or γ lie outside `[0, 1]`, α is
    /// negative, or any value is not finite.
    pub fn validate(&self) -> Result<()> {
        validate_unit_interval("epsilon", self.epsilon)?;
        validate_unit_interval("discount", self.discount)?;
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("alpha must be non-negative, got {}", self.alpha),
            });
        }
        if !self.default_value.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("default value must be finite, got {}", self.default_value),
            });
        }
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create config {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}
