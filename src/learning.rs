//! Tabular action-value learning
//!
//! Two learners share one epsilon-greedy selector and one table layout:
//!
//! | Aspect | Monte-Carlo | Q-learning |
//! |--------|-------------|------------|
//! | Target | Discounted episode return | r + γ Q(s', greedy(s')) |
//! | Step size | 1/n (running mean) | Fixed α |
//! | Moves learned from | Own plies | Own and opponent plies |
//! | When | Episode end | Episode end |
//!
//! Table keys are resolved through the board's eight symmetries (see
//! [`key`]), so rotated or mirrored positions share one value.
//!
//! ```
//! use noughts::{
//!     learning::{QLearningAgent, outcome_reward},
//!     ports::Learner,
//!     tictactoe::{Board, Player},
//! };
//!
//! let mut agent = QLearningAgent::new(Player::X, 0.1, 0.9, 0.5, 0.0)?.with_seed(1);
//! let mut board = Board::new();
//! let action = agent.policy(&board, None)?;
//! board.apply_move(action)?;
//! agent.learn(&board, &outcome_reward)?;
//! # Ok::<(), noughts::Error>(())
//! ```

pub mod agent;
pub mod key;
pub mod monte_carlo;
pub mod policy;
pub mod q_learning;
pub mod reward;
pub mod table;

pub use agent::AgentCore;
pub use key::{PROBE_ORDER, StateActionKey, canonical_key};
pub use monte_carlo::MonteCarloAgent;
pub use policy::{EpsilonGreedy, NO_EXPLORATION, TIE_TOLERANCE};
pub use q_learning::QLearningAgent;
pub use reward::{RewardFn, outcome_reward};
pub use table::{ActionValueTable, ActionValues, ValueEntry};
