//! Application layer: configuration and the factory that wires it.
//!
//! ```text
//!  AgentConfig ──► App::create_learner ──► Box<dyn Learner>
//!                  App::create_session ──► Session (board + learner + reward)
//! ```

pub mod config;
pub mod container;

pub use config::{AgentConfig, Algorithm};
pub use container::App;
