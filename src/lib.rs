//! Tabular reinforcement learning for noughts and crosses
//!
//! This crate provides:
//! - A board model with episode history and the eight board symmetries
//! - Monte-Carlo and Q-learning agents over a symmetry-aware value table
//! - A session driver that lets a human play against a learning agent
//! - Configuration and a command-line front end

pub mod app;
pub mod cli;
pub mod error;
pub mod learning;
pub mod ports;
pub mod session;
pub mod tictactoe;

pub use error::{Error, Result};
