//! CLI infrastructure for the noughts player
//!
//! This module provides the command-line interface for playing against a
//! learning agent and inspecting its configuration.

pub mod commands;
pub mod output;
