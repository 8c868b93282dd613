//! noughts CLI - play noughts and crosses against a tabular learning agent
//!
//! The agent learns while you play, either from Monte-Carlo returns or with
//! one-step Q-learning, sharing values across the eight board symmetries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Play noughts and crosses against a learning agent", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively; the agent learns from every game
    Play(Box<noughts::cli::commands::play::PlayArgs>),

    /// Print the default agent configuration
    Config(noughts::cli::commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Play(args) => noughts::cli::commands::play::execute(*args),
        Commands::Config(args) => noughts::cli::commands::config::execute(args),
    }
}
