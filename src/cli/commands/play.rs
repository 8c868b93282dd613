//! Play command - Interactive games against a learning agent

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};

use crate::{
    app::{AgentConfig, Algorithm, App},
    cli::output::{print_board, print_kv, print_section, print_stats},
    session::Session,
    tictactoe::{Board, DEFAULT_EMPTY_MARKER, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play against a learning agent")]
pub struct PlayArgs {
    /// Value-update rule for the agent
    #[arg(long, short = 'a', value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Exploration rate ε in [0, 1]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Discount factor γ in [0, 1]
    #[arg(long)]
    pub discount: Option<f64>,

    /// Learning rate α (Q-learning only)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Value reported for unseen state/action pairs
    #[arg(long)]
    pub default_value: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Which token the agent plays (`x` or `o`)
    #[arg(long)]
    pub agent_player: Option<String>,

    /// Let the agent open every episode
    #[arg(long)]
    pub agent_first: bool,

    /// Swap tokens after every finished episode
    #[arg(long)]
    pub swap_sides: bool,

    /// Load the agent configuration from a JSON file; flags override it
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Character drawn for empty cells
    #[arg(long, default_value_t = DEFAULT_EMPTY_MARKER.to_string())]
    pub empty_marker: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// Every-visit Monte-Carlo returns, averaged per state/action
    MonteCarlo,
    /// One-step Q-learning with a fixed learning rate
    QLearning,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::MonteCarlo => Algorithm::MonteCarlo,
            AlgorithmArg::QLearning => Algorithm::QLearning,
        }
    }
}

/// Options for the interactive loop that do not belong to the agent
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    pub agent_first: bool,
    pub swap_sides: bool,
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "p1" => Ok(Player::X),
        "o" | "second" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

/// Merge the optional config file with command-line overrides
pub fn build_config(args: &PlayArgs) -> Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AgentConfig::default(),
    };

    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm.into();
    }
    if let Some(epsilon) = args.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(discount) = args.discount {
        config.discount = discount;
    }
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(value) = args.default_value {
        config.default_value = value;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(ref token) = args.agent_player {
        config.player = parse_player_token(token, "--agent-player")?;
    }

    config.validate().context("invalid agent configuration")?;
    Ok(config)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = build_config(&args)?;
    let board = Board::with_empty_marker(&args.empty_marker)
        .with_context(|| format!("invalid empty marker '{}'", args.empty_marker))?;
    let mut session = App::new().create_session(&config, board)?;

    let options = LoopOptions {
        agent_first: args.agent_first,
        swap_sides: args.swap_sides,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(&mut session, stdin.lock(), &mut stdout.lock(), options)
}

fn first_player(session: &Session, options: LoopOptions) -> Player {
    if options.agent_first {
        session.agent().player()
    } else {
        session.human_player()
    }
}

fn start_episode<W: Write>(session: &mut Session, out: &mut W, options: LoopOptions) -> Result<()> {
    let first = first_player(session, options);
    let turn = session.new_episode(first)?;

    print_section(out, &format!("Episode {}", session.board().episode()))?;
    print_kv(out, "You play", &session.human_player().to_string())?;
    print_kv(out, "Agent", session.agent().name())?;
    if let Some(reply) = turn.reply {
        writeln!(out, "Agent opens at {reply}")?;
    }
    print_board(out, session.board())?;
    Ok(())
}

fn dump_table<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, session.agent().table())
        .context("failed to serialize value table")?;
    writeln!(out)?;
    Ok(())
}

/// Drive a session from line-oriented input.
///
/// Each line is a cell index (0-8), `n` for a new episode, `t` to dump the
/// learned table as JSON, or `q` to quit.
pub fn run_loop<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    options: LoopOptions,
) -> Result<()> {
    start_episode(session, out, options)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        match line.trim() {
            "" => continue,
            "q" | "quit" => break,
            "n" | "new" => {
                start_episode(session, out, options)?;
            }
            "t" | "table" => dump_table(session, out)?,
            command => {
                let Ok(index) = command.parse::<usize>() else {
                    writeln!(
                        out,
                        "Enter a cell 0-8, 'n' for a new game, 't' for the table or 'q' to quit"
                    )?;
                    continue;
                };

                let turn = match session.human_move(index) {
                    Ok(turn) => turn,
                    Err(err) => {
                        tracing::debug!(index, error = %err, "rejected human move");
                        writeln!(out, "Error: {err}")?;
                        continue;
                    }
                };

                if let Some(reply) = turn.reply {
                    writeln!(out, "Agent plays {reply}")?;
                }
                print_board(out, session.board())?;

                if let Some(outcome) = turn.outcome {
                    writeln!(out, "Result: {outcome}")?;
                    print_stats(out, &session.stats())?;
                    if options.swap_sides {
                        session.swap_sides();
                    }
                    start_episode(session, out, options)?;
                }
            }
        }
    }

    print_section(out, "Session summary")?;
    print_stats(out, &session.stats())?;
    print_kv(
        out,
        "Table entries",
        &session.agent().table().len().to_string(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::app::AgentConfig;

    fn args() -> PlayArgs {
        PlayArgs {
            algorithm: None,
            epsilon: None,
            discount: None,
            alpha: None,
            default_value: None,
            seed: None,
            agent_player: None,
            agent_first: false,
            swap_sides: false,
            config: None,
            empty_marker: DEFAULT_EMPTY_MARKER.to_string(),
        }
    }

    fn session(config: &AgentConfig) -> Session {
        App::new()
            .with_default_seed(11)
            .create_session(config, Board::new())
            .unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut args = args();
        args.algorithm = Some(AlgorithmArg::MonteCarlo);
        args.epsilon = Some(0.0);
        args.agent_player = Some("x".to_string());
        let config = build_config(&args).unwrap();
        assert_eq!(config.algorithm, Algorithm::MonteCarlo);
        assert_eq!(config.epsilon, 0.0);
        assert_eq!(config.player, Player::X);
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let mut args = args();
        args.discount = Some(2.0);
        assert!(build_config(&args).is_err());

        let mut args = self::args();
        args.agent_player = Some("z".to_string());
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_loop_plays_and_quits() {
        let mut session = session(&AgentConfig::default().with_epsilon(0.0));
        let input = Cursor::new("4\nfoo\nq\n");
        let mut out = Vec::new();
        run_loop(&mut session, input, &mut out, LoopOptions::default()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Agent plays"));
        assert!(text.contains("Enter a cell 0-8"));
        assert!(text.contains("Session summary"));
        assert_eq!(session.board().plies(), 2);
    }

    #[test]
    fn test_loop_reports_illegal_move() {
        let mut session = session(&AgentConfig::default());
        let input = Cursor::new("9\n");
        let mut out = Vec::new();
        run_loop(&mut session, input, &mut out, LoopOptions::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error: invalid action 9"));
    }

    #[test]
    fn test_loop_dumps_table() {
        let mut session = session(&AgentConfig::default());
        let input = Cursor::new("0\n1\nt\nq\n");
        let mut out = Vec::new();
        run_loop(&mut session, input, &mut out, LoopOptions::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"entries\""));
    }

    #[test]
    fn test_agent_first_opens() {
        let mut session = session(&AgentConfig::default());
        let mut out = Vec::new();
        let options = LoopOptions {
            agent_first: true,
            swap_sides: false,
        };
        run_loop(&mut session, Cursor::new(""), &mut out, options).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Agent opens at"));
        assert_eq!(session.board().plies(), 1);
    }
}
