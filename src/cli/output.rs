//! Output formatting for the CLI

use std::io::{self, Write};

use crate::{session::SessionStats, tictactoe::Board};

/// Print a section header
pub fn print_section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(40))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(40))
}

/// Print a key-value pair
pub fn print_kv<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:16} {}", format!("{key}:"), value)
}

/// Print the board next to the index guide
pub fn print_board<W: Write>(out: &mut W, board: &Board) -> io::Result<()> {
    let rendered = board.to_string();
    let guide = Board::index_guide();
    for (row, indices) in rendered.lines().zip(guide.lines()) {
        writeln!(out, "  {row}    {indices}")?;
    }
    Ok(())
}

/// Format a ratio as a percentage
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Print the running tally
pub fn print_stats<W: Write>(out: &mut W, stats: &SessionStats) -> io::Result<()> {
    print_kv(out, "Episodes", &stats.episodes.to_string())?;
    print_kv(out, "Agent wins", &stats.agent_wins.to_string())?;
    print_kv(out, "Human wins", &stats.human_wins.to_string())?;
    print_kv(out, "Draws", &stats.draws.to_string())?;
    print_kv(
        out,
        "Agent win rate",
        &format_percent(stats.agent_win_rate()),
    )
}
