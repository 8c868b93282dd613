//! Config command - Print or write the default agent configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::AgentConfig;

#[derive(Parser, Debug)]
#[command(about = "Print the default agent configuration as JSON")]
pub struct ConfigArgs {
    /// Write the configuration to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let config = AgentConfig::default();
    match args.output {
        Some(path) => {
            config
                .save(&path)
                .with_context(|| format!("failed to write config to {}", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&config)
                .context("failed to serialize default configuration")?;
            println!("{json}");
        }
    }
    Ok(())
}
