//! CLI interface for fork-insight.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod analyze;
pub mod config;

/// fork-insight: classifies whether repository forks carry meaningful work.
#[derive(Parser)]
#[command(name = "fork-insight")]
#[command(about = "Classifies whether repository forks carry meaningful work", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Analyzes a batch of fork comparison records.
    Analyze(analyze::AnalyzeCommand),
    /// Scoring configuration.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze(analyze_cmd) => analyze_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute(),
        }
    }
}
