//! The `analyze` command.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::analysis::{parse_batch, ForkAnalyzer};
use crate::config::ScoringConfig;
use crate::data::{render, BatchReport, OutputFormat};

/// Analyzes fork records and writes a batch report.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// JSON array of fork records, or `-` for stdin.
    pub input: PathBuf,

    /// Scoring configuration file (overrides FORK_INSIGHT_CONFIG and the user file).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Writes the report to a file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Analyzes at most this many records.
    #[arg(long)]
    pub max_forks: Option<usize>,
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub fn execute(self) -> Result<()> {
        let (config, source) = ScoringConfig::resolve(self.config.as_deref())?;
        info!(%source, "Loaded scoring configuration");

        let text = self.read_input()?;
        let values = parse_batch(&text)
            .with_context(|| format!("Failed to parse {}", self.input.display()))?;
        let input_count = self.max_forks.map_or(values.len(), |max| max.min(values.len()));

        let forks = ForkAnalyzer::new(&config).analyze_batch(values, self.max_forks);
        let report = BatchReport::new(input_count, forks);
        let rendered = render(&report, self.format)?;

        match &self.output {
            Some(path) => {
                fs::write(path, rendered)
                    .with_context(|| format!("Failed to write report: {}", path.display()))?;
                info!(path = %path.display(), forks = report.forks_analyzed, "Wrote report");
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }

    fn read_input(&self) -> Result<String> {
        if self.input.as_os_str() == "-" {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read fork records from stdin")?;
            return Ok(text);
        }
        fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read input file: {}", self.input.display()))
    }
}
