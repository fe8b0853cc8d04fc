//! Data records and serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod comparison;
pub mod insights;
pub mod lenient;
pub mod yaml;

pub use comparison::*;
pub use insights::*;
pub use yaml::*;

/// Output of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Number of forks with an insight record.
    pub forks_analyzed: usize,
    /// Number of inputs skipped because they failed to deserialize or analyze.
    pub forks_skipped: usize,
    /// Per-fork insight records in input order.
    pub forks: Vec<ForkInsights>,
}

impl BatchReport {
    /// Wraps the insight records of a batch of `input_count` forks.
    pub fn new(input_count: usize, forks: Vec<ForkInsights>) -> Self {
        Self {
            generated_at: Utc::now(),
            forks_analyzed: forks.len(),
            forks_skipped: input_count.saturating_sub(forks.len()),
            forks,
        }
    }

    /// Number of forks classified as meaningful.
    pub fn meaningful_count(&self) -> usize {
        self.forks
            .iter()
            .filter(|f| f.meaningfulness.is_meaningful)
            .count()
    }
}
