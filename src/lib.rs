//! # fork-insight
//!
//! Decides whether a repository fork carries meaningful work and explains
//! why.
//!
//! Each fork's comparison against its original (changed files, patches,
//! commit titles) and README pair is classified, mined for structural
//! signals, scored and summarized into a [`data::ForkInsights`] record.
//!
//! ```rust
//! use fork_insight::analysis::ForkAnalyzer;
//! use fork_insight::config::ScoringConfig;
//! use fork_insight::data::ForkInput;
//!
//! let config = ScoringConfig::default();
//! let input: ForkInput = serde_json::from_str(
//!     r#"{"fork_owner": "acme", "original_repo": "upstream/tool", "comparison": {"files": []}}"#,
//! )
//! .unwrap();
//! let insights = ForkAnalyzer::new(&config).analyze(&input).unwrap();
//! assert!(!insights.meaningfulness.is_meaningful);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::error::InsightError;

/// The current version of fork-insight.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
