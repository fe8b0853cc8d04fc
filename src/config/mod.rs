//! Scoring configuration.
//!
//! Every weight and threshold used by the extractors and the scorer is
//! collected here. Defaults are embedded from `templates/scoring.yaml`; a
//! user file only needs the keys it changes.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::yaml::read_yaml_file;
use crate::utils::settings::get_env_var;

/// Embedded default configuration.
pub const SCORING_YAML: &str = include_str!("../templates/scoring.yaml");

/// Environment variable naming an override file.
pub const CONFIG_ENV_VAR: &str = "FORK_INSIGHT_CONFIG";

/// Score contributions of individual signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Per newly declared function.
    pub new_function: i64,
    /// Per newly declared class or type.
    pub new_class: i64,
    /// Per enhanced-function entry.
    pub enhanced_function: i64,
    /// Per environment adjustment.
    pub environment_adjustment: i64,
    /// Code additions above `thresholds.code_additions_high`.
    pub code_additions_high: i64,
    /// Code additions above `thresholds.code_additions_moderate`.
    pub code_additions_moderate: i64,
    /// Configuration-only ratio above `thresholds.config_ratio`.
    pub config_ratio_penalty: i64,
    /// Documentation is the only change category.
    pub documentation_only_penalty: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            new_function: 10,
            new_class: 15,
            enhanced_function: 5,
            environment_adjustment: 8,
            code_additions_high: 20,
            code_additions_moderate: 10,
            config_ratio_penalty: -15,
            documentation_only_penalty: -10,
        }
    }
}

/// Score boundaries of the classification bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationBands {
    /// Minimum score for Meaningful with high confidence.
    pub meaningful_high: i64,
    /// Minimum score for Meaningful with medium confidence.
    pub meaningful_medium: i64,
    /// Minimum score for Likely Meaningful.
    pub likely_meaningful: i64,
    /// Not Meaningful scores below this get medium confidence.
    pub not_meaningful_medium_below: i64,
}

impl Default for ClassificationBands {
    fn default() -> Self {
        Self {
            meaningful_high: 20,
            meaningful_medium: 10,
            likely_meaningful: 5,
            not_meaningful_medium_below: -5,
        }
    }
}

/// Extraction thresholds and caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Additions plus deletions above which a file is a major change.
    pub major_change_lines: u64,
    /// Additions above which a modified code file may be enhanced.
    pub enhanced_min_additions: u64,
    /// Additions above which a deployment file may be an adjustment.
    pub environment_min_additions: u64,
    /// Minimum substantive added lines for an adjustment.
    pub environment_min_lines: usize,
    /// Length a line must exceed to be substantive.
    pub environment_min_line_length: usize,
    /// Code additions above which the high bonus applies.
    pub code_additions_high: u64,
    /// Code additions above which the moderate bonus applies.
    pub code_additions_moderate: u64,
    /// Configuration-only file fraction above which the penalty applies.
    pub config_ratio: f64,
    /// Trimmed length a README line must exceed to count as new content.
    pub readme_min_line_length: usize,
    /// Minimum new README content before extraction runs.
    pub readme_min_new_content: usize,
    /// Minimum narrative length before the placeholder is used.
    pub summary_min_length: usize,
    /// Number of leading commits examined.
    pub commit_window: usize,
    /// Maximum feature phrases kept.
    pub max_features: usize,
    /// Minimum feature phrase length.
    pub min_feature_length: usize,
    /// Maximum development-focus categories kept.
    pub max_focus: usize,
    /// Maximum industry domains flagged.
    pub max_industries: usize,
    /// Maximum new section headings kept.
    pub max_sections: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            major_change_lines: 50,
            enhanced_min_additions: 10,
            environment_min_additions: 5,
            environment_min_lines: 4,
            environment_min_line_length: 20,
            code_additions_high: 100,
            code_additions_moderate: 50,
            config_ratio: 0.8,
            readme_min_line_length: 10,
            readme_min_new_content: 50,
            summary_min_length: 50,
            commit_window: 20,
            max_features: 5,
            min_feature_length: 4,
            max_focus: 3,
            max_industries: 3,
            max_sections: 5,
        }
    }
}

/// Complete scoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Signal weights.
    pub weights: ScoreWeights,
    /// Classification bands.
    pub bands: ClassificationBands,
    /// Extraction thresholds.
    pub thresholds: Thresholds,
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line.
    Explicit(PathBuf),
    /// Path named by [`CONFIG_ENV_VAR`].
    Environment(PathBuf),
    /// `~/.fork-insight/scoring.yaml`.
    UserFile(PathBuf),
    /// Embedded defaults.
    Embedded,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "{} (--config)", path.display()),
            Self::Environment(path) => write!(f, "{} ({CONFIG_ENV_VAR})", path.display()),
            Self::UserFile(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "embedded defaults"),
        }
    }
}

impl ScoringConfig {
    /// Parses the embedded defaults.
    pub fn embedded() -> Result<Self> {
        serde_yaml::from_str(SCORING_YAML).context("Failed to parse embedded scoring.yaml")
    }

    /// Loads a configuration file; absent keys keep their defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_yaml_file(path)
    }

    /// Returns the per-user override path (`~/.fork-insight/scoring.yaml`).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".fork-insight").join("scoring.yaml"))
    }

    /// Resolves the effective configuration.
    ///
    /// Precedence: `explicit`, then [`CONFIG_ENV_VAR`], then the per-user
    /// file if it exists, then the embedded defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::load_from_path(path)?;
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        if let Ok(value) = get_env_var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(value);
            let config = Self::load_from_path(&path)
                .with_context(|| format!("{CONFIG_ENV_VAR} points at an unreadable file"))?;
            return Ok((config, ConfigSource::Environment(path)));
        }

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            let config = Self::load_from_path(&path)?;
            return Ok((config, ConfigSource::UserFile(path)));
        }

        debug!("Using embedded scoring configuration");
        Ok((Self::embedded()?, ConfigSource::Embedded))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn embedded_yaml_matches_defaults() {
        assert_eq!(ScoringConfig::embedded().unwrap(), ScoringConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoring.yaml");
        fs::write(&path, "weights:\n  new_function: 25\nthresholds:\n  config_ratio: 0.5\n")
            .unwrap();

        let config = ScoringConfig::load_from_path(&path).unwrap();
        assert_eq!(config.weights.new_function, 25);
        assert_eq!(config.weights.new_class, 15);
        assert!((config.thresholds.config_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.thresholds.major_change_lines, 50);
        assert_eq!(config.bands, ClassificationBands::default());
    }

    #[test]
    fn explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "bands:\n  meaningful_high: 30\n").unwrap();

        let (config, source) = ScoringConfig::resolve(Some(&path)).unwrap();
        assert_eq!(config.bands.meaningful_high, 30);
        assert_eq!(source, ConfigSource::Explicit(path));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert!(ScoringConfig::resolve(Some(&missing)).is_err());
    }
}
