//! Analysis result records.
//!
//! Each stage of the pipeline produces one of these values and never mutates
//! another stage's output. Set-valued fields use ordered collections so the
//! serialized form is reproducible.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic domain a changed path belongs to.
///
/// Variants are declared alphabetically so ordered sets render sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    /// Routes, controllers, handlers.
    Api,
    /// Settings and environment files.
    Configuration,
    /// Schemas, migrations, models.
    Database,
    /// Package manifests.
    Dependencies,
    /// READMEs, docs, licenses.
    Documentation,
    /// Styles, markup, UI components.
    Frontend,
    /// Containers, CI/CD, deployment.
    Infrastructure,
    /// Authentication, crypto, secrets.
    Security,
    /// Tests and specs.
    Testing,
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Api => "api",
            Self::Configuration => "configuration",
            Self::Database => "database",
            Self::Dependencies => "dependencies",
            Self::Documentation => "documentation",
            Self::Frontend => "frontend",
            Self::Infrastructure => "infrastructure",
            Self::Security => "security",
            Self::Testing => "testing",
        };
        f.write_str(label)
    }
}

/// A file whose combined additions and deletions cross the major-change threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorChange {
    /// Path of the file.
    pub file: String,
    /// Change status as reported by the comparison.
    pub status: String,
    /// Lines added.
    pub additions: u64,
    /// Lines deleted.
    pub deletions: u64,
}

/// File-level view of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// Number of changed files.
    pub total_files_changed: usize,
    /// Changed-file count per lower-cased extension.
    pub files_by_type: BTreeMap<String, usize>,
    /// Every category matched by at least one path.
    pub change_categories: BTreeSet<ChangeCategory>,
    /// The three most frequent extensions, ties broken by first encounter.
    pub key_areas: Vec<String>,
    /// Every changed path in input order.
    pub specific_files_modified: Vec<String>,
    /// Paths with status `added`.
    pub new_files_added: Vec<String>,
    /// Paths with status `removed`.
    pub files_removed: Vec<String>,
    /// Files with large line churn.
    pub major_changes: Vec<MajorChange>,
}

impl FileAnalysis {
    /// Returns true when documentation is the only category present.
    pub fn is_documentation_only(&self) -> bool {
        self.change_categories.len() == 1
            && self
                .change_categories
                .contains(&ChangeCategory::Documentation)
    }
}

/// A function or type declaration found on an added line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Path of the file.
    pub file: String,
    /// Declared identifier.
    pub declaration_name: String,
    /// Language whose template matched.
    pub language_hint: String,
}

/// A modified code file whose additions carry control-flow logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedFunction {
    /// Path of the file.
    pub file: String,
    /// Lines added.
    pub additions: u64,
}

/// Kind of deployment artifact touched by an environment adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentKind {
    /// Dockerfiles and compose files.
    Docker,
    /// Kubernetes manifests and charts.
    Kubernetes,
    /// Other YAML deployment descriptors.
    Yaml,
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Docker => "docker",
            Self::Kubernetes => "kubernetes",
            Self::Yaml => "yaml",
        };
        f.write_str(label)
    }
}

/// A substantive change to a deployment or orchestration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentAdjustment {
    /// Path of the file.
    pub file: String,
    /// Artifact kind.
    pub kind: EnvironmentKind,
    /// Lines added.
    pub additions: u64,
}

/// Structural signals extracted from patch text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    /// Newly declared functions.
    pub new_functions_detected: Vec<Declaration>,
    /// Newly declared classes and types.
    pub new_classes_detected: Vec<Declaration>,
    /// Modified code files with added logic.
    pub enhanced_functions: Vec<EnhancedFunction>,
    /// Deployment file changes.
    pub environment_adjustments: Vec<EnvironmentAdjustment>,
    /// Files classified as configuration and not code.
    pub config_only_changes: Vec<String>,
    /// Sum of additions over code files.
    pub code_additions_count: u64,
    /// Sum of additions over configuration files.
    pub config_additions_count: u64,
    /// Audit trail of every signal recorded.
    pub meaningfulness_signals: Vec<String>,
}

/// Development focus category mined from commit titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentFocus {
    /// New features and capabilities.
    NewCapabilities,
    /// Enhancements of existing behavior.
    Improvements,
    /// Bug fixes.
    BugFixes,
    /// Adaptation to a specific deployment.
    Customization,
    /// Connections to other systems.
    Integration,
    /// Security work.
    Security,
    /// Performance work.
    Performance,
    /// Restructuring without behavior change.
    Refactoring,
}

impl fmt::Display for DevelopmentFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NewCapabilities => "new capabilities",
            Self::Improvements => "improvements",
            Self::BugFixes => "bug fixes",
            Self::Customization => "customization",
            Self::Integration => "integration",
            Self::Security => "security",
            Self::Performance => "performance",
            Self::Refactoring => "refactoring",
        };
        f.write_str(label)
    }
}

/// Development intent mined from commit titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitIntentProfile {
    /// Feature phrases following verbs such as "add" or "implement".
    pub key_features_mentioned: Vec<String>,
    /// Highest-scoring focus categories, best first.
    pub development_focus: Vec<DevelopmentFocus>,
    /// Raw commit titles kept for display.
    pub commit_sample: Vec<String>,
}

/// Industry domain detected in README additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    /// Healthcare and life sciences.
    Healthcare,
    /// Finance, banking, payments.
    Finance,
    /// Enterprise and B2B.
    Enterprise,
    /// Machine learning and AI.
    MlAi,
    /// Cloud platforms.
    Cloud,
    /// Government and public sector.
    Government,
    /// Education.
    Education,
    /// IoT and embedded devices.
    Iot,
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Healthcare => "healthcare",
            Self::Finance => "finance",
            Self::Enterprise => "enterprise",
            Self::MlAi => "ML/AI",
            Self::Cloud => "cloud",
            Self::Government => "government",
            Self::Education => "education",
            Self::Iot => "IoT",
        };
        f.write_str(label)
    }
}

/// Business signals found in text the fork added to its README.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeDelta {
    /// Explicitly stated purpose of the fork.
    pub stated_purpose: Option<String>,
    /// Use cases described.
    pub use_cases: Vec<String>,
    /// Intended audience.
    pub target_audience: Option<String>,
    /// Industry domains mentioned.
    pub industry_terms: Vec<Industry>,
    /// Problems the fork claims to solve.
    pub problems_solved: Vec<String>,
    /// Systems the fork integrates with.
    pub integrations: Vec<String>,
    /// Deployment platforms mentioned.
    pub deployment_targets: Vec<String>,
    /// Headings of added sections.
    pub new_sections: Vec<String>,
    /// One-sentence business context synthesized from the above.
    pub business_context: Option<String>,
}

/// Signals found in documentation files the fork added or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationInsights {
    /// Goal stated in added documentation.
    pub stated_goal: Option<String>,
    /// Deployment platforms mentioned in added documentation.
    pub deployment_insights: Vec<String>,
    /// Number of documentation files that contributed added lines.
    pub files_scanned: usize,
}

/// Classification band of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Clear evidence of substantive change.
    #[serde(rename = "Meaningful")]
    Meaningful,
    /// Weak evidence of substantive change.
    #[serde(rename = "Likely Meaningful")]
    LikelyMeaningful,
    /// Cosmetic or configuration-only drift.
    #[serde(rename = "Not Meaningful")]
    NotMeaningful,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Meaningful => "Meaningful",
            Self::LikelyMeaningful => "Likely Meaningful",
            Self::NotMeaningful => "Not Meaningful",
        };
        f.write_str(label)
    }
}

/// Reliability label attached to a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Score close to a band boundary.
    Low,
    /// Moderate score magnitude.
    Medium,
    /// Large score magnitude.
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

/// Terminal artifact of the scoring stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationVerdict {
    /// True for every band except `Not Meaningful`.
    pub is_meaningful: bool,
    /// Classification band.
    pub classification: Classification,
    /// Confidence label.
    pub confidence: Confidence,
    /// Reasons in the order they were recorded.
    pub reasons: Vec<String>,
    /// Additive score.
    pub score: i64,
    /// One-sentence verdict summary.
    pub summary: String,
}

/// Combined per-fork output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkInsights {
    /// Login of the fork owner.
    pub fork_owner: String,
    /// Repository name of the fork.
    pub fork_name: String,
    /// Web URL of the fork.
    pub fork_url: String,
    /// Web URL of the fork owner.
    pub fork_owner_url: String,
    /// Original repository as `owner/name`.
    pub original_repo: String,
    /// Web URL of the original repository.
    pub original_url: String,
    /// Commits the fork is ahead of the original.
    pub commits_ahead: u64,
    /// File classification.
    pub file_analysis: FileAnalysis,
    /// Structural patch signals.
    pub patch_analysis: SignalSet,
    /// Commit intent.
    pub commit_analysis: CommitIntentProfile,
    /// README delta.
    pub readme_analysis: ReadmeDelta,
    /// Added documentation signals.
    pub documentation_analysis: DocumentationInsights,
    /// Meaningfulness verdict.
    pub meaningfulness: ClassificationVerdict,
    /// Executive narrative.
    pub summary: String,
    /// Failure marker when the comparison could not be obtained.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn categories_serialize_sorted() {
        let analysis = FileAnalysis {
            change_categories: [
                ChangeCategory::Testing,
                ChangeCategory::Api,
                ChangeCategory::Documentation,
            ]
            .into_iter()
            .collect(),
            ..FileAnalysis::default()
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(
            json["change_categories"],
            serde_json::json!(["api", "documentation", "testing"])
        );
    }

    #[test]
    fn documentation_only_requires_single_category() {
        let mut analysis = FileAnalysis::default();
        assert!(!analysis.is_documentation_only());
        analysis
            .change_categories
            .insert(ChangeCategory::Documentation);
        assert!(analysis.is_documentation_only());
        analysis.change_categories.insert(ChangeCategory::Testing);
        assert!(!analysis.is_documentation_only());
    }

    #[test]
    fn classification_labels_match_report_contract() {
        assert_eq!(
            serde_json::to_value(Classification::LikelyMeaningful).unwrap(),
            serde_json::json!("Likely Meaningful")
        );
        assert_eq!(
            serde_json::to_value(Confidence::High).unwrap(),
            serde_json::json!("high")
        );
        assert_eq!(
            serde_json::to_value(DevelopmentFocus::BugFixes).unwrap(),
            serde_json::json!("bug_fixes")
        );
        assert_eq!(
            serde_json::to_value(Industry::MlAi).unwrap(),
            serde_json::json!("ml_ai")
        );
    }
}
