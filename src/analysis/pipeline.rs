//! Per-fork pipeline and batch loop.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{
    analyze_documentation, CommitIntentExtractor, FileClassifier, MeaningfulnessScorer,
    ReadmeDeltaExtractor, SignalExtractor, SummaryComposer, SummaryContext,
};
use crate::config::ScoringConfig;
use crate::data::{
    CommitIntentProfile, DocumentationInsights, FileAnalysis, ForkInput, ForkInsights,
    ForkMetadata, ReadmeDelta, SignalSet,
};
use crate::error::{InsightError, Result};

/// Error marker attached to forks whose comparison was unavailable.
pub const COMPARISON_FAILED: &str = "comparison_failed";

/// Parses batch input text into its array elements.
///
/// Elements are kept as raw JSON so a malformed one can be skipped without
/// rejecting the batch.
pub fn parse_batch(json: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(InsightError::InvalidInput(format!(
            "expected a JSON array, found {}",
            json_kind(&other)
        ))),
        Err(e) => Err(InsightError::InvalidInput(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn validate(metadata: &ForkMetadata) -> Result<()> {
    if metadata.fork_owner.trim().is_empty() {
        return Err(InsightError::MissingOwner(metadata.fork_name.clone()));
    }
    let valid_slug = metadata
        .original_repo
        .split_once('/')
        .is_some_and(|(owner, name)| !owner.is_empty() && !name.is_empty() && !name.contains('/'));
    if !valid_slug {
        return Err(InsightError::InvalidRepoSlug(metadata.original_repo.clone()));
    }
    Ok(())
}

/// Runs every analysis stage for one fork at a time.
pub struct ForkAnalyzer<'a> {
    config: &'a ScoringConfig,
}

impl<'a> ForkAnalyzer<'a> {
    /// Creates an analyzer with the given configuration.
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Analyzes one fork.
    pub fn analyze(&self, input: &ForkInput) -> Result<ForkInsights> {
        let metadata = &input.metadata;
        validate(metadata)?;
        let thresholds = &self.config.thresholds;

        let Some(comparison) = input.comparison.as_ref() else {
            debug!(fork = %metadata.slug(), "No comparison available");
            return Ok(self.unreachable(metadata));
        };

        let file_analysis = FileClassifier::new(thresholds).analyze(&comparison.files);
        let patch_analysis = SignalExtractor::new(thresholds).extract(&comparison.files);
        let commit_analysis = CommitIntentExtractor::new(thresholds).analyze(&comparison.commits);
        let readme_analysis = ReadmeDeltaExtractor::new(thresholds)
            .analyze(input.original_readme.as_deref(), input.fork_readme.as_deref());
        let documentation_analysis = analyze_documentation(&comparison.files);
        let meaningfulness =
            MeaningfulnessScorer::new(self.config).score(&patch_analysis, &file_analysis);

        let summary = SummaryComposer::new(thresholds).compose(&SummaryContext {
            metadata,
            files: &file_analysis,
            signals: &patch_analysis,
            commits: &commit_analysis,
            readme: &readme_analysis,
            docs: &documentation_analysis,
            verdict: &meaningfulness,
        });

        debug!(
            fork = %metadata.slug(),
            files = file_analysis.total_files_changed,
            score = meaningfulness.score,
            "Analyzed fork"
        );

        Ok(ForkInsights {
            fork_owner: metadata.fork_owner.clone(),
            fork_name: metadata.fork_name.clone(),
            fork_url: metadata.fork_url.clone(),
            fork_owner_url: metadata.fork_owner_url.clone(),
            original_repo: metadata.original_repo.clone(),
            original_url: metadata.original_url.clone(),
            commits_ahead: metadata.commits_ahead,
            file_analysis,
            patch_analysis,
            commit_analysis,
            readme_analysis,
            documentation_analysis,
            meaningfulness,
            summary,
            error: None,
        })
    }

    fn unreachable(&self, metadata: &ForkMetadata) -> ForkInsights {
        let file_analysis = FileAnalysis::default();
        let patch_analysis = SignalSet::default();
        let meaningfulness =
            MeaningfulnessScorer::new(self.config).score(&patch_analysis, &file_analysis);

        ForkInsights {
            fork_owner: metadata.fork_owner.clone(),
            fork_name: metadata.fork_name.clone(),
            fork_url: metadata.fork_url.clone(),
            fork_owner_url: metadata.fork_owner_url.clone(),
            original_repo: metadata.original_repo.clone(),
            original_url: metadata.original_url.clone(),
            commits_ahead: metadata.commits_ahead,
            file_analysis,
            patch_analysis,
            commit_analysis: CommitIntentProfile::default(),
            readme_analysis: ReadmeDelta::default(),
            documentation_analysis: DocumentationInsights::default(),
            meaningfulness,
            summary: format!(
                "Unable to analyze fork by {}. The repository may be private or inaccessible.",
                metadata.fork_owner
            ),
            error: Some(COMPARISON_FAILED.to_string()),
        }
    }

    /// Analyzes batch elements in order, skipping any that fail.
    ///
    /// `max_forks` limits how many elements are read.
    pub fn analyze_batch(&self, values: Vec<Value>, max_forks: Option<usize>) -> Vec<ForkInsights> {
        let limit = max_forks.unwrap_or(usize::MAX);
        let mut insights = Vec::new();
        let mut skipped = 0usize;

        for (index, value) in values.into_iter().take(limit).enumerate() {
            match self.analyze_value(index, value) {
                Ok(record) => insights.push(record),
                Err(e) => {
                    skipped += 1;
                    warn!(index, error = %e, "Skipping fork record");
                }
            }
        }

        info!(
            analyzed = insights.len(),
            skipped,
            meaningful = insights
                .iter()
                .filter(|f| f.meaningfulness.is_meaningful)
                .count(),
            "Batch analysis complete"
        );
        insights
    }

    fn analyze_value(&self, index: usize, value: Value) -> Result<ForkInsights> {
        let input: ForkInput =
            serde_json::from_value(value).map_err(|e| InsightError::InvalidRecord {
                index,
                reason: e.to_string(),
            })?;
        self.analyze(&input)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::data::{Classification, Confidence};
    use serde_json::json;

    fn record(owner: &str) -> Value {
        json!({
            "fork_owner": owner,
            "fork_name": "tool",
            "original_repo": "upstream/tool",
            "comparison": {
                "files": [{
                    "filename": "src/app.py",
                    "status": "modified",
                    "additions": 1,
                    "deletions": 0,
                    "patch": "@@ -1 +1,2 @@\n+def handler(event):\n"
                }],
                "commits": [{"sha": "abc", "commit": {"message": "Add event handler"}}]
            }
        })
    }

    #[test]
    fn parse_batch_rejects_non_arrays() {
        assert!(matches!(
            parse_batch("{\"fork_owner\": \"a\"}"),
            Err(InsightError::InvalidInput(_))
        ));
        assert!(matches!(parse_batch("not json"), Err(InsightError::InvalidInput(_))));
        assert_eq!(parse_batch("[1, 2]").unwrap().len(), 2);
    }

    #[test]
    fn single_function_fork_is_meaningful() {
        let config = ScoringConfig::default();
        let input: ForkInput = serde_json::from_value(record("acme")).unwrap();
        let insights = ForkAnalyzer::new(&config).analyze(&input).unwrap();
        assert_eq!(insights.patch_analysis.new_functions_detected.len(), 1);
        assert_eq!(insights.meaningfulness.score, 10);
        assert_eq!(insights.meaningfulness.classification, Classification::Meaningful);
        assert_eq!(insights.meaningfulness.confidence, Confidence::Medium);
        assert!(insights.error.is_none());
    }

    #[test]
    fn missing_comparison_is_marked_failed() {
        let config = ScoringConfig::default();
        let input: ForkInput = serde_json::from_value(json!({
            "fork_owner": "ghost",
            "original_repo": "upstream/tool",
            "fork_readme": "# Tool\nThis fork is designed for hospital scheduling teams everywhere."
        }))
        .unwrap();
        let insights = ForkAnalyzer::new(&config).analyze(&input).unwrap();
        assert_eq!(insights.error.as_deref(), Some(COMPARISON_FAILED));
        assert_eq!(
            insights.meaningfulness.classification,
            Classification::NotMeaningful
        );
        assert_eq!(insights.meaningfulness.confidence, Confidence::Low);
        assert_eq!(insights.readme_analysis, ReadmeDelta::default());
        assert_eq!(
            insights.summary,
            "Unable to analyze fork by ghost. The repository may be private or inaccessible."
        );
    }

    #[test]
    fn invalid_metadata_is_rejected() {
        let config = ScoringConfig::default();
        let analyzer = ForkAnalyzer::new(&config);

        let mut input: ForkInput = serde_json::from_value(record("")).unwrap();
        assert!(matches!(
            analyzer.analyze(&input),
            Err(InsightError::MissingOwner(_))
        ));

        input.metadata.fork_owner = "acme".to_string();
        input.metadata.original_repo = "no-slash".to_string();
        assert!(matches!(
            analyzer.analyze(&input),
            Err(InsightError::InvalidRepoSlug(_))
        ));
    }

    #[test]
    fn batch_skips_failures_and_honors_limit() {
        let config = ScoringConfig::default();
        let analyzer = ForkAnalyzer::new(&config);
        let values = vec![
            record("first"),
            json!("not an object"),
            record(""),
            record("fourth"),
            record("fifth"),
        ];

        let all = analyzer.analyze_batch(values.clone(), None);
        let owners: Vec<&str> = all.iter().map(|f| f.fork_owner.as_str()).collect();
        assert_eq!(owners, vec!["first", "fourth", "fifth"]);

        let limited = analyzer.analyze_batch(values, Some(4));
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn oversized_counts_do_not_abort_batch() {
        let config = ScoringConfig::default();
        let analyzer = ForkAnalyzer::new(&config);
        let mut huge = record("huge");
        huge["comparison"]["files"][0]["additions"] = json!(1e30);
        huge["comparison"]["files"][0]["deletions"] = json!(1);
        let mut max = record("max");
        max["comparison"]["files"] = json!([
            {"filename": "a.py", "status": "modified", "additions": u64::MAX, "deletions": 0},
            {"filename": "b.py", "status": "modified", "additions": 1, "deletions": 0}
        ]);

        let out = analyzer.analyze_batch(vec![huge, max, record("normal")], None);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].patch_analysis.code_additions_count, u64::MAX);
        assert_eq!(out[1].patch_analysis.code_additions_count, u64::MAX);
        assert_eq!(
            out[1].meaningfulness.reasons,
            vec![format!("Substantial code additions ({} lines)", u64::MAX)]
        );
        assert_eq!(out[2].meaningfulness.score, 10);
    }

    #[test]
    fn analysis_is_idempotent() {
        let config = ScoringConfig::default();
        let analyzer = ForkAnalyzer::new(&config);
        let input: ForkInput = serde_json::from_value(record("acme")).unwrap();
        let first = analyzer.analyze(&input).unwrap();
        let second = analyzer.analyze(&input).unwrap();
        assert_eq!(first.meaningfulness, second.meaningfulness);
        assert_eq!(first.summary, second.summary);
    }
}
