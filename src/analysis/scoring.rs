//! Additive meaningfulness scoring.

use tracing::debug;

use crate::config::ScoringConfig;
use crate::data::{Classification, ClassificationVerdict, Confidence, FileAnalysis, SignalSet};

/// Turns signals and file classification into a verdict.
pub struct MeaningfulnessScorer<'a> {
    config: &'a ScoringConfig,
}

/// Penalty conditions evaluated during scoring, kept for the summary ladder.
struct Penalties {
    config_reason_recorded: bool,
    documentation_only: bool,
}

impl<'a> MeaningfulnessScorer<'a> {
    /// Creates a scorer with the given configuration.
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Scores one fork.
    pub fn score(&self, signals: &SignalSet, files: &FileAnalysis) -> ClassificationVerdict {
        let weights = &self.config.weights;
        let thresholds = &self.config.thresholds;
        let mut score: i64 = 0;
        let mut reasons: Vec<String> = Vec::new();

        let functions = signals.new_functions_detected.len();
        if functions > 0 {
            score = score.saturating_add(weights.new_function.saturating_mul(count(functions)));
            reasons.push(format!("{functions} new function(s) detected"));
        }

        let classes = signals.new_classes_detected.len();
        if classes > 0 {
            score = score.saturating_add(weights.new_class.saturating_mul(count(classes)));
            reasons.push(format!("{classes} new class(es) detected"));
        }

        let enhanced = signals.enhanced_functions.len();
        if enhanced > 0 {
            score = score.saturating_add(weights.enhanced_function.saturating_mul(count(enhanced)));
            reasons.push(format!("{enhanced} file(s) with enhanced logic"));
        }

        let adjustments = signals.environment_adjustments.len();
        if adjustments > 0 {
            score = score.saturating_add(weights.environment_adjustment.saturating_mul(count(adjustments)));
            reasons.push(format!("{adjustments} environment/deployment adjustment(s)"));
        }

        let code = signals.code_additions_count;
        if code > thresholds.code_additions_high {
            score = score.saturating_add(weights.code_additions_high);
            reasons.push(format!("Substantial code additions ({code} lines)"));
        } else if code > thresholds.code_additions_moderate {
            score = score.saturating_add(weights.code_additions_moderate);
            reasons.push(format!("Moderate code additions ({code} lines)"));
        }

        let mut penalties = Penalties {
            config_reason_recorded: false,
            documentation_only: false,
        };

        if files.total_files_changed > 0 {
            let ratio = signals.config_only_changes.len() as f64 / files.total_files_changed as f64;
            if ratio > thresholds.config_ratio {
                score = score.saturating_add(weights.config_ratio_penalty);
                if reasons.is_empty() {
                    reasons.push(format!(
                        "Primarily configuration changes ({:.0}% of files)",
                        ratio * 100.0
                    ));
                    penalties.config_reason_recorded = true;
                }
            }
        }

        if files.is_documentation_only() {
            score = score.saturating_add(weights.documentation_only_penalty);
            penalties.documentation_only = true;
            if reasons.is_empty() {
                reasons.push("Only documentation changes".to_string());
            }
        }

        let (classification, confidence) = self.band(score);
        let is_meaningful = classification != Classification::NotMeaningful;
        let summary = verdict_summary(is_meaningful, signals, &penalties);

        debug!(score, %classification, %confidence, "Scored fork");

        ClassificationVerdict {
            is_meaningful,
            classification,
            confidence,
            reasons,
            score,
            summary,
        }
    }

    fn band(&self, score: i64) -> (Classification, Confidence) {
        let bands = &self.config.bands;
        if score >= bands.meaningful_high {
            (Classification::Meaningful, Confidence::High)
        } else if score >= bands.meaningful_medium {
            (Classification::Meaningful, Confidence::Medium)
        } else if score >= bands.likely_meaningful {
            (Classification::LikelyMeaningful, Confidence::Low)
        } else if score < bands.not_meaningful_medium_below {
            (Classification::NotMeaningful, Confidence::Medium)
        } else {
            (Classification::NotMeaningful, Confidence::Low)
        }
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Fixed-priority verdict sentence.
fn verdict_summary(is_meaningful: bool, signals: &SignalSet, penalties: &Penalties) -> String {
    let functions = signals.new_functions_detected.len();
    let classes = signals.new_classes_detected.len();

    if is_meaningful {
        if functions > 0 || classes > 0 {
            format!(
                "This fork adds new functionality with {functions} new function(s) and {classes} new class(es)."
            )
        } else if !signals.environment_adjustments.is_empty() {
            "This fork adapts the codebase for different environments.".to_string()
        } else if !signals.enhanced_functions.is_empty() {
            "This fork enhances existing functionality.".to_string()
        } else {
            "This fork contains substantial code modifications.".to_string()
        }
    } else if penalties.config_reason_recorded {
        "This fork contains primarily configuration updates.".to_string()
    } else if penalties.documentation_only {
        "This fork contains primarily documentation changes.".to_string()
    } else {
        "This fork contains minor or non-functional changes.".to_string()
    }
}
