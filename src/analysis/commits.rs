//! Development intent mined from commit titles.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::Thresholds;
use crate::data::{Commit, CommitIntentProfile, DevelopmentFocus};

/// Verb-plus-phrase templates; the capture is the feature phrase.
const FEATURE_PATTERNS: &[&str] = &[
    r"add(?:ed|ing)?\s+(\w+(?:\s+\w+){0,2})",
    r"implement(?:ed|ing)?\s+(\w+(?:\s+\w+){0,2})",
    r"support\s+for\s+(\w+(?:\s+\w+){0,2})",
    r"new\s+(\w+(?:\s+\w+){0,2})",
    r"enable(?:d)?\s+(\w+(?:\s+\w+){0,2})",
    r"integrate(?:d)?\s+(\w+(?:\s+\w+){0,2})",
];

/// Matches kept per feature template.
const MATCHES_PER_PATTERN: usize = 3;

/// Phrases too generic to report.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "with", "tests", "test",
];

/// Keyword table per focus category, in tie-break order.
const FOCUS_KEYWORDS: &[(DevelopmentFocus, &[&str])] = &[
    (
        DevelopmentFocus::NewCapabilities,
        &["add support", "implement", "introduce", "new feature", "enable", "allow"],
    ),
    (
        DevelopmentFocus::Improvements,
        &["improve", "enhance", "optimize", "better", "upgrade", "modernize"],
    ),
    (
        DevelopmentFocus::BugFixes,
        &["fix", "resolve", "patch", "correct", "repair"],
    ),
    (
        DevelopmentFocus::Customization,
        &["customize", "adapt", "tailor", "modify for", "adjust"],
    ),
    (
        DevelopmentFocus::Integration,
        &["integrate", "connect", "link", "bridge", "compatible"],
    ),
    (
        DevelopmentFocus::Security,
        &["security", "secure", "vulnerability", "auth", "permission"],
    ),
    (
        DevelopmentFocus::Performance,
        &["performance", "faster", "speed", "efficiency", "scale"],
    ),
    (
        DevelopmentFocus::Refactoring,
        &["refactor", "restructure", "reorganize", "clean up"],
    ),
];

fn feature_regexes() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        FEATURE_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// Mines commit titles for feature mentions and development focus.
pub struct CommitIntentExtractor<'a> {
    thresholds: &'a Thresholds,
}

impl<'a> CommitIntentExtractor<'a> {
    /// Creates an extractor using the given thresholds.
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self { thresholds }
    }

    /// Builds the intent profile of the leading commits.
    pub fn analyze(&self, commits: &[Commit]) -> CommitIntentProfile {
        let titles: Vec<&str> = commits
            .iter()
            .take(self.thresholds.commit_window)
            .map(Commit::title)
            .filter(|title| !title.is_empty())
            .collect();

        if titles.is_empty() {
            return CommitIntentProfile::default();
        }

        let combined = titles.join(" ").to_lowercase();

        CommitIntentProfile {
            key_features_mentioned: self.feature_phrases(&combined),
            development_focus: self.development_focus(&combined),
            commit_sample: titles.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    fn feature_phrases(&self, combined: &str) -> Vec<String> {
        let mut phrases: Vec<String> = Vec::new();
        let candidates = feature_regexes().iter().flat_map(|re| {
            re.captures_iter(combined)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
                .take(MATCHES_PER_PATTERN)
        });

        for phrase in candidates {
            if phrases.len() >= self.thresholds.max_features {
                break;
            }
            if phrase.chars().count() < self.thresholds.min_feature_length
                || STOP_WORDS.contains(&phrase.as_str())
                || phrases.contains(&phrase)
            {
                continue;
            }
            phrases.push(phrase);
        }

        phrases
    }

    fn development_focus(&self, combined: &str) -> Vec<DevelopmentFocus> {
        let mut scored: Vec<(DevelopmentFocus, usize)> = FOCUS_KEYWORDS
            .iter()
            .map(|(focus, keywords)| {
                let score = keywords.iter().map(|k| combined.matches(k).count()).sum();
                (*focus, score)
            })
            .filter(|(_, score)| *score > 0)
            .collect();

        // Stable sort keeps declaration order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored
            .into_iter()
            .take(self.thresholds.max_focus)
            .map(|(focus, _)| focus)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn analyze(messages: &[&str]) -> CommitIntentProfile {
        let thresholds = Thresholds::default();
        let commits: Vec<Commit> = messages.iter().map(|m| Commit::with_message(*m)).collect();
        CommitIntentExtractor::new(&thresholds).analyze(&commits)
    }

    #[test]
    fn empty_history_is_zero_valued() {
        assert_eq!(analyze(&[]), CommitIntentProfile::default());
        assert_eq!(analyze(&["", "\n\nbody only"]), CommitIntentProfile::default());
    }

    #[test]
    fn extracts_feature_phrases() {
        let profile = analyze(&["Add oauth login flow", "Implement retry queue"]);
        assert_eq!(
            profile.key_features_mentioned,
            vec!["oauth login flow".to_string(), "retry queue".to_string()]
        );
    }

    #[test]
    fn short_and_stop_word_phrases_are_dropped() {
        let profile = analyze(&["add ui", "new test", "add the", "enable caching layer"]);
        assert!(!profile.key_features_mentioned.iter().any(|f| f == "ui"));
        assert!(!profile.key_features_mentioned.iter().any(|f| f == "test"));
        assert!(profile
            .key_features_mentioned
            .iter()
            .all(|f| f.chars().count() >= 4));
    }

    #[test]
    fn at_most_five_features() {
        let profile = analyze(&[
            "add alpha one",
            "add bravo two",
            "add charlie three",
            "implement delta four",
            "implement echo five",
            "implement foxtrot six",
            "enable golf seven",
        ]);
        assert_eq!(profile.key_features_mentioned.len(), 5);
    }

    #[test]
    fn zero_feature_cap_yields_no_phrases() {
        let thresholds = Thresholds {
            max_features: 0,
            ..Thresholds::default()
        };
        let commits = vec![Commit::with_message("Add oauth login flow")];
        let profile = CommitIntentExtractor::new(&thresholds).analyze(&commits);
        assert!(profile.key_features_mentioned.is_empty());
        assert_eq!(profile.commit_sample, vec!["Add oauth login flow".to_string()]);
    }

    #[test]
    fn only_titles_are_considered() {
        let profile = analyze(&["Tidy build\n\nimplement secret feature in body"]);
        assert!(profile.key_features_mentioned.is_empty());
        assert_eq!(profile.commit_sample, vec!["Tidy build".to_string()]);
    }

    #[test]
    fn focus_ranked_by_score_then_declaration_order() {
        let profile = analyze(&[
            "fix crash on start",
            "fix typo",
            "improve logging",
            "refactor parser",
            "security review",
        ]);
        assert_eq!(
            profile.development_focus,
            vec![
                DevelopmentFocus::BugFixes,
                DevelopmentFocus::Improvements,
                DevelopmentFocus::Security,
            ]
        );
    }

    #[test]
    fn only_first_twenty_commits_are_read() {
        let messages: Vec<String> = (0..30).map(|i| format!("commit number {i}")).collect();
        let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
        let profile = analyze(&refs);
        assert_eq!(profile.commit_sample.len(), 20);
        assert_eq!(profile.commit_sample[19], "commit number 19");
    }
}
