//! Executive narrative for one fork.
//!
//! Sentences are emitted in a fixed order and only when their source field
//! carries data. When the README and documentation say nothing, the
//! narrative falls back to a technical description of the change set.

use super::join_readable;
use crate::config::Thresholds;
use crate::data::{
    ChangeCategory, ClassificationVerdict, CommitIntentProfile, DevelopmentFocus,
    DocumentationInsights, FileAnalysis, ForkMetadata, OwnerKind, ReadmeDelta, SignalSet,
};

/// Maximum sentences in a narrative.
const MAX_SENTENCES: usize = 5;

/// Placeholder for narratives too short to be useful.
pub const INSUFFICIENT_SUMMARY: &str =
    "Fork analysis incomplete - insufficient documentation to generate summary.";

/// Maximum details in the technical-change sentence.
const MAX_TECHNICAL_DETAILS: usize = 3;

/// Commit titles quoted as examples must be longer than this.
const MIN_EXAMPLE_TITLE_CHARS: usize = 20;

/// Commit titles quoted as examples must be shorter than this.
const MAX_EXAMPLE_TITLE_CHARS: usize = 100;

/// Minimum description length for the repositioning sentence.
const MIN_DESCRIPTION_CHARS: usize = 10;

/// Everything the composer reads for one fork.
#[derive(Debug, Clone, Copy)]
pub struct SummaryContext<'a> {
    /// Fork metadata.
    pub metadata: &'a ForkMetadata,
    /// File classification.
    pub files: &'a FileAnalysis,
    /// Structural signals.
    pub signals: &'a SignalSet,
    /// Commit intent.
    pub commits: &'a CommitIntentProfile,
    /// README delta.
    pub readme: &'a ReadmeDelta,
    /// Documentation signals.
    pub docs: &'a DocumentationInsights,
    /// Scoring verdict.
    pub verdict: &'a ClassificationVerdict,
}

/// Composes executive summaries.
pub struct SummaryComposer<'a> {
    thresholds: &'a Thresholds,
}

impl<'a> SummaryComposer<'a> {
    /// Creates a composer using the given thresholds.
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self { thresholds }
    }

    /// Builds the narrative.
    pub fn compose(&self, ctx: &SummaryContext<'_>) -> String {
        let mut sentences: Vec<String> = vec![opening(ctx.metadata, ctx.files)];

        if let Some(headline) = headline(ctx.verdict) {
            sentences.push(headline);
        }

        let contextual = [
            purpose(ctx.readme, ctx.docs),
            industry(ctx.readme),
            deployment(ctx.readme, ctx.docs),
        ];
        let before = sentences.len();
        sentences.extend(contextual.into_iter().flatten());

        if sentences.len() == before {
            let fallback = [
                Some(technical_change(ctx)).filter(|s| !s.is_empty()),
                concrete_example(ctx.files, ctx.commits),
                business_guess(ctx),
                significance(ctx.files),
            ];
            sentences.extend(fallback.into_iter().flatten());
        }

        sentences.truncate(MAX_SENTENCES);
        let text = sentences.join(" ");
        if text.chars().count() < self.thresholds.summary_min_length {
            INSUFFICIENT_SUMMARY.to_string()
        } else {
            text
        }
    }
}

fn opening(metadata: &ForkMetadata, files: &FileAnalysis) -> String {
    let n = files.total_files_changed;
    match metadata.fork_owner_type {
        OwnerKind::Organization => format!(
            "Organization '{}' has developed a customized version of {} with {n} files modified.",
            metadata.fork_owner, metadata.original_repo
        ),
        OwnerKind::User => format!(
            "Developer '{}' has created a fork of {} with {n} file modifications.",
            metadata.fork_owner, metadata.original_repo
        ),
    }
}

fn headline(verdict: &ClassificationVerdict) -> Option<String> {
    if verdict.reasons.is_empty() {
        return None;
    }
    let top: Vec<&str> = verdict.reasons.iter().take(2).map(String::as_str).collect();
    Some(format!(
        "{} ({} confidence): {}.",
        verdict.classification,
        verdict.confidence,
        top.join("; ")
    ))
}

fn purpose(readme: &ReadmeDelta, docs: &DocumentationInsights) -> Option<String> {
    if let Some(p) = &readme.stated_purpose {
        return Some(format!("Stated purpose: {p}."));
    }
    if let Some(goal) = &docs.stated_goal {
        return Some(format!("Documentation describes the goal as: {goal}."));
    }
    if let Some(context) = &readme.business_context {
        return Some(context.clone());
    }
    readme
        .use_cases
        .first()
        .map(|u| format!("Primary use case: {u}."))
}

fn industry(readme: &ReadmeDelta) -> Option<String> {
    if readme.industry_terms.is_empty() {
        return None;
    }
    let names: Vec<String> = readme.industry_terms.iter().map(ToString::to_string).collect();
    let noun = if names.len() == 1 { "domain" } else { "domains" };
    let audience = readme
        .target_audience
        .as_ref()
        .map(|a| format!(" for {a}"))
        .unwrap_or_default();
    Some(format!(
        "The changes target the {} {noun}{audience}.",
        join_readable(&names)
    ))
}

fn deployment(readme: &ReadmeDelta, docs: &DocumentationInsights) -> Option<String> {
    let mut targets: Vec<String> = docs.deployment_insights.clone();
    for target in &readme.deployment_targets {
        if !targets.contains(target) {
            targets.push(target.clone());
        }
    }

    match (targets.is_empty(), readme.integrations.is_empty()) {
        (true, true) => None,
        (false, true) => Some(format!(
            "Deployment targets include {}.",
            join_readable(&targets)
        )),
        (true, false) => Some(format!(
            "Integrations mentioned: {}.",
            join_readable(&readme.integrations)
        )),
        (false, false) => Some(format!(
            "Deployment targets include {}; integrations mentioned: {}.",
            join_readable(&targets),
            join_readable(&readme.integrations)
        )),
    }
}

/// Describes what changed from file and signal data alone.
pub fn technical_change(ctx: &SummaryContext<'_>) -> String {
    let mut details: Vec<String> = Vec::new();

    let notable: Vec<String> = ctx
        .files
        .new_files_added
        .iter()
        .map(|path| path.rsplit('/').next().unwrap_or(path).to_string())
        .filter(|name| !name.is_empty() && !name.starts_with('.'))
        .take(2)
        .collect();
    if !notable.is_empty() {
        details.push(format!("new files including {}", notable.join(", ")));
    }

    let functions = ctx.signals.new_functions_detected.len();
    if functions > 0 {
        details.push(format!("{functions} new function(s)"));
    }
    let classes = ctx.signals.new_classes_detected.len();
    if classes > 0 {
        details.push(format!("{classes} new class(es)"));
    }

    let features: Vec<String> = ctx
        .commits
        .key_features_mentioned
        .iter()
        .take(2)
        .cloned()
        .collect();
    if !features.is_empty() {
        details.push(format!("work on {}", features.join(", ")));
    }

    if let Some(major) = ctx.files.major_changes.first() {
        let name = major.file.rsplit('/').next().unwrap_or(&major.file);
        details.push(format!("significant modifications to {name}"));
    }

    if !details.is_empty() {
        details.truncate(MAX_TECHNICAL_DETAILS);
        return format!("The fork includes {}.", join_readable(&details));
    }

    let categories: Vec<String> = ctx
        .files
        .change_categories
        .iter()
        .take(3)
        .map(ToString::to_string)
        .collect();
    if categories.is_empty() {
        String::new()
    } else {
        format!("Modifications span {} components.", join_readable(&categories))
    }
}

/// Quotes a descriptive commit title, else names the dominant file types.
fn concrete_example(files: &FileAnalysis, commits: &CommitIntentProfile) -> Option<String> {
    let descriptive = commits.commit_sample.iter().find(|title| {
        let len = title.chars().count();
        len > MIN_EXAMPLE_TITLE_CHARS && len < MAX_EXAMPLE_TITLE_CHARS
    });
    if let Some(title) = descriptive {
        let mut example = capitalize(title);
        if !example.ends_with('.') {
            example.push('.');
        }
        return Some(format!("Recent work includes: \"{example}\""));
    }

    let types: Vec<String> = files
        .key_areas
        .iter()
        .take(2)
        .filter_map(|ext| files.files_by_type.get(ext).map(|n| format!("{n} {ext} files")))
        .collect();
    if types.is_empty() {
        None
    } else {
        Some(format!("Changes primarily affect {}.", types.join(" and ")))
    }
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Guesses the business motive from change categories and metadata.
fn business_guess(ctx: &SummaryContext<'_>) -> Option<String> {
    let metadata = ctx.metadata;
    let description = metadata.fork_description.trim();
    if metadata.description_changed && description.chars().count() > MIN_DESCRIPTION_CHARS {
        return Some(format!(
            "The project has been repositioned as: \"{description}\"."
        ));
    }

    let categories = &ctx.files.change_categories;
    let has = |c: ChangeCategory| categories.contains(&c);

    if has(ChangeCategory::Infrastructure) || has(ChangeCategory::Dependencies) {
        let containerized = ctx
            .files
            .specific_files_modified
            .iter()
            .any(|f| f.to_lowercase().contains("docker"));
        return Some(if containerized {
            "This appears to be an effort to containerize and deploy the software in their environment."
                .to_string()
        } else {
            "The work focuses on adapting deployment and infrastructure for their operational needs."
                .to_string()
        });
    }
    if has(ChangeCategory::Testing) && ctx.files.new_files_added.len() > 2 {
        return Some(
            "Development includes building out testing infrastructure for quality assurance."
                .to_string(),
        );
    }
    if has(ChangeCategory::Security) {
        return Some(
            "Changes emphasize security enhancements, likely for enterprise or compliance requirements."
                .to_string(),
        );
    }
    if has(ChangeCategory::Api) && has(ChangeCategory::Database) {
        return Some(
            "Development extends backend functionality with API and data model enhancements."
                .to_string(),
        );
    }
    if has(ChangeCategory::Frontend) {
        return Some(
            "Work concentrates on user interface improvements and frontend customization."
                .to_string(),
        );
    }
    if ctx
        .commits
        .development_focus
        .contains(&DevelopmentFocus::Integration)
    {
        return Some(
            "The modifications enable integration with their existing technology stack."
                .to_string(),
        );
    }
    None
}

fn significance(files: &FileAnalysis) -> Option<String> {
    let majors = files.major_changes.len();
    if files.total_files_changed > 50 && majors > 5 {
        Some("The substantial scope suggests this is a strategic fork intended for production use.".to_string())
    } else if files.total_files_changed > 20 {
        Some("This represents a meaningful investment in adapting the codebase for their needs.".to_string())
    } else if majors > 3 {
        Some("While targeted, the changes show deliberate effort to modify core functionality.".to_string())
    } else {
        None
    }
}
