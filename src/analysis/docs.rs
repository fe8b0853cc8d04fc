//! Signals from documentation files other than the README.

use tracing::debug;

use super::readme::{deployment_targets, stated_purpose};
use crate::data::{DocumentationInsights, FileChange};

const DOC_EXTENSIONS: &[&str] = &[".md", ".rst", ".adoc", ".txt"];

/// Basename prefixes that look like documentation but are not prose.
const NON_DOC_PREFIXES: &[&str] = &["readme", "requirements", "license", "cmakelists"];

/// Returns true for documentation files whose additions are scanned.
pub fn is_documentation_file(file: &FileChange) -> bool {
    let lower = file.filename.to_lowercase();
    let basename = lower.rsplit('/').next().unwrap_or(&lower);
    if NON_DOC_PREFIXES.iter().any(|p| basename.starts_with(p)) {
        return false;
    }
    lower.starts_with("docs/")
        || lower.contains("/docs/")
        || DOC_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Scans added documentation lines for a stated goal and deployment targets.
pub fn analyze_documentation(files: &[FileChange]) -> DocumentationInsights {
    let mut files_scanned = 0;
    let mut added: Vec<&str> = Vec::new();

    for file in files.iter().filter(|f| is_documentation_file(f)) {
        let before = added.len();
        added.extend(file.added_lines());
        if added.len() > before {
            files_scanned += 1;
        }
    }

    if added.is_empty() {
        return DocumentationInsights::default();
    }

    let text = added.join("\n");
    let insights = DocumentationInsights {
        stated_goal: stated_purpose(&text),
        deployment_insights: deployment_targets(&text),
        files_scanned,
    };
    debug!(
        files_scanned,
        has_goal = insights.stated_goal.is_some(),
        deployment = insights.deployment_insights.len(),
        "Scanned documentation additions"
    );
    insights
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::data::FileStatus;

    fn doc(name: &str, patch: &str) -> FileChange {
        FileChange::new(name, FileStatus::Modified, 3, 0).with_patch(patch)
    }

    #[test]
    fn readme_and_manifests_are_excluded() {
        assert!(!is_documentation_file(&doc("README.md", "")));
        assert!(!is_documentation_file(&doc("docs/readme.rst", "")));
        assert!(!is_documentation_file(&doc("requirements.txt", "")));
        assert!(is_documentation_file(&doc("docs/deploy/guide.html", "")));
        assert!(is_documentation_file(&doc("CONTRIBUTING.md", "")));
        assert!(!is_documentation_file(&doc("src/main.rs", "")));
    }

    #[test]
    fn extracts_goal_and_deployment() {
        let files = vec![
            doc(
                "docs/operations.md",
                "@@ -1 +1,3 @@\n context\n+Goal is fine but see below.\n+This fork is built for air-gapped clusters on OpenShift.\n",
            ),
            doc("docs/empty.md", "@@ -1 +1 @@\n-removed only\n"),
            doc("README.md", "@@ -0,0 +1 @@\n+Deploy with Docker.\n"),
        ];
        let insights = analyze_documentation(&files);
        assert_eq!(
            insights.stated_goal.as_deref(),
            Some("air-gapped clusters on OpenShift")
        );
        assert_eq!(
            insights.deployment_insights,
            vec!["openshift".to_string(), "air-gapped".to_string()]
        );
        assert_eq!(insights.files_scanned, 1);
    }

    #[test]
    fn no_documentation_is_zero_valued() {
        let files = vec![doc("src/lib.rs", "@@ -0,0 +1 @@\n+fn main() {}\n")];
        assert_eq!(analyze_documentation(&files), DocumentationInsights::default());
    }
}
