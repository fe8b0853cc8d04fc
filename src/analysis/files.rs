//! File classification by path and extension.

use std::collections::BTreeMap;

use crate::config::Thresholds;
use crate::data::{ChangeCategory, FileAnalysis, FileChange, FileStatus, MajorChange};

/// Path substrings that place a file in a category.
///
/// Membership is inclusive: every rule is evaluated for every file.
const CATEGORY_RULES: &[(ChangeCategory, &[&str])] = &[
    (
        ChangeCategory::Infrastructure,
        &["docker", "dockerfile", ".yml", ".yaml", "ci", "cd", "deploy"],
    ),
    (
        ChangeCategory::Configuration,
        &["config", "settings", ".env", ".ini", ".conf"],
    ),
    (
        ChangeCategory::Testing,
        &["test", "spec", "__test__", ".test.", ".spec."],
    ),
    (
        ChangeCategory::Documentation,
        &["readme", "docs/", "documentation", ".md", "license"],
    ),
    (
        ChangeCategory::Security,
        &["auth", "security", "crypto", "password", "token", "secret"],
    ),
    (
        ChangeCategory::Database,
        &["migration", "schema", "model", "database", "db/", "sql"],
    ),
    (
        ChangeCategory::Api,
        &["api/", "endpoint", "route", "controller", "handler"],
    ),
    (
        ChangeCategory::Frontend,
        &[".css", ".scss", ".html", ".jsx", ".tsx", ".vue", "component", "ui/"],
    ),
    (
        ChangeCategory::Dependencies,
        &[
            "package.json",
            "requirements.txt",
            "go.mod",
            "pom.xml",
            "build.gradle",
            "gemfile",
            "cargo.toml",
        ],
    ),
];

/// Number of extensions reported as key areas.
const KEY_AREA_COUNT: usize = 3;

/// Classifies comparison files into categories and change lists.
pub struct FileClassifier<'a> {
    thresholds: &'a Thresholds,
}

impl<'a> FileClassifier<'a> {
    /// Creates a classifier using the given thresholds.
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self { thresholds }
    }

    /// Analyzes a list of changed files.
    pub fn analyze(&self, files: &[FileChange]) -> FileAnalysis {
        let mut analysis = FileAnalysis {
            total_files_changed: files.len(),
            ..FileAnalysis::default()
        };

        // Extension counts in first-encounter order, for key-area tie-breaks.
        let mut extension_order: Vec<(String, usize)> = Vec::new();

        for file in files {
            analysis.specific_files_modified.push(file.filename.clone());

            match file.status {
                FileStatus::Added => analysis.new_files_added.push(file.filename.clone()),
                FileStatus::Removed => analysis.files_removed.push(file.filename.clone()),
                _ => {}
            }

            if file.additions.saturating_add(file.deletions) > self.thresholds.major_change_lines {
                analysis.major_changes.push(MajorChange {
                    file: file.filename.clone(),
                    status: file.status.to_string(),
                    additions: file.additions,
                    deletions: file.deletions,
                });
            }

            if let Some(ext) = file.extension() {
                match extension_order.iter_mut().find(|(e, _)| *e == ext) {
                    Some((_, count)) => *count += 1,
                    None => extension_order.push((ext, 1)),
                }
            }

            analysis
                .change_categories
                .extend(categorize_path(&file.filename));
        }

        analysis.key_areas = key_areas(&extension_order);
        analysis.files_by_type = extension_order.into_iter().collect::<BTreeMap<_, _>>();

        analysis
    }
}

/// Returns every category whose keywords appear in `path`.
pub fn categorize_path(path: &str) -> Vec<ChangeCategory> {
    let lower = path.to_lowercase();
    CATEGORY_RULES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .collect()
}

fn key_areas(extension_order: &[(String, usize)]) -> Vec<String> {
    let mut ranked: Vec<&(String, usize)> = extension_order.iter().collect();
    // Stable sort keeps first-encounter order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(KEY_AREA_COUNT)
        .map(|(ext, _)| ext.clone())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn classify(files: &[FileChange]) -> FileAnalysis {
        let thresholds = Thresholds::default();
        FileClassifier::new(&thresholds).analyze(files)
    }

    fn file(name: &str, status: FileStatus, additions: u64, deletions: u64) -> FileChange {
        FileChange::new(name, status, additions, deletions)
    }

    // ── categorize_path ────────────────────────────────────────────

    #[test]
    fn dockerfile_is_infrastructure() {
        assert!(categorize_path("Dockerfile").contains(&ChangeCategory::Infrastructure));
    }

    #[test]
    fn categories_are_inclusive() {
        let categories = categorize_path("tests/api/auth_test.py");
        assert!(categories.contains(&ChangeCategory::Testing));
        assert!(categories.contains(&ChangeCategory::Api));
        assert!(categories.contains(&ChangeCategory::Security));
    }

    #[test]
    fn readme_is_documentation() {
        assert_eq!(
            categorize_path("README.md"),
            vec![ChangeCategory::Documentation]
        );
    }

    #[test]
    fn manifest_is_dependencies() {
        assert!(categorize_path("Cargo.toml").contains(&ChangeCategory::Dependencies));
    }

    #[test]
    fn plain_source_has_no_category() {
        assert!(categorize_path("src/app.py").is_empty());
    }

    // ── analyze ────────────────────────────────────────────────────

    #[test]
    fn empty_input_is_zero_valued() {
        assert_eq!(classify(&[]), FileAnalysis::default());
    }

    #[test]
    fn tracks_added_removed_and_major() {
        let analysis = classify(&[
            file("src/new.py", FileStatus::Added, 40, 0),
            file("src/old.py", FileStatus::Removed, 0, 80),
            file("src/core.py", FileStatus::Modified, 30, 21),
        ]);
        assert_eq!(analysis.total_files_changed, 3);
        assert_eq!(analysis.new_files_added, vec!["src/new.py"]);
        assert_eq!(analysis.files_removed, vec!["src/old.py"]);
        let major: Vec<&str> = analysis
            .major_changes
            .iter()
            .map(|m| m.file.as_str())
            .collect();
        assert_eq!(major, vec!["src/old.py", "src/core.py"]);
        assert_eq!(analysis.major_changes[0].status, "removed");
    }

    #[test]
    fn exactly_fifty_lines_is_not_major() {
        let analysis = classify(&[file("a.py", FileStatus::Modified, 25, 25)]);
        assert!(analysis.major_changes.is_empty());
    }

    #[test]
    fn saturated_counts_do_not_overflow() {
        let analysis = classify(&[file("huge.py", FileStatus::Modified, u64::MAX, 1)]);
        assert_eq!(analysis.major_changes.len(), 1);
        assert_eq!(analysis.major_changes[0].additions, u64::MAX);
    }

    #[test]
    fn key_areas_break_ties_by_first_encounter() {
        let analysis = classify(&[
            file("a.go", FileStatus::Modified, 1, 0),
            file("b.rs", FileStatus::Modified, 1, 0),
            file("c.py", FileStatus::Modified, 1, 0),
            file("d.rs", FileStatus::Modified, 1, 0),
            file("e.md", FileStatus::Modified, 1, 0),
        ]);
        assert_eq!(analysis.key_areas, vec![".rs", ".go", ".py"]);
        assert_eq!(analysis.files_by_type.get(".rs"), Some(&2));
    }

    #[test]
    fn extensions_are_lowercased() {
        let analysis = classify(&[file("Main.JAVA", FileStatus::Modified, 1, 0)]);
        assert_eq!(analysis.key_areas, vec![".java"]);
    }

    #[test]
    fn extensionless_files_are_not_counted_by_type() {
        let analysis = classify(&[file("Makefile", FileStatus::Modified, 1, 0)]);
        assert!(analysis.files_by_type.is_empty());
        assert_eq!(analysis.specific_files_modified, vec!["Makefile"]);
    }

    // ── property tests ────────────────────────────────────────────

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn categorize_deterministic(s in "[a-zA-Z0-9_/\\.]{0,80}") {
                prop_assert_eq!(categorize_path(&s), categorize_path(&s));
            }

            #[test]
            fn total_matches_input_length(names in proptest::collection::vec("[a-z]{1,8}\\.[a-z]{1,3}", 0..20)) {
                let files: Vec<FileChange> = names
                    .iter()
                    .map(|n| FileChange::new(n.as_str(), FileStatus::Modified, 1, 1))
                    .collect();
                let analysis = classify(&files);
                prop_assert_eq!(analysis.total_files_changed, files.len());
                prop_assert!(analysis.key_areas.len() <= KEY_AREA_COUNT);
            }
        }
    }
}
