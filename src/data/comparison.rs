//! Input records supplied by the acquisition layer.
//!
//! Field names follow the code-hosting comparison API response
//! (`files[].{filename,status,additions,deletions,patch}`,
//! `commits[].commit.message`) so a fetched payload deserializes directly.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// Change status of a single file within a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// File did not exist in the base tree.
    Added,
    /// File exists in both trees with different content.
    #[default]
    Modified,
    /// File was deleted in the head tree.
    Removed,
    /// File was moved, possibly with edits.
    Renamed,
    /// File was copied from another path.
    Copied,
    /// Mode or metadata change only.
    Changed,
    /// Listed without content change.
    Unchanged,
}

impl FileStatus {
    /// Parses a status string, falling back to `Modified` for unknown values.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "added" | "a" => Self::Added,
            "removed" | "deleted" | "d" => Self::Removed,
            "renamed" | "r" => Self::Renamed,
            "copied" | "c" => Self::Copied,
            "changed" => Self::Changed,
            "unchanged" => Self::Unchanged,
            _ => Self::Modified,
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
        };
        f.write_str(label)
    }
}

fn status<'de, D>(deserializer: D) -> Result<FileStatus, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::text(deserializer).map(|s| FileStatus::parse(&s))
}

/// One changed file in a comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileChange {
    /// Path relative to the repository root.
    #[serde(default, deserialize_with = "lenient::text")]
    pub filename: String,
    /// Change status.
    #[serde(default, deserialize_with = "status")]
    pub status: FileStatus,
    /// Lines added.
    #[serde(default, deserialize_with = "lenient::count")]
    pub additions: u64,
    /// Lines deleted.
    #[serde(default, deserialize_with = "lenient::count")]
    pub deletions: u64,
    /// Unified diff text, absent for binary or oversized files.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub patch: Option<String>,
}

impl FileChange {
    /// Creates a file change without patch text.
    pub fn new(filename: impl Into<String>, status: FileStatus, additions: u64, deletions: u64) -> Self {
        Self {
            filename: filename.into(),
            status,
            additions,
            deletions,
            patch: None,
        }
    }

    /// Attaches patch text.
    #[must_use]
    pub fn with_patch(mut self, patch: impl Into<String>) -> Self {
        self.patch = Some(patch.into());
        self
    }

    /// Returns the lower-cased extension including the leading dot, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
    }

    /// Returns the lines introduced by the patch, without the `+` marker.
    ///
    /// Removed lines, context lines and `+++` file headers are skipped.
    pub fn added_lines(&self) -> impl Iterator<Item = &str> {
        self.patch
            .as_deref()
            .unwrap_or("")
            .lines()
            .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
            .map(|line| &line[1..])
    }
}

/// Commit detail nested under each comparison commit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Full commit message.
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: String,
}

/// One commit unique to the head of a comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash.
    #[serde(default, deserialize_with = "lenient::text")]
    pub sha: String,
    /// Commit detail.
    #[serde(default)]
    pub commit: CommitDetail,
}

impl Commit {
    /// Creates a commit carrying only a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            sha: String::new(),
            commit: CommitDetail {
                message: message.into(),
            },
        }
    }

    /// Returns the message title: the trimmed text before the first newline.
    pub fn title(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("").trim()
    }
}

/// Structured diff between the original repository and a fork.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Changed files in API order.
    #[serde(default, deserialize_with = "lenient::list")]
    pub files: Vec<FileChange>,
    /// Commits unique to the head, oldest first.
    #[serde(default, deserialize_with = "lenient::list")]
    pub commits: Vec<Commit>,
    /// Base branch identifier.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub base: Option<String>,
    /// Head branch identifier.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub head: Option<String>,
}

/// Kind of account owning a fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum OwnerKind {
    /// Individual account.
    #[default]
    User,
    /// Organization account.
    Organization,
}

impl<'de> Deserialize<'de> for OwnerKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = lenient::text(deserializer)?;
        Ok(if raw.trim().eq_ignore_ascii_case("organization") {
            Self::Organization
        } else {
            Self::User
        })
    }
}

/// Descriptive metadata for a fork, as listed by the fork inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForkMetadata {
    /// Login of the fork owner.
    #[serde(default, deserialize_with = "lenient::text")]
    pub fork_owner: String,
    /// Repository name of the fork.
    #[serde(default, deserialize_with = "lenient::text")]
    pub fork_name: String,
    /// Web URL of the fork.
    #[serde(default, deserialize_with = "lenient::text")]
    pub fork_url: String,
    /// Web URL of the fork owner.
    #[serde(default, deserialize_with = "lenient::text")]
    pub fork_owner_url: String,
    /// Original repository as `owner/name`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub original_repo: String,
    /// Web URL of the original repository.
    #[serde(default, deserialize_with = "lenient::text")]
    pub original_url: String,
    /// Account kind of the fork owner.
    #[serde(default)]
    pub fork_owner_type: OwnerKind,
    /// Commits the fork is ahead of the original.
    #[serde(default, deserialize_with = "lenient::count")]
    pub commits_ahead: u64,
    /// Repository description of the fork.
    #[serde(default, deserialize_with = "lenient::text")]
    pub fork_description: String,
    /// Whether the fork description differs from the original.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub description_changed: bool,
}

impl ForkMetadata {
    /// Returns `owner/name` for the fork.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.fork_owner, self.fork_name)
    }
}

/// Everything the pipeline needs for one fork.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForkInput {
    /// Fork metadata.
    #[serde(flatten)]
    pub metadata: ForkMetadata,
    /// Comparison against the original, absent when the fork was unreachable.
    #[serde(default)]
    pub comparison: Option<ComparisonRecord>,
    /// README text of the original repository.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub original_readme: Option<String>,
    /// README text of the fork.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub fork_readme: Option<String>,
}
