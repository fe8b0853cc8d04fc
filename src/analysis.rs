//! Fork analysis stages and the per-fork pipeline that chains them.

pub mod commits;
pub mod docs;
pub mod files;
pub mod pipeline;
pub mod readme;
pub mod scoring;
pub mod signals;
pub mod summary;

pub use commits::CommitIntentExtractor;
pub use docs::analyze_documentation;
pub use files::FileClassifier;
pub use pipeline::{parse_batch, ForkAnalyzer};
pub use readme::ReadmeDeltaExtractor;
pub use scoring::MeaningfulnessScorer;
pub use signals::SignalExtractor;
pub use summary::{SummaryComposer, SummaryContext};

/// Joins items as prose: "a", "a and b", "a, b and c".
pub(crate) fn join_readable<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}
