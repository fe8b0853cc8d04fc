//! README delta extraction.
//!
//! Only text the fork added to its README is examined. The delta is matched
//! against purpose, use-case, audience, industry, problem, integration and
//! deployment templates.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use super::join_readable;
use crate::config::Thresholds;
use crate::data::{Industry, ReadmeDelta};

/// Maximum entries kept in each phrase list.
const MAX_PHRASES: usize = 5;

/// Maximum characters kept in a single extracted phrase.
const MAX_PHRASE_CHARS: usize = 200;

const PURPOSE_PATTERNS: &[&str] = &[
    r"\bthis (?:project|fork|repository|repo|tool|version|edition|library)\s+(?:is|was|has been)\s+(?:specifically\s+)?(?:designed|built|created|intended|developed|tailored|adapted|optimi[sz]ed)\s+(?:for|to)\s+([^.\n]+)",
    r"\bpurpose\s*:\s*([^\n]+)",
    r"\bwhy (?:we|i) forked\s*:?\s*([^\n]+)",
    r"\boptimi[sz]ed for\s+([^.\n]+)",
];

const USE_CASE_PATTERNS: &[&str] = &[
    r"\buse cases?\s*:\s*([^\n]+)",
    r"\b(?:used|useful|ideal|perfect)\s+for\s+([^.\n]+)",
    r"\benables?\s+(?:you|users|teams|organi[sz]ations)\s+to\s+([^.\n]+)",
    r"\bhelps?\s+(?:you|users|teams)\s+([^.\n]+)",
];

const AUDIENCE_PATTERN: &str = r"\b(?:for|targeting|aimed at)\s+((?:[a-z\-]+\s+){0,2}(?:teams|developers|users|organi[sz]ations|enterprises|companies|engineers|researchers|analysts|businesses|customers|startups|agencies|hospitals|banks|scientists))\b";

const PROBLEM_PATTERNS: &[&str] = &[
    r"\b(?:solves?|fix(?:es)?|address(?:es)?|tackles?|eliminates?)\s+(?:the\s+)?(?:problem|issue|challenge|pain)s?\s+(?:of|with|where)\s+([^.\n]+)",
    r"\bproblem\s*:\s*([^\n]+)",
    r"\b(?:to avoid|to prevent|instead of)\s+([^.\n]+)",
];

const INTEGRATION_PATTERNS: &[&str] = &[
    r"\bintegrat(?:es|ed|ion|ions)?\s+with\s+([^.,;\n]+)",
    r"\b(?:connects?|plugs?\s+in)\s+to\s+([^.,;\n]+)",
    r"\bworks\s+with\s+([^.,;\n]+)",
];

/// Leading words stripped from integration phrases.
const INTEGRATION_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "your", "our", "their", "this", "that", "it", "other", "existing", "any",
    "all", "many", "various", "most",
];

/// Words kept per integration phrase.
const INTEGRATION_MAX_WORDS: usize = 4;

/// Domain keyword sets; a domain is flagged when any keyword appears.
const INDUSTRY_KEYWORDS: &[(Industry, &[&str])] = &[
    (
        Industry::Healthcare,
        &["healthcare", "health care", "medical", "patient", "patients", "hospital", "clinical", "hipaa", "ehr"],
    ),
    (
        Industry::Finance,
        &["finance", "financial", "banking", "bank", "trading", "payment", "payments", "fintech", "accounting"],
    ),
    (
        Industry::Enterprise,
        &["enterprise", "b2b", "corporate", "sso", "compliance", "saas"],
    ),
    (
        Industry::MlAi,
        &["machine learning", "ml", "ai", "artificial intelligence", "llm", "neural", "deep learning", "model training"],
    ),
    (
        Industry::Cloud,
        &["cloud", "aws", "azure", "gcp", "serverless"],
    ),
    (
        Industry::Government,
        &["government", "public sector", "federal", "municipal", "fedramp"],
    ),
    (
        Industry::Education,
        &["education", "educational", "student", "students", "university", "school", "classroom", "e-learning"],
    ),
    (
        Industry::Iot,
        &["iot", "internet of things", "sensor", "sensors", "embedded", "edge device", "firmware", "mqtt"],
    ),
];

/// Deployment-target vocabulary, matched on word boundaries.
const DEPLOYMENT_TERMS: &[&str] = &[
    "aws",
    "azure",
    "gcp",
    "google cloud",
    "kubernetes",
    "k8s",
    "openshift",
    "docker",
    "helm",
    "terraform",
    "heroku",
    "vercel",
    "serverless",
    "on-prem",
    "on-premise",
    "on-premises",
    "air-gapped",
    "airgapped",
    "bare metal",
];

const HEADING_PATTERN: &str = r"^\s*#{1,6}\s+(.+?)\s*#*\s*$";

fn case_insensitive(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern).case_insensitive(true).build().ok()
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| case_insensitive(p)).collect()
}

fn keyword_regex(keywords: &[&str]) -> Option<Regex> {
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    case_insensitive(&format!(r"\b(?:{alternation})\b"))
}

struct Patterns {
    purpose: Vec<Regex>,
    use_cases: Vec<Regex>,
    audience: Option<Regex>,
    problems: Vec<Regex>,
    integrations: Vec<Regex>,
    industries: Vec<(Industry, Regex)>,
    deployment: Vec<(&'static str, Regex)>,
    heading: Option<Regex>,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        purpose: compile_all(PURPOSE_PATTERNS),
        use_cases: compile_all(USE_CASE_PATTERNS),
        audience: case_insensitive(AUDIENCE_PATTERN),
        problems: compile_all(PROBLEM_PATTERNS),
        integrations: compile_all(INTEGRATION_PATTERNS),
        industries: INDUSTRY_KEYWORDS
            .iter()
            .filter_map(|(industry, keywords)| keyword_regex(keywords).map(|re| (*industry, re)))
            .collect(),
        deployment: DEPLOYMENT_TERMS
            .iter()
            .filter_map(|term| keyword_regex(&[*term]).map(|re| (*term, re)))
            .collect(),
        heading: Regex::new(HEADING_PATTERN).ok(),
    })
}

/// Normalizes an extracted phrase: collapses whitespace, strips trailing
/// punctuation and caps the length.
fn clean_phrase(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_end_matches(['.', ',', ';', ':', '!', '?']).trim();
    trimmed.chars().take(MAX_PHRASE_CHARS).collect()
}

/// Every cleaned capture of every pattern, in pattern order, deduplicated.
fn collect_captures(regexes: &[Regex], text: &str, limit: usize) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for re in regexes {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                let phrase = clean_phrase(m.as_str());
                if !phrase.is_empty() && !found.contains(&phrase) {
                    found.push(phrase);
                }
            }
        }
    }
    found.truncate(limit);
    found
}

/// Returns the first explicitly stated purpose in `text`.
pub fn stated_purpose(text: &str) -> Option<String> {
    patterns().purpose.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| clean_phrase(m.as_str()))
            .filter(|p| !p.is_empty())
    })
}

/// Returns the deployment-target terms mentioned in `text`, in vocabulary order.
pub fn deployment_targets(text: &str) -> Vec<String> {
    patterns()
        .deployment
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(term, _)| (*term).to_string())
        .collect()
}

fn integration_mentions(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for raw in collect_captures(&patterns().integrations, text, usize::MAX) {
        let words: Vec<&str> = raw
            .split_whitespace()
            .skip_while(|w| INTEGRATION_STOP_WORDS.contains(&w.to_lowercase().as_str()))
            .take(INTEGRATION_MAX_WORDS)
            .collect();
        let phrase = words.join(" ");
        if !phrase.is_empty() && !found.contains(&phrase) {
            found.push(phrase);
        }
    }
    found.truncate(MAX_PHRASES);
    found
}

fn section_headings(text: &str, limit: usize) -> Vec<String> {
    let Some(heading) = patterns().heading.as_ref() else {
        return Vec::new();
    };
    text.lines()
        .filter_map(|line| heading.captures(line).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|h| !h.is_empty())
        .take(limit)
        .collect()
}

/// Computes the text a fork added to its README.
///
/// With an original, a fork line is new when no original line matches it
/// case-insensitively and its trimmed length exceeds `min_line_length`.
/// Without an original, the whole fork text is new.
pub fn new_content(original: Option<&str>, fork: &str, min_line_length: usize) -> String {
    let Some(original) = original else {
        return fork.to_string();
    };

    let known: HashSet<String> = original
        .lines()
        .map(|line| line.trim().to_lowercase())
        .collect();

    fork.lines()
        .filter(|line| {
            let trimmed = line.trim();
            trimmed.chars().count() > min_line_length && !known.contains(&trimmed.to_lowercase())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts business signals from README additions.
pub struct ReadmeDeltaExtractor<'a> {
    thresholds: &'a Thresholds,
}

impl<'a> ReadmeDeltaExtractor<'a> {
    /// Creates an extractor using the given thresholds.
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self { thresholds }
    }

    /// Analyzes the README delta between the original and the fork.
    pub fn analyze(&self, original: Option<&str>, fork: Option<&str>) -> ReadmeDelta {
        let Some(fork) = fork else {
            return ReadmeDelta::default();
        };

        let added = new_content(original, fork, self.thresholds.readme_min_line_length);
        if added.trim().chars().count() < self.thresholds.readme_min_new_content {
            return ReadmeDelta::default();
        }

        self.extract(&added)
    }

    fn extract(&self, text: &str) -> ReadmeDelta {
        let p = patterns();

        let stated_purpose = stated_purpose(text);
        let use_cases = collect_captures(&p.use_cases, text, MAX_PHRASES);
        let target_audience = p
            .audience
            .as_ref()
            .and_then(|re| re.captures(text))
            .and_then(|caps| caps.get(1))
            .map(|m| clean_phrase(m.as_str()));
        let industry_terms: Vec<Industry> = p
            .industries
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(industry, _)| *industry)
            .take(self.thresholds.max_industries)
            .collect();
        let problems_solved = collect_captures(&p.problems, text, MAX_PHRASES);
        let integrations = integration_mentions(text);
        let deployment_targets = deployment_targets(text);
        let new_sections = section_headings(text, self.thresholds.max_sections);

        let business_context = business_context(
            stated_purpose.as_deref(),
            use_cases.first().map(String::as_str),
            &industry_terms,
            problems_solved.first().map(String::as_str),
        );

        ReadmeDelta {
            stated_purpose,
            use_cases,
            target_audience,
            industry_terms,
            problems_solved,
            integrations,
            deployment_targets,
            new_sections,
            business_context,
        }
    }
}

/// Picks the business-context sentence: purpose, then use case, then
/// industries, then problem solved.
fn business_context(
    purpose: Option<&str>,
    use_case: Option<&str>,
    industries: &[Industry],
    problem: Option<&str>,
) -> Option<String> {
    if let Some(purpose) = purpose {
        return Some(format!("The fork's README states its purpose as {purpose}."));
    }
    if let Some(use_case) = use_case {
        return Some(format!("The README highlights use for {use_case}."));
    }
    if !industries.is_empty() {
        let names: Vec<String> = industries.iter().map(ToString::to_string).collect();
        let noun = if names.len() == 1 { "sector" } else { "sectors" };
        return Some(format!(
            "The README positions the fork for the {} {noun}.",
            join_readable(&names)
        ));
    }
    problem.map(|problem| format!("The README describes solving {problem}."))
}
