//! Structural signal extraction from added patch lines.
//!
//! Detection is line-level: each added line is matched against per-language
//! declaration templates. Removed lines are never examined.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::config::Thresholds;
use crate::data::{
    Declaration, EnhancedFunction, EnvironmentAdjustment, EnvironmentKind, FileChange, FileStatus,
    SignalSet,
};

/// Source extensions treated as code.
const CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".mjs", ".cjs", ".ts", ".tsx", ".java", ".cs", ".go", ".rs", ".rb",
    ".php", ".kt", ".kts", ".swift", ".scala", ".c", ".h", ".cpp", ".cc", ".cxx", ".hpp", ".sh",
    ".bash", ".m", ".dart", ".lua", ".pl", ".r", ".ex", ".exs",
];

/// Structured-data extensions treated as configuration.
const CONFIG_EXTENSIONS: &[&str] = &[
    ".json",
    ".yaml",
    ".yml",
    ".toml",
    ".ini",
    ".cfg",
    ".conf",
    ".env",
    ".properties",
    ".xml",
];

/// Path substrings that mark a file as configuration.
const CONFIG_PATH_KEYWORDS: &[&str] = &["config", ".env", "settings"];

/// Identifiers that function templates can capture from control statements.
const RESERVED_NAMES: &[&str] = &[
    "if", "else", "elif", "for", "while", "switch", "catch", "return", "new", "sizeof", "typeof",
    "delete", "do", "try",
];

/// Control-flow, exception, async and collection-operation tokens.
const LOGIC_PATTERN: &str = r"\b(?:if|else|elif|for|foreach|while|switch|case|match|return|try|catch|except|finally|raise|throw|throws|async|await|yield)\b|&&|\|\||\s(?:and|or|not)\s|\.(?:map|filter|reduce|forEach|flatMap|collect|fold|find|some|every)\(";

/// Comment prefixes ignored when counting substantive deployment lines.
const COMMENT_PREFIXES: &[&str] = &["#", "//", "/*", "*", "--", "<!--"];

const JAVA_LIKE_FUNCTIONS: &[&str] = &[
    r"^\s*(?:(?:public|private|protected|internal|static|final|abstract|synchronized|override|virtual|async)\s+)+[\w<>\[\],.?]+\s+([A-Za-z_]\w*)\s*\(",
];

const JAVA_LIKE_CLASSES: &[&str] = &[
    r"^\s*(?:(?:public|private|protected|internal|abstract|final|static|sealed|partial)\s+)*(?:class|interface|enum|record|struct)\s+([A-Za-z_]\w*)",
];

const JS_FUNCTIONS: &[&str] = &[
    r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)\s*\(",
    r"^\s*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)",
];

/// Declaration templates for one language.
struct LanguageTemplate {
    language: &'static str,
    extensions: &'static [&'static str],
    functions: &'static [&'static str],
    classes: &'static [&'static str],
}

const LANGUAGE_TEMPLATES: &[LanguageTemplate] = &[
    LanguageTemplate {
        language: "python",
        extensions: &[".py"],
        functions: &[r"^\s*(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\("],
        classes: &[r"^\s*class\s+([A-Za-z_]\w*)\s*[(:]"],
    },
    LanguageTemplate {
        language: "javascript",
        extensions: &[".js", ".jsx", ".mjs", ".cjs"],
        functions: JS_FUNCTIONS,
        classes: &[r"^\s*(?:export\s+)?(?:default\s+)?class\s+([A-Za-z_$][\w$]*)"],
    },
    LanguageTemplate {
        language: "typescript",
        extensions: &[".ts", ".tsx"],
        functions: &[
            r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)\s*[<(]",
            r"^\s*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*(?::[^=]+)?=>|[A-Za-z_$][\w$]*\s*=>)",
            r"^\s*(?:(?:public|private|protected|static|async|readonly)\s+)+([A-Za-z_$][\w$]*)\s*\(",
        ],
        classes: &[
            r"^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)",
            r"^\s*(?:export\s+)?(?:interface|enum)\s+([A-Za-z_$][\w$]*)",
        ],
    },
    LanguageTemplate {
        language: "java",
        extensions: &[".java"],
        functions: JAVA_LIKE_FUNCTIONS,
        classes: JAVA_LIKE_CLASSES,
    },
    LanguageTemplate {
        language: "csharp",
        extensions: &[".cs"],
        functions: JAVA_LIKE_FUNCTIONS,
        classes: JAVA_LIKE_CLASSES,
    },
    LanguageTemplate {
        language: "go",
        extensions: &[".go"],
        functions: &[r"^\s*func\s+(?:\([^)]*\)\s*)?([A-Za-z_]\w*)\s*[\[(]"],
        classes: &[r"^\s*type\s+([A-Za-z_]\w*)\s+(?:struct|interface)\b"],
    },
    LanguageTemplate {
        language: "rust",
        extensions: &[".rs"],
        functions: &[
            r#"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+"[^"]*"\s+)?fn\s+([A-Za-z_]\w*)"#,
        ],
        classes: &[r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:struct|enum|trait|union)\s+([A-Za-z_]\w*)"],
    },
    LanguageTemplate {
        language: "ruby",
        extensions: &[".rb"],
        functions: &[r"^\s*def\s+(?:self\.)?([A-Za-z_]\w*[?!=]?)"],
        classes: &[r"^\s*(?:class|module)\s+([A-Z]\w*)"],
    },
    LanguageTemplate {
        language: "php",
        extensions: &[".php"],
        functions: &[
            r"^\s*(?:(?:public|private|protected|static|final|abstract)\s+)*function\s+&?([A-Za-z_]\w*)\s*\(",
        ],
        classes: &[r"^\s*(?:(?:abstract|final)\s+)?(?:class|interface|trait)\s+([A-Za-z_]\w*)"],
    },
    LanguageTemplate {
        language: "kotlin",
        extensions: &[".kt", ".kts"],
        functions: &[
            r"^\s*(?:(?:public|private|protected|internal|override|suspend|inline|open|operator)\s+)*fun\s+(?:<[^>]*>\s*)?(?:[\w.]+\.)?([A-Za-z_]\w*)\s*\(",
        ],
        classes: &[
            r"^\s*(?:(?:public|private|protected|internal|open|abstract|sealed|data|enum|inner)\s+)*(?:class|interface|object)\s+([A-Za-z_]\w*)",
        ],
    },
    LanguageTemplate {
        language: "swift",
        extensions: &[".swift"],
        functions: &[
            r"^\s*(?:(?:public|private|internal|fileprivate|open|static|override|mutating|@\w+)\s+)*func\s+([A-Za-z_]\w*)",
        ],
        classes: &[
            r"^\s*(?:(?:public|private|internal|fileprivate|open|final)\s+)*(?:class|struct|protocol|enum|actor)\s+([A-Za-z_]\w*)",
        ],
    },
    LanguageTemplate {
        language: "scala",
        extensions: &[".scala"],
        functions: &[r"^\s*(?:(?:private|protected|override|final|implicit)\s+)*def\s+([A-Za-z_]\w*)"],
        classes: &[r"^\s*(?:(?:case|abstract|final|sealed)\s+)*(?:class|trait|object)\s+([A-Za-z_]\w*)"],
    },
    LanguageTemplate {
        language: "c/c++",
        extensions: &[".c", ".h", ".cpp", ".cc", ".cxx", ".hpp"],
        functions: &[
            r"^(?:(?:static|inline|extern|virtual|const|unsigned|signed)\s+)*[A-Za-z_][\w:<>]*[\s*&]+([A-Za-z_]\w*)\s*\([^;]*\)\s*(?:const\s*)?\{?\s*$",
        ],
        classes: &[
            r"^\s*(?:template\s*<[^>]*>\s*)?(?:class|struct)\s+([A-Za-z_]\w*)\s*(?:final\s*)?(?:[:{]|$)",
        ],
    },
    LanguageTemplate {
        language: "shell",
        extensions: &[".sh", ".bash"],
        functions: &[
            r"^\s*function\s+([A-Za-z_][\w-]*)",
            r"^\s*([A-Za-z_][\w-]*)\s*\(\)\s*\{?",
        ],
        classes: &[],
    },
];

/// A language template with its patterns compiled.
struct CompiledTemplate {
    language: &'static str,
    extensions: &'static [&'static str],
    functions: Vec<Regex>,
    classes: Vec<Regex>,
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| Regex::new(p).ok()).collect()
}

fn compiled_templates() -> &'static [CompiledTemplate] {
    static TEMPLATES: OnceLock<Vec<CompiledTemplate>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        LANGUAGE_TEMPLATES
            .iter()
            .map(|t| CompiledTemplate {
                language: t.language,
                extensions: t.extensions,
                functions: compile_all(t.functions),
                classes: compile_all(t.classes),
            })
            .collect()
    })
}

fn logic_regex() -> Option<&'static Regex> {
    static LOGIC: OnceLock<Option<Regex>> = OnceLock::new();
    LOGIC.get_or_init(|| Regex::new(LOGIC_PATTERN).ok()).as_ref()
}

/// Returns the first non-reserved identifier captured by any of `patterns`.
fn first_declaration<'l>(patterns: &[Regex], line: &'l str) -> Option<&'l str> {
    patterns.iter().find_map(|re| {
        re.captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|name| !RESERVED_NAMES.contains(name))
    })
}

/// How a changed file participates in signal extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Source code.
    Code,
    /// Structured data or settings.
    Configuration,
    /// Neither; only deployment checks apply.
    Other,
}

/// Classifies a path on the code-versus-configuration axis.
pub fn file_kind(filename: &str, extension: Option<&str>) -> FileKind {
    if extension.is_some_and(|ext| CODE_EXTENSIONS.contains(&ext)) {
        return FileKind::Code;
    }
    let lower = filename.to_lowercase();
    if extension.is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext))
        || CONFIG_PATH_KEYWORDS.iter().any(|k| lower.contains(k))
    {
        return FileKind::Configuration;
    }
    FileKind::Other
}

/// Returns the deployment artifact kind of a path, if it is one.
pub fn environment_kind(filename: &str, extension: Option<&str>) -> Option<EnvironmentKind> {
    let lower = filename.to_lowercase();
    if lower.contains("docker") {
        Some(EnvironmentKind::Docker)
    } else if lower.contains("kubernetes") || lower.contains("k8s") {
        Some(EnvironmentKind::Kubernetes)
    } else if matches!(extension, Some(".yaml" | ".yml")) {
        Some(EnvironmentKind::Yaml)
    } else {
        None
    }
}

fn is_substantive_line(line: &str, min_length: usize) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() > min_length && !COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

/// Extracts structural signals from comparison files.
pub struct SignalExtractor<'a> {
    thresholds: &'a Thresholds,
}

impl<'a> SignalExtractor<'a> {
    /// Creates an extractor using the given thresholds.
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self { thresholds }
    }

    /// Extracts signals from every file, in input order.
    pub fn extract(&self, files: &[FileChange]) -> SignalSet {
        let mut signals = SignalSet::default();
        for file in files {
            self.extract_file(file, &mut signals);
        }
        debug!(
            functions = signals.new_functions_detected.len(),
            classes = signals.new_classes_detected.len(),
            enhanced = signals.enhanced_functions.len(),
            environment = signals.environment_adjustments.len(),
            "Extracted patch signals"
        );
        signals
    }

    fn extract_file(&self, file: &FileChange, signals: &mut SignalSet) {
        let extension = file.extension();
        let kind = file_kind(&file.filename, extension.as_deref());
        let environment = environment_kind(&file.filename, extension.as_deref());

        if kind == FileKind::Other && environment.is_none() {
            return;
        }

        match kind {
            FileKind::Code => {
                signals.code_additions_count =
                    signals.code_additions_count.saturating_add(file.additions);
            }
            FileKind::Configuration => {
                signals.config_additions_count =
                    signals.config_additions_count.saturating_add(file.additions);
                signals.config_only_changes.push(file.filename.clone());
            }
            FileKind::Other => {}
        }

        if kind == FileKind::Code {
            self.detect_declarations(file, extension.as_deref(), signals);
            self.detect_enhancement(file, signals);
        }

        if let Some(env_kind) = environment {
            self.detect_environment_adjustment(file, env_kind, signals);
        }
    }

    fn detect_declarations(&self, file: &FileChange, extension: Option<&str>, signals: &mut SignalSet) {
        let Some(ext) = extension else {
            return;
        };
        let templates: Vec<&CompiledTemplate> = compiled_templates()
            .iter()
            .filter(|t| t.extensions.contains(&ext))
            .collect();
        if templates.is_empty() {
            return;
        }

        for line in file.added_lines() {
            if let Some((name, language)) = templates
                .iter()
                .find_map(|t| first_declaration(&t.functions, line).map(|n| (n, t.language)))
            {
                signals
                    .meaningfulness_signals
                    .push(format!("New function '{name}' in {} ({language})", file.filename));
                signals.new_functions_detected.push(Declaration {
                    file: file.filename.clone(),
                    declaration_name: name.to_string(),
                    language_hint: language.to_string(),
                });
            }

            if let Some((name, language)) = templates
                .iter()
                .find_map(|t| first_declaration(&t.classes, line).map(|n| (n, t.language)))
            {
                signals
                    .meaningfulness_signals
                    .push(format!("New class '{name}' in {} ({language})", file.filename));
                signals.new_classes_detected.push(Declaration {
                    file: file.filename.clone(),
                    declaration_name: name.to_string(),
                    language_hint: language.to_string(),
                });
            }
        }
    }

    fn detect_enhancement(&self, file: &FileChange, signals: &mut SignalSet) {
        if file.status != FileStatus::Modified
            || file.additions <= self.thresholds.enhanced_min_additions
        {
            return;
        }
        let Some(logic) = logic_regex() else {
            return;
        };
        if file.added_lines().any(|line| logic.is_match(line)) {
            signals.meaningfulness_signals.push(format!(
                "Enhanced logic in {} (+{} lines)",
                file.filename, file.additions
            ));
            signals.enhanced_functions.push(EnhancedFunction {
                file: file.filename.clone(),
                additions: file.additions,
            });
        }
    }

    fn detect_environment_adjustment(
        &self,
        file: &FileChange,
        kind: EnvironmentKind,
        signals: &mut SignalSet,
    ) {
        if file.additions <= self.thresholds.environment_min_additions {
            return;
        }
        let substantive = file
            .added_lines()
            .filter(|line| is_substantive_line(line, self.thresholds.environment_min_line_length))
            .count();
        if substantive >= self.thresholds.environment_min_lines {
            signals.meaningfulness_signals.push(format!(
                "Environment adjustment in {} ({kind}, +{} lines)",
                file.filename, file.additions
            ));
            signals.environment_adjustments.push(EnvironmentAdjustment {
                file: file.filename.clone(),
                kind,
                additions: file.additions,
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn extract(files: &[FileChange]) -> SignalSet {
        let thresholds = Thresholds::default();
        SignalExtractor::new(&thresholds).extract(files)
    }

    fn patch_of(lines: &[&str]) -> String {
        let mut patch = format!("@@ -1,0 +1,{} @@\n", lines.len());
        for line in lines {
            patch.push('+');
            patch.push_str(line);
            patch.push('\n');
        }
        patch
    }

    fn added(name: &str, lines: &[&str]) -> FileChange {
        FileChange::new(name, FileStatus::Added, lines.len() as u64, 0).with_patch(patch_of(lines))
    }

    fn names(decls: &[Declaration]) -> Vec<&str> {
        decls.iter().map(|d| d.declaration_name.as_str()).collect()
    }

    // ── templates ──────────────────────────────────────────────────

    #[test]
    fn all_templates_compile() {
        for template in LANGUAGE_TEMPLATES {
            for pattern in template.functions.iter().chain(template.classes) {
                assert!(Regex::new(pattern).is_ok(), "bad pattern: {pattern}");
            }
        }
        assert!(Regex::new(LOGIC_PATTERN).is_ok());
    }

    #[test]
    fn python_function_and_class() {
        let signals = extract(&[added(
            "app/service.py",
            &["class Worker(Base):", "    async def run(self):", "    x = 1"],
        )]);
        assert_eq!(names(&signals.new_functions_detected), vec!["run"]);
        assert_eq!(names(&signals.new_classes_detected), vec!["Worker"]);
        assert_eq!(signals.new_functions_detected[0].language_hint, "python");
    }

    #[test]
    fn javascript_declarations() {
        let signals = extract(&[added(
            "src/index.js",
            &[
                "export async function loadUser(id) {",
                "const toSlug = (s) => s.toLowerCase();",
                "export default class Store {",
            ],
        )]);
        assert_eq!(names(&signals.new_functions_detected), vec!["loadUser", "toSlug"]);
        assert_eq!(names(&signals.new_classes_detected), vec!["Store"]);
    }

    #[test]
    fn rust_go_java_declarations() {
        let signals = extract(&[
            added("src/lib.rs", &["pub async fn fetch() -> u8 {", "pub struct Cache {"]),
            added("main.go", &["func (s *Server) Start() error {", "type Server struct {"]),
            added(
                "App.java",
                &["public static void main(String[] args) {", "public class App {"],
            ),
        ]);
        assert_eq!(
            names(&signals.new_functions_detected),
            vec!["fetch", "Start", "main"]
        );
        assert_eq!(
            names(&signals.new_classes_detected),
            vec!["Cache", "Server", "App"]
        );
        let hints: Vec<&str> = signals
            .new_functions_detected
            .iter()
            .map(|d| d.language_hint.as_str())
            .collect();
        assert_eq!(hints, vec!["rust", "go", "java"]);
    }

    #[test]
    fn c_control_statements_are_not_functions() {
        let signals = extract(&[added(
            "src/io.c",
            &["static int read_block(int fd) {", "} else if (fd < 0) {"],
        )]);
        assert_eq!(names(&signals.new_functions_detected), vec!["read_block"]);
    }

    #[test]
    fn removed_lines_are_ignored() {
        let file = FileChange::new("a.py", FileStatus::Modified, 0, 1)
            .with_patch("@@ -1,1 +0,0 @@\n-def gone():\n");
        let signals = extract(&[file]);
        assert!(signals.new_functions_detected.is_empty());
    }

    #[test]
    fn templates_only_apply_to_their_language() {
        let signals = extract(&[added("script.rb", &["function notRuby() {"])]);
        assert!(signals.new_functions_detected.is_empty());
    }

    // ── code / configuration axis ───────────────────────────────────

    #[test]
    fn file_kind_axis() {
        assert_eq!(file_kind("src/config.py", Some(".py")), FileKind::Code);
        assert_eq!(file_kind("deploy.yaml", Some(".yaml")), FileKind::Configuration);
        assert_eq!(file_kind(".env", None), FileKind::Configuration);
        assert_eq!(file_kind("app/settings/base", None), FileKind::Configuration);
        assert_eq!(file_kind("logo.png", Some(".png")), FileKind::Other);
    }

    #[test]
    fn additions_counted_from_field() {
        let signals = extract(&[
            FileChange::new("a.py", FileStatus::Modified, 30, 2),
            FileChange::new("b.toml", FileStatus::Modified, 7, 0),
            FileChange::new("c.png", FileStatus::Added, 0, 0),
        ]);
        assert_eq!(signals.code_additions_count, 30);
        assert_eq!(signals.config_additions_count, 7);
        assert_eq!(signals.config_only_changes, vec!["b.toml"]);
    }

    // ── enhanced functions ──────────────────────────────────────────

    #[test]
    fn addition_totals_saturate() {
        let signals = extract(&[
            FileChange::new("a.py", FileStatus::Modified, u64::MAX, 0),
            FileChange::new("b.py", FileStatus::Modified, 1, 0),
            FileChange::new("a.json", FileStatus::Modified, u64::MAX, 0),
            FileChange::new("b.json", FileStatus::Modified, 7, 0),
        ]);
        assert_eq!(signals.code_additions_count, u64::MAX);
        assert_eq!(signals.config_additions_count, u64::MAX);
    }

    #[test]
    fn modified_file_with_logic_is_enhanced() {
        let file = FileChange::new("src/rules.py", FileStatus::Modified, 11, 0)
            .with_patch(patch_of(&["    if user.is_admin:", "        return True"]));
        let signals = extract(&[file]);
        assert_eq!(signals.enhanced_functions.len(), 1);
        assert_eq!(signals.enhanced_functions[0].additions, 11);
    }

    #[test]
    fn enhancement_requires_more_than_ten_additions() {
        let file = FileChange::new("src/rules.py", FileStatus::Modified, 10, 0)
            .with_patch(patch_of(&["    if x:"]));
        assert!(extract(&[file]).enhanced_functions.is_empty());
    }

    #[test]
    fn added_files_are_not_enhanced() {
        let file = FileChange::new("src/rules.py", FileStatus::Added, 20, 0)
            .with_patch(patch_of(&["    if x:"]));
        assert!(extract(&[file]).enhanced_functions.is_empty());
    }

    // ── environment adjustments ─────────────────────────────────────

    #[test]
    fn dockerfile_adjustment() {
        let file = FileChange::new("Dockerfile", FileStatus::Modified, 6, 0).with_patch(patch_of(&[
            "FROM python:3.12-slim AS runtime",
            "# install the runtime dependencies only",
            "RUN pip install --no-cache-dir -r requirements.txt",
            "COPY ./service /opt/service/app",
            "ENV SERVICE_MODE=production-cluster",
            "EXPOSE 8080",
        ]));
        let signals = extract(&[file]);
        assert_eq!(signals.environment_adjustments.len(), 1);
        assert_eq!(signals.environment_adjustments[0].kind, EnvironmentKind::Docker);
        assert_eq!(signals.code_additions_count, 0);
        assert!(signals.config_only_changes.is_empty());
    }

    #[test]
    fn short_yaml_edit_is_not_an_adjustment() {
        let file = FileChange::new("k8s/deploy.yaml", FileStatus::Modified, 6, 0)
            .with_patch(patch_of(&["replicas: 3", "image: app:v2"]));
        let signals = extract(&[file]);
        assert!(signals.environment_adjustments.is_empty());
        assert_eq!(signals.config_only_changes, vec!["k8s/deploy.yaml"]);
    }

    #[test]
    fn kind_precedence() {
        assert_eq!(
            environment_kind("docker-compose.yml", Some(".yml")),
            Some(EnvironmentKind::Docker)
        );
        assert_eq!(
            environment_kind("k8s/service.yaml", Some(".yaml")),
            Some(EnvironmentKind::Kubernetes)
        );
        assert_eq!(
            environment_kind(".github/workflows/ci.yml", Some(".yml")),
            Some(EnvironmentKind::Yaml)
        );
        assert_eq!(environment_kind("src/main.rs", Some(".rs")), None);
    }

    // ── audit trail ─────────────────────────────────────────────────

    #[test]
    fn audit_trail_follows_match_order() {
        let signals = extract(&[added("m.py", &["def a():", "def b():"])]);
        assert_eq!(
            signals.meaningfulness_signals,
            vec![
                "New function 'a' in m.py (python)".to_string(),
                "New function 'b' in m.py (python)".to_string(),
            ]
        );
    }

    #[test]
    fn empty_input_is_zero_valued() {
        assert_eq!(extract(&[]), SignalSet::default());
    }

    // ── property tests ────────────────────────────────────────────

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extraction_deterministic(body in "[ -~\n]{0,200}") {
                let file = FileChange::new("x.py", FileStatus::Modified, 20, 0).with_patch(body);
                let a = extract(std::slice::from_ref(&file));
                let b = extract(std::slice::from_ref(&file));
                prop_assert_eq!(a, b);
            }

            #[test]
            fn python_def_always_detected(name in "[a-z_][a-z0-9_]{0,15}") {
                prop_assume!(!RESERVED_NAMES.contains(&name.as_str()));
                let line = format!("def {name}(self):");
                let signals = extract(&[added("p.py", &[line.as_str()])]);
                prop_assert_eq!(signals.new_functions_detected.len(), 1);
                prop_assert_eq!(&signals.new_functions_detected[0].declaration_name, &name);
            }
        }
    }
}
