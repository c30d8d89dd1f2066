//! Line-level text heuristics for counting source constructs.
//!
//! They count lines that look like declarations, not parsed definitions.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Counter names recognised by the architecture and performance factors
pub const MODERN_CONCURRENCY: &str = "modern_concurrency";
pub const DEPENDENCY_INJECTION: &str = "dependency_injection";
pub const LAZY_INITIALIZATION: &str = "lazy_initialization";
pub const CACHING: &str = "caching";

static FUNCTION_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?:public|private|internal|protected|fileprivate|open|override|static|final|async|suspend|export|inline|unsafe|const|pub(?:\([^)]*\))?)\s+)*(?:func|fun|fn|def|function)\s+([A-Za-z_]\w*)",
    )
    .expect("function declaration regex")
});

static CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?:public|private|internal|fileprivate|open|final|abstract|data|sealed|export|pub(?:\([^)]*\))?)\s+)*(?:class|struct|enum|interface|protocol|trait|object)\s+[A-Za-z_]\w*",
    )
    .expect("class declaration regex")
});

static TEST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:#\[(?:tokio::)?test\]|@Test\b|@test\b)").expect("test marker regex"));

static SECURITY_HIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:http://[^\s"'/]+|(?:password|passwd|secret|api_?key|access_?token)\s*[:=]\s*["'][^"']+["'])"#,
    )
    .expect("security pattern regex")
});

static PATTERN_COUNTERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (MODERN_CONCURRENCY, r"\b(?:async|await|actor|suspend)\b"),
        (
            DEPENDENCY_INJECTION,
            r"(?:@Inject\b|@Autowired\b|@Provides\b|@Singleton\b|\binject\()",
        ),
        (LAZY_INITIALIZATION, r"(?:\blazy\b|LazyLock|OnceCell|\blate\s+final\b)"),
        (CACHING, r"(?i)\b\w*cache\w*\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("pattern counter regex")))
    .collect()
});

/// Counts extracted from one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub lines: u64,
    pub functions: u64,
    pub classes: u64,
    pub documented_functions: u64,
    pub test_functions: u64,
    pub security_hits: u64,
    pub patterns: BTreeMap<&'static str, u64>,
}

/// Count constructs in file content (pure function)
pub fn count_source(content: &str) -> SourceCounts {
    let lines: Vec<&str> = content.lines().collect();
    let mut counts = SourceCounts {
        lines: lines.len() as u64,
        ..SourceCounts::default()
    };

    for (index, line) in lines.iter().enumerate() {
        if let Some(captures) = FUNCTION_DECL.captures(line) {
            counts.functions += 1;
            if is_documented(&lines, index) {
                counts.documented_functions += 1;
            }
            let name = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            if name.to_ascii_lowercase().starts_with("test") || has_test_marker(&lines, index) {
                counts.test_functions += 1;
            }
        } else if CLASS_DECL.is_match(line) {
            counts.classes += 1;
        }

        counts.security_hits += SECURITY_HIT.find_iter(line).count() as u64;

        for (name, regex) in PATTERN_COUNTERS.iter() {
            let hits = regex.find_iter(line).count() as u64;
            if hits > 0 {
                *counts.patterns.entry(*name).or_insert(0) += hits;
            }
        }
    }

    counts
}

// Attributes and annotations sit between a doc comment and its declaration
fn is_annotation(line: &str) -> bool {
    line.starts_with('@') || line.starts_with("#[")
}

fn preceding_lines<'a>(lines: &'a [&'a str], index: usize) -> impl Iterator<Item = &'a str> {
    lines[..index]
        .iter()
        .rev()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
}

fn is_documented(lines: &[&str], index: usize) -> bool {
    let doc_above = preceding_lines(lines, index)
        .find(|l| !is_annotation(l))
        .is_some_and(|l| l.starts_with("///") || l.starts_with("/**") || l.ends_with("*/"));

    let docstring_below = lines
        .get(index + 1)
        .map(|l| l.trim_start())
        .is_some_and(|l| l.starts_with("\"\"\"") || l.starts_with("'''"));

    doc_above || docstring_below
}

fn has_test_marker(lines: &[&str], index: usize) -> bool {
    preceding_lines(lines, index)
        .take_while(|l| is_annotation(l))
        .any(|l| TEST_MARKER.is_match(l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn counts_swift_declarations() {
        let source = indoc! {r#"
            /// Loads the profile
            @MainActor
            public func loadProfile() async throws {
                let url = "http://api.example.com/profile"
            }

            final class ProfileStore {
                func testHelper() {}
            }
        "#};
        let counts = count_source(source);
        assert_eq!(counts.functions, 2);
        assert_eq!(counts.classes, 1);
        assert_eq!(counts.documented_functions, 1);
        assert_eq!(counts.test_functions, 1);
        assert_eq!(counts.security_hits, 1);
        assert_eq!(counts.patterns.get(MODERN_CONCURRENCY), Some(&1));
    }

    #[test]
    fn counts_rust_tests_and_python_docstrings() {
        let source = indoc! {r#"
            #[test]
            fn parses_header() {}

            def load():
                """Load settings."""
                password = "hunter2"
        "#};
        let counts = count_source(source);
        assert_eq!(counts.functions, 2);
        assert_eq!(counts.test_functions, 1);
        assert_eq!(counts.documented_functions, 1);
        assert_eq!(counts.security_hits, 1);
    }

    #[test]
    fn empty_content_counts_nothing() {
        assert_eq!(count_source(""), SourceCounts::default());
    }
}
