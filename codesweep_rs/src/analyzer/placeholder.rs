//! Placeholder-data detection.
//!
//! Flags filler tokens (foo/bar/baz, keyboard mashes, lorem ipsum, numbered
//! test identifiers) that appear inside string literals in production code.
//! Test, example, and documentation paths are exempt wholesale.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::sync::LazyLock;

use regex::Regex;

use super::lang::SourceFamily;
use super::regexes::{regex, truncate_match};
use crate::types::{Finding, Severity, SourceFile};

pub const PLACEHOLDER_KIND: &str = "dummy_data";

static PLACEHOLDER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        regex(r"(?i)\b(foo|bar|baz|qux|quux)\b"),
        regex(r"(?i)\b(test|temp|tmp|dummy|sample)\b"),
        regex(r"(?i)\b(asdf|qwer|zxcv|1234|abcd)\b"),
        regex(r"(?i)\b(aaa+|bbb+|xxx+|zzz+)\b"),
        regex(r"(?i)\btest\d+\b"),
        regex(r"(?i)\buser\d+\b"),
        regex(r"(?i)\bitem\d+\b"),
        regex(r"(?i)\bthing\d*\b"),
        regex(r"(?i)\bstuff\d*\b"),
        regex(r#"(?i)["']lorem ipsum["']"#),
    ]
});

/// Paths where filler data is expected and therefore never reported.
static EXEMPT_PATH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        regex(r"test_"),
        regex(r"_test\."),
        regex(r"spec\."),
        regex(r"\.spec\."),
        regex(r"example"),
        regex(r"sample"),
        regex(r"demo"),
        regex(r"\.md$"),
        regex(r"\.rst$"),
        regex(r"\.txt$"),
    ]
});

fn is_exempt_path(relative: &str) -> bool {
    let lower = relative.to_lowercase();
    EXEMPT_PATH_PATTERNS.iter().any(|re| re.is_match(&lower))
}

/// Quote-parity heuristic: an odd number of quote characters before the
/// match start means the match sits inside a string literal. Escaped quotes
/// and mixed nesting fool it; acceptable for a lexical pass.
fn is_inside_string(line: &str, match_start: usize) -> bool {
    let before = &line[..match_start];
    let quotes = before.matches('"').count() + before.matches('\'').count();
    quotes % 2 == 1
}

/// Scan one file for placeholder values in string literals.
pub fn detect_placeholders(content: &str, file: &SourceFile) -> Vec<Finding> {
    let mut findings = Vec::new();

    if is_exempt_path(&file.relative) {
        return findings;
    }

    let family = SourceFamily::from_extension(&file.extension());

    for (line_idx, line) in content.split('\n').enumerate() {
        if family.is_some_and(|f| f.is_comment(line)) {
            continue;
        }

        for pattern in PLACEHOLDER_PATTERNS.iter() {
            for m in pattern.find_iter(line) {
                if !is_inside_string(line, m.start()) {
                    continue;
                }
                findings.push(Finding {
                    kind: PLACEHOLDER_KIND.to_string(),
                    severity: Severity::Warning,
                    line: line_idx + 1,
                    column: m.start(),
                    matched_text: truncate_match(m.as_str()),
                    message: format!("Placeholder value '{}' used", m.as_str()),
                });
            }
        }
    }

    findings
}
