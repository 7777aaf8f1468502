//! Console rendering of a finished analysis result.

use crate::colors::Painter;

use super::result::{ProjectIssue, ProjectResult};

/// Issues shown per section before the overflow line.
const ITEM_LIMIT: usize = 5;
/// Suggestions shown at the bottom of the report.
const SUGGESTION_LIMIT: usize = 3;

fn issue_location(issue: &ProjectIssue) -> String {
    match (&issue.file, issue.line) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.clone(),
        _ => "project-wide".to_string(),
    }
}

fn push_issue_lines(out: &mut String, issues: &[ProjectIssue], painter: &Painter) {
    for issue in issues.iter().take(ITEM_LIMIT) {
        out.push_str(&format!(
            "  {} - {}\n",
            painter.path(&issue_location(issue)),
            issue.message
        ));
    }
    if issues.len() > ITEM_LIMIT {
        out.push_str(&painter.dim(&format!("  ... and {} more", issues.len() - ITEM_LIMIT)));
        out.push('\n');
    }
}

fn format_console(result: &ProjectResult, painter: &Painter) -> String {
    let mut out = String::new();
    let rule = "=".repeat(50);

    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&painter.header("📊 Analysis results"));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    out.push_str(&format!(
        "📁 Files analyzed: {}\n",
        painter.number(result.summary.total_files)
    ));
    out.push_str(&format!(
        "🔍 Total issues: {}\n",
        painter.number(result.summary.total_issues)
    ));
    out.push_str(&format!(
        "   Errors: {}   Warnings: {}\n",
        painter.error(&result.summary.error_count.to_string()),
        painter.warn(&result.summary.warning_count.to_string())
    ));
    if !result.duplicates.is_empty() {
        out.push_str(&format!(
            "📦 Duplicate groups: {}\n",
            painter.number(result.duplicates.len())
        ));
    }

    if !result.errors.is_empty() {
        out.push('\n');
        out.push_str(&painter.error("❌ Errors:"));
        out.push('\n');
        push_issue_lines(&mut out, &result.errors, painter);
    }

    if !result.warnings.is_empty() {
        out.push('\n');
        out.push_str(&painter.warn("⚠️ Warnings:"));
        out.push('\n');
        push_issue_lines(&mut out, &result.warnings, painter);
    }

    if !result.suggestions.is_empty() {
        out.push('\n');
        out.push_str(&painter.info("💡 Suggestions:"));
        out.push('\n');
        for (idx, suggestion) in result.suggestions.iter().take(SUGGESTION_LIMIT).enumerate() {
            out.push_str(&format!("  {}. {}\n", idx + 1, suggestion));
        }
    }

    if result.summary.total_issues == 0 && result.duplicates.is_empty() {
        out.push('\n');
        out.push_str(&painter.ok("✅ No issues found"));
        out.push('\n');
    }

    out
}

/// Print the console rendering of `result` to stdout.
pub fn render_console(result: &ProjectResult, painter: &Painter) {
    print!("{}", format_console(result, painter));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::result::IssueFamily;
    use crate::types::{Finding, Severity};
    use std::path::Path;

    fn plain() -> Painter {
        Painter::new(crate::types::ColorMode::Never)
    }

    fn result_with_findings(count: usize) -> ProjectResult {
        let mut result = ProjectResult::new(Path::new("/project"));
        let findings: Vec<Finding> = (1..=count)
            .map(|line| Finding {
                kind: "password".to_string(),
                severity: Severity::Error,
                line,
                column: 0,
                matched_text: "password = \"secret\"".to_string(),
                message: "Hardcoded password".to_string(),
            })
            .collect();
        result.absorb_findings("app.py", IssueFamily::Hardcoding, &findings);
        result.finalize();
        result
    }

    #[test]
    fn summary_counts_and_locations_appear() {
        let text = format_console(&result_with_findings(2), &plain());
        assert!(text.contains("Files analyzed: 0"));
        assert!(text.contains("Total issues: 2"));
        assert!(text.contains("app.py:1 - Hardcoded password"));
        assert!(text.contains("app.py:2 - Hardcoded password"));
    }

    #[test]
    fn sections_cap_at_five_with_overflow() {
        let text = format_console(&result_with_findings(7), &plain());
        assert!(text.contains("app.py:5 - Hardcoded password"));
        assert!(!text.contains("app.py:6 - Hardcoded password"));
        assert!(text.contains("... and 2 more"));
    }

    #[test]
    fn clean_run_reports_no_issues() {
        let mut result = ProjectResult::new(Path::new("/project"));
        result.finalize();
        let text = format_console(&result, &plain());
        assert!(text.contains("No issues found"));
    }
}
