use std::fs;
use std::io;
use std::path::Path;

use super::duplicates::DuplicateGroup;
use super::result::{ProjectIssue, ProjectResult};

/// Issue entries rendered per section before the overflow line.
const SECTION_LIMIT: usize = 20;

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn issue_location(issue: &ProjectIssue) -> String {
    match (&issue.file, issue.line) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.clone(),
        _ => "project-wide".to_string(),
    }
}

fn member_location(member: &super::duplicates::DuplicateMember) -> String {
    match (member.start_line, member.end_line) {
        (Some(start), Some(end)) => format!("{}:{}-{}", member.file, start, end),
        _ => member.file.clone(),
    }
}

fn render_summary_cards(out: &mut String, result: &ProjectResult) {
    let cards = [
        ("Files analyzed", result.summary.total_files),
        ("Errors", result.summary.error_count),
        ("Warnings", result.summary.warning_count),
        ("Total issues", result.summary.total_issues),
    ];
    out.push_str("<div class=\"cards\">");
    for (label, value) in cards {
        out.push_str(&format!(
            "<div class=\"card\"><div class=\"value\">{}</div><div class=\"label\">{}</div></div>",
            value, label
        ));
    }
    out.push_str("</div>");
}

fn render_issue_chart(out: &mut String, result: &ProjectResult) {
    if result.summary.issue_types.is_empty() {
        return;
    }
    let mut entries: Vec<(&String, usize)> = result
        .summary
        .issue_types
        .iter()
        .map(|(kind, count)| (kind, *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let max = entries.first().map(|(_, count)| *count).unwrap_or(1).max(1);

    out.push_str("<h2>Issues by type</h2><div class=\"chart\">");
    for (kind, count) in entries {
        let percent = count * 100 / max;
        out.push_str(&format!(
            "<div class=\"chart-row\"><span class=\"chart-label\">{}</span>\
             <div class=\"chart-track\"><div class=\"chart-bar\" style=\"width:{}%\"></div></div>\
             <span class=\"chart-count\">{}</span></div>",
            escape_html(kind),
            percent,
            count
        ));
    }
    out.push_str("</div>");
}

fn render_issue_section(out: &mut String, title: &str, class: &str, issues: &[ProjectIssue]) {
    if issues.is_empty() {
        return;
    }
    out.push_str(&format!("<h2>{} ({})</h2>", title, issues.len()));
    for issue in issues.iter().take(SECTION_LIMIT) {
        out.push_str(&format!(
            "<div class=\"issue {}\"><span class=\"location\">{}</span> {}</div>",
            class,
            escape_html(&issue_location(issue)),
            escape_html(&issue.message)
        ));
    }
    if issues.len() > SECTION_LIMIT {
        out.push_str(&format!(
            "<p class=\"muted\">... and {} more</p>",
            issues.len() - SECTION_LIMIT
        ));
    }
}

fn render_duplicates(out: &mut String, groups: &[DuplicateGroup]) {
    if groups.is_empty() {
        return;
    }
    out.push_str(&format!("<h2>📦 Duplicate code ({})</h2>", groups.len()));
    for group in groups {
        let members: Vec<String> = group
            .members
            .iter()
            .map(|m| format!("<code>{}</code>", escape_html(&member_location(m))))
            .collect();
        out.push_str(&format!(
            "<div class=\"issue duplicate\">{}<br/>{}</div>",
            escape_html(&group.message),
            members.join(", ")
        ));
    }
}

fn render_suggestions(out: &mut String, suggestions: &[String]) {
    if suggestions.is_empty() {
        return;
    }
    out.push_str("<h2>💡 Suggestions</h2><ul class=\"suggestions\">");
    for suggestion in suggestions {
        out.push_str(&format!("<li>{}</li>", escape_html(suggestion)));
    }
    out.push_str("</ul>");
}

/// Write `result` as a self-contained HTML document at `path`. Parent
/// directories are created on demand.
pub fn render_html_report(path: &Path, result: &ProjectResult) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::new();
    out.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8" />
<title>codesweep report</title>
<style>
body{font-family:system-ui,-apple-system,Segoe UI,Helvetica,Arial,sans-serif;margin:0;background:#f4f5f7;color:#2b2f3a;line-height:1.5;}
.header{background:linear-gradient(135deg,#667eea 0%,#764ba2 100%);color:#fff;padding:28px 32px;}
.header h1{margin:0 0 4px 0;font-size:24px;}
.header .muted{color:rgba(255,255,255,0.85);font-size:13px;}
.container{max-width:960px;margin:0 auto;padding:20px 32px 48px;}
h2{margin:1.4em 0 0.5em;font-size:18px;}
.cards{display:grid;grid-template-columns:repeat(4,1fr);gap:14px;margin-top:20px;}
.card{background:#fff;border-radius:10px;padding:14px 16px;box-shadow:0 1px 3px rgba(0,0,0,0.08);}
.card .value{font-size:26px;font-weight:700;}
.card .label{font-size:12px;color:#666;text-transform:uppercase;letter-spacing:0.04em;}
.chart-row{display:flex;align-items:center;gap:10px;margin:4px 0;}
.chart-label{width:120px;font-size:13px;color:#444;}
.chart-track{flex:1;background:#e6e8ee;border-radius:6px;height:14px;}
.chart-bar{background:#667eea;height:14px;border-radius:6px;}
.chart-count{width:40px;text-align:right;font-size:13px;}
.issue{background:#fff;border-radius:8px;padding:8px 12px;margin:6px 0;font-size:14px;box-shadow:0 1px 2px rgba(0,0,0,0.06);}
.issue.error{border-left:4px solid #e74c3c;}
.issue.warning{border-left:4px solid #f39c12;}
.issue.duplicate{border-left:4px solid #8e7cc3;}
.issue .location{font-family:ui-monospace,SFMono-Regular,Menlo,monospace;font-size:12px;color:#555;margin-right:6px;}
code{background:#f6f8fa;padding:2px 4px;border-radius:4px;font-size:12px;}
.suggestions li{margin:4px 0;}
.muted{color:#666;font-size:13px;}
</style>
</head><body>
"#,
    );

    out.push_str(&format!(
        "<div class=\"header\"><h1>codesweep report</h1><div class=\"muted\">{} · generated {}</div></div>",
        escape_html(&result.project_path),
        escape_html(&result.generated_at)
    ));
    out.push_str("<div class=\"container\">");

    render_summary_cards(&mut out, result);
    render_issue_chart(&mut out, result);
    render_issue_section(&mut out, "🚨 Errors", "error", &result.errors);
    render_issue_section(&mut out, "⚠️ Warnings", "warning", &result.warnings);
    render_duplicates(&mut out, &result.duplicates);
    render_suggestions(&mut out, &result.suggestions);
    if result.summary.total_issues == 0 && result.duplicates.is_empty() {
        out.push_str("<p class=\"muted\">No issues found. Nice and tidy.</p>");
    }

    out.push_str("</div></body></html>");
    fs::write(path, out)
}
