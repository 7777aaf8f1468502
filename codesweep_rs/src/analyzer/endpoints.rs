//! Outbound network-call extraction and cross-file correlation.
//!
//! Per-file extraction matches known client-call idioms line by line and
//! probes a small window around each call for error handling. Correlation
//! runs once over all files: endpoint fan-out plus unguarded-call warnings.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::lang::SourceFamily;
use super::regexes::regex;
use crate::types::SourceFile;

/// Extraction is limited to the extensions the idiom tables cover.
const ELIGIBLE_EXTENSIONS: [&str; 3] = [".py", ".js", ".ts"];

static PYTHON_IDIOMS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("requests", regex(r"requests\.(get|post|put|delete|patch)\s*\(")),
        ("requests", regex(r"urllib\.request\.urlopen\s*\(")),
        ("requests", regex(r"http\.client\.HTTPConnection\s*\(")),
        ("async", regex(r"aiohttp\.(get|post|put|delete|patch)\s*\(")),
        ("async", regex(r"httpx\.(get|post|put|delete|patch)\s*\(")),
    ]
});

static JS_IDIOMS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("fetch", regex(r"fetch\s*\(")),
        ("fetch", regex(r"axios\.(get|post|put|delete|patch)\s*\(")),
        ("fetch", regex(r"\$\.ajax\s*\(")),
        ("node", regex(r"http\.request\s*\(")),
        ("node", regex(r"https\.request\s*\(")),
    ]
});

/// Quoted path literal starting with `/`, e.g. `"/api/users"`.
static ENDPOINT_RE: LazyLock<Regex> = LazyLock::new(|| regex(r#"["'](/[\w/\-{}:]+)["']"#));

/// Quoted absolute URL literal.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| regex(r#"["']https?://[^"']+["']"#));

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallSite {
    pub line: usize,
    pub idiom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub has_error_handling: bool,
}

/// Everything extracted from one file. `endpoints` keeps one entry per
/// matching occurrence; correlation reduces to distinct files later.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndpointReport {
    pub language: String,
    pub endpoints: Vec<String>,
    pub calls: Vec<CallSite>,
}

/// A cross-file issue from the correlation pass. Fan-out issues carry the
/// contributing file list and no single location; unguarded-call issues
/// carry a file and line.
#[derive(Clone, Debug)]
pub struct FlowIssue {
    pub file: Option<String>,
    pub line: Option<usize>,
    pub message: String,
    pub files: Vec<String>,
}

pub fn is_eligible(file: &SourceFile) -> bool {
    ELIGIBLE_EXTENSIONS.contains(&file.extension().as_str())
}

/// Scan one file for outbound-call sites. Returns `None` when the file is
/// not eligible or contains no calls.
pub fn extract(content: &str, file: &SourceFile) -> Option<EndpointReport> {
    if !is_eligible(file) {
        return None;
    }
    let family = SourceFamily::from_extension(&file.extension())?;
    let idioms: &[(&'static str, Regex)] = match family {
        SourceFamily::Python => &PYTHON_IDIOMS,
        SourceFamily::JavaScript => &JS_IDIOMS,
        _ => return None,
    };

    let lines: Vec<&str> = content.lines().collect();
    let mut report = EndpointReport {
        language: family.as_str().to_string(),
        endpoints: Vec::new(),
        calls: Vec::new(),
    };

    for (line_idx, line) in lines.iter().enumerate() {
        let line_num = line_idx + 1;
        for (idiom, pattern) in idioms.iter() {
            if !pattern.is_match(line) {
                continue;
            }
            let endpoint = ENDPOINT_RE.captures(line).map(|caps| caps[1].to_string());
            let url = URL_RE.find(line).map(|m| {
                m.as_str()
                    .trim_matches(|c| c == '"' || c == '\'')
                    .to_string()
            });
            let has_error_handling = match family {
                SourceFamily::Python => python_call_is_guarded(&lines, line_num),
                _ => js_call_is_guarded(&lines, line_num),
            };

            if let Some(endpoint) = &endpoint {
                report.endpoints.push(endpoint.clone());
            }
            report.calls.push(CallSite {
                line: line_num,
                idiom: (*idiom).to_string(),
                method: extract_method(line),
                endpoint,
                url,
                has_error_handling,
            });
        }
    }

    if report.calls.is_empty() { None } else { Some(report) }
}

/// Project-wide pass over every extracted report.
pub fn correlate(reports: &BTreeMap<String, EndpointReport>) -> Vec<FlowIssue> {
    let mut issues = Vec::new();

    let mut endpoint_files: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (path, report) in reports {
        for endpoint in &report.endpoints {
            endpoint_files
                .entry(endpoint.as_str())
                .or_default()
                .insert(path.as_str());
        }
    }
    for (endpoint, files) in &endpoint_files {
        if files.len() > 3 {
            issues.push(FlowIssue {
                file: None,
                line: None,
                message: format!("Endpoint '{}' is called from {} files", endpoint, files.len()),
                files: files.iter().map(|f| (*f).to_string()).collect(),
            });
        }
    }

    for (path, report) in reports {
        for call in &report.calls {
            if !call.has_error_handling {
                issues.push(FlowIssue {
                    file: Some(path.clone()),
                    line: Some(call.line),
                    message: "API call without error handling".to_string(),
                    files: Vec::new(),
                });
            }
        }
    }

    issues
}

fn extract_method(line: &str) -> Option<String> {
    let lowered = line.to_lowercase();
    ["get", "post", "put", "delete", "patch", "head", "options"]
        .iter()
        .find(|method| lowered.contains(*method))
        .map(|method| method.to_uppercase())
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Windowed try/except probe. Scans up to 18 lines above the call for a
/// `try:` opener and up to 10 lines below for an `except` arm, stopping
/// either direction at the first non-blank line indented shallower than
/// the call.
fn python_call_is_guarded(lines: &[&str], line_num: usize) -> bool {
    let call_indent = indent_of(lines[line_num - 1]);

    let floor = line_num.saturating_sub(18).max(1);
    for n in (floor..line_num).rev() {
        let line = lines[n - 1];
        if line.trim_start().starts_with("try:") {
            return true;
        }
        if !line.trim().is_empty() && indent_of(line) < call_indent {
            break;
        }
    }

    let ceil = lines.len().min(line_num + 10);
    for n in (line_num + 1)..=ceil {
        let line = lines[n - 1];
        if line.trim_start().starts_with("except") {
            return true;
        }
        if !line.trim().is_empty() && indent_of(line) < call_indent {
            break;
        }
    }

    false
}

/// The call line plus the next five lines, checked for a `.catch(` chain
/// or an enclosing `try {`.
fn js_call_is_guarded(lines: &[&str], line_num: usize) -> bool {
    let end = lines.len().min(line_num + 5);
    let window = lines[line_num - 1..end].join(" ");
    window.contains(".catch(") || window.contains("try {")
}
