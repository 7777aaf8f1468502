//! Project-level result document: merging, summary counters, suggestions.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::duplicates::DuplicateGroup;
use super::endpoints::{EndpointReport, FlowIssue};
use crate::types::{Finding, Severity};

/// Detector family an issue record originates from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueFamily {
    Hardcoding,
    DummyData,
    ApiFlow,
}

impl IssueFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueFamily::Hardcoding => "hardcoding",
            IssueFamily::DummyData => "dummy_data",
            IssueFamily::ApiFlow => "api_flow",
        }
    }
}

/// One merged issue in the project-level error or warning list. Fan-out
/// issues have no single location and carry `files` instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectIssue {
    pub kind: IssueFamily,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: String,
    pub lines: usize,
    pub size: u64,
    pub issues: Vec<Finding>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_issues: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub file_types: BTreeMap<String, usize>,
    pub issue_types: BTreeMap<String, usize>,
}

/// The run-level aggregate every reporter consumes. Built incrementally
/// during the pipeline, then frozen by `finalize`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectResult {
    pub version: String,
    pub generated_at: String,
    pub project_path: String,
    pub files: BTreeMap<String, FileSummary>,
    pub errors: Vec<ProjectIssue>,
    pub warnings: Vec<ProjectIssue>,
    pub duplicates: Vec<DuplicateGroup>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub endpoints: BTreeMap<String, EndpointReport>,
    pub summary: Summary,
    pub suggestions: Vec<String>,
}

impl ProjectResult {
    pub fn new(project_path: &Path) -> Self {
        let generated_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string());
        ProjectResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at,
            project_path: project_path.display().to_string(),
            files: BTreeMap::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            duplicates: Vec::new(),
            endpoints: BTreeMap::new(),
            summary: Summary::default(),
            suggestions: Vec::new(),
        }
    }

    pub fn record_file(&mut self, relative: &str, summary: FileSummary) {
        self.files.insert(relative.to_string(), summary);
    }

    /// Route per-file findings into the error/warning lists by severity,
    /// tagged with their originating family.
    pub fn absorb_findings(&mut self, relative: &str, family: IssueFamily, findings: &[Finding]) {
        for finding in findings {
            let issue = ProjectIssue {
                kind: family,
                file: Some(relative.to_string()),
                line: Some(finding.line),
                message: finding.message.clone(),
                files: Vec::new(),
            };
            match finding.severity {
                Severity::Error => self.errors.push(issue),
                Severity::Warning => self.warnings.push(issue),
            }
        }
    }

    /// Correlator issues are warnings across the board.
    pub fn absorb_flow_issues(&mut self, issues: Vec<FlowIssue>) {
        for issue in issues {
            self.warnings.push(ProjectIssue {
                kind: IssueFamily::ApiFlow,
                file: issue.file,
                line: issue.line,
                message: issue.message,
                files: issue.files,
            });
        }
    }

    /// Compute summary counters and threshold-triggered suggestions.
    /// Call once, after every detector has reported.
    pub fn finalize(&mut self) {
        let mut file_types: BTreeMap<String, usize> = BTreeMap::new();
        for relative in self.files.keys() {
            let ext = Path::new(relative)
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_else(|| "no_extension".to_string());
            *file_types.entry(ext).or_insert(0) += 1;
        }

        let mut issue_types: BTreeMap<String, usize> = BTreeMap::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            *issue_types.entry(issue.kind.as_str().to_string()).or_insert(0) += 1;
        }
        if !self.duplicates.is_empty() {
            issue_types.insert("duplicate".to_string(), self.duplicates.len());
        }

        self.summary = Summary {
            total_files: self.files.len(),
            total_issues: self.errors.len() + self.warnings.len(),
            error_count: self.errors.len(),
            warning_count: self.warnings.len(),
            file_types,
            issue_types,
        };
        self.suggestions = self.derive_suggestions();
    }

    fn derive_suggestions(&self) -> Vec<String> {
        let issue_types = &self.summary.issue_types;
        let count = |key: &str| issue_types.get(key).copied().unwrap_or(0);

        let mut suggestions = Vec::new();
        if count("hardcoding") > 5 {
            suggestions.push(
                "Consider extracting hardcoded values into configuration files or environment variables"
                    .to_string(),
            );
        }
        if count("dummy_data") > 0 {
            suggestions.push("Replace placeholder data with realistic fixtures before shipping".to_string());
        }
        if self.duplicates.len() > 3 {
            suggestions.push("Extract duplicated code into shared modules".to_string());
        }
        if count("api_flow") > 0 {
            suggestions.push("Standardize error handling around outbound API calls".to_string());
        }
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::duplicates::{DuplicateKind, DuplicateMember};

    fn finding(severity: Severity, line: usize, message: &str) -> Finding {
        Finding {
            kind: "password".to_string(),
            severity,
            line,
            column: 0,
            matched_text: "password = \"secret\"".to_string(),
            message: message.to_string(),
        }
    }

    fn file_group() -> DuplicateGroup {
        DuplicateGroup {
            kind: DuplicateKind::File,
            members: vec![
                DuplicateMember { file: "a.py".to_string(), start_line: None, end_line: None },
                DuplicateMember { file: "b.py".to_string(), start_line: None, end_line: None },
            ],
            message: "2 identical files".to_string(),
        }
    }

    #[test]
    fn findings_route_by_severity() {
        let mut result = ProjectResult::new(Path::new("/project"));
        result.absorb_findings(
            "app.py",
            IssueFamily::Hardcoding,
            &[
                finding(Severity::Error, 3, "Hardcoded password"),
                finding(Severity::Warning, 9, "Hardcoded URL"),
            ],
        );
        result.finalize();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.summary.error_count, 1);
        assert_eq!(result.summary.warning_count, 1);
        assert_eq!(result.summary.total_issues, 2);
        assert_eq!(result.errors[0].file.as_deref(), Some("app.py"));
        assert_eq!(result.errors[0].line, Some(3));
    }

    #[test]
    fn issue_histogram_counts_families_and_duplicates() {
        let mut result = ProjectResult::new(Path::new("/project"));
        result.absorb_findings(
            "app.py",
            IssueFamily::Hardcoding,
            &[finding(Severity::Error, 1, "Hardcoded password")],
        );
        result.absorb_findings(
            "app.py",
            IssueFamily::DummyData,
            &[finding(Severity::Warning, 2, "Placeholder value 'foo' used")],
        );
        result.duplicates = vec![file_group()];
        result.finalize();

        assert_eq!(result.summary.issue_types.get("hardcoding"), Some(&1));
        assert_eq!(result.summary.issue_types.get("dummy_data"), Some(&1));
        assert_eq!(result.summary.issue_types.get("duplicate"), Some(&1));
    }

    #[test]
    fn file_type_histogram_has_no_extension_fallback() {
        let mut result = ProjectResult::new(Path::new("/project"));
        for (relative, lines) in [("a.py", 4), ("b.py", 9), ("Procfile.config", 1)] {
            result.record_file(
                relative,
                FileSummary {
                    path: format!("/project/{relative}"),
                    lines,
                    size: 0,
                    issues: Vec::new(),
                },
            );
        }
        result.record_file(
            "Makefile",
            FileSummary { path: "/project/Makefile".to_string(), lines: 2, size: 0, issues: Vec::new() },
        );
        result.finalize();

        assert_eq!(result.summary.total_files, 4);
        assert_eq!(result.summary.file_types.get(".py"), Some(&2));
        assert_eq!(result.summary.file_types.get(".config"), Some(&1));
        assert_eq!(result.summary.file_types.get("no_extension"), Some(&1));
    }

    #[test]
    fn suggestions_fire_only_past_thresholds() {
        let mut result = ProjectResult::new(Path::new("/project"));
        let hardcoded: Vec<Finding> = (1..=5)
            .map(|line| finding(Severity::Error, line, "Hardcoded password"))
            .collect();
        result.absorb_findings("app.py", IssueFamily::Hardcoding, &hardcoded);
        result.duplicates = vec![file_group(), file_group(), file_group()];
        result.finalize();
        assert!(result.suggestions.is_empty());

        result.absorb_findings(
            "app.py",
            IssueFamily::Hardcoding,
            &[finding(Severity::Error, 6, "Hardcoded password")],
        );
        result.duplicates.push(file_group());
        result.absorb_flow_issues(vec![FlowIssue {
            file: Some("client.py".to_string()),
            line: Some(2),
            message: "API call without error handling".to_string(),
            files: Vec::new(),
        }]);
        result.finalize();

        assert_eq!(result.suggestions.len(), 3);
        assert!(result.suggestions[0].contains("configuration"));
        assert!(result.suggestions[1].contains("shared modules"));
        assert!(result.suggestions[2].contains("error handling"));
    }

    #[test]
    fn flow_issues_keep_contributing_files() {
        let mut result = ProjectResult::new(Path::new("/project"));
        result.absorb_flow_issues(vec![FlowIssue {
            file: None,
            line: None,
            message: "Endpoint '/api/users' is called from 4 files".to_string(),
            files: vec!["a.py".into(), "b.py".into(), "c.py".into(), "d.py".into()],
        }]);
        result.finalize();

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, IssueFamily::ApiFlow);
        assert!(result.warnings[0].file.is_none());
        assert_eq!(result.warnings[0].files.len(), 4);
    }

    #[test]
    fn serialized_result_round_trips() {
        let mut result = ProjectResult::new(Path::new("/project"));
        result.absorb_findings(
            "app.py",
            IssueFamily::Hardcoding,
            &[finding(Severity::Error, 3, "Hardcoded password")],
        );
        result.duplicates = vec![file_group()];
        result.finalize();

        let json = serde_json::to_string_pretty(&result).expect("serialize");
        let back: ProjectResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.summary.error_count, 1);
        assert_eq!(back.duplicates.len(), 1);
        assert_eq!(back.version, env!("CARGO_PKG_VERSION"));
    }
}
