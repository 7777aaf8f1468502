//! Analysis pipeline: corpus collection, per-file detectors, cross-file
//! passes, final aggregation.

pub mod blocks;
pub mod corpus;
pub mod duplicates;
pub mod endpoints;
pub mod hardcoded;
pub mod html;
pub mod lang;
pub mod placeholder;
mod regexes;
pub mod report;
pub mod result;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use blocks::{DEFAULT_MIN_BLOCK_LINES, IndentBlockScanner};
use corpus::{CorpusOptions, Truncation};
use duplicates::DuplicateIndex;
use endpoints::EndpointReport;
use result::{FileSummary, IssueFamily, ProjectResult};

use crate::fs_utils;

#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    pub ignore_patterns: Vec<String>,
    pub max_files: Option<usize>,
    pub min_block_lines: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            ignore_patterns: Vec::new(),
            max_files: None,
            min_block_lines: DEFAULT_MIN_BLOCK_LINES,
        }
    }
}

pub struct AnalysisOutcome {
    pub result: ProjectResult,
    pub truncation: Option<Truncation>,
}

/// Run the full pipeline over `root`. Unreadable files are logged and
/// skipped; a bad file never aborts the scan.
pub fn run_analysis(root: &Path, options: &AnalysisOptions) -> AnalysisOutcome {
    let corpus_options = CorpusOptions {
        ignore_patterns: options.ignore_patterns.clone(),
        max_files: options.max_files,
    };
    let (files, truncation) = corpus::collect(root, &corpus_options);

    let mut result = ProjectResult::new(root);
    let scanner = IndentBlockScanner::new(options.min_block_lines);
    let mut duplicates = DuplicateIndex::new();
    let mut endpoint_reports: BTreeMap<String, EndpointReport> = BTreeMap::new();

    for file in &files {
        let content = match fs_utils::read_lossy(&file.absolute) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("[csw][warn] skipping {}: {}", file.relative, err);
                continue;
            }
        };
        let size = fs::metadata(&file.absolute).map(|m| m.len()).unwrap_or(0);

        let hardcoded_findings = hardcoded::detect_hardcoded(&content, file);
        let placeholder_findings = placeholder::detect_placeholders(&content, file);

        let mut issues = hardcoded_findings.clone();
        issues.extend(placeholder_findings.iter().cloned());
        result.record_file(
            &file.relative,
            FileSummary {
                path: file.absolute.display().to_string(),
                lines: fs_utils::count_lines(&content),
                size,
                issues,
            },
        );
        result.absorb_findings(&file.relative, IssueFamily::Hardcoding, &hardcoded_findings);
        result.absorb_findings(&file.relative, IssueFamily::DummyData, &placeholder_findings);

        duplicates.add_file(&file.relative, &content, &scanner);
        if let Some(report) = endpoints::extract(&content, file) {
            endpoint_reports.insert(file.relative.clone(), report);
        }
    }

    result.duplicates = duplicates.find_duplicates();
    result.absorb_flow_issues(endpoints::correlate(&endpoint_reports));
    result.endpoints = endpoint_reports;
    result.finalize();

    AnalysisOutcome { result, truncation }
}
