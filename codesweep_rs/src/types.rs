use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Free-tier ceiling on analyzed files per run.
pub const FREE_TIER_MAX_FILES: usize = 100;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Auto
    }
}

/// Output target for `analyze`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputKind {
    Console,
    Html,
    Json,
}

impl Default for OutputKind {
    fn default() -> Self {
        OutputKind::Console
    }
}

/// Render format for `report`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReportFormat {
    Html,
    Json,
    Markdown,
}

impl Default for ReportFormat {
    fn default() -> Self {
        ReportFormat::Html
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single detected issue inside one file.
///
/// `line` is 1-based; `column` is the byte offset of the match start within
/// the line. `matched_text` is capped at 50 characters so full secret values
/// never land in reports.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Finding {
    pub kind: String,
    pub severity: Severity,
    pub line: usize,
    pub column: usize,
    pub matched_text: String,
    pub message: String,
}

/// A file selected for analysis, identified by its root-relative path.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub relative: String,
    pub absolute: PathBuf,
}

impl SourceFile {
    pub fn new(relative: String, absolute: PathBuf) -> Self {
        Self { relative, absolute }
    }

    /// Lowercased extension including the dot, or empty for none.
    pub fn extension(&self) -> String {
        match self.absolute.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!(".{}", ext.to_lowercase()),
            None => String::new(),
        }
    }

    pub fn file_name(&self) -> String {
        self.absolute
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}
