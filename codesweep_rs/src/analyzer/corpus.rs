//! File corpus collection.
//!
//! Walks the scanned root, applies ignore rules, and keeps only files with
//! a recognized extension. Traversal is name-sorted at every level so two
//! runs over the same tree always produce the same list.

use std::path::Path;

use walkdir::WalkDir;

use crate::types::SourceFile;

/// Directory and file name patterns skipped by default. A leading `*` makes
/// the pattern a suffix match; anything else matches as a substring.
pub const DEFAULT_IGNORE: &[&str] = &[
    "node_modules",
    "__pycache__",
    ".git",
    ".svn",
    "*.pyc",
    "*.pyo",
    "*.pyd",
    ".DS_Store",
    "dist",
    "build",
    "*.egg-info",
    ".venv",
    "venv",
    ".env",
];

/// Extensions accepted for analysis, matched against the lowercased suffix.
pub const ANALYZABLE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".cpp", ".c", ".cs", ".go", ".rb", ".php",
    ".swift", ".kt", ".rs", ".json", ".yaml", ".yml", ".xml", ".env", ".config",
];

/// Reported when the discovered corpus exceeded the file budget and was cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Truncation {
    pub kept: usize,
    pub discovered: usize,
}

#[derive(Clone, Debug, Default)]
pub struct CorpusOptions {
    /// Extra patterns appended after `DEFAULT_IGNORE`.
    pub ignore_patterns: Vec<String>,
    pub max_files: Option<usize>,
}

/// True when `name` matches any ignore pattern.
pub fn is_ignored(name: &str, extra_patterns: &[String]) -> bool {
    let matches = |pattern: &str| {
        if let Some(suffix) = pattern.strip_prefix('*') {
            name.ends_with(suffix)
        } else {
            name.contains(pattern)
        }
    };
    DEFAULT_IGNORE.iter().any(|p| matches(p)) || extra_patterns.iter().any(|p| matches(p))
}

fn is_analyzable(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!(".{}", ext.to_lowercase()),
        None => return false,
    };
    ANALYZABLE_EXTENSIONS.contains(&ext.as_str())
}

/// Collect analyzable files under `root`, deterministically ordered.
///
/// Ignored directory names prune their whole subtree. Unreadable entries
/// are skipped, never fatal. When `max_files` is set and the corpus is
/// larger, the sorted list is cut at the budget and the truncation is
/// returned alongside so the caller can surface it.
pub fn collect(root: &Path, options: &CorpusOptions) -> (Vec<SourceFile>, Option<Truncation>) {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !is_ignored(&name, &options.ignore_patterns)
        });

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_analyzable(path) {
            continue;
        }
        let relative = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        files.push(SourceFile::new(relative, path.to_path_buf()));
    }

    let discovered = files.len();
    let truncation = match options.max_files {
        Some(max) if discovered > max => {
            files.truncate(max);
            Some(Truncation {
                kept: max,
                discovered,
            })
        }
        _ => None,
    };

    (files, truncation)
}
