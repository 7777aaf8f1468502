//! Per-extension source conventions.
//!
//! Detectors never branch on raw extension strings; they ask the file's
//! `SourceFamily` for comment prefixes and the correlator asks it for the
//! call-idiom table to use. Adding a language means adding a variant here.

/// Extension category a scanned file belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SourceFamily {
    Python,
    JavaScript,
    Ruby,
    Php,
    CLike,
    Data,
}

impl SourceFamily {
    /// `ext` is lowercased and includes the leading dot.
    pub fn from_extension(ext: &str) -> Option<SourceFamily> {
        match ext {
            ".py" => Some(SourceFamily::Python),
            ".js" | ".jsx" | ".ts" | ".tsx" => Some(SourceFamily::JavaScript),
            ".rb" => Some(SourceFamily::Ruby),
            ".php" => Some(SourceFamily::Php),
            ".java" | ".c" | ".cpp" | ".cs" | ".go" | ".swift" | ".kt" | ".rs" => {
                Some(SourceFamily::CLike)
            }
            ".json" | ".yaml" | ".yml" | ".xml" | ".env" | ".config" => Some(SourceFamily::Data),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFamily::Python => "python",
            SourceFamily::JavaScript => "javascript",
            SourceFamily::Ruby => "ruby",
            SourceFamily::Php => "php",
            SourceFamily::CLike => "c-like",
            SourceFamily::Data => "data",
        }
    }

    /// Single-line comment openers. Data formats have none.
    pub fn comment_prefixes(&self) -> &'static [&'static str] {
        match self {
            SourceFamily::Python | SourceFamily::Ruby => &["#"],
            SourceFamily::JavaScript | SourceFamily::CLike => &["//", "/*"],
            SourceFamily::Php => &["//", "#"],
            SourceFamily::Data => &[],
        }
    }

    /// True when the whole line is a comment for this family.
    pub fn is_comment(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.comment_prefixes()
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
    }
}
