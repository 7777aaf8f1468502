//! Hardcoded-value detection.
//!
//! Line-oriented regex families for credentials, URLs, absolute paths,
//! ports, connection strings, and email addresses. Credential and password
//! hits are errors; everything else is a warning.
//!
//! # Rules
//!
//! | Kind | Pattern shape | Severity |
//! |------|---------------|----------|
//! | `api_key` | api/secret key or access token assigned a 20+ char literal | error |
//! | `password` | password/pwd/pass assigned any quoted literal | error |
//! | `url` | absolute http(s), localhost:port, 127.0.0.1:port | warning |
//! | `path` | quoted Unix or Windows absolute path | warning |
//! | `port` | port assigned a 2-5 digit literal | warning |
//! | `database` | mongodb/mysql/postgresql/redis connection URL | warning |
//! | `email` | quoted email address | warning |

use once_cell::sync::Lazy;
use regex::Regex;

use super::lang::SourceFamily;
use super::regexes::{regex, truncate_match};
use crate::types::{Finding, Severity, SourceFile};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HardcodedKind {
    ApiKey,
    Password,
    Url,
    Path,
    Port,
    Database,
    Email,
}

impl HardcodedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiKey => "api_key",
            Self::Password => "password",
            Self::Url => "url",
            Self::Path => "path",
            Self::Port => "port",
            Self::Database => "database",
            Self::Email => "email",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::ApiKey | Self::Password => Severity::Error,
            _ => Severity::Warning,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::ApiKey => "Hardcoded API key or token",
            Self::Password => "Hardcoded password",
            Self::Url => "Hardcoded URL",
            Self::Path => "Hardcoded absolute path",
            Self::Port => "Hardcoded port number",
            Self::Database => "Hardcoded database connection string",
            Self::Email => "Hardcoded email address",
        }
    }
}

static HARDCODED_PATTERNS: Lazy<Vec<(HardcodedKind, Regex)>> = Lazy::new(|| {
    use HardcodedKind::*;
    vec![
        (ApiKey, regex(r#"(?i)api[_-]?key\s*=\s*["'][\w\-]{20,}["']"#)),
        (ApiKey, regex(r#"(?i)secret[_-]?key\s*=\s*["'][\w\-]{20,}["']"#)),
        (ApiKey, regex(r#"(?i)access[_-]?token\s*=\s*["'][\w\-]{20,}["']"#)),
        (Password, regex(r#"(?i)password\s*=\s*["'][^"']+["']"#)),
        (Password, regex(r#"(?i)pwd\s*=\s*["'][^"']+["']"#)),
        (Password, regex(r#"(?i)pass\s*=\s*["'][^"']+["']"#)),
        (Url, regex(r#"(?i)https?://[^\s"',;]+"#)),
        (Url, regex(r"(?i)localhost:\d+")),
        (Url, regex(r"(?i)127\.0\.0\.1:\d+")),
        (
            Path,
            regex(r#"(?i)["'][/\\](?:home|users|var|etc|usr)[/\\][^"']+["']"#),
        ),
        (Path, regex(r#"(?i)["']C:\\[^"']+["']"#)),
        (Path, regex(r#"(?i)["']D:\\[^"']+["']"#)),
        (Port, regex(r"(?i)port\s*=\s*\d{2,5}")),
        (Database, regex(r#"(?i)mongodb://[^"\s]+"#)),
        (Database, regex(r#"(?i)mysql://[^"\s]+"#)),
        (Database, regex(r#"(?i)postgresql://[^"\s]+"#)),
        (Database, regex(r#"(?i)redis://[^"\s]+"#)),
        (
            Email,
            regex(r#"(?i)["'][a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}["']"#),
        ),
    ]
});

/// Matched text that never counts as hardcoding.
static EXCEPTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        regex(r"(?i)example\.com"),
        regex(r"(?i)test@example\.com"),
        regex(r"(?i)localhost"),
        regex(r"(?i)127\.0\.0\.1"),
        regex(r"(?i)0\.0\.0\.0"),
        regex(r"(?i)placeholder"),
        regex(r"(?i)your[_-]?api[_-]?key"),
        regex(r"(?i)your[_-]?secret"),
        regex(r"(?i)TODO"),
        regex(r"(?i)FIXME"),
    ]
});

fn is_exception(matched: &str) -> bool {
    EXCEPTION_PATTERNS.iter().any(|re| re.is_match(matched))
}

/// Env files declare configuration on purpose; scanning them is all noise.
fn is_env_file(name: &str) -> bool {
    name.ends_with(".env") || name.ends_with(".env.example") || name.ends_with(".env.sample")
}

/// Scan one file for hardcoded values.
pub fn detect_hardcoded(content: &str, file: &SourceFile) -> Vec<Finding> {
    let mut findings = Vec::new();

    if is_env_file(&file.file_name()) {
        return findings;
    }

    let family = SourceFamily::from_extension(&file.extension());

    for (line_idx, line) in content.split('\n').enumerate() {
        if family.is_some_and(|f| f.is_comment(line)) {
            continue;
        }

        for (kind, pattern) in HARDCODED_PATTERNS.iter() {
            for m in pattern.find_iter(line) {
                if is_exception(m.as_str()) {
                    continue;
                }
                findings.push(Finding {
                    kind: kind.as_str().to_string(),
                    severity: kind.severity(),
                    line: line_idx + 1,
                    column: m.start(),
                    matched_text: truncate_match(m.as_str()),
                    message: kind.message().to_string(),
                });
            }
        }
    }

    findings
}
