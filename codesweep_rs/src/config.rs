//! Configuration file support for codesweep.
//!
//! Loads optional `.codesweep/config.toml` from the scanned root.

use serde::Deserialize;
use std::path::Path;

use crate::analyzer::blocks::DEFAULT_MIN_BLOCK_LINES;

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub scan: ScanConfig,
}

/// Scan-related settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Ignore patterns appended to the built-in set.
    pub ignore: Vec<String>,
    /// Minimum retained line count for duplicate block candidates.
    pub min_block_lines: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            ignore: Vec::new(),
            min_block_lines: DEFAULT_MIN_BLOCK_LINES,
        }
    }
}

impl SweepConfig {
    /// Load config from `.codesweep/config.toml` in the given root directory.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".codesweep").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("[csw][warn] Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[csw][warn] Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, body: &str) {
        let config_dir = temp.path().join(".codesweep");
        std::fs::create_dir_all(&config_dir).expect("create .codesweep");
        let mut file =
            std::fs::File::create(config_dir.join("config.toml")).expect("create config");
        writeln!(file, "{body}").expect("write config");
    }

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert!(config.scan.ignore.is_empty());
        assert_eq!(config.scan.min_block_lines, DEFAULT_MIN_BLOCK_LINES);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = SweepConfig::load(temp.path());
        assert!(config.scan.ignore.is_empty());
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        write_config(
            &temp,
            r#"
[scan]
ignore = ["generated", "*.min.js"]
min_block_lines = 6
"#,
        );

        let config = SweepConfig::load(temp.path());
        assert_eq!(config.scan.ignore, vec!["generated", "*.min.js"]);
        assert_eq!(config.scan.min_block_lines, 6);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp = TempDir::new().expect("temp dir");
        write_config(&temp, "[scan]\nignore = [\"generated\"]");

        let config = SweepConfig::load(temp.path());
        assert_eq!(config.scan.ignore, vec!["generated"]);
        assert_eq!(config.scan.min_block_lines, DEFAULT_MIN_BLOCK_LINES);
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let temp = TempDir::new().expect("temp dir");
        write_config(&temp, "[[[scan");

        let config = SweepConfig::load(temp.path());
        assert!(config.scan.ignore.is_empty());
        assert_eq!(config.scan.min_block_lines, DEFAULT_MIN_BLOCK_LINES);
    }
}
