//! Persistence of the most recent analysis result under `~/.codesweep`.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::analyzer::result::ProjectResult;

const LAST_ANALYSIS_FILE: &str = "last-analysis.json";

/// Per-user state directory, created on demand by the writers.
pub fn state_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to determine the home directory")?;
    Ok(home.join(".codesweep"))
}

pub fn last_analysis_path() -> Result<PathBuf> {
    Ok(state_dir()?.join(LAST_ANALYSIS_FILE))
}

/// Persist `result` as the most recent analysis. The write goes through a
/// temp file in the same directory so a crash never leaves a half-written
/// document behind.
pub fn save_last_analysis(result: &ProjectResult) -> Result<PathBuf> {
    let dir = state_dir()?;
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let json =
        serde_json::to_string_pretty(result).context("Failed to serialize analysis result")?;
    let mut tmp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create a temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())
        .context("Failed to write analysis result")?;

    let target = dir.join(LAST_ANALYSIS_FILE);
    tmp.persist(&target)
        .with_context(|| format!("Failed to persist {}", target.display()))?;
    Ok(target)
}

/// Load the most recently persisted analysis.
pub fn load_last_analysis() -> Result<ProjectResult> {
    let path = last_analysis_path()?;
    if !path.exists() {
        anyhow::bail!("No saved analysis found. Run `csw analyze` first.");
    }
    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::path::Path;
    use tempfile::tempdir;

    fn fake_home(dir: &Path) {
        // SAFETY: serial tests, no concurrent access to env
        unsafe { env::set_var("HOME", dir) };
    }

    #[test]
    #[serial]
    fn save_then_load_round_trips() {
        let home = tempdir().expect("tmp home");
        fake_home(home.path());

        let mut result = ProjectResult::new(Path::new("/project"));
        result.finalize();
        let saved = save_last_analysis(&result).expect("save");
        assert!(saved.ends_with(".codesweep/last-analysis.json"));

        let loaded = load_last_analysis().expect("load");
        assert_eq!(loaded.project_path, "/project");
        assert_eq!(loaded.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    #[serial]
    fn load_without_saved_analysis_mentions_analyze() {
        let home = tempdir().expect("tmp home");
        fake_home(home.path());

        let err = load_last_analysis().expect_err("should be missing");
        assert!(err.to_string().contains("csw analyze"));
    }

    #[test]
    #[serial]
    fn save_overwrites_previous_analysis() {
        let home = tempdir().expect("tmp home");
        fake_home(home.path());

        let mut first = ProjectResult::new(Path::new("/first"));
        first.finalize();
        save_last_analysis(&first).expect("save first");

        let mut second = ProjectResult::new(Path::new("/second"));
        second.finalize();
        save_last_analysis(&second).expect("save second");

        let loaded = load_last_analysis().expect("load");
        assert_eq!(loaded.project_path, "/second");
    }
}
