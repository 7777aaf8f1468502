//! End-to-End CLI Tests for codesweep
//!
//! Tests define expected behavior. Every invocation that touches per-user
//! state points HOME at a throwaway directory, so runs never see a real
//! license or a previously saved analysis.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command pointing to the csw binary
fn csw() -> Command {
    cargo_bin_cmd!("csw")
}

/// Unroutable license endpoint, fails instantly with connection refused.
const DEAD_API: &str = "http://127.0.0.1:1/v1/verify";

/// Two-file project: one hardcoded password (error), one clean module.
fn write_demo_project(dir: &Path) {
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(
        dir.join("src/config.py"),
        "TIMEOUT = 30\npassword = \"abcdef123456\"\n",
    )
    .unwrap();
    fs::write(
        dir.join("src/clean.py"),
        "def add(a, b):\n    return a + b\n",
    )
    .unwrap();
}

/// Single clean file, no findings of any kind.
fn write_clean_project(dir: &Path) {
    fs::write(
        dir.join("clean.py"),
        "def add(a, b):\n    return a + b\n",
    )
    .unwrap();
}

/// Single file whose only finding is a placeholder warning.
fn write_warnings_project(dir: &Path) {
    fs::write(dir.join("app.py"), "greeting = \"foo\"\n").unwrap();
}

// ============================================
// Basic CLI Tests
// ============================================

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        csw()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("codesweep"))
            .stdout(predicate::str::contains("analyze"))
            .stdout(predicate::str::contains("report"));
    }

    #[test]
    fn shows_version() {
        csw()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("csw"))
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn bare_invocation_prints_usage() {
        csw()
            .assert()
            .success()
            .stdout(predicate::str::contains("Quick Start"))
            .stdout(predicate::str::contains("csw analyze"));
    }

    #[test]
    fn unknown_command_suggests_closest() {
        csw()
            .arg("analize")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Unknown command 'analize'"))
            .stderr(predicate::str::contains("Did you mean: analyze?"));
    }

    #[test]
    fn unknown_command_without_close_match() {
        csw()
            .arg("frobnicate")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Unknown command 'frobnicate'"))
            .stderr(predicate::str::contains("Did you mean").not());
    }

    #[test]
    fn unknown_leading_option_is_rejected() {
        csw()
            .arg("--bogus")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Unknown option '--bogus'"));
    }

    #[test]
    fn subcommand_help_goes_to_stderr() {
        csw()
            .args(["analyze", "--help"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("csw analyze"))
            .stderr(predicate::str::contains("--max-files"));
    }

    #[test]
    fn help_subcommand_shows_target() {
        csw()
            .args(["help", "report"])
            .assert()
            .success()
            .stdout(predicate::str::contains("csw report"))
            .stdout(predicate::str::contains("--format"));
    }
}

// ============================================
// Analyze Mode Tests
// ============================================

mod analyze_mode {
    use super::*;

    #[test]
    fn reports_hardcoded_password() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_demo_project(project.path());

        csw()
            .env("HOME", home.path())
            .args(["analyze", "--ci"])
            .arg(project.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Files analyzed: 2"))
            .stdout(predicate::str::contains("Hardcoded password"))
            .stdout(predicate::str::contains("config.py"));
    }

    #[test]
    fn clean_project_passes() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_clean_project(project.path());

        csw()
            .env("HOME", home.path())
            .args(["analyze", "--ci"])
            .arg(project.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No issues found"));
    }

    #[test]
    fn warnings_alone_exit_with_two() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_warnings_project(project.path());

        csw()
            .env("HOME", home.path())
            .args(["analyze", "--ci"])
            .arg(project.path())
            .assert()
            .code(2)
            .stdout(predicate::str::contains("Placeholder value 'foo' used"));
    }

    #[test]
    fn free_tier_notice_without_license() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_clean_project(project.path());

        csw()
            .env("HOME", home.path())
            .args(["analyze", "--ci"])
            .arg(project.path())
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Free tier: analysis limited to 100 files",
            ));
    }

    #[test]
    fn max_files_truncation_is_reported() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        for name in ["a.py", "b.py", "c.py"] {
            fs::write(
                project.path().join(name),
                "def add(a, b):\n    return a + b\n",
            )
            .unwrap();
        }

        csw()
            .env("HOME", home.path())
            .args(["analyze", "--ci", "--max-files", "1"])
            .arg(project.path())
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "File limit reached: analyzed 1 of 3 discovered files",
            ));
    }

    #[test]
    fn ignore_flag_prunes_subtrees() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_demo_project(project.path());

        csw()
            .env("HOME", home.path())
            .args(["analyze", "--ci", "-I", "src"])
            .arg(project.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Files analyzed: 0"));
    }

    #[test]
    fn writes_json_report_to_custom_file() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_demo_project(project.path());

        csw()
            .env("HOME", home.path())
            .current_dir(project.path())
            .args(["analyze", ".", "--ci", "-o", "json", "-f", "scan.json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Report written to scan.json"));

        let raw = fs::read_to_string(project.path().join("scan.json")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["summary"]["total_files"], 2);
        assert_eq!(doc["summary"]["error_count"], 1);
        assert!(!doc["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn writes_html_report_with_default_name() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_demo_project(project.path());

        csw()
            .env("HOME", home.path())
            .current_dir(project.path())
            .args(["analyze", ".", "--ci", "-o", "html"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "Report written to codesweep-report.html",
            ));

        let html = fs::read_to_string(project.path().join("codesweep-report.html")).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("codesweep report"));
        assert!(html.contains("Hardcoded password"));
    }

    #[test]
    fn nonexistent_path_fails() {
        csw()
            .args(["analyze", "/definitely/not/a/real/path"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("is not a directory"));
    }

    #[test]
    fn persists_result_under_home() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_clean_project(project.path());

        csw()
            .env("HOME", home.path())
            .args(["analyze", "--ci"])
            .arg(project.path())
            .assert()
            .success();

        assert!(home.path().join(".codesweep/last-analysis.json").exists());
    }
}

// ============================================
// Report Mode Tests
// ============================================

mod report_mode {
    use super::*;

    #[test]
    fn report_without_saved_analysis_fails() {
        let home = TempDir::new().unwrap();

        csw()
            .env("HOME", home.path())
            .arg("report")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("csw analyze"));
    }

    #[test]
    fn report_rerenders_saved_analysis_as_json() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let workdir = TempDir::new().unwrap();
        write_demo_project(project.path());

        csw()
            .env("HOME", home.path())
            .args(["analyze", "--ci"])
            .arg(project.path())
            .assert()
            .code(1);

        csw()
            .env("HOME", home.path())
            .current_dir(workdir.path())
            .args(["report", "--format", "json", "-o", "saved.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Report written to saved.json"));

        let raw = fs::read_to_string(workdir.path().join("saved.json")).unwrap();
        assert!(raw.contains("Hardcoded password"));
    }

    #[test]
    fn markdown_format_is_not_implemented() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_clean_project(project.path());

        csw()
            .env("HOME", home.path())
            .args(["analyze", "--ci"])
            .arg(project.path())
            .assert()
            .success();

        csw()
            .env("HOME", home.path())
            .args(["report", "--format", "markdown"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("not implemented"));
    }
}

// ============================================
// License Command Tests
// ============================================

mod license_mode {
    use super::*;

    #[test]
    fn status_shows_free_tier() {
        let home = TempDir::new().unwrap();

        csw()
            .env("HOME", home.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Plan: free"))
            .stdout(predicate::str::contains("Premium: inactive"))
            .stdout(predicate::str::contains("csw activate"));
    }

    #[test]
    fn status_json_is_machine_readable() {
        let home = TempDir::new().unwrap();

        csw()
            .env("HOME", home.path())
            .args(["status", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"plan\": \"free\""))
            .stdout(predicate::str::contains("\"is_premium\": false"));
    }

    #[test]
    fn activate_requires_a_key() {
        csw()
            .arg("activate")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("requires a license key"));
    }

    #[test]
    fn activate_against_unreachable_server_fails() {
        let home = TempDir::new().unwrap();

        csw()
            .env("HOME", home.path())
            .env("CODESWEEP_API_URL", DEAD_API)
            .args(["activate", "CSW-TEST-KEY-123456"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Activation failed"));
    }
}
