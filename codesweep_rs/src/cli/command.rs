//! Command enum and related types for the CLI interface.
//!
//! This module defines the canonical `csw <command> [options]` interface.
//! The Command enum is the source of truth for all CLI commands and backs
//! both the parser and help output.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::path::PathBuf;

use crate::types::{ColorMode, OutputKind, ReportFormat};

// ============================================================================
// Command Enum - Source of Truth
// ============================================================================

/// The canonical command enum for the `csw <command>` interface.
///
/// Each variant maps to a handler in `dispatch`. This enum is the single
/// source of truth for CLI commands and backs both parser and help output.
#[derive(Debug, Clone)]
pub enum Command {
    /// Run the full analysis pipeline on a project directory.
    ///
    /// Collects the corpus, runs the detectors, correlates outbound calls,
    /// renders the result and persists it for later `report` runs.
    Analyze(AnalyzeOptions),

    /// Re-render the most recently persisted analysis result.
    Report(ReportOptions),

    /// Activate a premium license key.
    Activate(ActivateOptions),

    /// Show the current license tier.
    Status(StatusOptions),

    /// Show help for commands.
    Help(HelpOptions),

    /// Show version.
    Version,
}

impl Default for Command {
    fn default() -> Self {
        Command::Analyze(AnalyzeOptions::default())
    }
}

// ============================================================================
// Per-Command Options
// ============================================================================

/// Options for the `analyze` command.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Project directory to analyze (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Output target (console, html, json)
    pub output: OutputKind,

    /// Output file for html/json targets
    pub output_file: Option<PathBuf>,

    /// Ceiling on analyzed files (free tier defaults to 100 when unset)
    pub max_files: Option<usize>,

    /// Extra ignore patterns appended after config patterns
    pub ignore: Vec<String>,

    /// Apply automatic fixes (premium)
    pub fix: bool,

    /// CI mode: plain output, exit 1 on errors / 2 on warnings
    pub ci: bool,

    /// Color mode for console output
    pub color: ColorMode,

    /// Verbose progress diagnostics on stderr
    pub verbose: bool,
}

/// Options for the `report` command.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Render format (html, json, markdown)
    pub format: ReportFormat,

    /// Output file path
    pub output: Option<PathBuf>,
}

/// Options for the `activate` command.
#[derive(Debug, Clone, Default)]
pub struct ActivateOptions {
    /// License key to activate
    pub key: String,
}

/// Options for the `status` command.
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// Emit the status document as JSON
    pub json: bool,
}

/// Options for the `help` command.
#[derive(Debug, Clone, Default)]
pub struct HelpOptions {
    /// Show help for a specific command
    pub command: Option<String>,
}

// ============================================================================
// Help Text Generation
// ============================================================================

impl Command {
    /// Get the command name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Analyze(_) => "analyze",
            Command::Report(_) => "report",
            Command::Activate(_) => "activate",
            Command::Status(_) => "status",
            Command::Help(_) => "help",
            Command::Version => "version",
        }
    }

    /// Get a short description of the command.
    pub fn description(&self) -> &'static str {
        match self {
            Command::Analyze(_) => "Run the full analysis pipeline (default)",
            Command::Report(_) => "Re-render the last analysis result",
            Command::Activate(_) => "Activate a premium license key",
            Command::Status(_) => "Show the current license tier",
            Command::Help(_) => "Show help for commands",
            Command::Version => "Show version information",
        }
    }

    /// Generate the main help text listing all commands.
    pub fn format_help() -> String {
        let commands = [
            ("analyze [path]", "Run the full analysis pipeline (default)"),
            ("report", "Re-render the last analysis result"),
            ("activate <key>", "Activate a premium license key"),
            ("status", "Show the current license tier"),
        ];

        let mut help = String::new();
        help.push_str("codesweep - Heuristic source-tree quality scanner\n\n");
        help.push_str("USAGE:\n");
        help.push_str("    csw <COMMAND> [OPTIONS]\n");
        help.push_str("    csw analyze .             # Analyze the current directory\n");
        help.push_str("    csw <command> --help      # Command-specific help\n\n");
        help.push_str("COMMANDS:\n");

        for (name, desc) in commands {
            help.push_str(&format!("    {:<18} {}\n", name, desc));
        }

        help.push_str("\nGLOBAL OPTIONS:\n");
        help.push_str("    --help           Show this help\n");
        help.push_str("    --version        Show version\n");

        help
    }

    /// Help text for a specific command, if the name is known.
    pub fn help_for(command: &str) -> Option<&'static str> {
        match command {
            "analyze" => Some(ANALYZE_HELP),
            "report" => Some(REPORT_HELP),
            "activate" => Some(ACTIVATE_HELP),
            "status" => Some(STATUS_HELP),
            _ => None,
        }
    }
}

pub(super) const ANALYZE_HELP: &str = "csw analyze - Run the full analysis pipeline

USAGE:
    csw analyze [PATH] [OPTIONS]

DESCRIPTION:
    Walks the project tree and reports quality issues:
    - Hardcoded secrets, URLs, IPs and paths
    - Placeholder and dummy data left over from development
    - Duplicated files and duplicated code blocks
    - Outbound API calls without error handling

    The finished result is persisted so `csw report` can re-render
    it without another scan.

OPTIONS:
    -o, --output <target>     Output target: console, html, json (default: console)
    -f, --output-file <path>  Output file for html/json targets
                              (default: codesweep-report.html / codesweep-report.json)
    -I, --ignore <patterns>   Extra ignore patterns, comma-separated (repeatable)
    --max-files <n>           Ceiling on analyzed files
    --fix                     Apply automatic fixes (premium)
    --ci                      CI mode: no spinner, exit 1 on errors / 2 on warnings
    --color <mode>            Color mode: auto, always, never
    --verbose                 Verbose progress diagnostics
    --help, -h                Show this help message

ARGUMENTS:
    [PATH]                    Project directory (default: current directory)

EXAMPLES:
    csw analyze                        # Analyze the current directory
    csw analyze src/ -o html           # HTML report for src/
    csw analyze -I generated,vendor    # Skip extra directories
    csw analyze --ci                   # Gate a CI pipeline";

pub(super) const REPORT_HELP: &str = "csw report - Re-render the last analysis result

USAGE:
    csw report [OPTIONS]

DESCRIPTION:
    Loads the most recently persisted analysis result and renders it
    again without re-scanning the project. Run `csw analyze` first.

OPTIONS:
    --format <format>    Render format: html, json, markdown (default: html)
    -o, --output <path>  Output file path
    --help, -h           Show this help message

EXAMPLES:
    csw report                         # HTML report from the last run
    csw report --format json -o r.json # JSON document";

pub(super) const ACTIVATE_HELP: &str = "csw activate - Activate a premium license key

USAGE:
    csw activate <LICENSE-KEY>

DESCRIPTION:
    Verifies the key against the license server and stores the license
    record locally. Premium unlocks unlimited file counts and auto-fix.

EXAMPLES:
    csw activate CSW-XXXX-XXXX-XXXX";

pub(super) const STATUS_HELP: &str = "csw status - Show the current license tier

USAGE:
    csw status [OPTIONS]

OPTIONS:
    --json        Emit the status document as JSON
    --help, -h    Show this help message";

// ============================================================================
// Tests
// ============================================================================
