//! # codesweep
//!
//! **Heuristic source-tree quality scanner** - finds the leftovers that code
//! review misses before they ship.
//!
//! codesweep walks a project tree and reports hardcoded secrets, placeholder
//! data, duplicated code and outbound API calls without error handling, then
//! renders the result to the console, an HTML document, or JSON.
//!
//! ## Features
//!
//! - **Hardcoded values** - passwords, API keys, tokens, URLs, IPs, absolute paths
//! - **Placeholder data** - lorem ipsum, dummy names/mails, sequential digit runs
//! - **Duplicate detection** - identical files and repeated code blocks across files
//! - **API flow checks** - endpoint fan-out and unguarded outbound calls
//! - **Reports** - console, self-contained HTML, JSON; persisted for re-rendering
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use codesweep::analyzer::{AnalysisOptions, run_analysis};
//! use std::path::Path;
//!
//! let options = AnalysisOptions::default();
//! let outcome = run_analysis(Path::new("."), &options);
//! println!("{} issues found", outcome.result.summary.total_issues);
//! ```
//!
//! ## CLI Usage
//!
//! For command-line usage, install with `cargo install codesweep` and run:
//!
//! ```bash
//! csw analyze                  # Analyze the current directory
//! csw analyze src/ -o html     # HTML report for src/
//! csw analyze --ci             # Gate a CI pipeline
//! csw report --format json     # Re-render the last run
//! ```

#![doc(html_root_url = "https://docs.rs/codesweep/0.4.2")]

// ============================================================================
// Core Modules
// ============================================================================

/// The analysis pipeline: corpus collection, detectors, aggregation, renderers.
///
/// # Submodules
///
/// - [`analyzer::corpus`] - File collection with ignore rules and file budget
/// - [`analyzer::hardcoded`] - Hardcoded value detection (secrets, URLs, IPs, paths)
/// - [`analyzer::placeholder`] - Placeholder and dummy data detection
/// - [`analyzer::duplicates`] - Cross-file duplicate files and code blocks
/// - [`analyzer::endpoints`] - Outbound API call extraction and correlation
/// - [`analyzer::result`] - Aggregated result document and suggestions
/// - [`analyzer::html`] - HTML report generation
/// - [`analyzer::report`] - Console report generation
pub mod analyzer;

/// Command-line interface: parser, dispatcher, shared entry point.
pub mod cli;

/// ANSI color handling for console output.
pub mod colors;

/// Project-local configuration file (`.codesweep/config.toml`).
pub mod config;

/// Filesystem utilities (lossy reads, line counting).
pub mod fs_utils;

/// License activation, verification, and premium gating.
pub mod license;

/// Progress UI (spinners, status messages).
pub mod progress;

/// Persistence of the last analysis result under `~/.codesweep`.
pub mod store;

/// Common types used throughout the crate.
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

/// Run the full analysis pipeline.
pub use analyzer::run_analysis;

/// Options for a pipeline run.
pub use analyzer::AnalysisOptions;

/// Result of a pipeline run (document plus truncation note).
pub use analyzer::AnalysisOutcome;

/// The aggregated analysis document.
pub use analyzer::result::ProjectResult;

/// A single detected issue inside one file.
pub use types::Finding;

/// Issue severity (error or warning).
pub use types::Severity;

/// Color mode (auto, always, never).
pub use types::ColorMode;

/// Free-tier ceiling on analyzed files per run.
pub use types::FREE_TIER_MAX_FILES;
