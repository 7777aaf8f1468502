//! Dispatcher for the command interface.
//!
//! Converts `Command` variants into handler calls. Each handler owns its
//! console output and reports the process exit code through
//! [`DispatchResult`].

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::analyzer::result::ProjectResult;
use crate::analyzer::{self, AnalysisOptions};
use crate::colors::Painter;
use crate::config::SweepConfig;
use crate::license;
use crate::progress::{Spinner, format_count, format_elapsed};
use crate::store;
use crate::types::{ColorMode, FREE_TIER_MAX_FILES, OutputKind, ReportFormat};

use super::command::*;

/// Result type for command dispatch.
pub enum DispatchResult {
    /// Command was handled, return this exit code
    Exit(i32),
    /// Show main help
    ShowHelp,
    /// Show help for a specific command
    ShowCommandHelp(&'static str),
    /// Show version
    ShowVersion,
}

/// Dispatch a parsed command.
///
/// Returns a DispatchResult indicating what action to take.
pub fn dispatch_command(command: &Command) -> DispatchResult {
    match command {
        Command::Help(opts) => match opts.command.as_deref() {
            Some(name) => match Command::help_for(name) {
                Some(help) => DispatchResult::ShowCommandHelp(help),
                None => {
                    eprintln!("[csw][error] No help available for unknown command '{}'.", name);
                    DispatchResult::Exit(1)
                }
            },
            None => DispatchResult::ShowHelp,
        },
        Command::Version => DispatchResult::ShowVersion,
        Command::Analyze(opts) => handle_analyze_command(opts),
        Command::Report(opts) => handle_report_command(opts),
        Command::Activate(opts) => handle_activate_command(opts),
        Command::Status(opts) => handle_status_command(opts),
    }
}

fn write_json_report(path: &Path, result: &ProjectResult) -> Result<(), String> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|err| format!("Failed to serialize result: {}", err))?;
    fs::write(path, json).map_err(|err| format!("Failed to write {}: {}", path.display(), err))
}

fn handle_analyze_command(opts: &AnalyzeOptions) -> DispatchResult {
    let root = opts.path.clone().unwrap_or_else(|| PathBuf::from("."));
    if !root.is_dir() {
        eprintln!("[csw][error] '{}' is not a directory", root.display());
        return DispatchResult::Exit(1);
    }

    let config = SweepConfig::load(&root);
    let mut ignore_patterns = config.scan.ignore.clone();
    ignore_patterns.extend(opts.ignore.iter().cloned());
    if opts.verbose && !ignore_patterns.is_empty() {
        eprintln!("[csw] {} extra ignore patterns", ignore_patterns.len());
    }

    let premium = license::is_premium();
    let mut max_files = opts.max_files;
    if max_files.is_none() && !premium {
        max_files = Some(FREE_TIER_MAX_FILES);
        eprintln!(
            "[csw] Free tier: analysis limited to {} files. Run `csw activate <key>` for unlimited scans.",
            FREE_TIER_MAX_FILES
        );
    }

    let spinner =
        if !opts.ci && opts.output == OutputKind::Console && std::io::stderr().is_terminal() {
            Some(Spinner::new(&format!("Analyzing {}...", root.display())))
        } else {
            None
        };

    let options = AnalysisOptions {
        ignore_patterns,
        max_files,
        min_block_lines: config.scan.min_block_lines,
    };
    let started = Instant::now();
    let outcome = analyzer::run_analysis(&root, &options);
    let result = outcome.result;

    if let Some(ref spinner) = spinner {
        let elapsed = format_elapsed(started.elapsed());
        let errors = result.summary.error_count;
        let warnings = result.summary.warning_count;
        if errors > 0 {
            spinner.finish_error(&format!(
                "Analysis found {}, {} in {}",
                format_count(errors, "error", "errors"),
                format_count(warnings, "warning", "warnings"),
                elapsed
            ));
        } else if warnings > 0 {
            spinner.finish_warning(&format!(
                "Analysis found {} in {}",
                format_count(warnings, "warning", "warnings"),
                elapsed
            ));
        } else {
            spinner.finish_success(&format!("Analysis complete in {}, no issues found", elapsed));
        }
    }

    if let Some(truncation) = outcome.truncation {
        eprintln!(
            "[csw][warn] File limit reached: analyzed {} of {} discovered files",
            truncation.kept, truncation.discovered
        );
    }

    if opts.fix {
        if premium {
            println!("Auto-fix: 0 fixes applied");
        } else {
            eprintln!("[csw] Auto-fix is a premium feature. Run `csw activate <key>` to enable it.");
        }
    }

    match opts.output {
        OutputKind::Console => {
            let color = if opts.ci { ColorMode::Never } else { opts.color };
            let painter = Painter::new(color);
            analyzer::report::render_console(&result, &painter);
        }
        OutputKind::Html => {
            let path = opts
                .output_file
                .clone()
                .unwrap_or_else(|| PathBuf::from("codesweep-report.html"));
            if let Err(err) = analyzer::html::render_html_report(&path, &result) {
                eprintln!("[csw][error] Failed to write {}: {}", path.display(), err);
                return DispatchResult::Exit(1);
            }
            println!("Report written to {}", path.display());
        }
        OutputKind::Json => {
            let path = opts
                .output_file
                .clone()
                .unwrap_or_else(|| PathBuf::from("codesweep-report.json"));
            if let Err(err) = write_json_report(&path, &result) {
                eprintln!("[csw][error] {}", err);
                return DispatchResult::Exit(1);
            }
            println!("Report written to {}", path.display());
        }
    }

    if let Err(err) = store::save_last_analysis(&result) {
        eprintln!("[csw][warn] Failed to persist analysis result: {}", err);
    }

    if opts.ci {
        if result.summary.error_count > 0 {
            return DispatchResult::Exit(1);
        }
        if result.summary.warning_count > 0 {
            return DispatchResult::Exit(2);
        }
    }

    DispatchResult::Exit(0)
}

fn handle_report_command(opts: &ReportOptions) -> DispatchResult {
    let result = match store::load_last_analysis() {
        Ok(result) => result,
        Err(err) => {
            eprintln!("[csw][error] {}", err);
            return DispatchResult::Exit(1);
        }
    };

    match opts.format {
        ReportFormat::Html => {
            let path = opts
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("codesweep-report.html"));
            if let Err(err) = analyzer::html::render_html_report(&path, &result) {
                eprintln!("[csw][error] Failed to write {}: {}", path.display(), err);
                return DispatchResult::Exit(1);
            }
            println!("Report written to {}", path.display());
        }
        ReportFormat::Json => {
            let path = opts
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("codesweep-report.json"));
            if let Err(err) = write_json_report(&path, &result) {
                eprintln!("[csw][error] {}", err);
                return DispatchResult::Exit(1);
            }
            println!("Report written to {}", path.display());
        }
        ReportFormat::Markdown => {
            eprintln!("[csw][error] Markdown reports are not implemented yet. Use html or json.");
            return DispatchResult::Exit(1);
        }
    }

    DispatchResult::Exit(0)
}

fn handle_activate_command(opts: &ActivateOptions) -> DispatchResult {
    let spinner = if std::io::stderr().is_terminal() {
        Some(Spinner::new("Contacting the license server..."))
    } else {
        None
    };

    match license::activate(&opts.key) {
        Ok(record) => {
            if let Some(spinner) = spinner {
                spinner.finish_success("License activated");
            } else {
                println!("License activated");
            }
            println!("Plan: {}", record.plan);
            match record.expire_date {
                Some(expire) => println!("Expires: {}", expire.to_rfc3339()),
                None => println!("Expires: never"),
            }
            DispatchResult::Exit(0)
        }
        Err(err) => {
            if let Some(spinner) = spinner {
                spinner.finish_clear();
            }
            eprintln!("[csw][error] Activation failed: {}", err);
            DispatchResult::Exit(1)
        }
    }
}

fn handle_status_command(opts: &StatusOptions) -> DispatchResult {
    let status = license::status();

    if opts.json {
        match serde_json::to_string_pretty(&status) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("[csw][error] Failed to serialize status: {}", err);
                return DispatchResult::Exit(1);
            }
        }
        return DispatchResult::Exit(0);
    }

    println!("License status");
    println!("  Plan: {}", status.plan);
    if let Some(ref key) = status.license_key {
        println!("  Key: {}", key);
        match status.expire_date {
            Some(expire) => println!("  Expires: {}", expire.to_rfc3339()),
            None => println!("  Expires: never"),
        }
    }
    println!(
        "  Premium: {}",
        if status.is_premium { "active" } else { "inactive" }
    );
    if status.license_key.is_none() {
        println!("  Run `csw activate <key>` to unlock premium features.");
    }

    DispatchResult::Exit(0)
}
