//! Command parser for the subcommand-based CLI interface.
//!
//! This module parses `csw <command> [options]` style invocations with an
//! index loop per subcommand. Per-command `--help` is surfaced through the
//! `Err` channel as the help text.

use std::path::PathBuf;

use strsim::levenshtein;

use super::command::*;
use crate::types::{ColorMode, OutputKind, ReportFormat};

/// Known subcommand names for the CLI interface.
const SUBCOMMANDS: &[&str] = &["analyze", "report", "activate", "status", "help"];

/// Check if an argument is a known subcommand.
pub fn is_subcommand(arg: &str) -> bool {
    SUBCOMMANDS.contains(&arg)
}

/// Suggest a similar command using Levenshtein distance.
/// Returns Some(suggestion) if a close match is found (distance <= 2).
fn suggest_similar_command(input: &str) -> Option<&'static str> {
    let input_lower = input.to_lowercase();
    let mut best_match: Option<(&str, usize)> = None;

    for &cmd in SUBCOMMANDS {
        let distance = levenshtein(&input_lower, cmd);
        if distance <= 2 {
            match best_match {
                Some((_, best_dist)) if distance >= best_dist => {}
                _ => best_match = Some((cmd, distance)),
            }
        }
    }

    best_match.map(|(cmd, _)| cmd)
}

/// Parse command-line arguments into a Command.
///
/// Returns `Ok(None)` for a bare invocation (no arguments); the entry point
/// prints usage in that case. Errors carry the message (or help text) to
/// print on stderr.
pub fn parse_command(args: &[String]) -> Result<Option<Command>, String> {
    if args.is_empty() {
        return Ok(None);
    }

    let first = args[0].as_str();
    match first {
        "--help" | "-h" => return Ok(Some(Command::Help(HelpOptions::default()))),
        "--version" | "-V" => return Ok(Some(Command::Version)),
        _ if first.starts_with('-') => {
            return Err(format!(
                "Unknown option '{}'. Run 'csw --help' for usage.",
                first
            ));
        }
        _ => {}
    }

    let rest = &args[1..];

    // Per-command help goes out through the Err channel
    if let Some(help) = Command::help_for(first)
        && rest.iter().any(|a| a == "--help" || a == "-h")
    {
        return Err(help.to_string());
    }

    let command = match first {
        "analyze" => parse_analyze_command(rest)?,
        "report" => parse_report_command(rest)?,
        "activate" => parse_activate_command(rest)?,
        "status" => parse_status_command(rest)?,
        "help" => parse_help_command(rest),
        unknown => {
            let suggestion = suggest_similar_command(unknown);
            return Err(format!(
                "Unknown command '{}'. {}Run 'csw --help' for available commands.",
                unknown,
                suggestion.map_or(String::new(), |s| format!("Did you mean: {}? ", s))
            ));
        }
    };

    Ok(Some(command))
}

// ============================================================================
// Helper parsers
// ============================================================================

fn parse_color_mode(value: &str) -> Result<ColorMode, String> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(ColorMode::Auto),
        "always" | "yes" | "true" => Ok(ColorMode::Always),
        "never" | "no" | "false" => Ok(ColorMode::Never),
        _ => Err(format!(
            "Invalid color mode '{}'. Use: auto, always, or never.",
            value
        )),
    }
}

fn parse_output_kind(value: &str) -> Result<OutputKind, String> {
    match value.to_lowercase().as_str() {
        "console" => Ok(OutputKind::Console),
        "html" => Ok(OutputKind::Html),
        "json" => Ok(OutputKind::Json),
        _ => Err(format!(
            "Invalid output target '{}'. Use: console, html, or json.",
            value
        )),
    }
}

fn parse_report_format(value: &str) -> Result<ReportFormat, String> {
    match value.to_lowercase().as_str() {
        "html" => Ok(ReportFormat::Html),
        "json" => Ok(ReportFormat::Json),
        "markdown" | "md" => Ok(ReportFormat::Markdown),
        _ => Err(format!(
            "Invalid report format '{}'. Use: html, json, or markdown.",
            value
        )),
    }
}

fn require_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(|v| v.as_str())
        .ok_or_else(|| format!("Option '{}' requires a value.", flag))
}

fn parse_analyze_command(args: &[String]) -> Result<Command, String> {
    let mut opts = AnalyzeOptions::default();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-o" | "--output" => {
                opts.output = parse_output_kind(require_value(args, i, arg)?)?;
                i += 2;
            }
            "-f" | "--output-file" => {
                opts.output_file = Some(PathBuf::from(require_value(args, i, arg)?));
                i += 2;
            }
            "-I" | "--ignore" => {
                let patterns = require_value(args, i, arg)?;
                opts.ignore.extend(
                    patterns
                        .split(',')
                        .map(|p| p.trim().to_string())
                        .filter(|p| !p.is_empty()),
                );
                i += 2;
            }
            "--max-files" => {
                let value = require_value(args, i, arg)?;
                opts.max_files = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("Invalid value '{}' for '--max-files'.", value))?,
                );
                i += 2;
            }
            "--fix" => {
                opts.fix = true;
                i += 1;
            }
            "--ci" => {
                opts.ci = true;
                i += 1;
            }
            "--color" => {
                if let Some(value) = args.get(i + 1) {
                    opts.color = parse_color_mode(value)?;
                    i += 2;
                } else {
                    opts.color = ColorMode::Always;
                    i += 1;
                }
            }
            _ if arg.starts_with("--color=") => {
                let value = arg.trim_start_matches("--color=");
                opts.color = parse_color_mode(value)?;
                i += 1;
            }
            "--verbose" => {
                opts.verbose = true;
                i += 1;
            }
            _ if !arg.starts_with('-') => {
                if opts.path.is_some() {
                    return Err(format!(
                        "'analyze' takes a single path, got extra argument '{}'.",
                        arg
                    ));
                }
                opts.path = Some(PathBuf::from(arg));
                i += 1;
            }
            _ => {
                return Err(format!("Unknown option '{}' for 'analyze' command.", arg));
            }
        }
    }

    Ok(Command::Analyze(opts))
}

fn parse_report_command(args: &[String]) -> Result<Command, String> {
    let mut opts = ReportOptions::default();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--format" => {
                opts.format = parse_report_format(require_value(args, i, arg)?)?;
                i += 2;
            }
            "-o" | "--output" => {
                opts.output = Some(PathBuf::from(require_value(args, i, arg)?));
                i += 2;
            }
            _ => {
                return Err(format!("Unknown option '{}' for 'report' command.", arg));
            }
        }
    }

    Ok(Command::Report(opts))
}

fn parse_activate_command(args: &[String]) -> Result<Command, String> {
    let mut key: Option<String> = None;

    for arg in args {
        if arg.starts_with('-') {
            return Err(format!("Unknown option '{}' for 'activate' command.", arg));
        }
        if key.is_some() {
            return Err(format!(
                "'activate' takes a single license key, got extra argument '{}'.",
                arg
            ));
        }
        key = Some(arg.clone());
    }

    let key = key.ok_or_else(|| {
        "'activate' requires a license key, e.g.: csw activate CSW-XXXX-XXXX-XXXX".to_string()
    })?;

    Ok(Command::Activate(ActivateOptions { key }))
}

fn parse_status_command(args: &[String]) -> Result<Command, String> {
    let mut opts = StatusOptions::default();

    for arg in args {
        match arg.as_str() {
            "--json" => opts.json = true,
            _ => {
                return Err(format!("Unknown option '{}' for 'status' command.", arg));
            }
        }
    }

    Ok(Command::Status(opts))
}

fn parse_help_command(args: &[String]) -> Command {
    let command = args.iter().find(|a| !a.starts_with('-')).cloned();
    Command::Help(HelpOptions { command })
}

// ============================================================================
// Tests
// ============================================================================
