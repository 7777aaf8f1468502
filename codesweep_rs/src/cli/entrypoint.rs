//! Shared CLI entry point for both `codesweep` and `csw` binaries.
//!
//! This module contains the parse/dispatch wiring so that both binaries
//! share a single implementation.

use crate::cli::{self, Command, DispatchResult};

/// Options controlling binary-specific behavior.
pub struct EntryOptions {
    /// Name shown in `--version` output (e.g. "codesweep" or "csw").
    pub binary_name: &'static str,
    /// Usage text for a bare invocation.
    pub usage: &'static str,
}

/// Run the CLI with the given options. This is the shared main() body.
pub fn run(opts: &EntryOptions) -> std::io::Result<()> {
    // nosemgrep: rust.lang.security.args.args
    // SECURITY: args() is used only for CLI flag parsing (paths, --ci, etc.),
    // not for security decisions. The executable path (args[0]) is skipped.
    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    match cli::parse_command(&raw_args) {
        Ok(Some(command)) => match cli::dispatch_command(&command) {
            DispatchResult::ShowHelp => {
                println!("{}", Command::format_help());
                Ok(())
            }
            DispatchResult::ShowCommandHelp(text) => {
                println!("{}", text);
                Ok(())
            }
            DispatchResult::ShowVersion => {
                println!("{} {}", opts.binary_name, env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            DispatchResult::Exit(code) => std::process::exit(code),
        },
        Ok(None) => {
            println!("{}", opts.usage);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
