//! CLI module for the subcommand-based interface.
//!
//! This module provides the `csw <command> [options]` interface shared by
//! the `codesweep` and `csw` binaries.
//!
//! # Module Structure
//!
//! - [`command`] - Command enum and option types (source of truth)
//! - [`parser`] - Subcommand parser
//! - [`dispatch`] - Command dispatcher and handlers
//! - [`entrypoint`] - Shared main() body for both binaries

pub mod command;
pub mod dispatch;
pub mod entrypoint;
pub mod parser;

// Re-export main types for convenience
pub use command::{
    ActivateOptions, AnalyzeOptions, Command, HelpOptions, ReportOptions, StatusOptions,
};
pub use dispatch::{DispatchResult, dispatch_command};
pub use parser::{is_subcommand, parse_command};
