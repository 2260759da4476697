//! CLI module
//!
//! Provides command-line interface for:
//! - diff: align two ontology versions from a run file and print the changelog
//! - strategies: list the bundled strategies

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, OutputFormat};
pub use commands::{build_engine, changelog_for, diff, run, run_command, strategies};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response, write_text};
