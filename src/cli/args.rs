//! CLI argument definitions using clap
//!
//! Commands:
//! - ontodiff diff --config <path> [--format json|text]
//! - ontodiff strategies

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ontodiff - align two ontology versions and report what changed
#[derive(Parser, Debug)]
#[command(name = "ontodiff")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Align the configured versions and print the changelog
    Diff {
        /// Path to the run configuration
        #[arg(long, default_value = "./ontodiff.json")]
        config: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// List the bundled alignment and presentation strategies
    Strategies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
