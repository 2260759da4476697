//! CLI command implementations

use std::path::Path;

use serde_json::json;

use crate::align::{self, AlignmentStrategy};
use crate::config::DiffConfig;
use crate::engine::Engine;
use crate::observability::{log_event_with_fields, Event};
use crate::present::{self, PresentationStrategy};
use crate::report::Changelog;

use super::args::{Command, OutputFormat};
use super::errors::{CliError, CliResult};
use super::io::{write_response, write_text};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Diff { config, format } => diff(&config, format),
        Command::Strategies => strategies(),
    }
}

/// Align, classify and print the changelog for one run file
pub fn diff(config_path: &Path, format: OutputFormat) -> CliResult<()> {
    let changelog = changelog_for(config_path)?;
    match format {
        OutputFormat::Json => write_response(serde_json::to_value(&changelog)?),
        OutputFormat::Text => write_text(&changelog.render_text()),
    }
}

/// Print the strategy catalog
pub fn strategies() -> CliResult<()> {
    write_response(json!({
        "alignment": align::algorithms::names(),
        "presentation": present::algorithms::names(),
    }))
}

/// Load a run file, run both phases and export the result
pub fn changelog_for(config_path: &Path) -> CliResult<Changelog> {
    let config = DiffConfig::load(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("path", &config_path.display().to_string()),
            ("alignment", &config.alignment.join(",")),
            ("presentation", &config.presentation.join(",")),
        ],
    );

    let mut engine = build_engine(&config)?;
    engine.run()?;
    engine.display()?;
    Ok(Changelog::from_engine(&engine)?)
}

/// An engine over the configured versions with the configured strategies
pub fn build_engine(config: &DiffConfig) -> CliResult<Engine> {
    let alignment = alignment_strategies(&config.alignment)?;
    let presentation = presentation_strategies(&config.presentation)?;

    let mut engine = Engine::from_files(&config.source, &config.target)?;
    engine.set_parameters(config.parameters.clone());
    engine.set_alignment_strategies(alignment);
    engine.set_presentation_strategies(presentation);
    Ok(engine)
}

fn alignment_strategies(names: &[String]) -> CliResult<Vec<Box<dyn AlignmentStrategy>>> {
    names
        .iter()
        .map(|name| {
            align::algorithms::by_name(name)
                .ok_or_else(|| CliError::unknown_strategy("alignment", name))
        })
        .collect()
}

fn presentation_strategies(names: &[String]) -> CliResult<Vec<Box<dyn PresentationStrategy>>> {
    names
        .iter()
        .map(|name| {
            present::algorithms::by_name(name)
                .ok_or_else(|| CliError::unknown_strategy("presentation", name))
        })
        .collect()
}
