//! Command implementations

mod centroids;
mod check;
mod config;
mod configs;
mod details;
mod export;
mod map;
mod normalize;
mod preview;

use crate::cli::{Cli, Commands};
use crate::config_loader;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use atlas_core::config::LayeredConfig;
use atlas_core::validation::{check_required_files, RequiredFile};
use atlas_core::AtlasPipeline;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = config_loader::load_config_with_overrides(&cli)?;

    match cli.command {
        Commands::Check(args) => check::execute(args, &config, &output),
        Commands::Configs => configs::execute(&config, &output),
        Commands::Map(args) => map::execute(args, &config, &output),
        Commands::Preview(args) => preview::execute(args, &config, &output),
        Commands::Details(args) => details::execute(args, &config, &output),
        Commands::Centroids => centroids::execute(&config, &output),
        Commands::Export(args) => export::execute(args, &config, &output),
        Commands::Normalize(args) => normalize::execute(args, &config, &output),
        Commands::Config => config::execute(&config, &output),
    }
}

/// Validate the zone and rule files, then build the pipeline
fn load_pipeline(config: &LayeredConfig) -> Result<AtlasPipeline> {
    let files = [
        RequiredFile::new(config.zones_path(), "regulatory zones by département"),
        RequiredFile::new(config.rules_path(), "altitude rules"),
    ];
    check_required_files(&files, config.max_file_size_mb.value)?;

    AtlasPipeline::load(config).context("Failed to load the zone and rule tables")
}

/// Warn when a configuration has no rules at all
fn warn_if_unknown(pipeline: &AtlasPipeline, name: &str, output: &OutputWriter) {
    if !pipeline.configurations().iter().any(|c| c == name) {
        output.warning(format!(
            "No rules for configuration '{}'. Known configurations: {}",
            name,
            pipeline.configurations().join(", ")
        ));
    }
}
