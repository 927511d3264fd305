//! Configs command implementation

use super::load_pipeline;
use crate::output::OutputWriter;
use crate::output_types::ConfigurationInfo;
use anyhow::Result;
use atlas_core::config::LayeredConfig;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let pipeline = load_pipeline(config)?;

    let configurations: Vec<ConfigurationInfo> = pipeline
        .rules()
        .config_counts()
        .into_iter()
        .map(|(name, rules)| ConfigurationInfo {
            name: name.to_string(),
            rules,
        })
        .collect();

    if output.is_json() {
        output.result(configurations)?;
    } else {
        output.section(format!("Configurations ({})", configurations.len()));
        output.table(configurations);
    }

    Ok(())
}
