//! Details command implementation

use crate::cli::DetailsArgs;
use crate::output::OutputWriter;
use anyhow::Result;
use atlas_core::config::LayeredConfig;
use atlas_core::details::DetailsTable;

pub fn execute(args: DetailsArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let table = DetailsTable::load_optional(config.details_path())?;
    let values = table.detail_values(&args.config);

    if output.is_json() {
        output.result(serde_json::json!({
            "config": &args.config,
            "details": values,
            "record": table.record(&args.config),
        }))?;
        return Ok(());
    }

    output.section(format!("Configuration {}", args.config));
    for value in &values {
        output.kv(value.title, &value.value);
    }

    if let Some(record) = table.record(&args.config) {
        let extra: Vec<_> = record
            .fields
            .iter()
            .filter(|(key, _)| values.iter().all(|v| v.key != key.as_str()))
            .collect();
        if !extra.is_empty() {
            output.section("Other fields");
            for (key, value) in extra {
                output.kv(key, value);
            }
        }
    } else {
        output.info(format!("No details recorded for '{}'", args.config));
    }

    Ok(())
}
