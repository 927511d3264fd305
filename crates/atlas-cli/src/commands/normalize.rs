//! Normalize command implementation

use crate::cli::NormalizeArgs;
use crate::output::OutputWriter;
use crate::output_types::NormalizeOutput;
use anyhow::{Context, Result};
use atlas_core::config::LayeredConfig;
use atlas_core::normalize::normalize_zone_file;

pub fn execute(args: NormalizeArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let target = args.output.unwrap_or_else(|| config.zones_path());

    let report = normalize_zone_file(&args.input, &target)
        .with_context(|| format!("Failed to normalise {}", args.input.display()))?;

    let result = NormalizeOutput {
        input: args.input.display().to_string(),
        output: target.display().to_string(),
        rows: report.rows,
        blank_codes: report.blank_codes,
    };

    if output.is_json() {
        output.result(result)?;
        return Ok(());
    }

    output.success(format!("Wrote {} ({} rows)", result.output, result.rows));
    if result.blank_codes > 0 {
        output.warning(format!("{} rows have a blank département code", result.blank_codes));
    }

    output.section("Zone_Neige values");
    for (value, count) in &report.snow_after {
        let shown = if value.is_empty() { "(none)" } else { value.as_str() };
        output.kv(shown, count);
    }

    Ok(())
}
