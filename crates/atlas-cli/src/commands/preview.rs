//! Preview command implementation

use super::{load_pipeline, warn_if_unknown};
use crate::cli::PreviewArgs;
use crate::output::OutputWriter;
use crate::output_types::{PreviewOutput, RowDisplay, SpacingPreview};
use anyhow::Result;
use atlas_core::config::LayeredConfig;
use atlas_core::models::Spacing;

pub fn execute(args: PreviewArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    warn_if_unknown(&pipeline, &args.config, output);

    let results: Vec<_> = Spacing::ALL
        .into_iter()
        .map(|spacing| pipeline.query(&args.config, spacing))
        .collect();

    let spacings: Vec<SpacingPreview> = results
        .iter()
        .map(|result| SpacingPreview {
            spacing: result.spacing.display_name(),
            column: result.spacing.column(),
            total: result.stats.total,
            admissible: result.stats.admissible_count,
            non_admissible: result.stats.non_admissible_count,
            rows: &result.rows[..args.show.min(result.rows.len())],
        })
        .collect();

    if output.is_json() {
        output.result(PreviewOutput {
            config: &args.config,
            spacings,
        })?;
        return Ok(());
    }

    for preview in spacings {
        output.section(format!("{} — {}", args.config, preview.spacing));
        println!(
            "Lignes: {} | Admissibles: {} | Non admissibles: {}",
            preview.total, preview.admissible, preview.non_admissible
        );
        output.table(preview.rows.iter().map(RowDisplay::from).collect());
    }

    Ok(())
}
