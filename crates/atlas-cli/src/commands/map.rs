//! Map command implementation

use super::{load_pipeline, warn_if_unknown};
use crate::cli::MapArgs;
use crate::output::OutputWriter;
use crate::output_types::{LegendItem, MapOutput, RowDisplay};
use anyhow::Result;
use atlas_core::config::LayeredConfig;

pub fn execute(args: MapArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    warn_if_unknown(&pipeline, &args.config, output);

    let result = pipeline.query(&args.config, args.spacing);
    let legend = LegendItem::from_result(&result);
    let stats = &result.stats;

    if output.is_json() {
        output.result(MapOutput {
            config: &result.config,
            spacing: result.spacing.display_name(),
            column: result.spacing.column(),
            legend,
            stats,
            rows: &result.rows,
        })?;
        return Ok(());
    }

    output.section(format!(
        "{} · entraxe {}",
        result.config,
        result.spacing.display_name()
    ));

    if stats.no_match {
        output.warning(format!(
            "No rule matches any département for '{}' at {}",
            result.config,
            result.spacing.display_name()
        ));
    }

    output.section("Legend");
    for item in &legend {
        output.swatch(
            item.color,
            format!("{:<16} {:>3} départements ({}%)", item.label, item.count, item.pct),
        );
    }

    output.section("Coverage");
    output.kv("Départements", stats.total);
    output.kv(
        "Admissible",
        format!("{} ({}%)", stats.admissible_count, stats.admissible_pct),
    );
    output.kv(
        "Non admissible",
        format!("{} ({}%)", stats.non_admissible_count, stats.non_admissible_pct),
    );

    let shown = if args.all {
        result.rows.len()
    } else {
        args.rows.min(result.rows.len())
    };
    output.section(format!("Départements ({} of {})", shown, result.rows.len()));
    output.table(result.rows[..shown].iter().map(RowDisplay::from).collect());

    Ok(())
}
