//! Export command implementation

use super::{load_pipeline, warn_if_unknown};
use crate::cli::ExportArgs;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;
use anyhow::{Context, Result};
use atlas_core::config::LayeredConfig;
use atlas_core::models::JoinedRow;
use atlas_core::QueryResult;
use atlas_geo::{decorate_boundaries, load_boundaries};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn execute(args: ExportArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    warn_if_unknown(&pipeline, &args.config, output);

    let result = pipeline.query(&args.config, args.spacing);
    let collection =
        load_boundaries(config.boundaries_path()).context("Failed to read the boundary file")?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    let stem = format!("{}_{}", file_stem(&args.config), result.spacing.column());
    let csv_path = args.out.join(format!("{}.csv", stem));
    let geojson_path = args.out.join(format!("{}.geojson", stem));

    write_rows_csv(&csv_path, &result)?;

    let decorated = decorate_boundaries(&collection, &result);
    let mut file = File::create(&geojson_path)
        .with_context(|| format!("Failed to create {}", geojson_path.display()))?;
    serde_json::to_writer(&mut file, &decorated)?;
    file.flush()?;

    tracing::info!("Exported {} rows to {}", result.rows.len(), args.out.display());

    let export = ExportOutput {
        config: args.config.clone(),
        spacing: result.spacing.display_name(),
        rows_csv: csv_path.display().to_string(),
        choropleth: geojson_path.display().to_string(),
        rows: result.rows.len(),
        features: decorated.features.len(),
    };

    if output.is_json() {
        output.result(export)?;
    } else {
        output.success(format!(
            "Exported {} · {} ({} départements, {} boundary features)",
            export.config, export.spacing, export.rows, export.features
        ));
        output.kv("Rows", &export.rows_csv);
        output.kv("Choropleth", &export.choropleth);
    }

    Ok(())
}

/// Row export, one line per département with its legend colour
fn write_rows_csv(path: &Path, result: &QueryResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record([
        "Dept", "Nom", "Zone_Vent", "Zone_Neige", "AltMax_sel", "Label", "Couleur",
    ])?;

    for row in &result.rows {
        let altitude = altitude_cell(row);
        let label = row.label.to_string();
        writer.write_record([
            row.dept_code.as_str(),
            row.name.as_str(),
            row.wind_zone.as_str(),
            row.snow_zone.as_str(),
            altitude.as_str(),
            label.as_str(),
            result.color_of(row),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn altitude_cell(row: &JoinedRow) -> String {
    row.selected_altitude.map(|v| v.to_string()).unwrap_or_default()
}

/// Configuration name made safe for a file name
fn file_stem(config: &str) -> String {
    config
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
