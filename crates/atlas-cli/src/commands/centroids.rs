//! Centroids command implementation

use crate::output::OutputWriter;
use anyhow::{Context, Result};
use atlas_core::config::LayeredConfig;
use atlas_core::validation::{check_required_files, RequiredFile};
use atlas_geo::{compute_centroids, load_boundaries};
use tabled::Tabled;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let path = config.boundaries_path();
    check_required_files(
        &[RequiredFile::new(&path, "département boundaries")],
        config.max_file_size_mb.value,
    )?;

    let collection = load_boundaries(&path).context("Failed to read the boundary file")?;
    let centroids = compute_centroids(&collection);

    if output.is_json() {
        output.result(&centroids)?;
        return Ok(());
    }

    #[derive(Tabled)]
    struct CentroidRow {
        #[tabled(rename = "Dept")]
        dept: String,
        #[tabled(rename = "Lat")]
        lat: String,
        #[tabled(rename = "Lon")]
        lon: String,
    }

    let coord = |v: Option<f64>| v.map_or_else(|| "—".to_string(), |v| format!("{:.4}", v));
    let located = centroids.iter().filter(|c| c.is_located()).count();
    let rows: Vec<CentroidRow> = centroids
        .iter()
        .map(|c| CentroidRow {
            dept: c.dept.clone(),
            lat: coord(c.lat),
            lon: coord(c.lon),
        })
        .collect();

    output.section(format!("Representative points ({} of {} located)", located, rows.len()));
    output.table(rows);

    Ok(())
}
