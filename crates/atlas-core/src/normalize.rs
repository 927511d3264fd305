//! Conversion of the raw `Zonage_Departements` sheet into the zone table
//!
//! The sheet is read from its CSV export. Only the maximum zones are kept;
//! the `*_Orig` columns must be present but are not carried over.

use crate::error::{AtlasError, Result};
use crate::tables::{self, Columns, DEPT_COLUMN, NAME_COLUMN, SNOW_COLUMN, WIND_COLUMN};
use csv::WriterBuilder;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

pub const SHEET_TABLE: &str = "Zonage_Departements";

pub const SHEET_COLUMNS: [&str; 6] = [
    "Code_Dept",
    "Nom_Departement",
    "Zone_Neige_Max",
    "Zone_Vent_Max",
    "Zones_Neige_Orig",
    "Zones_Vent_Orig",
];

/// Snow-zone values that mean "no snow zone"
const NO_SNOW_ZONE: [&str; 2] = ["0", "Aucune"];

/// Outcome of one normalisation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub rows: usize,
    pub blank_codes: usize,
    /// Snow-zone value counts before and after mapping
    pub snow_before: BTreeMap<String, usize>,
    pub snow_after: BTreeMap<String, usize>,
}

pub fn normalize_snow_zone(value: &str) -> &str {
    if NO_SNOW_ZONE.contains(&value) {
        ""
    } else {
        value
    }
}

/// Reads the sheet export from `reader` and writes the zone table to `writer`
pub fn normalize_zone_sheet<R: Read, W: Write>(reader: R, writer: W) -> Result<NormalizeReport> {
    let mut csv_in = tables::csv_reader(reader);
    let columns = Columns::from_headers(SHEET_TABLE, csv_in.headers()?);

    let mut index = [0usize; 6];
    for (slot, name) in index.iter_mut().zip(SHEET_COLUMNS) {
        *slot = columns.require(name)?;
    }
    let [code_idx, name_idx, snow_idx, wind_idx, _, _] = index;

    let mut csv_out = WriterBuilder::new().from_writer(writer);
    csv_out.write_record([DEPT_COLUMN, NAME_COLUMN, WIND_COLUMN, SNOW_COLUMN])?;

    let mut report = NormalizeReport::default();
    for record in csv_in.records() {
        let record = record?;
        let code = tables::cell(&record, code_idx);
        let name = tables::cell(&record, name_idx);
        let wind = tables::cell(&record, wind_idx);
        let snow_raw = tables::cell(&record, snow_idx);
        let snow = normalize_snow_zone(&snow_raw);

        if code.is_empty() {
            report.blank_codes += 1;
        }
        *report.snow_before.entry(snow_raw.clone()).or_default() += 1;
        *report.snow_after.entry(snow.to_string()).or_default() += 1;

        csv_out.write_record([code.as_str(), name.as_str(), wind.as_str(), snow])?;
        report.rows += 1;
    }

    if report.rows == 0 {
        return Err(AtlasError::EmptyTable {
            table: SHEET_TABLE.to_string(),
        });
    }

    csv_out.flush()?;

    if report.blank_codes > 0 {
        tracing::warn!("{} row(s) with a blank département code", report.blank_codes);
    }
    tracing::info!("Normalised {} rows", report.rows);
    tracing::debug!(
        "Zone_Neige before: {:?}, after: {:?}",
        report.snow_before,
        report.snow_after
    );

    Ok(report)
}

/// File variant of [`normalize_zone_sheet`]; creates the output's parent directory
pub fn normalize_zone_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<NormalizeReport> {
    let output = output.as_ref();
    let source = File::open(input.as_ref())?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    // Normalise into memory first so a failed run leaves no partial file
    let mut buffer = Vec::new();
    let report = normalize_zone_sheet(source, &mut buffer)?;
    fs::write(output, buffer)?;

    tracing::info!("Wrote {}", output.display());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::read_zones_from_reader;
    use tempfile::TempDir;

    const SHEET: &str = "\
Code_Dept,Nom_Departement,Zone_Neige_Max,Zone_Vent_Max,Zones_Neige_Orig,Zones_Vent_Orig
01, Ain ,C1,2,C1/A2,2
13,Bouches-du-Rhône,0,3,0,3
2A,Corse-du-Sud,Aucune,4,Aucune,4
";

    #[test]
    fn test_normalize_maps_snow_zones() {
        let mut out = Vec::new();
        let report = normalize_zone_sheet(SHEET.as_bytes(), &mut out).unwrap();

        assert_eq!(report.rows, 3);
        assert_eq!(report.blank_codes, 0);
        assert_eq!(report.snow_after[""], 2);
        assert_eq!(report.snow_before["Aucune"], 1);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Dept,Nom,Zone_Vent,Zone_Neige"));
        assert_eq!(lines.next(), Some("01,Ain,2,C1"));
        assert_eq!(lines.next(), Some("13,Bouches-du-Rhône,3,"));
    }

    #[test]
    fn test_output_is_a_valid_zone_table() {
        let mut out = Vec::new();
        normalize_zone_sheet(SHEET.as_bytes(), &mut out).unwrap();

        let zones = read_zones_from_reader(out.as_slice()).unwrap();
        assert_eq!(zones.len(), 3);
        let corse = zones.get("2A").unwrap();
        assert_eq!(corse.wind_zone, "4");
        assert_eq!(corse.snow_zone, "");
    }

    #[test]
    fn test_missing_column() {
        let sheet = "Code_Dept,Nom_Departement,Zone_Neige_Max,Zone_Vent_Max\n01,Ain,C1,2\n";
        let err = normalize_zone_sheet(sheet.as_bytes(), Vec::new()).unwrap_err();
        assert!(
            matches!(err, AtlasError::Schema { ref column, .. } if column == "Zones_Neige_Orig")
        );
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = SHEET.lines().next().unwrap();
        let err = normalize_zone_sheet(sheet.as_bytes(), Vec::new()).unwrap_err();
        assert!(matches!(err, AtlasError::EmptyTable { .. }));
    }

    #[test]
    fn test_blank_codes_are_counted() {
        let sheet = format!("{} ,Nowhere,A1,1,A1,1\n", SHEET);
        let report = normalize_zone_sheet(sheet.as_bytes(), Vec::new()).unwrap();
        assert_eq!(report.rows, 4);
        assert_eq!(report.blank_codes, 1);
    }

    #[test]
    fn test_normalize_zone_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("sheet.csv");
        let output = dir.path().join("out/dept_zones_NORMALISE.csv");
        fs::write(&input, SHEET).unwrap();

        let report = normalize_zone_file(&input, &output).unwrap();
        assert_eq!(report.rows, 3);
        assert!(output.is_file());
    }

    #[test]
    fn test_failed_run_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("sheet.csv");
        let output = dir.path().join("zones.csv");
        fs::write(&input, "Code_Dept\n01\n").unwrap();

        assert!(normalize_zone_file(&input, &output).is_err());
        assert!(!output.exists());
    }
}
