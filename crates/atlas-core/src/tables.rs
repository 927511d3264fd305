//! CSV loaders for the zone, rule and details tables
//!
//! Columns are located by header name, so column order is free and extra
//! columns are ignored. A missing required column is a schema error; bad cell
//! values are never errors at this stage.

use crate::details::DetailsRecord;
use crate::error::{AtlasError, Result};
use crate::models::{RuleRecord, RuleTable, ZoneRecord, ZoneTable};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const ZONES_TABLE: &str = "zones";
pub const RULES_TABLE: &str = "rules";
pub const DETAILS_TABLE: &str = "details";

pub const DEPT_COLUMN: &str = "Dept";
pub const NAME_COLUMN: &str = "Nom";
pub const WIND_COLUMN: &str = "Zone_Vent";
pub const SNOW_COLUMN: &str = "Zone_Neige";
pub const CONFIG_COLUMN: &str = "Config";
pub const ALT_3M_COLUMN: &str = "AltMax_3m";
pub const ALT_2_5M_COLUMN: &str = "AltMax_2_5m";

/// Header name → column index for one table
pub(crate) struct Columns {
    table: &'static str,
    index: HashMap<String, usize>,
}

impl Columns {
    pub(crate) fn from_headers(table: &'static str, headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim_start_matches('\u{feff}').trim().to_string(), i))
            .collect();
        Self { table, index }
    }

    pub(crate) fn require(&self, column: &str) -> Result<usize> {
        self.index
            .get(column)
            .copied()
            .ok_or_else(|| AtlasError::schema(self.table, column))
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = (&str, usize)> {
        self.index.iter().map(|(name, &i)| (name.as_str(), i))
    }
}

pub(crate) fn cell(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or("").to_string()
}

fn optional_cell(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Reads the zone table from a CSV file
pub fn read_zones<P: AsRef<Path>>(path: P) -> Result<ZoneTable> {
    let path = path.as_ref();
    let table = read_zones_from_reader(File::open(path)?)?;
    tracing::info!("Loaded {} départements from {}", table.len(), path.display());
    Ok(table)
}

/// Reads the zone table from any CSV source
pub fn read_zones_from_reader<R: Read>(reader: R) -> Result<ZoneTable> {
    let mut rdr = csv_reader(reader);
    let columns = Columns::from_headers(ZONES_TABLE, rdr.headers()?);

    let dept = columns.require(DEPT_COLUMN)?;
    let name = columns.require(NAME_COLUMN)?;
    let wind = columns.require(WIND_COLUMN)?;
    let snow = columns.require(SNOW_COLUMN)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(ZoneRecord {
            dept_code: cell(&record, dept),
            name: cell(&record, name),
            wind_zone: cell(&record, wind),
            snow_zone: cell(&record, snow),
        });
    }

    ZoneTable::new(records)
}

/// Reads the rule table from a CSV file
pub fn read_rules<P: AsRef<Path>>(path: P) -> Result<RuleTable> {
    let path = path.as_ref();
    let table = read_rules_from_reader(File::open(path)?)?;
    tracing::info!(
        "Loaded {} rules for {} configurations from {}",
        table.len(),
        table.config_counts().len(),
        path.display()
    );
    Ok(table)
}

/// Reads the rule table from any CSV source
///
/// Repeated (config, wind, snow) triples are kept but logged: the join uses
/// the first one in file order.
pub fn read_rules_from_reader<R: Read>(reader: R) -> Result<RuleTable> {
    let mut rdr = csv_reader(reader);
    let columns = Columns::from_headers(RULES_TABLE, rdr.headers()?);

    let config = columns.require(CONFIG_COLUMN)?;
    let wind = columns.require(WIND_COLUMN)?;
    let snow = columns.require(SNOW_COLUMN)?;
    let alt_3m = columns.require(ALT_3M_COLUMN)?;
    let alt_2_5m = columns.require(ALT_2_5M_COLUMN)?;

    let mut records = Vec::new();
    let mut seen: HashMap<(String, String, String), usize> = HashMap::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let rule = RuleRecord {
            config: cell(&record, config),
            wind_zone: cell(&record, wind),
            snow_zone: cell(&record, snow),
            alt_max_3m: optional_cell(&record, alt_3m),
            alt_max_2_5m: optional_cell(&record, alt_2_5m),
        };

        let key = (rule.config.clone(), rule.wind_zone.clone(), rule.snow_zone.clone());
        if let Some(first) = seen.get(&key) {
            tracing::warn!(
                "Duplicate rule for config '{}' zones ({}, {}) at row {}; row {} takes precedence",
                rule.config,
                rule.wind_zone,
                rule.snow_zone,
                line + 1,
                first + 1
            );
        } else {
            seen.insert(key, line);
        }

        records.push(rule);
    }

    Ok(RuleTable::new(records))
}

/// Reads the optional details table from a CSV file
pub fn read_details<P: AsRef<Path>>(path: P) -> Result<Vec<DetailsRecord>> {
    let path = path.as_ref();
    let records = read_details_from_reader(File::open(path)?)?;
    tracing::info!("Loaded details for {} configurations from {}", records.len(), path.display());
    Ok(records)
}

/// Reads the details table from any CSV source, keeping every column
pub fn read_details_from_reader<R: Read>(reader: R) -> Result<Vec<DetailsRecord>> {
    let mut rdr = csv_reader(reader);
    let columns = Columns::from_headers(DETAILS_TABLE, rdr.headers()?);
    let config = columns.require(CONFIG_COLUMN)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let fields: BTreeMap<String, String> = columns
            .names()
            .filter(|&(_, i)| i != config)
            .filter_map(|(name, i)| optional_cell(&record, i).map(|v| (name.to_string(), v)))
            .collect();

        records.push(DetailsRecord {
            config: cell(&record, config),
            fields,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Spacing;

    #[test]
    fn test_read_zones_any_column_order() {
        let data = "Zone_Neige,Nom,Dept,Zone_Vent,Extra\nA1, Ain ,01,2,x\n,Corse-du-Sud,2A,4,y\n";
        let table = read_zones_from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let ain = &table.records()[0];
        assert_eq!(ain.dept_code, "01");
        assert_eq!(ain.name, "Ain");
        assert_eq!(ain.wind_zone, "2");
        assert_eq!(ain.snow_zone, "A1");
        assert_eq!(table.records()[1].snow_zone, "");
    }

    #[test]
    fn test_read_zones_missing_column() {
        let data = "Dept,Nom,Zone_Vent\n01,Ain,2\n";
        match read_zones_from_reader(data.as_bytes()) {
            Err(AtlasError::Schema { table, column }) => {
                assert_eq!(table, "zones");
                assert_eq!(column, "Zone_Neige");
            }
            other => panic!("Expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_zones_strips_bom() {
        let data = "\u{feff}Dept,Nom,Zone_Vent,Zone_Neige\n01,Ain,2,A1\n";
        let table = read_zones_from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.records()[0].dept_code, "01");
    }

    #[test]
    fn test_read_rules_keeps_raw_values() {
        let data = "Config,Zone_Vent,Zone_Neige,AltMax_3m,AltMax_2_5m\n\
                    cfgX,2,A1,500,\n\
                    cfgX,3,A1,abc,200\n";
        let table = read_rules_from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.value_for(Spacing::ThreeMetres), Some("500"));
        assert_eq!(first.value_for(Spacing::TwoAndHalfMetres), None);
        assert_eq!(table.records()[1].value_for(Spacing::ThreeMetres), Some("abc"));
    }

    #[test]
    fn test_read_rules_missing_spacing_column() {
        let data = "Config,Zone_Vent,Zone_Neige,AltMax_3m\ncfgX,2,A1,500\n";
        let err = read_rules_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AtlasError::Schema { ref column, .. } if column == "AltMax_2_5m"));
    }

    #[test]
    fn test_read_details_keeps_free_columns() {
        let data = "Config,Type_Serre,Largeur,Version\nholyspirit4,Tunnel,9.60 m,\n";
        let records = read_details_from_reader(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].config, "holyspirit4");
        assert_eq!(records[0].fields["Type_Serre"], "Tunnel");
        assert!(!records[0].fields.contains_key("Version"));
    }
}
