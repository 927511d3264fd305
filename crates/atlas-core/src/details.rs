//! Descriptive metadata per configuration
//!
//! Pure display data for the details panel. The table is read behind a single
//! lock since it is the only table that could be swapped out-of-band.

use crate::error::Result;
use crate::tables;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Placeholder shown for a missing or blank detail value
pub const MISSING_VALUE: &str = "—";

/// Detail columns shown on the panel, in display order
pub const PANEL_FIELDS: [(&str, &str); 6] = [
    ("Type_Serre", "Type de serre"),
    ("Hauteur_Poteau", "Hauteur de poteau"),
    ("Largeur", "Largeur"),
    ("Toiture", "Toiture"),
    ("Facade", "Façade"),
    ("Traverse", "Traverse"),
];

/// One row of the details table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsRecord {
    pub config: String,
    /// Non-empty free-text columns other than `Config`
    pub fields: BTreeMap<String, String>,
}

/// Panel value for one detail column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailValue {
    pub key: &'static str,
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct DetailsTable {
    records: Mutex<Vec<DetailsRecord>>,
}

impl DetailsTable {
    pub fn new(records: Vec<DetailsRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Load the table, or an empty one if the file does not exist
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("Details file not found: {}", path.display());
            return Ok(Self::default());
        }

        let records = tables::read_details(path)?;
        Ok(Self::new(records))
    }

    /// Panel values for a configuration, first matching row wins
    pub fn detail_values(&self, config: &str) -> Vec<DetailValue> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let record = records.iter().find(|r| r.config == config);

        PANEL_FIELDS
            .iter()
            .map(|&(key, title)| DetailValue {
                key,
                title,
                value: record
                    .and_then(|r| r.fields.get(key))
                    .filter(|v| !v.trim().is_empty())
                    .cloned()
                    .unwrap_or_else(|| MISSING_VALUE.to_string()),
            })
            .collect()
    }

    /// Every non-empty column recorded for a configuration
    pub fn record(&self, config: &str) -> Option<DetailsRecord> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.iter().find(|r| r.config == config).cloned()
    }

    /// Replace the table contents, e.g. after the file changed on disk
    pub fn reload<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let fresh = tables::read_details(path)?;

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        *records = fresh;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
