use crate::error::{AtlasError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Regulatory wind and snow classification of one département
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub dept_code: String,
    pub name: String,
    pub wind_zone: String,
    pub snow_zone: String,
}

impl ZoneRecord {
    pub fn new(
        dept_code: impl Into<String>,
        name: impl Into<String>,
        wind_zone: impl Into<String>,
        snow_zone: impl Into<String>,
    ) -> Self {
        Self {
            dept_code: dept_code.into(),
            name: name.into(),
            wind_zone: wind_zone.into(),
            snow_zone: snow_zone.into(),
        }
    }
}

/// Zone table keyed by unique département code, in file order
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    records: Vec<ZoneRecord>,
}

impl ZoneTable {
    /// Build a table, rejecting duplicate département codes
    pub fn new(records: Vec<ZoneRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.dept_code.as_str()) {
                return Err(AtlasError::DuplicateDepartment {
                    code: record.dept_code.clone(),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ZoneRecord] {
        &self.records
    }

    pub fn get(&self, dept_code: &str) -> Option<&ZoneRecord> {
        self.records.iter().find(|r| r.dept_code == dept_code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
