use crate::models::Spacing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Altitude limits of one configuration for one (wind, snow) zone pair
///
/// Spacing values are kept as raw text; the pipeline decides what parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub config: String,
    pub wind_zone: String,
    pub snow_zone: String,
    pub alt_max_3m: Option<String>,
    pub alt_max_2_5m: Option<String>,
}

impl RuleRecord {
    /// Raw cell for the given spacing column
    pub fn value_for(&self, spacing: Spacing) -> Option<&str> {
        match spacing {
            Spacing::ThreeMetres => self.alt_max_3m.as_deref(),
            Spacing::TwoAndHalfMetres => self.alt_max_2_5m.as_deref(),
        }
    }
}

/// All rule records, in file order
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    records: Vec<RuleRecord>,
}

impl RuleTable {
    pub fn new(records: Vec<RuleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RuleRecord] {
        &self.records
    }

    /// Rules of one configuration, in file order
    pub fn for_config<'a>(&'a self, config: &'a str) -> impl Iterator<Item = &'a RuleRecord> + 'a {
        self.records.iter().filter(move |r| r.config == config)
    }

    /// Distinct configurations, sorted, with their rule counts
    pub fn config_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records.iter().filter(|r| !r.config.is_empty()) {
            *counts.entry(record.config.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct configurations, sorted
    pub fn configurations(&self) -> Vec<String> {
        self.config_counts().into_keys().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
