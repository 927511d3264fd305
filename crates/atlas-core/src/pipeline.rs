//! Query pipeline: join, legend order, colours and statistics
//!
//! [`AtlasPipeline`] owns the immutable reference tables and an optional
//! [`QueryCache`]. Each (configuration, spacing) query runs start to finish
//! synchronously; with the cache enabled repeated queries share one result.

pub mod cache;
pub mod join;
pub mod labels;
pub mod palette;
pub mod stats;

pub use cache::{CacheKey, CacheStats, QueryCache};
pub use join::{join_and_label, parse_altitude};
pub use labels::order_labels;
pub use palette::{assign_colors, ColorMap, LegendEntry, GRAY, PALETTE};
pub use stats::{compute_statistics, LabelCount, Stats};

use crate::config::LayeredConfig;
use crate::error::Result;
use crate::models::{JoinedRow, Label, RuleTable, Spacing, ZoneTable};
use crate::tables;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

/// Everything a renderer needs for one (configuration, spacing) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub config: String,
    pub spacing: Spacing,
    pub rows: Vec<JoinedRow>,
    pub labels: Vec<Label>,
    pub colors: ColorMap,
    pub stats: Stats,
}

impl QueryResult {
    /// Result with no rows, e.g. for an empty zone table
    pub fn empty(config: impl Into<String>, spacing: Spacing) -> Self {
        Self {
            config: config.into(),
            spacing,
            rows: Vec::new(),
            labels: Vec::new(),
            colors: ColorMap::default(),
            stats: compute_statistics(&[], &[]),
        }
    }

    /// Joined row of a département, if present
    pub fn row(&self, dept_code: &str) -> Option<&JoinedRow> {
        self.rows.iter().find(|r| r.dept_code == dept_code)
    }

    /// Colour of a département's label
    pub fn color_of(&self, row: &JoinedRow) -> &'static str {
        self.colors.get(&row.label).unwrap_or(GRAY)
    }
}

/// Cache settings of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    pub enabled: bool,
    pub capacity: usize,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 64,
        }
    }
}

impl CacheOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            capacity: 0,
        }
    }
}

pub struct AtlasPipeline {
    zones: ZoneTable,
    rules: RuleTable,
    cache: Option<Mutex<QueryCache>>,
}

impl AtlasPipeline {
    /// Create a pipeline over already loaded tables
    pub fn new(zones: ZoneTable, rules: RuleTable, cache: CacheOptions) -> Self {
        let cache = (cache.enabled && cache.capacity > 0)
            .then(|| Mutex::new(QueryCache::new(cache.capacity)));

        Self { zones, rules, cache }
    }

    /// Load the zone and rule tables named by the configuration
    pub fn load(config: &LayeredConfig) -> Result<Self> {
        let zones = tables::read_zones(config.zones_path())?;
        let rules = tables::read_rules(config.rules_path())?;

        Ok(Self::new(zones, rules, config.cache_options()))
    }

    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Configurations observed in the rule table, sorted
    pub fn configurations(&self) -> Vec<String> {
        self.rules.configurations()
    }

    /// Run the full pipeline without touching the cache
    pub fn compute(&self, config: &str, spacing: Spacing) -> QueryResult {
        let rows = join_and_label(self.zones.records(), self.rules.records(), config, spacing);
        let labels = order_labels(&rows);
        let colors = assign_colors(&labels);
        let stats = compute_statistics(&rows, &labels);

        tracing::debug!(
            "Query ({}, {}): {}/{} admissible, {} labels",
            config,
            spacing.column(),
            stats.admissible_count,
            stats.total,
            labels.len()
        );

        QueryResult {
            config: config.to_string(),
            spacing,
            rows,
            labels,
            colors,
            stats,
        }
    }

    /// Answer a query, reusing a cached result when one exists
    pub fn query(&self, config: &str, spacing: Spacing) -> Arc<QueryResult> {
        let Some(cache) = &self.cache else {
            return Arc::new(self.compute(config, spacing));
        };

        let key = CacheKey::new(config, spacing);
        if let Some(hit) = cache.lock().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return hit;
        }

        let result = Arc::new(self.compute(config, spacing));
        cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&result));
        result
    }

    /// Compute every configuration × spacing pair up front
    pub fn precompute(&self) -> usize {
        let configs = self.configurations();
        let mut computed = 0;
        for config in &configs {
            for spacing in Spacing::ALL {
                self.query(config, spacing);
                computed += 1;
            }
        }
        tracing::info!("Precomputed {} combinations", computed);
        computed
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache
            .as_ref()
            .map(|c| c.lock().unwrap_or_else(PoisonError::into_inner).stats())
    }
}
