use atlas_core::error::{AtlasError, Result};
use atlas_core::models::ZoneTable;
use geojson::{Feature, FeatureCollection, GeoJson};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Property holding the département code of a boundary feature
pub const CODE_PROPERTY: &str = "code";

/// Read a boundary FeatureCollection from disk
pub fn load_boundaries<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let collection = parse_boundaries(&content)?;
    tracing::info!(
        "Loaded {} boundary features from {}",
        collection.features.len(),
        path.display()
    );
    Ok(collection)
}

/// Parse boundary GeoJSON text; anything but a FeatureCollection is rejected
pub fn parse_boundaries(content: &str) -> Result<FeatureCollection> {
    let geojson: GeoJson = content.parse().map_err(|e| AtlasError::Boundaries {
        reason: format!("Failed to parse GeoJSON: {}", e),
    })?;

    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(AtlasError::Boundaries {
            reason: "expected a FeatureCollection, found a single Feature".to_string(),
        }),
        GeoJson::Geometry(_) => Err(AtlasError::Boundaries {
            reason: "expected a FeatureCollection, found a bare Geometry".to_string(),
        }),
    }
}

/// Département code of a feature, from `properties.code`
///
/// Numeric codes are accepted and rendered as text.
pub fn dept_code(feature: &Feature) -> Option<String> {
    match feature.property(CODE_PROPERTY)? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// How well a boundary file lines up with the zone table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoundaryReport {
    pub features: usize,
    pub without_code: usize,
    pub without_geometry: usize,
    /// Zone-table départements with no boundary feature
    pub missing_boundaries: Vec<String>,
    /// Boundary codes absent from the zone table
    pub unknown_codes: Vec<String>,
}

impl BoundaryReport {
    pub fn build(collection: &FeatureCollection, zones: &ZoneTable) -> Self {
        let mut report = BoundaryReport {
            features: collection.features.len(),
            ..Default::default()
        };

        let mut codes = BTreeSet::new();
        for feature in &collection.features {
            if feature.geometry.is_none() {
                report.without_geometry += 1;
            }
            match dept_code(feature) {
                Some(code) => {
                    codes.insert(code);
                }
                None => report.without_code += 1,
            }
        }

        report.missing_boundaries = zones
            .records()
            .iter()
            .filter(|z| !codes.contains(&z.dept_code))
            .map(|z| z.dept_code.clone())
            .collect();
        report.unknown_codes = codes
            .into_iter()
            .filter(|code| zones.get(code).is_none())
            .collect();

        report
    }

    /// True when every feature has a code and geometry and codes match both ways
    pub fn is_clean(&self) -> bool {
        self.without_code == 0
            && self.without_geometry == 0
            && self.missing_boundaries.is_empty()
            && self.unknown_codes.is_empty()
    }
}
