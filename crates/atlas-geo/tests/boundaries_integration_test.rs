//! Integration tests for boundary loading and choropleth decoration

use atlas_core::error::AtlasError;
use atlas_core::models::{RuleRecord, RuleTable, Spacing, ZoneRecord, ZoneTable};
use atlas_core::pipeline::{AtlasPipeline, CacheOptions};
use atlas_geo::{compute_centroids, decorate_boundaries, load_boundaries, BoundaryReport};
use std::fs;
use tempfile::TempDir;

const BOUNDARIES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {"code": "01", "nom": "Ain"},
     "geometry": {"type": "Polygon", "coordinates": [[[4.7, 45.6], [6.0, 45.6], [6.0, 46.5], [4.7, 46.5], [4.7, 45.6]]]}},
    {"type": "Feature", "properties": {"code": "2A", "nom": "Corse-du-Sud"},
     "geometry": {"type": "MultiPolygon", "coordinates": [
        [[[8.5, 41.4], [9.4, 41.4], [9.4, 42.3], [8.5, 42.3], [8.5, 41.4]]],
        [[[9.0, 41.3], [9.1, 41.3], [9.1, 41.35], [9.0, 41.3]]]
     ]}}
  ]
}"#;

fn pipeline() -> AtlasPipeline {
    let zones = ZoneTable::new(vec![
        ZoneRecord::new("01", "Ain", "2", "A1"),
        ZoneRecord::new("2A", "Corse-du-Sud", "4", ""),
    ])
    .unwrap();
    let rules = RuleTable::new(vec![
        RuleRecord {
            config: "holyspirit4".to_string(),
            wind_zone: "2".to_string(),
            snow_zone: "A1".to_string(),
            alt_max_3m: Some("900".to_string()),
            alt_max_2_5m: Some("1100".to_string()),
        },
        RuleRecord {
            config: "holyspirit4".to_string(),
            wind_zone: "4".to_string(),
            snow_zone: String::new(),
            alt_max_3m: Some("200".to_string()),
            alt_max_2_5m: None,
        },
    ]);
    AtlasPipeline::new(zones, rules, CacheOptions::default())
}

#[test]
fn test_load_and_decorate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("departements.geojson");
    fs::write(&path, BOUNDARIES).unwrap();

    let collection = load_boundaries(&path).unwrap();
    let pipeline = pipeline();

    let report = BoundaryReport::build(&collection, pipeline.zones());
    assert!(report.is_clean());

    let result = pipeline.query("holyspirit4", Spacing::TwoAndHalfMetres);
    let decorated = decorate_boundaries(&collection, &result);

    let label = |i: usize| {
        decorated.features[i]
            .property("label")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };
    assert_eq!(label(0).as_deref(), Some("1100 m"));
    assert_eq!(label(1).as_deref(), Some("Non admissible"));

    // Decorated output is still valid GeoJSON
    let text = serde_json::to_string(&decorated).unwrap();
    assert_eq!(atlas_geo::parse_boundaries(&text).unwrap().features.len(), 2);
}

#[test]
fn test_centroids_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("departements.geojson");
    fs::write(&path, BOUNDARIES).unwrap();

    let centroids = compute_centroids(&load_boundaries(&path).unwrap());

    if cfg!(feature = "geometry") {
        assert_eq!(centroids.len(), 2);
        assert!(centroids.iter().all(|c| c.is_located()));
        assert_eq!(centroids[1].dept, "2A");
    } else {
        assert!(centroids.is_empty());
    }
}

#[test]
fn test_missing_file() {
    let err = load_boundaries("/nonexistent/departements.geojson").unwrap_err();
    assert!(matches!(err, AtlasError::Io(_)));
}
