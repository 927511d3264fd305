use crate::boundaries::dept_code;
use atlas_core::models::Label;
use atlas_core::pipeline::GRAY;
use atlas_core::QueryResult;
use geojson::{Feature, FeatureCollection};
use serde_json::Value as JsonValue;

pub const LABEL_PROPERTY: &str = "label";
pub const COLOR_PROPERTY: &str = "color";
pub const ALTITUDE_PROPERTY: &str = "altitude";
pub const NAME_PROPERTY: &str = "name";

/// Copy of `collection` with each feature carrying its query outcome
///
/// Features whose code has no joined row are marked not admissible.
pub fn decorate_boundaries(collection: &FeatureCollection, result: &QueryResult) -> FeatureCollection {
    let mut decorated = collection.clone();
    let mut unmatched = 0;

    for feature in &mut decorated.features {
        let row = dept_code(feature).and_then(|code| result.row(&code));
        match row {
            Some(row) => {
                set(feature, LABEL_PROPERTY, row.label.to_string());
                set(feature, COLOR_PROPERTY, result.color_of(row));
                set(feature, ALTITUDE_PROPERTY, row.selected_altitude);
                set(feature, NAME_PROPERTY, row.name.as_str());
            }
            None => {
                unmatched += 1;
                set(feature, LABEL_PROPERTY, Label::NotAdmissible.to_string());
                set(feature, COLOR_PROPERTY, GRAY);
                set(feature, ALTITUDE_PROPERTY, JsonValue::Null);
            }
        }
    }

    if unmatched > 0 {
        tracing::warn!(
            "{} boundary features have no département in the zone table",
            unmatched
        );
    }
    decorated
}

fn set(feature: &mut Feature, key: &str, value: impl Into<JsonValue>) {
    feature.set_property(key, value);
}
