use crate::models::{whole_metres, Label, ZoneRecord};
use serde::Serialize;

/// One département after the zone/rule join for a single query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRow {
    pub dept_code: String,
    pub name: String,
    pub wind_zone: String,
    pub snow_zone: String,
    /// Parsed altitude limit, absent when no rule admits the département
    pub selected_altitude: Option<f64>,
    pub label: Label,
}

impl JoinedRow {
    /// Altitudes too large for a label are dropped, keeping the row not admissible
    pub fn new(zone: &ZoneRecord, selected_altitude: Option<f64>) -> Self {
        let selected_altitude = selected_altitude.filter(|v| whole_metres(*v).is_some());
        Self {
            dept_code: zone.dept_code.clone(),
            name: zone.name.clone(),
            wind_zone: zone.wind_zone.clone(),
            snow_zone: zone.snow_zone.clone(),
            selected_altitude,
            label: Label::from_altitude(selected_altitude),
        }
    }

    /// Row for a département no rule matches
    pub fn not_admissible(zone: &ZoneRecord) -> Self {
        Self::new(zone, None)
    }

    pub fn is_admissible(&self) -> bool {
        self.label.is_admissible()
    }
}
