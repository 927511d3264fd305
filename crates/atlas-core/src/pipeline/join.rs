use crate::models::{whole_metres, JoinedRow, RuleRecord, Spacing, ZoneRecord};
use std::collections::HashMap;

/// Numeric reading of a raw rule cell
///
/// Total over all inputs: blank, non-numeric and non-finite text is `None`,
/// as are values too large to label in whole metres.
pub fn parse_altitude(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| whole_metres(*v).is_some())
}

/// Join every département to the rules of `config` for one spacing
///
/// Returns exactly one row per zone record, in zone order. Départements with
/// no matching rule, or whose rule value does not parse, are not admissible.
/// When several rules share a (wind, snow) pair the first one wins.
pub fn join_and_label(
    zones: &[ZoneRecord],
    rules: &[RuleRecord],
    config: &str,
    spacing: Spacing,
) -> Vec<JoinedRow> {
    let mut by_zone: HashMap<(&str, &str), &RuleRecord> = HashMap::new();
    for rule in rules.iter().filter(|r| r.config == config) {
        by_zone
            .entry((rule.wind_zone.as_str(), rule.snow_zone.as_str()))
            .or_insert(rule);
    }

    if by_zone.is_empty() {
        tracing::debug!("No rules for config '{}', every département is not admissible", config);
        return zones.iter().map(JoinedRow::not_admissible).collect();
    }

    zones
        .iter()
        .map(|zone| {
            let altitude = by_zone
                .get(&(zone.wind_zone.as_str(), zone.snow_zone.as_str()))
                .and_then(|rule| rule.value_for(spacing))
                .and_then(parse_altitude);
            JoinedRow::new(zone, altitude)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Label, NOT_ADMISSIBLE};

    fn zone(code: &str, wind: &str, snow: &str) -> ZoneRecord {
        ZoneRecord::new(code, format!("Dept {}", code), wind, snow)
    }

    fn rule(config: &str, wind: &str, snow: &str, alt_3m: &str, alt_2_5m: &str) -> RuleRecord {
        let cell = |v: &str| (!v.is_empty()).then(|| v.to_string());
        RuleRecord {
            config: config.to_string(),
            wind_zone: wind.to_string(),
            snow_zone: snow.to_string(),
            alt_max_3m: cell(alt_3m),
            alt_max_2_5m: cell(alt_2_5m),
        }
    }

    #[test]
    fn test_parse_altitude() {
        assert_eq!(parse_altitude("500"), Some(500.0));
        assert_eq!(parse_altitude(" 750.5 "), Some(750.5));
        assert_eq!(parse_altitude("1e3"), Some(1000.0));
        assert_eq!(parse_altitude(""), None);
        assert_eq!(parse_altitude("abc"), None);
        assert_eq!(parse_altitude("500,5"), None);
        assert_eq!(parse_altitude("NaN"), None);
        assert_eq!(parse_altitude("inf"), None);
        assert_eq!(parse_altitude("1e20"), None);
        assert_eq!(parse_altitude("-1e25"), None);
    }

    #[test]
    fn test_huge_altitudes_are_not_admissible() {
        let zones = vec![zone("01", "2", "A1"), zone("02", "2", "A2")];
        let rules = vec![
            rule("cfgX", "2", "A1", "1e20", ""),
            rule("cfgX", "2", "A2", "1e25", ""),
        ];

        let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);

        assert!(rows.iter().all(|r| r.selected_altitude.is_none()));
        assert!(rows.iter().all(|r| r.label == Label::NotAdmissible));
    }

    #[test]
    fn test_single_match() {
        let zones = vec![zone("01", "2", "A1")];
        let rules = vec![rule("cfgX", "2", "A1", "500", "")];

        let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].selected_altitude, Some(500.0));
        assert_eq!(rows[0].label.to_string(), "500 m");
    }

    #[test]
    fn test_unknown_config_is_not_admissible() {
        let zones = vec![zone("01", "2", "A1"), zone("02", "1", "A2")];
        let rules = vec![rule("cfgX", "2", "A1", "500", "")];

        let rows = join_and_label(&zones, &rules, "cfgY", Spacing::ThreeMetres);

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.selected_altitude.is_none()));
        assert!(rows.iter().all(|r| r.label.to_string() == NOT_ADMISSIBLE));
    }

    #[test]
    fn test_non_numeric_value_is_not_admissible() {
        let zones = vec![zone("01", "2", "A1")];
        let rules = vec![rule("cfgX", "2", "A1", "abc", "")];

        let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);

        assert_eq!(rows[0].selected_altitude, None);
        assert_eq!(rows[0].label, Label::NotAdmissible);
    }

    #[test]
    fn test_spacing_selects_column() {
        let zones = vec![zone("01", "2", "A1")];
        let rules = vec![rule("cfgX", "2", "A1", "500", "800")];

        let three = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);
        let two_half = join_and_label(&zones, &rules, "cfgX", Spacing::TwoAndHalfMetres);

        assert_eq!(three[0].label, Label::Altitude(500));
        assert_eq!(two_half[0].label, Label::Altitude(800));
    }

    #[test]
    fn test_unmatched_zone_and_order_preserved() {
        let zones = vec![zone("03", "3", "B1"), zone("01", "2", "A1"), zone("02", "2", "")];
        let rules = vec![
            rule("cfgX", "2", "A1", "500", ""),
            rule("cfgX", "2", "", "900", ""),
        ];

        let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);
        let codes: Vec<&str> = rows.iter().map(|r| r.dept_code.as_str()).collect();

        assert_eq!(codes, vec!["03", "01", "02"]);
        assert_eq!(rows[0].label, Label::NotAdmissible);
        assert_eq!(rows[1].label, Label::Altitude(500));
        assert_eq!(rows[2].label, Label::Altitude(900));
    }

    #[test]
    fn test_duplicate_rules_first_wins_without_fan_out() {
        let zones = vec![zone("01", "2", "A1")];
        let rules = vec![
            rule("cfgX", "2", "A1", "500", ""),
            rule("cfgX", "2", "A1", "700", ""),
        ];

        let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].selected_altitude, Some(500.0));
    }

    #[test]
    fn test_empty_zones() {
        let rules = vec![rule("cfgX", "2", "A1", "500", "")];
        assert!(join_and_label(&[], &rules, "cfgX", Spacing::ThreeMetres).is_empty());
    }
}
