//! Property and scenario tests for the join → legend → colour → stats pipeline

use atlas_core::models::{Label, RuleRecord, Spacing, ZoneRecord, NOT_ADMISSIBLE};
use atlas_core::pipeline::{
    assign_colors, compute_statistics, join_and_label, order_labels, GRAY, PALETTE,
};
use proptest::prelude::*;

const WIND_ZONES: [&str; 4] = ["1", "2", "3", "4"];
const SNOW_ZONES: [&str; 4] = ["A1", "A2", "C1", ""];
const CONFIGS: [&str; 2] = ["cfgX", "cfgY"];

fn zone(code: &str, wind: &str, snow: &str) -> ZoneRecord {
    ZoneRecord::new(code, format!("Dept {}", code), wind, snow)
}

fn rule(config: &str, wind: &str, snow: &str, alt_3m: Option<&str>) -> RuleRecord {
    RuleRecord {
        config: config.to_string(),
        wind_zone: wind.to_string(),
        snow_zone: snow.to_string(),
        alt_max_3m: alt_3m.map(str::to_string),
        alt_max_2_5m: None,
    }
}

fn raw_altitude() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        (0u32..3000).prop_map(|v| Some(v.to_string())),
        (0.0f64..3000.0).prop_map(|v| Some(format!("{:.2}", v))),
        Just(None),
        Just(Some("abc".to_string())),
        Just(Some("NaN".to_string())),
        Just(Some(" ".to_string())),
    ]
}

fn zones_strategy() -> impl Strategy<Value = Vec<ZoneRecord>> {
    prop::collection::vec((0..WIND_ZONES.len(), 0..SNOW_ZONES.len()), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (w, s))| zone(&format!("{:02}", i), WIND_ZONES[w], SNOW_ZONES[s]))
            .collect()
    })
}

fn rules_strategy() -> impl Strategy<Value = Vec<RuleRecord>> {
    prop::collection::vec(
        (
            0..CONFIGS.len(),
            0..WIND_ZONES.len(),
            0..SNOW_ZONES.len(),
            raw_altitude(),
        ),
        0..30,
    )
    .prop_map(|rules| {
        rules
            .into_iter()
            .map(|(c, w, s, alt)| rule(CONFIGS[c], WIND_ZONES[w], SNOW_ZONES[s], alt.as_deref()))
            .collect()
    })
}

proptest! {
    #[test]
    fn one_row_per_zone_in_zone_order(zones in zones_strategy(), rules in rules_strategy()) {
        let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);

        prop_assert_eq!(rows.len(), zones.len());
        for (row, zone) in rows.iter().zip(&zones) {
            prop_assert_eq!(&row.dept_code, &zone.dept_code);
            prop_assert_eq!(&row.wind_zone, &zone.wind_zone);
        }
    }

    #[test]
    fn sentinel_label_iff_altitude_absent(zones in zones_strategy(), rules in rules_strategy()) {
        for row in join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres) {
            prop_assert_eq!(row.label == Label::NotAdmissible, row.selected_altitude.is_none());
            if let Some(altitude) = row.selected_altitude {
                prop_assert_eq!(row.label.to_string(), format!("{} m", altitude.trunc() as i64));
            }
        }
    }

    #[test]
    fn labels_descend_with_sentinel_last(zones in zones_strategy(), rules in rules_strategy()) {
        let rows = join_and_label(&zones, &rules, "cfgY", Spacing::ThreeMetres);
        let labels = order_labels(&rows);

        let metres: Vec<i64> = labels.iter().filter_map(Label::metres).collect();
        prop_assert!(metres.windows(2).all(|w| w[0] > w[1]));

        let has_sentinel = rows.iter().any(|r| !r.is_admissible());
        prop_assert_eq!(labels.last() == Some(&Label::NotAdmissible), has_sentinel);
        prop_assert_eq!(
            labels.iter().filter(|l| **l == Label::NotAdmissible).count(),
            usize::from(has_sentinel)
        );
        for row in &rows {
            prop_assert!(labels.contains(&row.label));
        }
    }

    #[test]
    fn colours_are_deterministic(zones in zones_strategy(), rules in rules_strategy()) {
        let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);
        let labels = order_labels(&rows);
        let colors = assign_colors(&labels);

        prop_assert_eq!(&colors, &assign_colors(&labels));
        prop_assert_eq!(colors.len(), labels.len());

        for (n, label) in labels.iter().filter(|l| l.is_admissible()).enumerate() {
            prop_assert_eq!(colors.get(label), Some(PALETTE[n % PALETTE.len()]));
        }
        if labels.contains(&Label::NotAdmissible) {
            prop_assert_eq!(colors.get(&Label::NotAdmissible), Some(GRAY));
        }
    }

    #[test]
    fn statistics_stay_in_bounds(zones in zones_strategy(), rules in rules_strategy()) {
        let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);
        let labels = order_labels(&rows);
        let stats = compute_statistics(&rows, &labels);

        prop_assert_eq!(stats.total, rows.len());
        prop_assert_eq!(stats.admissible_count + stats.non_admissible_count, stats.total);
        prop_assert_eq!(
            stats.per_label.iter().map(|c| c.count).sum::<usize>(),
            stats.admissible_count
        );
        prop_assert!(stats.admissible_pct <= 100);
        prop_assert!(stats.non_admissible_pct <= 100);
        prop_assert!(stats.per_label.iter().all(|c| c.pct <= 100));
        prop_assert_eq!(stats.no_match, stats.admissible_count == 0);
    }
}

#[test]
fn test_matching_rule_gives_altitude_label() {
    let zones = vec![zone("01", "2", "A1")];
    let rules = vec![rule("cfgX", "2", "A1", Some("500"))];

    let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label.to_string(), "500 m");
    assert_eq!(rows[0].selected_altitude, Some(500.0));
}

#[test]
fn test_unknown_config_is_not_admissible() {
    let zones = vec![zone("01", "2", "A1")];

    let rows = join_and_label(&zones, &[], "cfgY", Spacing::ThreeMetres);
    let labels = order_labels(&rows);
    let stats = compute_statistics(&rows, &labels);

    assert_eq!(rows[0].label.to_string(), NOT_ADMISSIBLE);
    assert!(stats.no_match);
    assert_eq!(stats.non_admissible_pct, 100);
}

#[test]
fn test_non_numeric_rule_value_is_not_admissible() {
    let zones = vec![zone("01", "2", "A1")];
    let rules = vec![rule("cfgX", "2", "A1", Some("abc"))];

    let rows = join_and_label(&zones, &rules, "cfgX", Spacing::ThreeMetres);

    assert_eq!(rows[0].label, Label::NotAdmissible);
    assert_eq!(rows[0].selected_altitude, None);
}

#[test]
fn test_two_labels_take_first_palette_colours() {
    let labels = vec![Label::Altitude(500), Label::Altitude(300)];
    let colors = assign_colors(&labels);

    assert_eq!(colors.len(), 2);
    assert_eq!(colors.get(&Label::Altitude(500)), Some(PALETTE[0]));
    assert_eq!(colors.get(&Label::Altitude(300)), Some(PALETTE[1]));
    assert!(colors.entries().iter().all(|e| e.color != GRAY));
}

#[test]
fn test_palette_cycles_past_eight_labels() {
    let mut labels: Vec<Label> = (1..=10).rev().map(|i| Label::Altitude(i * 100)).collect();
    labels.push(Label::NotAdmissible);

    let colors = assign_colors(&labels);

    assert_eq!(colors.len(), 11);
    assert_eq!(colors.get(&labels[8]), Some(PALETTE[0]));
    assert_eq!(colors.get(&labels[8]), colors.get(&labels[0]));
    assert_eq!(colors.get(&labels[9]), Some(PALETTE[1]));
    assert_eq!(colors.get(&Label::NotAdmissible), Some(GRAY));
}
