use crate::models::{JoinedRow, Label};
use serde::Serialize;

/// Département count behind one legend label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: Label,
    pub count: usize,
    /// Share of admissible départements
    pub pct: u32,
}

/// Coverage figures for one query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub admissible_count: usize,
    pub admissible_pct: u32,
    pub non_admissible_count: usize,
    pub non_admissible_pct: u32,
    pub per_label: Vec<LabelCount>,
    /// True when no département has an altitude at all
    pub no_match: bool,
}

/// Rounded percentage, half to even, `0` for an empty denominator
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * count as f64 / total as f64).round_ties_even() as u32
}

pub fn compute_statistics(rows: &[JoinedRow], ordered_labels: &[Label]) -> Stats {
    let total = rows.len();
    let admissible_count = rows.iter().filter(|r| r.is_admissible()).count();
    let non_admissible_count = total - admissible_count;

    let per_label = ordered_labels
        .iter()
        .filter(|label| label.is_admissible())
        .map(|&label| {
            let count = rows.iter().filter(|r| r.label == label).count();
            LabelCount {
                label,
                count,
                pct: percentage(count, admissible_count),
            }
        })
        .collect();

    Stats {
        total,
        admissible_count,
        admissible_pct: percentage(admissible_count, total),
        non_admissible_count,
        non_admissible_pct: percentage(non_admissible_count, total),
        per_label,
        no_match: rows.iter().all(|r| r.selected_altitude.is_none()),
    }
}
