use crate::models::{JoinedRow, Label};
use std::collections::BTreeSet;

/// Legend order for a set of joined rows
///
/// Distinct altitude labels from highest to lowest, then the not-admissible
/// sentinel if at least one row carries it.
pub fn order_labels(rows: &[JoinedRow]) -> Vec<Label> {
    let altitudes: BTreeSet<i64> = rows.iter().filter_map(|r| r.label.metres()).collect();

    let mut ordered: Vec<Label> = altitudes.into_iter().rev().map(Label::Altitude).collect();
    if rows.iter().any(|r| !r.is_admissible()) {
        ordered.push(Label::NotAdmissible);
    }
    ordered
}
