use crate::models::Label;
use serde::Serialize;

/// Colours for altitude labels, assigned in legend order
pub const PALETTE: [&str; 8] = [
    "#2563eb", // blue
    "#059669", // emerald
    "#dc2626", // red
    "#7c3aed", // violet
    "#ea580c", // orange
    "#0891b2", // cyan
    "#be123c", // rose
    "#16a34a", // green
];

/// Fixed neutral colour of the not-admissible label
pub const GRAY: &str = "#e5e7eb";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: Label,
    pub color: &'static str,
}

/// Label → colour mapping that keeps legend order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorMap {
    entries: Vec<LegendEntry>,
}

impl ColorMap {
    pub fn get(&self, label: &Label) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.label == *label)
            .map(|e| e.color)
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, label: Label, color: &'static str) {
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => entry.color = color,
            None => self.entries.push(LegendEntry { label, color }),
        }
    }
}

/// Colour every label of an ordered legend
///
/// The sentinel is always gray wherever it appears. The Nth altitude label
/// (sentinel excluded) gets `PALETTE[N % 8]`.
pub fn assign_colors(ordered_labels: &[Label]) -> ColorMap {
    let mut colors = ColorMap::default();
    let mut next = 0usize;

    for &label in ordered_labels {
        match label {
            Label::NotAdmissible => colors.set(label, GRAY),
            Label::Altitude(_) => {
                let color = PALETTE[next % PALETTE.len()];
                tracing::debug!("Label '{}' → {}", label, color);
                colors.set(label, color);
                next += 1;
            }
        }
    }

    if next > PALETTE.len() {
        tracing::warn!(
            "Colour reuse: {} altitude labels for {} palette colours",
            next,
            PALETTE.len()
        );
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_labels_without_sentinel() {
        let colors = assign_colors(&[Label::Altitude(500), Label::Altitude(300)]);

        assert_eq!(colors.len(), 2);
        assert_eq!(colors.get(&Label::Altitude(500)), Some(PALETTE[0]));
        assert_eq!(colors.get(&Label::Altitude(300)), Some(PALETTE[1]));
        assert!(colors.entries().iter().all(|e| e.color != GRAY));
    }

    #[test]
    fn test_palette_cycles_and_sentinel_stays_gray() {
        let mut labels: Vec<Label> = (0..10).rev().map(|i| Label::Altitude(100 * (i + 1))).collect();
        labels.push(Label::NotAdmissible);

        let colors = assign_colors(&labels);

        assert_eq!(colors.len(), 11);
        assert_eq!(colors.get(&labels[8]), Some(PALETTE[0]));
        assert_eq!(colors.get(&labels[8]), colors.get(&labels[0]));
        assert_eq!(colors.get(&labels[9]), Some(PALETTE[1]));
        assert_eq!(colors.get(&Label::NotAdmissible), Some(GRAY));
    }

    #[test]
    fn test_sentinel_position_does_not_consume_palette() {
        let colors = assign_colors(&[Label::NotAdmissible, Label::Altitude(500)]);

        assert_eq!(colors.get(&Label::NotAdmissible), Some(GRAY));
        assert_eq!(colors.get(&Label::Altitude(500)), Some(PALETTE[0]));
        assert_eq!(colors.entries()[0].label, Label::NotAdmissible);
    }

    #[test]
    fn test_empty_legend() {
        assert!(assign_colors(&[]).is_empty());
    }
}
