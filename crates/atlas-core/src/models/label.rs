use serde::{Serialize, Serializer};
use std::fmt;

/// Legend text of départements where no rule admits the configuration
pub const NOT_ADMISSIBLE: &str = "Non admissible";

/// Display label of a joined row
///
/// Altitudes are truncated toward zero before display, so two raw values such
/// as 500.2 and 500.9 share the label `500 m`. The raw value stays available
/// on [`JoinedRow::selected_altitude`](crate::models::JoinedRow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Altitude(i64),
    NotAdmissible,
}

/// Altitude truncated toward zero, `None` when it does not fit a label
pub fn whole_metres(value: f64) -> Option<i64> {
    let whole = value.trunc();
    (whole.is_finite() && whole >= i64::MIN as f64 && whole < i64::MAX as f64)
        .then_some(whole as i64)
}

impl Label {
    /// Label for an optional altitude, truncating toward zero
    pub fn from_altitude(altitude: Option<f64>) -> Self {
        match altitude.and_then(whole_metres) {
            Some(metres) => Label::Altitude(metres),
            None => Label::NotAdmissible,
        }
    }

    pub fn is_admissible(&self) -> bool {
        matches!(self, Label::Altitude(_))
    }

    /// Integer altitude behind the label
    pub fn metres(&self) -> Option<i64> {
        match self {
            Label::Altitude(m) => Some(*m),
            Label::NotAdmissible => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Altitude(m) => write!(f, "{} m", m),
            Label::NotAdmissible => f.write_str(NOT_ADMISSIBLE),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
