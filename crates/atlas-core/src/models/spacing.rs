use crate::error::{AtlasError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structural post spacing ("entraxe"), each with its own rule column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Spacing {
    /// 3.00 m spacing, rule column `AltMax_3m`
    #[default]
    #[serde(rename = "AltMax_3m")]
    ThreeMetres,
    /// 2.50 m spacing, rule column `AltMax_2_5m`
    #[serde(rename = "AltMax_2_5m")]
    TwoAndHalfMetres,
}

impl Spacing {
    pub const ALL: [Spacing; 2] = [Spacing::ThreeMetres, Spacing::TwoAndHalfMetres];

    /// Name of the rule table column holding this spacing's altitude limit
    pub fn column(&self) -> &'static str {
        match self {
            Spacing::ThreeMetres => "AltMax_3m",
            Spacing::TwoAndHalfMetres => "AltMax_2_5m",
        }
    }

    /// Display value shown next to the spacing selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Spacing::ThreeMetres => "3.00 m",
            Spacing::TwoAndHalfMetres => "2.50 m",
        }
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Spacing {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .trim_start_matches("altmax_")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let normalized = normalized
            .strip_suffix('m')
            .unwrap_or(normalized.as_str())
            .replace('_', ".");

        match normalized.as_str() {
            "3" | "3.0" | "3.00" => Ok(Spacing::ThreeMetres),
            "2.5" | "2.50" => Ok(Spacing::TwoAndHalfMetres),
            _ => Err(AtlasError::UnknownSpacing {
                value: s.to_string(),
            }),
        }
    }
}
