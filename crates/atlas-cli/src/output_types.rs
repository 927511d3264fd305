use atlas_core::models::{JoinedRow, Label};
use atlas_core::pipeline::{CacheStats, Stats};
use atlas_core::validation::FileValidation;
use atlas_core::QueryResult;
use atlas_geo::BoundaryReport;
use serde::Serialize;
use tabled::Tabled;

/// Output for check command
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub files: Vec<FileCheck>,
    pub departements: usize,
    pub rules: usize,
    pub configurations: usize,
    pub details: usize,
    pub boundaries: Option<BoundaryReport>,
    pub cache: Option<CacheStats>,
}

#[derive(Debug, Serialize)]
pub struct FileCheck {
    pub description: String,
    pub path: String,
    #[serde(flatten)]
    pub validation: FileValidation,
}

/// Output for configs command
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigurationInfo {
    #[tabled(rename = "Configuration")]
    pub name: String,
    #[tabled(rename = "Rules")]
    pub rules: usize,
}

/// One legend line: label, colour, and département share
#[derive(Debug, Serialize)]
pub struct LegendItem {
    pub label: Label,
    pub color: &'static str,
    pub count: usize,
    /// Share of admissible départements, or of all départements for the sentinel
    pub pct: u32,
}

impl LegendItem {
    pub fn from_result(result: &QueryResult) -> Vec<Self> {
        result
            .colors
            .entries()
            .iter()
            .map(|entry| {
                let (count, pct) = match entry.label {
                    Label::NotAdmissible => (
                        result.stats.non_admissible_count,
                        result.stats.non_admissible_pct,
                    ),
                    label => result
                        .stats
                        .per_label
                        .iter()
                        .find(|c| c.label == label)
                        .map(|c| (c.count, c.pct))
                        .unwrap_or((0, 0)),
                };
                LegendItem {
                    label: entry.label,
                    color: entry.color,
                    count,
                    pct,
                }
            })
            .collect()
    }
}

/// Output for map command
#[derive(Debug, Serialize)]
pub struct MapOutput<'a> {
    pub config: &'a str,
    pub spacing: &'static str,
    pub column: &'static str,
    pub legend: Vec<LegendItem>,
    pub stats: &'a Stats,
    pub rows: &'a [JoinedRow],
}

/// Département row for tables
#[derive(Debug, Tabled)]
pub struct RowDisplay {
    #[tabled(rename = "Dept")]
    pub dept: String,
    #[tabled(rename = "Nom")]
    pub name: String,
    #[tabled(rename = "Vent")]
    pub wind: String,
    #[tabled(rename = "Neige")]
    pub snow: String,
    #[tabled(rename = "Altitude max")]
    pub altitude: String,
    #[tabled(rename = "Statut")]
    pub status: String,
}

impl From<&JoinedRow> for RowDisplay {
    fn from(row: &JoinedRow) -> Self {
        Self {
            dept: row.dept_code.clone(),
            name: row.name.clone(),
            wind: row.wind_zone.clone(),
            snow: row.snow_zone.clone(),
            altitude: row.label.to_string(),
            status: if row.is_admissible() {
                "Admissible".to_string()
            } else {
                "Non admissible".to_string()
            },
        }
    }
}

/// Output for preview command, one entry per spacing
#[derive(Debug, Serialize)]
pub struct PreviewOutput<'a> {
    pub config: &'a str,
    pub spacings: Vec<SpacingPreview<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SpacingPreview<'a> {
    pub spacing: &'static str,
    pub column: &'static str,
    pub total: usize,
    pub admissible: usize,
    pub non_admissible: usize,
    pub rows: &'a [JoinedRow],
}

/// Output for export command
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub config: String,
    pub spacing: &'static str,
    pub rows_csv: String,
    pub choropleth: String,
    pub rows: usize,
    pub features: usize,
}

/// Output for normalize command
#[derive(Debug, Serialize)]
pub struct NormalizeOutput {
    pub input: String,
    pub output: String,
    pub rows: usize,
    pub blank_codes: usize,
}

/// Output for config command
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
