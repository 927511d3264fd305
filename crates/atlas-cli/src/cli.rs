use atlas_core::models::Spacing;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Atlas - Maximum greenhouse altitude by French département
#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(about = "Maximum admissible greenhouse altitude by département", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to ./atlas.toml when present)
    #[arg(long = "config", id = "config_file", global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Directory holding the data files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Recompute every query instead of caching results
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the data files and load every table
    Check(CheckArgs),

    /// List configurations with their rule counts
    Configs,

    /// Legend, coverage and per-département altitude for one configuration
    Map(MapArgs),

    /// Compare both spacings of one configuration
    Preview(PreviewArgs),

    /// Show the descriptive details of a configuration
    Details(DetailsArgs),

    /// Show a representative point for every département
    Centroids,

    /// Write joined rows (CSV) and a coloured choropleth (GeoJSON)
    Export(ExportArgs),

    /// Convert a zone-sheet export into the zone table
    Normalize(NormalizeArgs),

    /// Show configuration values and where they come from
    Config,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Also report boundary coverage and cache warm-up
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
pub struct MapArgs {
    /// Configuration name
    pub config: String,

    /// Post spacing (3m or 2.5m)
    #[arg(long, short = 's', default_value = "3m")]
    pub spacing: Spacing,

    /// Number of départements to print
    #[arg(long, short = 'n', default_value = "20", conflicts_with = "all")]
    pub rows: usize,

    /// Print every département
    #[arg(long)]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Configuration name
    pub config: String,

    /// Number of départements to print per spacing
    #[arg(long, default_value = "10")]
    pub show: usize,
}

#[derive(Parser, Debug)]
pub struct DetailsArgs {
    /// Configuration name
    pub config: String,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Configuration name
    pub config: String,

    /// Post spacing (3m or 2.5m)
    #[arg(long, short = 's', default_value = "3m")]
    pub spacing: Spacing,

    /// Output directory
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out: PathBuf,
}

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// CSV export of the zone sheet
    pub input: PathBuf,

    /// Output file (defaults to the configured zone table)
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}
