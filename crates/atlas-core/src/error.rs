//! Error types for Atlas

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    // Table errors
    #[error("Missing required column '{column}' in {table} table")]
    Schema { table: String, column: String },

    #[error("Duplicate département code '{code}' in zone table")]
    DuplicateDepartment { code: String },

    #[error("The {table} table contains no rows")]
    EmptyTable { table: String },

    // File errors
    #[error("Required file validation failed: {reason}")]
    FileValidation { reason: String },

    #[error("Invalid boundary data: {reason}")]
    Boundaries { reason: String },

    // Query errors
    #[error("Unknown spacing '{value}'. Use 3m or 2.5m")]
    UnknownSpacing { value: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AtlasError {
    pub(crate) fn schema(table: &str, column: &str) -> Self {
        AtlasError::Schema {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
