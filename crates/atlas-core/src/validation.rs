use crate::error::{AtlasError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Outcome of checking one or more input files
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FileValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// An input file the application cannot start without
#[derive(Debug, Clone)]
pub struct RequiredFile {
    pub path: PathBuf,
    pub description: &'static str,
}

impl RequiredFile {
    pub fn new(path: impl Into<PathBuf>, description: &'static str) -> Self {
        Self {
            path: path.into(),
            description,
        }
    }
}

pub struct FileValidator;

impl FileValidator {
    /// Validate that a path exists and is a regular file
    pub fn validate_file_exists(path: &Path) -> FileValidation {
        let mut validation = FileValidation::default();

        if !path.exists() {
            validation.errors.push(format!("File not found: {}", path.display()));
        } else if !path.is_file() {
            validation.errors.push(format!("Path is not a file: {}", path.display()));
        }

        validation
    }

    /// Validate that at least one byte can be read
    pub fn validate_readable(path: &Path) -> FileValidation {
        let mut validation = FileValidation::default();

        let mut buf = [0u8; 1];
        if let Err(e) = File::open(path).and_then(|mut f| f.read(&mut buf)) {
            validation
                .errors
                .push(format!("Cannot read file {}: {}", path.display(), e));
        }

        validation
    }

    /// Validate file size is within the configured limit
    pub fn validate_file_size(path: &Path, max_size_mb: u64) -> FileValidation {
        let mut validation = FileValidation::default();

        match std::fs::metadata(path) {
            Ok(metadata) => {
                let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);
                if size_mb > max_size_mb as f64 {
                    validation.errors.push(format!(
                        "File too large: {} ({:.1} MB, limit {} MB)",
                        path.display(),
                        size_mb,
                        max_size_mb
                    ));
                } else {
                    tracing::debug!("Size of '{}' validated: {:.1} MB", path.display(), size_mb);
                }
            }
            Err(e) => {
                validation.errors.push(format!("Cannot read file metadata: {}", e));
            }
        }

        validation
    }

    /// Merge multiple validation results
    pub fn merge_validations(validations: Vec<FileValidation>) -> FileValidation {
        let mut merged = FileValidation::default();

        for validation in validations {
            merged.errors.extend(validation.errors);
            merged.warnings.extend(validation.warnings);
        }

        merged
    }

    /// Run every check on one file, stopping after the first failing stage
    pub fn validate_file(path: &Path, max_size_mb: u64) -> FileValidation {
        let exists = Self::validate_file_exists(path);
        if !exists.is_valid() {
            return exists;
        }

        let readable = Self::validate_readable(path);
        if !readable.is_valid() {
            return readable;
        }

        Self::validate_file_size(path, max_size_mb)
    }
}

/// Check every required file and report all failures at once
pub fn check_required_files(files: &[RequiredFile], max_size_mb: u64) -> Result<()> {
    tracing::info!("Validating {} required files", files.len());

    let mut validations = Vec::with_capacity(files.len());
    for file in files {
        let validation = FileValidator::validate_file(&file.path, max_size_mb);
        if validation.is_valid() {
            tracing::info!("✓ {}: {}", file.description, file.path.display());
        } else {
            tracing::error!("✗ {}: {}", file.description, validation.errors.join("; "));
        }
        validations.push(validation);
    }

    let merged = FileValidator::merge_validations(validations);
    if !merged.is_valid() {
        return Err(AtlasError::FileValidation {
            reason: format!("{} error(s): {}", merged.errors.len(), merged.errors.join("; ")),
        });
    }

    tracing::info!("All {} required files validated", files.len());
    Ok(())
}
