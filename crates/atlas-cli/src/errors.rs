use atlas_core::AtlasError;
use console::style;
use std::fmt;

/// Error with context and suggestions for the terminal
#[derive(Clone)]
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for missing or unreadable data files
pub fn data_files_invalid(reason: &str) -> CliError {
    CliError::new("Data files are missing or invalid")
        .with_context(reason.to_string())
        .with_suggestion("Point to the data directory: atlas --data-dir path/to/data check")
        .with_suggestion("Or set ATLAS_DATA_DIR, or data_dir in atlas.toml")
        .with_help("Run: atlas config")
}

/// Create error for a table missing a required column
pub fn schema_error(table: &str, column: &str) -> CliError {
    CliError::new(format!("The {} table has no '{}' column", table, column))
        .with_context("Columns are matched by header name; order does not matter.")
        .with_suggestion("Check the header row of the file")
        .with_suggestion("Regenerate the zone table: atlas normalize <sheet.csv>")
        .with_help("Run: atlas check --verbose")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check atlas.toml for syntax errors")
        .with_suggestion("Inspect the effective values: atlas config")
        .with_help("Run: atlas --help")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return cli_error.clone();
    }

    if let Some(atlas_error) = error.chain().find_map(|e| e.downcast_ref::<AtlasError>()) {
        match atlas_error {
            AtlasError::FileValidation { reason } => return data_files_invalid(reason),
            AtlasError::Schema { table, column } => return schema_error(table, column),
            AtlasError::ConfigInvalid { key, reason } => return invalid_config(key, reason),
            _ => {}
        }
    }

    let message = format!("{:#}", error);
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("ermission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}
