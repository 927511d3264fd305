use crate::error::{AtlasError, Result};
use crate::pipeline::CacheOptions;
use crate::validation::RequiredFile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "atlas.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Atlas
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub data_dir: ConfigValue<PathBuf>,
    pub zones_file: ConfigValue<String>,
    pub rules_file: ConfigValue<String>,
    pub details_file: ConfigValue<String>,
    pub boundaries_file: ConfigValue<String>,
    pub cache_enabled: ConfigValue<bool>,
    pub cache_capacity: ConfigValue<usize>,
    pub max_file_size_mb: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            data_dir: ConfigValue::new(PathBuf::from("data"), ConfigSource::Default),
            zones_file: ConfigValue::new(
                "dept_zones_NORMALISE.csv".to_string(),
                ConfigSource::Default,
            ),
            rules_file: ConfigValue::new("results_by_combo.csv".to_string(), ConfigSource::Default),
            details_file: ConfigValue::new("details.csv".to_string(), ConfigSource::Default),
            boundaries_file: ConfigValue::new(
                "departements.geojson".to_string(),
                ConfigSource::Default,
            ),
            cache_enabled: ConfigValue::new(true, ConfigSource::Default),
            cache_capacity: ConfigValue::new(64, ConfigSource::Default),
            max_file_size_mb: ConfigValue::new(100, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| AtlasError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| AtlasError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(data_dir) = file_config.data_dir {
            self.data_dir.update(data_dir, ConfigSource::File);
        }

        if let Some(zones_file) = file_config.zones_file {
            self.zones_file.update(zones_file, ConfigSource::File);
        }

        if let Some(rules_file) = file_config.rules_file {
            self.rules_file.update(rules_file, ConfigSource::File);
        }

        if let Some(details_file) = file_config.details_file {
            self.details_file.update(details_file, ConfigSource::File);
        }

        if let Some(boundaries_file) = file_config.boundaries_file {
            self.boundaries_file.update(boundaries_file, ConfigSource::File);
        }

        if let Some(cache) = file_config.cache {
            if let Some(enabled) = cache.enabled {
                self.cache_enabled.update(enabled, ConfigSource::File);
            }
            if let Some(capacity) = cache.capacity {
                self.cache_capacity.update(capacity, ConfigSource::File);
            }
        }

        if let Some(max_file_size_mb) = file_config.max_file_size_mb {
            self.max_file_size_mb.update(max_file_size_mb, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the file layer only if the file exists
    pub fn load_from_file_if_exists<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            self.load_from_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // ATLAS_DATA_DIR
        if let Ok(data_dir) = env::var("ATLAS_DATA_DIR") {
            self.data_dir.update(PathBuf::from(data_dir), ConfigSource::Environment);
        }

        // ATLAS_*_FILE
        if let Ok(zones_file) = env::var("ATLAS_ZONES_FILE") {
            self.zones_file.update(zones_file, ConfigSource::Environment);
        }
        if let Ok(rules_file) = env::var("ATLAS_RULES_FILE") {
            self.rules_file.update(rules_file, ConfigSource::Environment);
        }
        if let Ok(details_file) = env::var("ATLAS_DETAILS_FILE") {
            self.details_file.update(details_file, ConfigSource::Environment);
        }
        if let Ok(boundaries_file) = env::var("ATLAS_BOUNDARIES_FILE") {
            self.boundaries_file.update(boundaries_file, ConfigSource::Environment);
        }

        // ATLAS_CACHE
        if let Ok(cache_str) = env::var("ATLAS_CACHE") {
            match parse_bool("cache_enabled", &cache_str) {
                Ok(enabled) => self.cache_enabled.update(enabled, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid ATLAS_CACHE value '{}': expected true or false",
                    cache_str
                ),
            }
        }

        // ATLAS_CACHE_CAPACITY
        if let Ok(capacity_str) = env::var("ATLAS_CACHE_CAPACITY") {
            match capacity_str.parse::<usize>() {
                Ok(capacity) => self.cache_capacity.update(capacity, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid ATLAS_CACHE_CAPACITY value '{}': expected a non-negative integer",
                    capacity_str
                ),
            }
        }

        // ATLAS_MAX_FILE_SIZE_MB
        if let Ok(size_str) = env::var("ATLAS_MAX_FILE_SIZE_MB") {
            match size_str.parse::<u64>() {
                Ok(size) => self.max_file_size_mb.update(size, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid ATLAS_MAX_FILE_SIZE_MB value '{}': expected a size in MB",
                    size_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir.update(data_dir, ConfigSource::Cli);
        }

        if let Some(cache_enabled) = overrides.cache_enabled {
            self.cache_enabled.update(cache_enabled, ConfigSource::Cli);
        }
    }

    pub fn zones_path(&self) -> PathBuf {
        self.data_dir.value.join(&self.zones_file.value)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.data_dir.value.join(&self.rules_file.value)
    }

    pub fn details_path(&self) -> PathBuf {
        self.data_dir.value.join(&self.details_file.value)
    }

    pub fn boundaries_path(&self) -> PathBuf {
        self.data_dir.value.join(&self.boundaries_file.value)
    }

    /// Files the application cannot start without
    pub fn required_files(&self) -> Vec<RequiredFile> {
        vec![
            RequiredFile::new(self.boundaries_path(), "département boundaries"),
            RequiredFile::new(self.zones_path(), "regulatory zones by département"),
            RequiredFile::new(self.rules_path(), "altitude rules"),
        ]
    }

    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            enabled: self.cache_enabled.value,
            capacity: self.cache_capacity.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "data_dir".to_string(),
            (self.data_dir.value.display().to_string(), self.data_dir.source),
        );
        map.insert("zones_file".to_string(), (self.zones_file.value.clone(), self.zones_file.source));
        map.insert("rules_file".to_string(), (self.rules_file.value.clone(), self.rules_file.source));
        map.insert(
            "details_file".to_string(),
            (self.details_file.value.clone(), self.details_file.source),
        );
        map.insert(
            "boundaries_file".to_string(),
            (self.boundaries_file.value.clone(), self.boundaries_file.source),
        );
        map.insert(
            "cache_enabled".to_string(),
            (self.cache_enabled.value.to_string(), self.cache_enabled.source),
        );
        map.insert(
            "cache_capacity".to_string(),
            (self.cache_capacity.value.to_string(), self.cache_capacity.source),
        );
        map.insert(
            "max_file_size_mb".to_string(),
            (self.max_file_size_mb.value.to_string(), self.max_file_size_mb.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    zones_file: Option<String>,
    rules_file: Option<String>,
    details_file: Option<String>,
    boundaries_file: Option<String>,
    cache: Option<FileCacheConfig>,
    max_file_size_mb: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct FileCacheConfig {
    enabled: Option<bool>,
    capacity: Option<usize>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub cache_enabled: Option<bool>,
}

/// Parse a boolean flag from string
pub fn parse_bool(key: &str, s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AtlasError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}
