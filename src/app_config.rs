use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading
/// and validating configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Conversion pipeline settings
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Tunables of the conversion pipeline
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Maximum gap between two same-text cues for them to be folded into one
    #[serde(default = "default_merge_tolerance_ms")]
    pub merge_tolerance_ms: u64,

    /// Duration given to events that carry no `dDurationMs`
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,

    /// How many leading events the validator inspects for a start time
    #[serde(default = "default_validation_sample_size")]
    pub validation_sample_size: usize,

    /// Extension of generated subtitle files, without the dot
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            merge_tolerance_ms: default_merge_tolerance_ms(),
            default_duration_ms: default_duration_ms(),
            validation_sample_size: default_validation_sample_size(),
            output_extension: default_output_extension(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_merge_tolerance_ms() -> u64 {
    500
}

fn default_duration_ms() -> u64 {
    2000 // auto-generated captions often omit dDurationMs
}

fn default_validation_sample_size() -> usize {
    5
}

fn default_output_extension() -> String {
    "vtt".to_string()
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AppError> {
        let conversion = &self.conversion;

        if conversion.validation_sample_size == 0 {
            return Err(AppError::Config(
                "validation_sample_size must be at least 1".to_string(),
            ));
        }

        let ext = conversion.output_extension.as_str();
        if ext.is_empty() {
            return Err(AppError::Config("output_extension cannot be empty".to_string()));
        }
        if ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(AppError::Config(format!(
                "output_extension must be a bare extension such as 'vtt', got '{}'",
                ext
            )));
        }

        Ok(())
    }
}
