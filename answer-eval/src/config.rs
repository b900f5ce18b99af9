//! Configuration management for answer scoring
//!
//! Loads scoring and output settings from TOML files and provides runtime access.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::runner::AggregatorConfig;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scoring execution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Maximum number of result files scored concurrently
    #[serde(default = "default_parallel_files")]
    pub parallel_files: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            parallel_files: default_parallel_files(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,
    #[serde(default)]
    pub format: SummaryFormat,
    #[serde(default = "default_true")]
    pub print_table: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: default_summary_path(),
            format: SummaryFormat::default(),
            print_table: true,
        }
    }
}

// Default value functions
fn default_true() -> bool { true }
fn default_parallel_files() -> usize { 4 }
fn default_summary_path() -> PathBuf { PathBuf::from("results/summary.csv") }

/// Default config search locations, relative to the working directory
const CONFIG_PATHS: [&str; 2] = ["config/answer-eval.toml", "../config/answer-eval.toml"];

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from default config location or return defaults
    pub fn load_or_default() -> Self {
        for path in &CONFIG_PATHS {
            if let Ok(config) = Self::from_file(path) {
                tracing::info!("Loaded configuration from {}", path);
                return config;
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    /// Save configuration to a TOML file
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Aggregator settings derived from this configuration
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            parallel_files: self.scoring.parallel_files.max(1),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Output format of the summary artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    /// Comma-separated rows with a header
    #[default]
    Csv,
    /// Pretty-printed JSON with run totals
    Json,
}

impl SummaryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryFormat::Csv => "csv",
            SummaryFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
