//! Configuration management and validation.
//!
//! Provides configuration structures for the report source, the output
//! table and logging, with builder-style overrides and validation rules.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DATE_FORMAT, DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_OUTPUT_DIR,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SOURCE_URL, DEFAULT_STATION, DEFAULT_USER_AGENT,
    MAX_CONCURRENT_REQUESTS_LIMIT, URL_DATE_PLACEHOLDER, URL_STATION_PLACEHOLDER,
};
use crate::{Error, Result};

/// Where report blocks come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Station code data lines must start with
    pub station: String,

    /// URL template with `{date}` and `{station}` placeholders
    pub base_url: String,

    /// User agent sent with every request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Report blocks fetched concurrently
    pub max_concurrent_requests: usize,

    /// Read saved blocks from this directory instead of the network
    pub offline_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            station: DEFAULT_STATION.to_string(),
            base_url: DEFAULT_SOURCE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            offline_dir: None,
        }
    }
}

impl SourceConfig {
    /// Request URL for a station and date
    pub fn source_url(&self, station: &str, date: NaiveDate) -> String {
        self.base_url
            .replace(URL_DATE_PLACEHOLDER, &date.format(DATE_FORMAT).to_string())
            .replace(URL_STATION_PLACEHOLDER, station)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Table format written by the frame sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SinkFormat {
    #[default]
    Csv,
    Parquet,
}

impl SinkFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            SinkFormat::Csv => "csv",
            SinkFormat::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for SinkFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Output table settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the table is written to
    pub output_dir: PathBuf,

    /// Table format
    pub format: SinkFormat,

    /// Overwrite an existing table
    pub force_overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: SinkFormat::default(),
            force_overwrite: false,
        }
    }
}

/// Log levels accepted for the crate filter
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Logging settings read by the CLI subscriber setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when RUST_LOG is not set
    pub level: String,

    /// Compact single-line output without timestamps
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            structured: false,
        }
    }
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, structured: bool) -> Self {
        Self {
            level: level.into(),
            structured,
        }
    }

    /// `EnvFilter` directive for this crate
    pub fn filter_directive(&self) -> String {
        format!("sflist_processor={}", self.level)
    }

    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.level.as_str()) {
            return Err(Error::configuration(format!(
                "Unknown log level '{}', expected one of {}",
                self.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Global configuration for report scraping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Set the station code
    pub fn with_station(mut self, station: impl Into<String>) -> Self {
        self.source.station = station.into();
        self
    }

    /// Set the source URL template
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.source.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.source.request_timeout_secs = secs;
        self
    }

    /// Set the number of concurrent requests
    pub fn with_max_concurrent_requests(mut self, max_requests: usize) -> Self {
        self.source.max_concurrent_requests = max_requests;
        self
    }

    /// Read saved report blocks from a directory
    pub fn with_offline_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.source.offline_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the output table format
    pub fn with_format(mut self, format: SinkFormat) -> Self {
        self.output.format = format;
        self
    }

    /// Allow overwriting an existing table
    pub fn with_force_overwrite(mut self) -> Self {
        self.output.force_overwrite = true;
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Check settings before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.source.station.trim().is_empty() {
            return Err(Error::configuration("Station code cannot be empty"));
        }

        if self.source.request_timeout_secs == 0 {
            return Err(Error::configuration("Request timeout must be greater than 0"));
        }

        if self.source.max_concurrent_requests == 0 {
            return Err(Error::configuration(
                "Concurrent requests must be greater than 0",
            ));
        }

        if self.source.max_concurrent_requests > MAX_CONCURRENT_REQUESTS_LIMIT {
            return Err(Error::configuration(format!(
                "Concurrent requests cannot exceed {}",
                MAX_CONCURRENT_REQUESTS_LIMIT
            )));
        }

        if self.source.offline_dir.is_none() {
            validate_url_template(&self.source.base_url)?;
        }

        self.logging.validate()
    }
}

/// Require the date placeholder and reject any other unknown placeholder
fn validate_url_template(template: &str) -> Result<()> {
    if !template.contains(URL_DATE_PLACEHOLDER) {
        return Err(Error::configuration(format!(
            "Source URL must contain the {} placeholder",
            URL_DATE_PLACEHOLDER
        )));
    }

    let placeholder = Regex::new(r"\{[^{}]*\}")
        .map_err(|e| Error::configuration(format!("Invalid placeholder pattern: {}", e)))?;
    if let Some(unknown) = placeholder
        .find_iter(template)
        .map(|m| m.as_str())
        .find(|p| *p != URL_DATE_PLACEHOLDER && *p != URL_STATION_PLACEHOLDER)
    {
        return Err(Error::configuration(format!(
            "Unknown placeholder {} in source URL",
            unknown
        )));
    }

    Ok(())
}
