//! Sflist Processor Library
//!
//! A Rust library for decoding fixed-width surface station report listings
//! ("sflist" blocks, one per station per day) into typed weather records.
//!
//! This library provides tools for:
//! - Detecting the column layout of a report block (with or without a gust column)
//! - Slicing fixed-width fields with tolerant missing-value handling
//! - Classifying trailing tokens into cloud layers and present-weather codes
//! - Filtering rows that bleed in from adjacent days
//! - Fetching report blocks over HTTP or from saved files
//! - Writing decoded records to CSV or Parquet tables

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod record_sink;
        pub mod report_source;
        pub mod scrape_runner;
        pub mod sflist_parser;
        pub mod summary;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ColumnLayout, Field, FieldRange, WeatherRecord};
pub use app::services::sflist_parser::{BlockDecoder, BlockResult, BlockStats};
pub use config::Config;

/// Result type alias for the sflist processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sflist processing operations
///
/// Only configuration, sink and interruption errors abort a run. Line and
/// source failures are recovered where they occur and surface as counters.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// A station line could not be decoded
    #[error("Unparseable line: {reason} ({line})")]
    UnparseableLine { line: String, reason: String },

    /// The report source could not produce a block for a date
    #[error("Report unavailable for station {station} on {date}: {reason}")]
    SourceUnavailable {
        station: String,
        date: chrono::NaiveDate,
        reason: String,
    },

    /// Writing the output table failed
    #[error("Sink writing error: {message}")]
    SinkWriting {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create an unparseable line error; long lines are shortened for logs
    pub fn unparseable_line(line: &str, reason: impl Into<String>) -> Self {
        let line = if line.chars().count() > 50 {
            format!("{}...", line.chars().take(50).collect::<String>())
        } else {
            line.to_string()
        };
        Self::UnparseableLine {
            line,
            reason: reason.into(),
        }
    }

    /// Create a source unavailable error
    pub fn source_unavailable(
        station: impl Into<String>,
        date: chrono::NaiveDate,
        reason: impl Into<String>,
    ) -> Self {
        Self::SourceUnavailable {
            station: station.into(),
            date,
            reason: reason.into(),
        }
    }

    /// Create a sink writing error
    pub fn sink_writing(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::SinkWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error must stop the whole run
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Error::Configuration { .. }
                | Error::SinkWriting { .. }
                | Error::Io { .. }
                | Error::ProcessingInterrupted { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}
