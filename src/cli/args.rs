//! Command-line argument definitions for the sflist processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::SinkFormat;
use crate::constants::{
    DATE_FORMAT, DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STATION,
    MAX_CONCURRENT_REQUESTS_LIMIT,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the surface station listing processor
///
/// Downloads daily sflist report blocks for one station, decodes the
/// fixed-width lines into weather records and exports them as a table.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sflist-processor",
    version,
    about = "Decode surface station report listings into CSV or Parquet tables",
    long_about = "Fetches daily sflist report blocks for a station (over HTTP or from saved \
                  files), decodes each fixed-width observation line into typed values, cloud \
                  layers and present weather, drops rows belonging to neighbouring days and \
                  writes all records for the date range to a single table."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Scrape a date range and export the records
    Scrape(ScrapeArgs),
    /// Decode one saved report block
    Decode(DecodeArgs),
}

/// Arguments for the scrape command
#[derive(Debug, Clone, Parser)]
pub struct ScrapeArgs {
    /// Station code, e.g. OEJN
    #[arg(
        short = 's',
        long = "station",
        value_name = "CODE",
        default_value = DEFAULT_STATION,
        help = "Station code to scrape"
    )]
    pub station: String,

    /// First day of the range (YYYYMMDD)
    #[arg(long = "start", value_name = "YYYYMMDD", value_parser = parse_date)]
    pub start: NaiveDate,

    /// Last day of the range, inclusive (YYYYMMDD)
    #[arg(long = "end", value_name = "YYYYMMDD", value_parser = parse_date)]
    pub end: NaiveDate,

    /// Output directory for the table
    ///
    /// Created if it doesn't exist. Defaults to ./output
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for the exported table"
    )]
    pub output_path: Option<PathBuf>,

    /// Table format
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: SinkFormat,

    /// Read saved blocks from a directory instead of the network
    ///
    /// Files must be named {station}_{YYYYMMDD}.txt
    #[arg(long = "source-dir", value_name = "PATH")]
    pub source_dir: Option<PathBuf>,

    /// Override the source URL template ({date} and {station} placeholders)
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Number of report blocks fetched concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = DEFAULT_MAX_CONCURRENT_REQUESTS,
        help = "Number of concurrent requests"
    )]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(
        long = "timeout",
        value_name = "SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    pub timeout_secs: u64,

    /// Show what would be fetched without making requests
    #[arg(
        long = "dry-run",
        help = "Show what would be fetched without creating output files"
    )]
    pub dry_run: bool,

    /// Force overwrite of an existing output file
    #[arg(long = "force", help = "Force overwrite of existing output file")]
    pub force_overwrite: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors and critical messages
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the decode command
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Saved report block (raw text of the listing)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Station code data lines must start with
    #[arg(
        short = 's',
        long = "station",
        value_name = "CODE",
        default_value = DEFAULT_STATION
    )]
    pub station: String,

    /// Day the block was requested for (YYYYMMDD)
    #[arg(long = "date", value_name = "YYYYMMDD", value_parser = parse_date)]
    pub date: NaiveDate,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Output format: a summary, JSON records, or CSV records
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Parse a `YYYYMMDD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        Error::datetime_parsing(format!("Invalid date '{}', expected YYYYMMDD", value), e)
    })
}

/// Map verbosity flags to a level name
fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl ScrapeArgs {
    /// Validate the scrape arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.station.trim().is_empty() {
            return Err(Error::configuration("Station code cannot be empty"));
        }

        if self.start > self.end {
            return Err(Error::configuration(format!(
                "Start date {} is after end date {}",
                self.start.format(DATE_FORMAT),
                self.end.format(DATE_FORMAT)
            )));
        }

        if self.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.workers > MAX_CONCURRENT_REQUESTS_LIMIT {
            return Err(Error::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_CONCURRENT_REQUESTS_LIMIT
            )));
        }

        if let Some(source_dir) = &self.source_dir {
            if !source_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Source directory does not exist: {}",
                    source_dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl DecodeArgs {
    pub fn validate(&self) -> Result<()> {
        if self.station.trim().is_empty() {
            return Err(Error::configuration("Station code cannot be empty"));
        }

        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }

        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, false)
    }
}
