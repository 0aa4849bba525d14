//! Block statistics and result structures for report decoding
//!
//! This module provides types for tracking how many station lines of a block
//! were accepted, filtered out or rejected.

use crate::app::models::WeatherRecord;
use crate::app::services::sflist_parser::HeaderInfo;

/// Per-block decoding counters
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockStats {
    /// Lines starting with the station code
    pub station_lines: usize,

    /// Records kept for the requested day
    pub accepted: usize,

    /// Records dropped because they belong to another day
    pub filtered_by_day: usize,

    /// Accepted records carrying a gust value
    pub gust_present: usize,

    /// Station lines that could not be decoded
    pub unparseable: usize,

    /// Messages for the unparseable lines
    pub errors: Vec<String>,
}

impl BlockStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unparseable line
    pub fn add_error(&mut self, message: String) {
        self.unparseable += 1;
        self.errors.push(message);
    }

    /// Share of station lines decoded without a fault, as a percentage
    pub fn decode_rate(&self) -> f64 {
        if self.station_lines == 0 {
            0.0
        } else {
            ((self.station_lines - self.unparseable) as f64 / self.station_lines as f64) * 100.0
        }
    }

    /// Add the counters of another block
    pub fn merge(&mut self, other: &BlockStats) {
        self.station_lines += other.station_lines;
        self.accepted += other.accepted;
        self.filtered_by_day += other.filtered_by_day;
        self.gust_present += other.gust_present;
        self.unparseable += other.unparseable;
        self.errors.extend(other.errors.iter().cloned());
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Found {} records ({} with gust data), filtered out {}, unparseable {}",
            self.accepted, self.gust_present, self.filtered_by_day, self.unparseable
        )
    }
}

/// Decoded block with its counters
#[derive(Debug, Clone)]
pub struct BlockResult {
    /// Records accepted for the requested day, in line order
    pub records: Vec<WeatherRecord>,

    /// Header detected for the block
    pub header: HeaderInfo,

    /// Block counters
    pub stats: BlockStats,
}

impl BlockResult {
    /// Get the number of accepted records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the block used the gust layout
    pub fn has_gust_column(&self) -> bool {
        self.header.has_gust
    }
}
