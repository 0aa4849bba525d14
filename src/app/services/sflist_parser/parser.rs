//! Block decoder for station report listings
//!
//! This module drives header detection, line decoding and day filtering over
//! a whole report block.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::day_filter::belongs_to_date;
use super::header::HeaderInfo;
use super::record_parser::decode_line;
use super::stats::{BlockResult, BlockStats};

/// Decoder for the report blocks of one station
///
/// Holds no mutable state; one decoder can be shared across tasks decoding
/// different blocks.
#[derive(Debug, Clone)]
pub struct BlockDecoder {
    station: String,
}

impl BlockDecoder {
    /// Create a decoder for a station code
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
        }
    }

    /// Station code data lines must start with
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Decode a block for the requested date
    ///
    /// Lines that do not start with the station code (after trimming leading
    /// whitespace) are ignored. Lines that fail to decode are counted and
    /// skipped.
    pub fn decode(&self, block: &str, date: NaiveDate) -> BlockResult {
        let lines: Vec<&str> = block.lines().collect();
        let header = HeaderInfo::detect(&lines);
        if !header.header_found() {
            warn!(
                "No column header in block for {} on {}, assuming no gust column",
                self.station, date
            );
        }

        let mut stats = BlockStats::new();
        let mut records = Vec::new();

        for (line_number, line) in lines.iter().enumerate() {
            if !line.trim_start().starts_with(self.station.as_str()) {
                continue;
            }
            stats.station_lines += 1;

            // Slice the untrimmed line so column offsets stay aligned
            match decode_line(line, date, &header.layout) {
                Ok(record) => {
                    if belongs_to_date(&record, date) {
                        if record.has_gust() {
                            stats.gust_present += 1;
                        }
                        stats.accepted += 1;
                        records.push(record);
                    } else {
                        stats.filtered_by_day += 1;
                    }
                }
                Err(e) => {
                    debug!("Skipped line {}: {}", line_number + 1, e);
                    stats.add_error(format!("Line {}: {}", line_number + 1, e));
                }
            }
        }

        debug!(
            "Decoded block for {} on {}: {}",
            self.station,
            date,
            stats.summary()
        );

        BlockResult {
            records,
            header,
            stats,
        }
    }
}
