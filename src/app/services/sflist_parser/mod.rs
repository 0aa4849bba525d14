//! Fixed-width parser for surface station report blocks
//!
//! A report block is the text listing for one station and one day. Data lines
//! start with the station code and carry fixed-width columns followed by a
//! free-form section of cloud layers and present-weather codes.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`header`] - Column header detection and layout selection
//! - [`field_parsers`] - Tolerant fixed-width slicing and numeric parsing
//! - [`token_classifier`] - Ordered cloud/weather rules for trailing tokens
//! - [`record_parser`] - Individual line decoding
//! - [`day_filter`] - Exact day-of-month membership
//! - [`parser`] - Block orchestration
//! - [`stats`] - Block counters and result structures
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sflist_processor::app::services::sflist_parser::BlockDecoder;
//!
//! let block = "STN  TIME   ALTM   TMP DEW RH  DIR SPD VIS\n\
//!              OEJN 24/1200 1012.0  25  18  72 270   8 9999 SCT030";
//! let date = NaiveDate::from_ymd_opt(2024, 1, 24).unwrap();
//!
//! let result = BlockDecoder::new("OEJN").decode(block, date);
//! println!("Decoded {} records ({} filtered)",
//!          result.stats.accepted,
//!          result.stats.filtered_by_day);
//! ```

pub mod day_filter;
pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod record_parser;
pub mod stats;
pub mod token_classifier;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::HeaderInfo;
pub use parser::BlockDecoder;
pub use stats::{BlockResult, BlockStats};
pub use token_classifier::{ClassifiedToken, TrailingTokens};
