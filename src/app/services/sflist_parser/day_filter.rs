//! Day-of-month membership for decoded records
//!
//! Listings for one day can include rows from the previous or next day around
//! midnight. Records are kept only when the day in their `DD/HHMM` time token
//! matches the requested day.

use chrono::{Datelike, NaiveDate};

use crate::app::models::WeatherRecord;

/// Check whether a record belongs to the target day
///
/// Records whose time token has no `/` are kept, since the day cannot be
/// determined. Day values are compared with leading zeros removed.
pub fn belongs_to(record: &WeatherRecord, target_day: &str) -> bool {
    match record.day_token() {
        Some(day) => normalize_day(day) == normalize_day(target_day),
        None => true,
    }
}

/// Check a record against the day-of-month of a date
pub fn belongs_to_date(record: &WeatherRecord, date: NaiveDate) -> bool {
    belongs_to(record, &format!("{:02}", date.day()))
}

/// Strip leading zeros; an all-zero or empty day becomes "0"
pub fn normalize_day(day: &str) -> &str {
    let stripped = day.trim().trim_start_matches('0');
    if stripped.is_empty() { "0" } else { stripped }
}
