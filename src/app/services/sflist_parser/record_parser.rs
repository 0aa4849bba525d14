//! Individual station line decoding
//!
//! This module turns one raw data line into a [`WeatherRecord`] using the
//! block's column layout. Missing or malformed values become `None`; only a
//! structural fault in the line fails the decode.

use chrono::NaiveDate;

use super::field_parsers::{extract_layout_field, extract_remainder, parse_optional_field};
use super::token_classifier::TrailingTokens;
use crate::app::models::{ColumnLayout, Field, WeatherRecord};
use crate::{Error, Result};

/// Decode a single station line
///
/// Fails with [`Error::UnparseableLine`] when a control character such as a
/// tab sits inside the fixed-width columns. Any other odd character only
/// leaves its own column missing.
pub fn decode_line(line: &str, date: NaiveDate, layout: &ColumnLayout) -> Result<WeatherRecord> {
    check_fixed_width_region(line, layout)?;

    let station = extract_layout_field(line, layout, Field::Station)
        .trim()
        .to_string();
    let time = extract_layout_field(line, layout, Field::Time)
        .trim()
        .to_string();

    let trailing = TrailingTokens::classify(extract_remainder(line, layout.clouds_start()).trim());

    Ok(WeatherRecord {
        date,
        station,
        time,
        pressure_hpa: parse_optional_field(line, layout, Field::Pressure),
        temperature_c: parse_optional_field(line, layout, Field::Temperature),
        dewpoint_c: parse_optional_field(line, layout, Field::Dewpoint),
        humidity_percent: parse_optional_field(line, layout, Field::Humidity),
        wind_direction_deg: parse_optional_field(line, layout, Field::WindDirection),
        wind_speed_ms: parse_optional_field(line, layout, Field::WindSpeed),
        // None without a gust column: the layout has no range for it
        wind_gust_ms: parse_optional_field(line, layout, Field::WindGust),
        visibility_km: parse_optional_field(line, layout, Field::Visibility),
        clouds: trailing.cloud_columns(),
        weather: trailing.weather,
        raw_line: line.to_string(),
    })
}

/// Reject lines whose fixed-width columns hold control characters
fn check_fixed_width_region(line: &str, layout: &ColumnLayout) -> Result<()> {
    let fault = line
        .chars()
        .take(layout.clouds_start())
        .position(|c| c.is_control() && c != '\r');

    match fault {
        Some(column) => Err(Error::unparseable_line(
            line,
            format!("control character at column {} inside fixed-width columns", column),
        )),
        None => Ok(()),
    }
}
