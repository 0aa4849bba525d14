//! Field parsing utilities for fixed-width station lines
//!
//! Column offsets count characters, so a stray multibyte character only
//! disturbs the column it sits in. Slicing never fails: offsets past the end
//! of a line yield an empty or shortened field. Numeric conversion maps every
//! sentinel or malformed value to `None`.

use crate::app::models::{ColumnLayout, Field, FieldRange};
use crate::constants::MISSING_VALUE_SENTINELS;
use tracing::trace;

/// Byte index of the character at `position`, or the line length past the end
fn byte_offset(line: &str, position: usize) -> usize {
    line.char_indices()
        .nth(position)
        .map_or(line.len(), |(offset, _)| offset)
}

/// Extract a fixed-width field from a line
///
/// Returns the empty string when the field starts at or beyond the end of
/// the line, and a truncated field when the line ends inside it.
pub fn extract_field(line: &str, range: FieldRange) -> &str {
    if range.is_empty() {
        return "";
    }

    let start = byte_offset(line, range.start);
    let end = start + byte_offset(&line[start..], range.len());
    &line[start..end]
}

/// Extract a layout field, empty when the layout has no such column
pub fn extract_layout_field<'a>(line: &'a str, layout: &ColumnLayout, field: Field) -> &'a str {
    layout
        .range(field)
        .map_or("", |range| extract_field(line, range))
}

/// Remainder of a line from an offset onward, empty past the end
pub fn extract_remainder(line: &str, start: usize) -> &str {
    &line[byte_offset(line, start)..]
}

/// Check whether a field value represents missing data
pub fn is_missing_value(value: &str) -> bool {
    MISSING_VALUE_SENTINELS.contains(&value.trim())
}

/// Parse an optional decimal number
///
/// Blank, whitespace-only and lone `-` values are missing. Anything that does
/// not parse to a finite number is missing as well.
pub fn parse_optional_number(value: &str) -> Option<f64> {
    if is_missing_value(value) {
        return None;
    }

    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        Ok(_) | Err(_) => {
            trace!("Treating unparseable value '{}' as missing", trimmed);
            None
        }
    }
}

/// Extract and parse an optional numeric layout field
pub fn parse_optional_field(line: &str, layout: &ColumnLayout, field: Field) -> Option<f64> {
    layout
        .range(field)
        .and_then(|range| parse_optional_number(extract_field(line, range)))
}
