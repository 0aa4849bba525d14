//! Tests for fixed-width slicing and optional number parsing

use super::*;
use crate::app::models::{ColumnLayout, Field, FieldRange};
use crate::app::services::sflist_parser::field_parsers::{
    extract_field, extract_layout_field, extract_remainder, is_missing_value,
    parse_optional_field, parse_optional_number,
};

#[test]
fn test_extract_full_field() {
    assert_eq!(extract_field(GUST_LINE, FieldRange::new(0, 4)), "OEJN");
    assert_eq!(extract_field(GUST_LINE, FieldRange::new(5, 12)), "24/1200");
    assert_eq!(extract_field(GUST_LINE, FieldRange::new(13, 19)), "1012.0");
}

#[test]
fn test_extract_from_short_line_returns_prefix() {
    let line = "OEJN 24/12";

    assert_eq!(extract_field(line, FieldRange::new(5, 12)), "24/12");
    assert_eq!(extract_field(line, FieldRange::new(0, 4)), "OEJN");
}

#[test]
fn test_extract_past_end_returns_empty() {
    let line = "OEJN";

    assert_eq!(extract_field(line, FieldRange::new(4, 10)), "");
    assert_eq!(extract_field(line, FieldRange::new(40, 44)), "");
    assert_eq!(extract_field("", FieldRange::new(0, 4)), "");
}

#[test]
fn test_extract_every_prefix_length() {
    for cut in 0..=GUST_LINE.len() {
        let line = &GUST_LINE[..cut];
        let field = extract_field(line, FieldRange::new(13, 19));
        assert!(GUST_LINE[13..19].starts_with(field), "cut at {cut}");
    }
}

#[test]
fn test_extract_counts_characters() {
    let line = "aébc";

    assert_eq!(extract_field(line, FieldRange::new(1, 3)), "éb");
    assert_eq!(extract_field(line, FieldRange::new(2, 4)), "bc");
    assert_eq!(extract_remainder(line, 2), "bc");
    assert_eq!(extract_remainder(line, 9), "");
}

#[test]
fn test_extract_layout_field_missing_column() {
    let layout = ColumnLayout::without_gust();
    assert_eq!(extract_layout_field(GUST_LINE, &layout, Field::WindGust), "");
}

#[test]
fn test_extract_remainder() {
    assert_eq!(extract_remainder(GUST_LINE, 49), "SCT030 BKN080 RA");
    assert_eq!(extract_remainder("OEJN", 49), "");
}

#[test]
fn test_missing_value_sentinels() {
    assert_eq!(parse_optional_number(""), None);
    assert_eq!(parse_optional_number("   "), None);
    assert_eq!(parse_optional_number("-"), None);
    assert_eq!(parse_optional_number("  -  "), None);

    assert!(is_missing_value(" - "));
    assert!(!is_missing_value("0"));
}

#[test]
fn test_parse_numbers() {
    assert_eq!(parse_optional_number(" 25"), Some(25.0));
    assert_eq!(parse_optional_number("025"), Some(25.0));
    assert_eq!(parse_optional_number("1012.0"), Some(1012.0));
    assert_eq!(parse_optional_number("-4"), Some(-4.0));
    assert_eq!(parse_optional_number("0"), Some(0.0));
}

#[test]
fn test_parse_failures_are_missing() {
    assert_eq!(parse_optional_number("8 0"), None);
    assert_eq!(parse_optional_number("abc"), None);
    assert_eq!(parse_optional_number("--"), None);
    assert_eq!(parse_optional_number("NaN"), None);
    assert_eq!(parse_optional_number("inf"), None);
}

#[test]
fn test_parse_round_trips_formatted_values() {
    for value in [0.0, 1.5, -12.25, 1013.2, 99999.0, 0.001] {
        assert_eq!(parse_optional_number(&value.to_string()), Some(value));
        assert_eq!(parse_optional_number(&format!("  {value} ")), Some(value));
    }
}

#[test]
fn test_parse_optional_field() {
    let layout = ColumnLayout::with_gust();

    assert_eq!(
        parse_optional_field(GUST_LINE, &layout, Field::Temperature),
        Some(25.0)
    );
    assert_eq!(
        parse_optional_field(GUST_LINE, &layout, Field::WindGust),
        Some(15.0)
    );
    assert_eq!(
        parse_optional_field(GUST_LINE, &ColumnLayout::without_gust(), Field::WindGust),
        None
    );
}
