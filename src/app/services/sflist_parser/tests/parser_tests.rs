//! Tests for whole-block decoding

use super::*;
use crate::app::services::sflist_parser::BlockDecoder;

#[test]
fn test_decode_gust_block() {
    let decoder = BlockDecoder::new("OEJN");
    let result = decoder.decode(&create_gust_block(), date(2024, 1, 24));

    assert!(result.has_gust_column());
    assert_eq!(result.stats.station_lines, 5);
    assert_eq!(result.stats.accepted, 3);
    assert_eq!(result.stats.filtered_by_day, 2);
    assert_eq!(result.stats.gust_present, 2);
    assert_eq!(result.stats.unparseable, 0);
    assert_eq!(result.record_count(), 3);

    let times: Vec<&str> = result.records.iter().map(|r| r.time.as_str()).collect();
    assert_eq!(times, vec!["24/0000", "24/1200", "24/1500"]);

    let midnight = &result.records[0];
    assert_eq!(midnight.wind_gust_ms, None);
    assert_eq!(midnight.visibility_km, Some(10.0));
    assert_eq!(midnight.clouds[0].as_deref(), Some("NSC"));

    let afternoon = &result.records[2];
    assert_eq!(afternoon.temperature_c, Some(33.0));
    assert_eq!(afternoon.dewpoint_c, None);
    assert_eq!(afternoon.humidity_percent, None);
    assert_eq!(afternoon.wind_gust_ms, Some(22.0));
    assert_eq!(afternoon.weather.as_deref(), Some("VCTS XYZ123"));
}

#[test]
fn test_decode_plain_block() {
    let decoder = BlockDecoder::new("OEJN");
    let result = decoder.decode(&create_plain_block(), date(2024, 1, 4));

    assert!(!result.has_gust_column());
    assert_eq!(result.stats.station_lines, 4);
    assert_eq!(result.stats.accepted, 3);
    assert_eq!(result.stats.filtered_by_day, 1);
    assert_eq!(result.stats.gust_present, 0);
    assert!(result.records.iter().all(|r| r.wind_gust_ms.is_none()));

    let cavok = &result.records[0];
    assert_eq!(cavok.clouds[0].as_deref(), Some("CAVOK"));

    let misty = &result.records[1];
    assert_eq!(misty.wind_direction_deg, None);
    assert_eq!(misty.wind_speed_ms, Some(0.0));
    assert_eq!(misty.visibility_km, Some(8.0));
    assert_eq!(misty.clouds[0].as_deref(), Some("091"));
    assert_eq!(misty.weather.as_deref(), Some("BR"));

    let morning = &result.records[2];
    assert_eq!(
        morning.cloud_layers().collect::<Vec<_>>(),
        vec!["FEW020", "SCT100"]
    );
    assert_eq!(morning.weather, None);
}

#[test]
fn test_decode_headerless_block() {
    let result = BlockDecoder::new("OEJN").decode(&create_headerless_block(), date(2024, 1, 24));

    assert!(!result.header.header_found());
    assert_eq!(result.stats.accepted, 2);
    assert_eq!(result.records[0].visibility_km, Some(8.0));
    assert_eq!(result.records[0].weather.as_deref(), Some("-DZ"));
}

#[test]
fn test_other_lines_are_ignored() {
    let block = [
        PLAIN_HEADER,
        "OERK 24/0900 1013.2  31  12  30 340   5  8.0 FEW025",
        "Observations for OEJN",
        "oejn 24/0900 1013.2  31  12  30 340   5  8.0 FEW025",
        PLAIN_LINE,
    ]
    .join("\n");

    let result = BlockDecoder::new("OEJN").decode(&block, date(2024, 1, 24));

    assert_eq!(result.stats.station_lines, 1);
    assert_eq!(result.stats.accepted, 1);
}

#[test]
fn test_indented_lines_qualify_but_slice_untrimmed() {
    let block = [PLAIN_HEADER, &format!("  {}", PLAIN_LINE)].join("\n");

    let result = BlockDecoder::new("OEJN").decode(&block, date(2024, 1, 24));

    assert_eq!(result.stats.station_lines, 1);
    // The two-column shift turns the time slice into "N 24/09"
    assert_eq!(result.stats.filtered_by_day, 1);
    assert!(result.records.is_empty());
}

#[test]
fn test_indented_line_without_day_token_is_kept() {
    let line = "  OEJN 1200";
    let block = [PLAIN_HEADER, line].join("\n");

    let result = BlockDecoder::new("OEJN").decode(&block, date(2024, 1, 24));

    assert_eq!(result.stats.accepted, 1);
    let record = &result.records[0];
    assert_eq!(record.station, "OE");
    assert_eq!(record.time, "N 1200");
    assert_eq!(record.raw_line, line);
}

#[test]
fn test_non_ascii_line_is_kept() {
    let block = [
        GUST_HEADER,
        "OEJN 24/1200 1012.0  2°  18  72 270   8  15 10.0 SCT030",
        GUST_LINE,
    ]
    .join("\n");

    let result = BlockDecoder::new("OEJN").decode(&block, date(2024, 1, 24));

    assert_eq!(result.stats.station_lines, 2);
    assert_eq!(result.stats.unparseable, 0);
    assert_eq!(result.stats.accepted, 2);
    assert_eq!(result.records[0].temperature_c, None);
    assert_eq!(result.records[0].dewpoint_c, Some(18.0));
}

#[test]
fn test_unparseable_line_is_counted_and_skipped() {
    let block = [
        GUST_HEADER,
        "OEJN 24/1200 1012.0\t25  18  72 270   8  15 10.0 SCT030",
        GUST_LINE,
    ]
    .join("\n");

    let result = BlockDecoder::new("OEJN").decode(&block, date(2024, 1, 24));

    assert_eq!(result.stats.station_lines, 2);
    assert_eq!(result.stats.unparseable, 1);
    assert_eq!(result.stats.accepted, 1);
    assert_eq!(result.stats.errors.len(), 1);
    assert!(result.stats.errors[0].starts_with("Line 2:"));
}

#[test]
fn test_wrong_date_filters_everything() {
    let result = BlockDecoder::new("OEJN").decode(&create_gust_block(), date(2024, 1, 10));

    assert_eq!(result.stats.station_lines, 5);
    assert_eq!(result.stats.accepted, 0);
    assert_eq!(result.stats.filtered_by_day, 5);
    assert!(result.records.is_empty());
}

#[test]
fn test_empty_block() {
    let result = BlockDecoder::new("OEJN").decode("", date(2024, 1, 24));

    assert_eq!(result.stats, Default::default());
    assert!(result.records.is_empty());
}

#[test]
fn test_counters_add_up() {
    let block = create_gust_block();
    let result = BlockDecoder::new("OEJN").decode(&block, date(2024, 1, 24));
    let stats = &result.stats;

    assert_eq!(
        stats.station_lines,
        stats.accepted + stats.filtered_by_day + stats.unparseable
    );
    assert!(stats.gust_present <= stats.accepted);
}
