//! Tests for block counters

use crate::app::services::sflist_parser::BlockStats;

fn sample_stats() -> BlockStats {
    BlockStats {
        station_lines: 5,
        accepted: 3,
        filtered_by_day: 1,
        gust_present: 2,
        unparseable: 1,
        errors: vec!["Line 7: bad".to_string()],
    }
}

#[test]
fn test_new_stats_are_empty() {
    let stats = BlockStats::new();

    assert_eq!(stats.station_lines, 0);
    assert_eq!(stats.decode_rate(), 0.0);
    assert!(stats.errors.is_empty());
}

#[test]
fn test_add_error_counts_line() {
    let mut stats = BlockStats::new();
    stats.add_error("Line 3: control character".to_string());

    assert_eq!(stats.unparseable, 1);
    assert_eq!(stats.errors, vec!["Line 3: control character"]);
}

#[test]
fn test_decode_rate() {
    assert_eq!(sample_stats().decode_rate(), 80.0);
}

#[test]
fn test_merge() {
    let mut total = sample_stats();
    total.merge(&sample_stats());

    assert_eq!(total.station_lines, 10);
    assert_eq!(total.accepted, 6);
    assert_eq!(total.filtered_by_day, 2);
    assert_eq!(total.gust_present, 4);
    assert_eq!(total.unparseable, 2);
    assert_eq!(total.errors.len(), 2);
}

#[test]
fn test_summary_mentions_counters() {
    let summary = sample_stats().summary();

    assert!(summary.contains("Found 3 records"));
    assert!(summary.contains("2 with gust data"));
    assert!(summary.contains("filtered out 1"));
    assert!(summary.contains("unparseable 1"));
}

#[test]
fn test_stats_serialize() {
    let json = serde_json::to_value(sample_stats()).unwrap();

    assert_eq!(json["accepted"], 3);
    assert_eq!(json["gust_present"], 2);
}
