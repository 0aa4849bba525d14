//! Test fixtures for report block parsing
//!
//! Fixture lines are aligned to the real column offsets so that every field
//! lands in its fixed-width slot.

use chrono::NaiveDate;

mod field_parser_tests;
mod parser_tests;
mod stats_tests;

pub const GUST_HEADER: &str = "STN  TIME    ALTM    TMP DEW RH  DIR SPD GUS VIS  CLOUDS";
pub const PLAIN_HEADER: &str = "STN  TIME    ALTM    TMP DEW RH  DIR SPD VIS  CLOUDS";

/// Data line in the gust layout with clouds and weather
pub const GUST_LINE: &str = "OEJN 24/1200 1012.0  25  18  72 270   8  15 10.0 SCT030 BKN080 RA";

/// Data line in the plain layout
pub const PLAIN_LINE: &str = "OEJN 24/0900 1013.2  31  12  30 340   5  8.0 FEW025 -DZ";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Listing for OEJN on 2024-01-24 with a gust column and rows from both
/// neighbouring days
pub fn create_gust_block() -> String {
    [
        "<title>OEJN Observations</title>",
        "",
        GUST_HEADER,
        "          hPa     C   C   %  deg m/s m/s km",
        "OEJN 23/2300 1011.8  27  19  62 260   6     10.0 FEW030",
        "OEJN 24/0000 1011.5  26  19  65 250   5     10.0 NSC",
        "OEJN 24/1200 1012.0  25  18  72 270   8  15 10.0 SCT030 BKN080 RA",
        "OEJN 24/1500 1010.9  33   -     300  12  22  4.0 -SCT040 VCTS XYZ123",
        "OEJN 25/0000 1012.3  24  17  65 240   4     10.0",
        "",
        "Station information and sounding indices",
    ]
    .join("\n")
}

/// Listing for OEJN on 2024-01-04 without a gust column
pub fn create_plain_block() -> String {
    [
        PLAIN_HEADER,
        "OEJN 03/2100 1013.0  22  10  46 020   3 10.0",
        "OEJN 04/0000 1013.4  21  10  49 010   3 10.0 CAVOK",
        "OEJN 04/0300 1014.1  20  11  56       0  8.0 091 BR",
        "OEJN 04/0600 1014.6  24  12  47 350   4 10.0 FEW020 SCT100",
    ]
    .join("\n")
}

/// Data lines with no header line at all
pub fn create_headerless_block() -> String {
    [
        "OEJN 24/0900 1013.2  31  12  30 340   5  8.0 FEW025 -DZ",
        "OEJN 24/1000 1013.0  32  12  28 330   6 10.0",
    ]
    .join("\n")
}
