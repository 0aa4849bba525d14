//! Application constants for the sflist processor
//!
//! This module contains the fixed-width column offsets, header markers,
//! code tables and default settings used throughout the processor.

// =============================================================================
// Report Source Defaults
// =============================================================================

/// Default station code (King Abdulaziz International, Jeddah)
pub const DEFAULT_STATION: &str = "OEJN";

/// Default URL template for the University of Wyoming surface listing page.
///
/// `{date}` is replaced with the `YYYYMMDD` date and `{station}` with the
/// station code.
pub const DEFAULT_SOURCE_URL: &str = "https://weather.uwyo.edu/cgi-bin/wyowx.fcgi?TYPE=sflist&DATE={date}&HOUR=24&UNITS=M&STATION={station}";

/// Placeholder for the report date in a source URL template
pub const URL_DATE_PLACEHOLDER: &str = "{date}";

/// Placeholder for the station code in a source URL template
pub const URL_STATION_PLACEHOLDER: &str = "{station}";

/// Browser-like user agent; the listing service rejects bare clients
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Number of report blocks fetched concurrently
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Upper bound accepted for concurrent requests
pub const MAX_CONCURRENT_REQUESTS_LIMIT: usize = 32;

/// Date format used for CLI arguments, URLs and file names
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Extension of saved report blocks read by the directory source
pub const SAVED_BLOCK_EXTENSION: &str = "txt";

// =============================================================================
// Output Defaults
// =============================================================================

/// Default output directory for exported tables
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Prefix of exported table file names
pub const OUTPUT_FILE_PREFIX: &str = "weather_data";

/// Number of rows shown in the sample section of the summary
pub const SUMMARY_SAMPLE_ROWS: usize = 8;

/// Distinct example values listed per cloud column in the summary
pub const SUMMARY_CLOUD_EXAMPLES: usize = 3;

// =============================================================================
// Header Detection
// =============================================================================

/// Markers that must all appear (uppercased) on the column header line
pub const HEADER_MARKERS: &[&str] = &["STN", "TIME", "TMP"];

/// Marker indicating the optional wind gust column
pub const GUST_MARKER: &str = "GUS";

// =============================================================================
// Fixed-Width Column Offsets (half-open character ranges)
// =============================================================================

/// Offsets shared by both layouts
pub mod offsets {
    pub const STATION: (usize, usize) = (0, 4);
    pub const TIME: (usize, usize) = (5, 12);
    pub const PRESSURE: (usize, usize) = (13, 19);
    pub const TEMPERATURE: (usize, usize) = (20, 23);
    pub const DEWPOINT: (usize, usize) = (24, 27);
    pub const HUMIDITY: (usize, usize) = (28, 31);
    pub const WIND_DIRECTION: (usize, usize) = (32, 35);
    pub const WIND_SPEED: (usize, usize) = (36, 39);

    /// Offsets for blocks without a gust column
    pub mod without_gust {
        pub const VISIBILITY: (usize, usize) = (40, 44);
        pub const CLOUDS_START: usize = 45;
    }

    /// Offsets for blocks with a gust column
    pub mod with_gust {
        pub const WIND_GUST: (usize, usize) = (40, 43);
        pub const VISIBILITY: (usize, usize) = (44, 48);
        pub const CLOUDS_START: usize = 49;
    }
}

// =============================================================================
// Trailing Token Classification
// =============================================================================

/// Cloud layer codes recognised as token prefixes
pub const CLOUD_LAYER_CODES: &[&str] = &["SCT", "BKN", "OVC", "FEW", "CLR", "SKC", "NSC", "VV"];

/// Regex for a complete cloud layer token (applied to the uppercased token)
pub const CLOUD_LAYER_PATTERN: &str = r"^[-+]?(SCT|BKN|OVC|FEW|CLR|SKC|NSC|VV)\d*\**$";

/// Whole-token sky condition codes
pub const SPECIAL_CLOUD_CODES: &[&str] = &["CAVOK", "NSC", "NCD"];

/// Maximum trailing asterisks stripped before the prefix check
pub const MAX_TRAILING_ASTERISKS: usize = 3;

/// Number of cloud columns kept per record
pub const MAX_CLOUD_LAYERS: usize = 4;

/// Vicinity prefix for present-weather codes
pub const VICINITY_PREFIX: &str = "VC";

/// Present-weather code table
pub const WEATHER_CODES: &[&str] = &[
    "RA", "SN", "DZ", "SG", "IC", "PL", "GR", "GS", "UP", "FG", "BR", "HZ", "FU", "VA", "DU", "SA",
    "PY", "SQ", "FC", "SS", "DS", "PO", "TS", "BLDU", "BLSA", "BLSN", "DRDU", "DRSA", "FZRA",
    "FZDZ", "FZFG", "SHRA", "SHSN", "SHGR", "SHGS", "TSRA", "TSSN", "TSGR", "TSGS", "MIFG", "PRFG",
    "BCFG", "VCSH", "VCTS", "VCFG", "VCPO", "VCBLDU", "VCBLSA", "VCBLSN",
];

// =============================================================================
// Missing Value Sentinels
// =============================================================================

/// Textual forms (after trimming) treated as a missing numeric value
pub const MISSING_VALUE_SENTINELS: &[&str] = &["", "-"];

// =============================================================================
// Canonical Output Columns
// =============================================================================

/// Column order for exported tables
pub const OUTPUT_COLUMNS: &[&str] = &[
    "Date",
    "Station",
    "Time",
    "Pressure_hPa",
    "Temperature_C",
    "Dewpoint_C",
    "Humidity_percent",
    "Wind_Direction_deg",
    "Wind_Speed_ms",
    "Wind_Gust_ms",
    "Visibility_km",
    "Clouds_1",
    "Clouds_2",
    "Clouds_3",
    "Clouds_4",
    "Weather",
    "Raw_Line",
];

/// Numeric columns covered by the missing value statistics
pub const NUMERIC_COLUMNS: &[&str] = &[
    "Pressure_hPa",
    "Temperature_C",
    "Dewpoint_C",
    "Humidity_percent",
    "Wind_Direction_deg",
    "Wind_Speed_ms",
    "Wind_Gust_ms",
    "Visibility_km",
];
