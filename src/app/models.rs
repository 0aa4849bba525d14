//! Data models for sflist processing
//!
//! This module contains the column layout of a report block and the decoded
//! weather record produced for every accepted station line.

use crate::constants::{MAX_CLOUD_LAYERS, offsets};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Column Layout
// =============================================================================

/// Fixed-width fields of a station line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Station,
    Time,
    Pressure,
    Temperature,
    Dewpoint,
    Humidity,
    WindDirection,
    WindSpeed,
    WindGust,
    Visibility,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Station => "STN",
            Field::Time => "TIME",
            Field::Pressure => "ALTM",
            Field::Temperature => "TMP",
            Field::Dewpoint => "DEW",
            Field::Humidity => "RH",
            Field::WindDirection => "DIR",
            Field::WindSpeed => "SPD",
            Field::WindGust => "GUS",
            Field::Visibility => "VIS",
        };
        f.write_str(name)
    }
}

/// Half-open character range of a field within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRange {
    pub start: usize,
    pub end: usize,
}

impl FieldRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Width of the field in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<(usize, usize)> for FieldRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// Column layout applied to every data line of one block
///
/// Two layouts exist. The gust layout inserts a wind gust column after wind
/// speed, which shifts visibility and the cloud section right by four columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    has_gust: bool,
    fields: Vec<(Field, FieldRange)>,
    clouds_start: usize,
}

impl ColumnLayout {
    /// Layout for blocks whose header has no gust column
    pub fn without_gust() -> Self {
        let mut fields = Self::common_fields();
        fields.push((
            Field::Visibility,
            offsets::without_gust::VISIBILITY.into(),
        ));

        Self {
            has_gust: false,
            fields,
            clouds_start: offsets::without_gust::CLOUDS_START,
        }
    }

    /// Layout for blocks whose header has a gust column
    pub fn with_gust() -> Self {
        let mut fields = Self::common_fields();
        fields.push((Field::WindGust, offsets::with_gust::WIND_GUST.into()));
        fields.push((Field::Visibility, offsets::with_gust::VISIBILITY.into()));

        Self {
            has_gust: true,
            fields,
            clouds_start: offsets::with_gust::CLOUDS_START,
        }
    }

    /// Select the layout for a gust flag
    pub fn for_gust(has_gust: bool) -> Self {
        if has_gust {
            Self::with_gust()
        } else {
            Self::without_gust()
        }
    }

    fn common_fields() -> Vec<(Field, FieldRange)> {
        vec![
            (Field::Station, offsets::STATION.into()),
            (Field::Time, offsets::TIME.into()),
            (Field::Pressure, offsets::PRESSURE.into()),
            (Field::Temperature, offsets::TEMPERATURE.into()),
            (Field::Dewpoint, offsets::DEWPOINT.into()),
            (Field::Humidity, offsets::HUMIDITY.into()),
            (Field::WindDirection, offsets::WIND_DIRECTION.into()),
            (Field::WindSpeed, offsets::WIND_SPEED.into()),
        ]
    }

    /// Whether this layout carries a wind gust column
    pub fn has_gust(&self) -> bool {
        self.has_gust
    }

    /// Byte offset where the free-form cloud/weather section begins
    pub fn clouds_start(&self) -> usize {
        self.clouds_start
    }

    /// Range of a field, `None` if the layout has no such column
    pub fn range(&self, field: Field) -> Option<FieldRange> {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, range)| *range)
    }

    /// Fields in column order
    pub fn fields(&self) -> impl Iterator<Item = (Field, FieldRange)> + '_ {
        self.fields.iter().copied()
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::without_gust()
    }
}

// =============================================================================
// Weather Record
// =============================================================================

/// One decoded observation line
///
/// Numeric fields are `None` when the column was blank, a lone `-`, or did
/// not parse. Values are kept in the units of the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Calendar day the block was requested for
    pub date: NaiveDate,

    /// Station code from the first column
    pub station: String,

    /// Raw time token, normally `DD/HHMM`
    pub time: String,

    pub pressure_hpa: Option<f64>,
    pub temperature_c: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub wind_speed_ms: Option<f64>,

    /// Always `None` when the block has no gust column
    pub wind_gust_ms: Option<f64>,

    pub visibility_km: Option<f64>,

    /// Cloud layer tokens in line order; slots past the last token are `None`
    pub clouds: [Option<String>; MAX_CLOUD_LAYERS],

    /// Present-weather tokens joined with single spaces
    pub weather: Option<String>,

    /// The line as it appeared in the block
    pub raw_line: String,
}

impl WeatherRecord {
    /// Cloud tokens that are present, in order
    pub fn cloud_layers(&self) -> impl Iterator<Item = &str> {
        self.clouds.iter().filter_map(|c| c.as_deref())
    }

    /// Whether a gust value was decoded for this record
    pub fn has_gust(&self) -> bool {
        self.wind_gust_ms.is_some()
    }

    /// Day-of-month portion of the time token, if it has the `DD/HHMM` form
    pub fn day_token(&self) -> Option<&str> {
        self.time.split_once('/').map(|(day, _)| day)
    }

    /// Value of a numeric output column by its canonical name
    pub fn numeric_column(&self, column: &str) -> Option<f64> {
        match column {
            "Pressure_hPa" => self.pressure_hpa,
            "Temperature_C" => self.temperature_c,
            "Dewpoint_C" => self.dewpoint_c,
            "Humidity_percent" => self.humidity_percent,
            "Wind_Direction_deg" => self.wind_direction_deg,
            "Wind_Speed_ms" => self.wind_speed_ms,
            "Wind_Gust_ms" => self.wind_gust_ms,
            "Visibility_km" => self.visibility_km,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_differ_from_gust_onwards() {
        let plain = ColumnLayout::without_gust();
        let gust = ColumnLayout::with_gust();

        for field in [
            Field::Station,
            Field::Time,
            Field::Pressure,
            Field::Temperature,
            Field::Dewpoint,
            Field::Humidity,
            Field::WindDirection,
            Field::WindSpeed,
        ] {
            assert_eq!(plain.range(field), gust.range(field), "{field}");
        }

        assert_eq!(plain.range(Field::WindGust), None);
        assert_eq!(gust.range(Field::WindGust), Some(FieldRange::new(40, 43)));

        let plain_vis = plain.range(Field::Visibility).unwrap();
        let gust_vis = gust.range(Field::Visibility).unwrap();
        assert_eq!(gust_vis.start, plain_vis.start + 4);
        assert_eq!(gust_vis.end, plain_vis.end + 4);
        assert_eq!(gust.clouds_start(), plain.clouds_start() + 4);
    }

    #[test]
    fn test_field_order() {
        let names: Vec<String> = ColumnLayout::with_gust()
            .fields()
            .map(|(field, _)| field.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["STN", "TIME", "ALTM", "TMP", "DEW", "RH", "DIR", "SPD", "GUS", "VIS"]
        );
    }

    #[test]
    fn test_default_layout_has_no_gust() {
        let layout = ColumnLayout::default();
        assert!(!layout.has_gust());
        assert_eq!(layout.clouds_start(), 45);
        assert_eq!(ColumnLayout::for_gust(true), ColumnLayout::with_gust());
    }

    #[test]
    fn test_field_range_len() {
        assert_eq!(FieldRange::new(5, 12).len(), 7);
        assert!(FieldRange::new(4, 4).is_empty());
        assert!(FieldRange::new(5, 3).is_empty());
    }
}
