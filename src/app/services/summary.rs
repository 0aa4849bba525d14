//! Summary statistics over collected records
//!
//! Computed after a run for the human and JSON reports: value ranges,
//! missing counts per numeric column, cloud examples and a short sample.

use serde::Serialize;

use crate::app::models::WeatherRecord;
use crate::constants::{
    MAX_CLOUD_LAYERS, NUMERIC_COLUMNS, OUTPUT_COLUMNS, SUMMARY_CLOUD_EXAMPLES, SUMMARY_SAMPLE_ROWS,
};

/// Inclusive min/max of a column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |range, value| match range {
            None => Some(Self {
                min: value,
                max: value,
            }),
            Some(Self { min, max }) => Some(Self {
                min: min.min(value),
                max: max.max(value),
            }),
        })
    }
}

/// Missing values of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingStats {
    pub column: String,
    pub missing: usize,
    pub total: usize,
    pub percent: f64,
}

/// Non-empty count and first distinct values of one cloud column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudColumnSummary {
    pub column: String,
    pub entries: usize,
    pub examples: Vec<String>,
}

/// One row of the sample table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    pub time: String,
    pub temperature_c: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    pub wind_gust_ms: Option<f64>,
    pub visibility_km: Option<f64>,
    pub weather: Option<String>,
}

impl From<&WeatherRecord> for SampleRow {
    fn from(record: &WeatherRecord) -> Self {
        Self {
            time: record.time.clone(),
            temperature_c: record.temperature_c,
            wind_speed_ms: record.wind_speed_ms,
            wind_gust_ms: record.wind_gust_ms,
            visibility_km: record.visibility_km,
            weather: record.weather.clone(),
        }
    }
}

/// Summary of a set of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSummary {
    pub records: usize,
    pub temperature_range: Option<ValueRange>,
    pub humidity_range: Option<ValueRange>,
    pub gust_range: Option<ValueRange>,
    pub gust_records: usize,
    pub missing: Vec<MissingStats>,
    pub clouds: Vec<CloudColumnSummary>,
    pub sample: Vec<SampleRow>,
}

impl RecordSummary {
    pub fn from_records(records: &[WeatherRecord]) -> Self {
        let total = records.len();

        let missing = NUMERIC_COLUMNS
            .iter()
            .map(|column| {
                let missing = records
                    .iter()
                    .filter(|r| r.numeric_column(column).is_none())
                    .count();
                MissingStats {
                    column: column.to_string(),
                    missing,
                    total,
                    percent: if total == 0 {
                        0.0
                    } else {
                        missing as f64 / total as f64 * 100.0
                    },
                }
            })
            .collect();

        let cloud_names = &OUTPUT_COLUMNS[11..11 + MAX_CLOUD_LAYERS];
        let clouds = cloud_names
            .iter()
            .enumerate()
            .filter_map(|(layer, column)| {
                let values: Vec<&str> = records
                    .iter()
                    .filter_map(|r| r.clouds[layer].as_deref())
                    .collect();
                if values.is_empty() {
                    return None;
                }

                let mut examples: Vec<String> = Vec::new();
                for value in &values {
                    if examples.len() == SUMMARY_CLOUD_EXAMPLES {
                        break;
                    }
                    if !examples.iter().any(|e| e == *value) {
                        examples.push(value.to_string());
                    }
                }

                Some(CloudColumnSummary {
                    column: column.to_string(),
                    entries: values.len(),
                    examples,
                })
            })
            .collect();

        Self {
            records: total,
            temperature_range: ValueRange::of(records.iter().filter_map(|r| r.temperature_c)),
            humidity_range: ValueRange::of(records.iter().filter_map(|r| r.humidity_percent)),
            gust_range: ValueRange::of(records.iter().filter_map(|r| r.wind_gust_ms)),
            gust_records: records.iter().filter(|r| r.has_gust()).count(),
            missing,
            clouds,
            sample: records
                .iter()
                .take(SUMMARY_SAMPLE_ROWS)
                .map(SampleRow::from)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}
