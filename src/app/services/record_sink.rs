//! Record sinks
//!
//! Accepted records are handed to a sink in date order. The frame sink
//! buffers them and writes a single CSV or Parquet table when the run
//! finishes; the vector sink keeps them in memory.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::{
    Column, CsvWriter, DataFrame, NamedFrom, ParquetCompression, ParquetWriter, SerWriter,
};
use tracing::{debug, info, warn};

use crate::app::models::WeatherRecord;
use crate::config::{OutputConfig, SinkFormat};
use crate::constants::{DATE_FORMAT, MAX_CLOUD_LAYERS, OUTPUT_COLUMNS, OUTPUT_FILE_PREFIX};
use crate::{Error, Result};

/// Destination for accepted records
pub trait RecordSink {
    /// Take the records accepted for one date
    fn accept(&mut self, records: &[WeatherRecord]) -> Result<()>;

    /// Flush everything; returns the written file, if any
    fn finish(&mut self) -> Result<Option<PathBuf>>;
}

/// File name for a run, e.g. `weather_data_OEJN_20240101_to_20240131.csv`
pub fn output_file_name(
    station: &str,
    start: NaiveDate,
    end: NaiveDate,
    format: SinkFormat,
) -> String {
    format!(
        "{}_{}_{}_to_{}.{}",
        OUTPUT_FILE_PREFIX,
        station,
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT),
        format.extension()
    )
}

/// Build a table with the canonical output columns
///
/// Numeric columns are nullable `Float64`; everything else is `String`.
pub fn records_to_frame(records: &[WeatherRecord]) -> Result<DataFrame> {
    let text = |name: &str, values: Vec<Option<String>>| Column::new(name.into(), values);
    let number = |name: &str, values: Vec<Option<f64>>| Column::new(name.into(), values);

    let mut columns = vec![
        text(
            OUTPUT_COLUMNS[0],
            records
                .iter()
                .map(|r| Some(r.date.format(DATE_FORMAT).to_string()))
                .collect(),
        ),
        text(
            OUTPUT_COLUMNS[1],
            records.iter().map(|r| Some(r.station.clone())).collect(),
        ),
        text(
            OUTPUT_COLUMNS[2],
            records.iter().map(|r| Some(r.time.clone())).collect(),
        ),
    ];

    for name in OUTPUT_COLUMNS[3..11].iter().copied() {
        columns.push(number(
            name,
            records.iter().map(|r| r.numeric_column(name)).collect(),
        ));
    }

    for (layer, name) in OUTPUT_COLUMNS[11..11 + MAX_CLOUD_LAYERS]
        .iter()
        .copied()
        .enumerate()
    {
        columns.push(text(
            name,
            records.iter().map(|r| r.clouds[layer].clone()).collect(),
        ));
    }

    columns.push(text(
        OUTPUT_COLUMNS[15],
        records.iter().map(|r| r.weather.clone()).collect(),
    ));
    columns.push(text(
        OUTPUT_COLUMNS[16],
        records.iter().map(|r| Some(r.raw_line.clone())).collect(),
    ));

    DataFrame::new(columns).map_err(|e| Error::sink_writing("Failed to build record table", e))
}

/// Buffers records and writes one table file on finish
#[derive(Debug)]
pub struct FrameSink {
    output_path: PathBuf,
    format: SinkFormat,
    force_overwrite: bool,
    records: Vec<WeatherRecord>,
}

impl FrameSink {
    pub fn new(output_path: impl AsRef<Path>, format: SinkFormat, force_overwrite: bool) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
            format,
            force_overwrite,
            records: Vec::new(),
        }
    }

    /// Sink writing the standard file name into the configured directory
    pub fn for_run(output: &OutputConfig, station: &str, start: NaiveDate, end: NaiveDate) -> Self {
        let path = output
            .output_dir
            .join(output_file_name(station, start, end, output.format));
        Self::new(path, output.format, output.force_overwrite)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn buffered(&self) -> usize {
        self.records.len()
    }

    /// Records accepted so far
    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    /// Fail early when the output exists and overwriting is not allowed
    pub fn check_writable(&self) -> Result<()> {
        if self.output_path.exists() && !self.force_overwrite {
            return Err(Error::configuration(format!(
                "Output file {} already exists (use --force to overwrite)",
                self.output_path.display()
            )));
        }
        Ok(())
    }

    fn write_frame(&self, mut df: DataFrame) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("Failed to create output directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let mut file = File::create(&self.output_path).map_err(|e| {
            Error::io(
                format!("Failed to create {}", self.output_path.display()),
                e,
            )
        })?;

        match self.format {
            SinkFormat::Csv => CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)
                .map_err(|e| Error::sink_writing("Failed to write CSV table", e)),
            SinkFormat::Parquet => ParquetWriter::new(&mut file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map(|_| ())
                .map_err(|e| Error::sink_writing("Failed to write Parquet table", e)),
        }
    }
}

impl RecordSink for FrameSink {
    fn accept(&mut self, records: &[WeatherRecord]) -> Result<()> {
        self.records.extend_from_slice(records);
        debug!("Buffered {} records ({} total)", records.len(), self.records.len());
        Ok(())
    }

    fn finish(&mut self) -> Result<Option<PathBuf>> {
        if self.records.is_empty() {
            warn!("No records collected, nothing written");
            return Ok(None);
        }

        self.check_writable()?;

        let df = records_to_frame(&self.records)?;
        let (rows, cols) = df.shape();
        self.write_frame(df)?;

        info!(
            "Wrote {} rows x {} columns to {}",
            rows,
            cols,
            self.output_path.display()
        );
        Ok(Some(self.output_path.clone()))
    }
}

/// In-memory sink
#[derive(Debug, Default)]
pub struct VecSink {
    pub records: Vec<WeatherRecord>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_records(self) -> Vec<WeatherRecord> {
        self.records
    }
}

impl RecordSink for VecSink {
    fn accept(&mut self, records: &[WeatherRecord]) -> Result<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }

    fn finish(&mut self) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::ColumnLayout;
    use crate::app::services::sflist_parser::record_parser::decode_line;
    use polars::prelude::{DataType, ParquetReader, SerReader};
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn sample_records() -> Vec<WeatherRecord> {
        let layout = ColumnLayout::with_gust();
        [
            "OEJN 24/1200 1012.0  25  18  72 270   8  15 10.0 SCT030 BKN080 RA",
            "OEJN 24/1500 1010.9  33   -     300  12  22  4.0 -SCT040 VCTS XYZ123",
            "OEJN 24/1800 1011.2  29  17  48 280   6     10.0",
        ]
        .iter()
        .map(|line| decode_line(line, date(24), &layout).unwrap())
        .collect()
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("OEJN", date(1), date(31), SinkFormat::Csv),
            "weather_data_OEJN_20240101_to_20240131.csv"
        );
        assert_eq!(
            output_file_name("OEJN", date(24), date(24), SinkFormat::Parquet),
            "weather_data_OEJN_20240124_to_20240124.parquet"
        );
    }

    #[test]
    fn test_records_to_frame_schema() {
        let df = records_to_frame(&sample_records()).unwrap();

        assert_eq!(df.shape(), (3, OUTPUT_COLUMNS.len()));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, OUTPUT_COLUMNS);

        let gust = df.column("Wind_Gust_ms").unwrap();
        assert_eq!(gust.dtype(), &DataType::Float64);
        assert_eq!(gust.null_count(), 1);
        assert_eq!(df.column("Dewpoint_C").unwrap().null_count(), 1);
        assert_eq!(df.column("Clouds_1").unwrap().null_count(), 1);
        assert_eq!(df.column("Clouds_3").unwrap().null_count(), 3);
        assert_eq!(df.column("Weather").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_records_to_frame_empty() {
        let df = records_to_frame(&[]).unwrap();
        assert_eq!(df.shape(), (0, OUTPUT_COLUMNS.len()));
    }

    #[test]
    fn test_frame_sink_writes_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("out.csv");
        let mut sink = FrameSink::new(&path, SinkFormat::Csv, false);

        let records = sample_records();
        sink.accept(&records[..2]).unwrap();
        sink.accept(&records[2..]).unwrap();
        assert_eq!(sink.buffered(), 3);

        let written = sink.finish().unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), OUTPUT_COLUMNS.join(","));
        assert_eq!(lines.count(), 3);
        assert!(content.contains("VCTS XYZ123"));
    }

    #[test]
    fn test_frame_sink_writes_parquet() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.parquet");
        let mut sink = FrameSink::new(&path, SinkFormat::Parquet, false);

        sink.accept(&sample_records()).unwrap();
        sink.finish().unwrap();

        let df = ParquetReader::new(File::open(&path).unwrap())
            .finish()
            .unwrap();
        assert_eq!(df.shape(), (3, OUTPUT_COLUMNS.len()));
        assert_eq!(df.column("Temperature_C").unwrap().null_count(), 0);
    }

    #[test]
    fn test_frame_sink_without_records_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        let mut sink = FrameSink::new(&path, SinkFormat::Csv, false);

        assert_eq!(sink.finish().unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_frame_sink_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        std::fs::write(&path, "existing").unwrap();

        let mut sink = FrameSink::new(&path, SinkFormat::Csv, false);
        assert!(sink.check_writable().is_err());
        sink.accept(&sample_records()).unwrap();
        assert!(matches!(sink.finish(), Err(Error::Configuration { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");

        let mut forced = FrameSink::new(&path, SinkFormat::Csv, true);
        forced.accept(&sample_records()).unwrap();
        assert!(forced.finish().unwrap().is_some());
    }

    #[test]
    fn test_for_run_uses_output_dir() {
        let output = OutputConfig {
            output_dir: PathBuf::from("/data/out"),
            format: SinkFormat::Parquet,
            force_overwrite: false,
        };

        let sink = FrameSink::for_run(&output, "OEJN", date(1), date(2));

        assert_eq!(
            sink.output_path(),
            Path::new("/data/out/weather_data_OEJN_20240101_to_20240102.parquet")
        );
    }

    #[test]
    fn test_vec_sink() {
        let mut sink = VecSink::new();
        sink.accept(&sample_records()).unwrap();

        assert_eq!(sink.finish().unwrap(), None);
        assert_eq!(sink.into_records().len(), 3);
    }
}
