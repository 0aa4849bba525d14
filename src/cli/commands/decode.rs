//! Decode command implementation
//!
//! Decodes one saved report block and prints a summary, the records as JSON,
//! or the records as CSV.

use super::shared::{print_record_summary, setup_logging};
use crate::app::services::record_sink::records_to_frame;
use crate::app::services::scrape_runner::{RunStats, decode_saved_block};
use crate::app::services::sflist_parser::BlockResult;
use crate::app::services::summary::RecordSummary;
use crate::cli::args::{DecodeArgs, OutputFormat};
use crate::config::LoggingConfig;
use crate::{Error, Result};
use colored::*;
use polars::prelude::{CsvWriter, SerWriter};
use std::io::Write;
use tracing::info;

pub async fn run_decode(args: DecodeArgs) -> Result<RunStats> {
    setup_logging(&LoggingConfig::new(args.get_log_level(), false))?;
    args.validate()?;

    info!(
        "Decoding {} for {} on {}",
        args.input.display(),
        args.station,
        args.date
    );
    let result = decode_saved_block(&args.input, args.station.trim(), args.date).await?;

    let mut out = std::io::stdout().lock();
    match args.output_format {
        OutputFormat::Human => print_human(&args, &result),
        OutputFormat::Json => write_json(&mut out, &result)?,
        OutputFormat::Csv => write_csv(&mut out, &result)?,
    }

    Ok(RunStats {
        dates_requested: 1,
        dates_fetched: 1,
        blocks_with_gust: usize::from(result.has_gust_column()),
        lines: result.stats,
        ..RunStats::default()
    })
}

fn print_human(args: &DecodeArgs, result: &BlockResult) {
    println!("{}", "Block decoded".bright_green().bold());
    println!("  {} {}", "File:".bright_cyan(), args.input.display());
    println!(
        "  {} {}",
        "Gust column:".bright_cyan(),
        if result.has_gust_column() { "yes" } else { "no" }
    );
    println!("  {}", result.stats.summary());
    for error in &result.stats.errors {
        println!("  {}", error.bright_red());
    }

    print_record_summary(&RecordSummary::from_records(&result.records));
    println!();
}

/// Block counters and records as one JSON document
fn write_json<W: Write>(out: &mut W, result: &BlockResult) -> Result<()> {
    let document = serde_json::json!({
        "has_gust_column": result.has_gust_column(),
        "stats": result.stats,
        "records": result.records,
    });

    serde_json::to_writer_pretty(&mut *out, &document)
        .map_err(|e| Error::data_validation(format!("Failed to serialize records: {}", e)))?;
    writeln!(out).map_err(|e| Error::io("Failed to write output", e))
}

/// Records as a CSV table with the canonical columns
fn write_csv<W: Write>(out: &mut W, result: &BlockResult) -> Result<()> {
    let mut df = records_to_frame(&result.records)?;
    CsvWriter::new(out)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| Error::sink_writing("Failed to write CSV records", e))
}
