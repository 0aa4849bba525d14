//! Scrape command implementation
//!
//! Fetches every day of the requested range, decodes the blocks and writes
//! the accepted records to one table.

use super::shared::{load_configuration, print_record_summary, setup_logging};
use crate::app::services::record_sink::FrameSink;
use crate::app::services::report_source::ConfiguredSource;
use crate::app::services::scrape_runner::{RunStats, ScrapeRunner, date_range};
use crate::app::services::summary::RecordSummary;
use crate::cli::args::{OutputFormat, ScrapeArgs};
use crate::config::Config;
use crate::constants::DATE_FORMAT;
use crate::{Error, Result};
use colored::*;
use indicatif::HumanDuration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Scrape command runner
///
/// 1. Load configuration and set up logging from it
/// 2. Pick the report source and output table
/// 3. Fetch and decode the date range
/// 4. Print the run report
pub async fn run_scrape(args: ScrapeArgs, cancel: CancellationToken) -> Result<RunStats> {
    args.validate()?;
    let config = load_configuration(&args)?;
    setup_logging(&config.logging)?;

    info!("Starting sflist processor");
    debug!("Command line arguments: {:?}", args);
    debug!("Loaded configuration: {:?}", config);

    let station = config.source.station.clone();
    let source = ConfiguredSource::from_config(&config.source)?;
    let mut sink = FrameSink::for_run(&config.output, &station, args.start, args.end);

    if args.dry_run {
        return run_dry_run(&config, &source, &sink, &args);
    }

    sink.check_writable()?;

    info!("Reading blocks from {}", source.describe());
    let runner = ScrapeRunner::new(source)
        .with_max_concurrent_requests(config.source.max_concurrent_requests)
        .with_progress(args.show_progress());

    let stats = runner
        .run(&station, args.start, args.end, &mut sink, &cancel)
        .await?;

    let summary = RecordSummary::from_records(sink.records());
    generate_final_report(args.output_format, &stats, &summary)?;

    Ok(stats)
}

/// Show what would be fetched and written
fn run_dry_run(
    config: &Config,
    source: &ConfiguredSource,
    sink: &FrameSink,
    args: &ScrapeArgs,
) -> Result<RunStats> {
    info!("Performing dry run - no requests will be made");

    let dates = date_range(args.start, args.end)?;
    let station = &config.source.station;

    println!("{}", "Dry run".bright_green().bold());
    println!("  {} {}", "Source:".bright_cyan(), source.describe());
    println!("  {} {}", "Days:".bright_cyan(), dates.len());
    for date in &dates {
        match source {
            ConfiguredSource::Http(_) => {
                println!("    {}", config.source.source_url(station, *date))
            }
            ConfiguredSource::Directory(directory) => {
                println!("    {}", directory.block_path(station, *date).display())
            }
        }
    }
    println!(
        "  {} {}",
        "Would create:".bright_cyan(),
        sink.output_path().display()
    );

    Ok(RunStats {
        dates_requested: dates.len(),
        ..RunStats::default()
    })
}

/// Generate final run report
fn generate_final_report(
    format: OutputFormat,
    stats: &RunStats,
    summary: &RecordSummary,
) -> Result<()> {
    match format {
        OutputFormat::Human => generate_human_report(stats, summary),
        OutputFormat::Json => generate_json_report(stats, summary),
        OutputFormat::Csv => generate_csv_report(stats),
    }
}

/// Generate human-readable report
fn generate_human_report(stats: &RunStats, summary: &RecordSummary) -> Result<()> {
    println!("\n{}", "Scraping Complete".bright_green().bold());
    println!(
        "  {} {}/{} ({:.1}%)",
        "Days fetched:".bright_cyan(),
        stats.dates_fetched,
        stats.dates_requested,
        stats.fetch_rate()
    );
    println!(
        "  {} {}",
        "Records:".bright_cyan(),
        stats.records().to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Filtered (other days):".bright_cyan(),
        stats.lines.filtered_by_day
    );
    println!(
        "  {} {}",
        "Blocks with gust column:".bright_cyan(),
        stats.blocks_with_gust
    );
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(stats.elapsed)
    );

    if stats.lines.unparseable > 0 {
        println!(
            "  {} {}",
            "Unparseable lines:".bright_red(),
            stats.lines.unparseable.to_string().bright_red().bold()
        );
    }

    if !stats.unavailable.is_empty() {
        println!("\n{}", "Unavailable days".bright_yellow().bold());
        for day in &stats.unavailable {
            println!("  {}: {}", day.date.format(DATE_FORMAT), day.reason);
        }
    }

    match &stats.output_path {
        Some(path) => println!("\n{} {}", "Data saved to:".bright_cyan(), path.display()),
        None => println!("\n{}", "No data collected, no file written".bright_yellow()),
    }

    print_record_summary(summary);
    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &RunStats, summary: &RecordSummary) -> Result<()> {
    let report = serde_json::json!({
        "stats": stats,
        "elapsed_seconds": stats.elapsed.as_secs_f64(),
        "summary": summary,
    });

    let text = serde_json::to_string_pretty(&report)
        .map_err(|e| Error::data_validation(format!("Failed to serialize report: {}", e)))?;
    println!("{}", text);
    Ok(())
}

/// Generate CSV report for data analysis
fn generate_csv_report(stats: &RunStats) -> Result<()> {
    println!("metric,value");
    println!("dates_requested,{}", stats.dates_requested);
    println!("dates_fetched,{}", stats.dates_fetched);
    println!("dates_unavailable,{}", stats.dates_unavailable());
    println!("station_lines,{}", stats.lines.station_lines);
    println!("records,{}", stats.records());
    println!("filtered_by_day,{}", stats.lines.filtered_by_day);
    println!("gust_present,{}", stats.lines.gust_present);
    println!("unparseable,{}", stats.lines.unparseable);
    println!("processing_time_seconds,{}", stats.elapsed.as_secs_f64());
    if let Some(path) = &stats.output_path {
        println!("output_file,{}", path.display());
    }

    Ok(())
}
