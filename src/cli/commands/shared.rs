//! Shared components for CLI commands
//!
//! Logging setup, configuration overrides and the human-readable record
//! summary used by both commands.

use crate::app::services::summary::{RecordSummary, ValueRange};
use crate::cli::args::ScrapeArgs;
use crate::config::{Config, LoggingConfig};
use crate::{Error, Result};
use colored::*;
use tracing::debug;

/// Set up structured logging
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    let initialised = if logging.structured {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    initialised
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", logging.level);
    Ok(())
}

/// Build the run configuration from defaults and CLI arguments
pub fn load_configuration(args: &ScrapeArgs) -> Result<Config> {
    let mut config = Config::default();
    apply_cli_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &ScrapeArgs) {
    config.source.station = args.station.trim().to_string();
    config.source.max_concurrent_requests = args.workers;
    config.source.request_timeout_secs = args.timeout_secs;
    if let Some(base_url) = &args.base_url {
        config.source.base_url = base_url.clone();
    }
    if let Some(source_dir) = &args.source_dir {
        config.source.offline_dir = Some(source_dir.clone());
    }

    if let Some(output_path) = &args.output_path {
        config.output.output_dir = output_path.clone();
    }
    config.output.format = args.format;
    config.output.force_overwrite = args.force_overwrite;

    config.logging.level = args.get_log_level().to_string();
    config.logging.structured = args.quiet;
}

fn format_range(range: Option<ValueRange>, unit: &str) -> String {
    match range {
        Some(range) => format!("{:.1}{} to {:.1}{}", range.min, unit, range.max, unit),
        None => "n/a".to_string(),
    }
}

fn format_value(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}

/// Print the record summary block of the human report
pub fn print_record_summary(summary: &RecordSummary) {
    if summary.is_empty() {
        println!("{}", "No records collected".bright_yellow());
        return;
    }

    println!("\n{}", "Data Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Records:".bright_cyan(),
        summary.records.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Temperature range:".bright_cyan(),
        format_range(summary.temperature_range, "°C")
    );
    println!(
        "  {} {}",
        "Humidity range:".bright_cyan(),
        format_range(summary.humidity_range, "%")
    );

    println!("\n{}", "Missing Value Statistics".bright_green().bold());
    for column in &summary.missing {
        println!(
            "  {}: {}/{} missing ({:.1}%)",
            column.column, column.missing, column.total, column.percent
        );
    }

    if summary.gust_records > 0 {
        println!(
            "\n{} {} records with gust measurements",
            "Wind gust data:".bright_cyan(),
            summary.gust_records
        );
        println!(
            "  {} {}",
            "Gust range:".bright_cyan(),
            format_range(summary.gust_range, " m/s")
        );
    }

    if !summary.clouds.is_empty() {
        println!("\n{}", "Cloud data summary".bright_green().bold());
        for cloud in &summary.clouds {
            println!(
                "  {}: {} entries, examples: {}",
                cloud.column,
                cloud.entries,
                cloud.examples.join(", ")
            );
        }
    }

    println!("\n{}", "Sample data".bright_green().bold());
    println!(
        "  {:<9} {:>6} {:>6} {:>6} {:>6}  {}",
        "Time", "Temp", "Speed", "Gust", "Vis", "Weather"
    );
    for row in &summary.sample {
        println!(
            "  {:<9} {:>6} {:>6} {:>6} {:>6}  {}",
            row.time,
            format_value(row.temperature_c),
            format_value(row.wind_speed_ms),
            format_value(row.wind_gust_ms),
            format_value(row.visibility_km),
            row.weather.as_deref().unwrap_or("")
        );
    }
}
