//! Date-range scraping
//!
//! Fetches one report block per day from a [`ReportSource`], decodes each
//! block and hands the accepted records to a [`RecordSink`] in date order.
//! Days whose block cannot be fetched are counted and skipped.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::app::services::record_sink::RecordSink;
use crate::app::services::report_source::ReportSource;
use crate::app::services::sflist_parser::{BlockDecoder, BlockResult, BlockStats};
use crate::constants::DEFAULT_MAX_CONCURRENT_REQUESTS;
use crate::{Error, Result};

/// Every day from `start` to `end`, inclusive
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if start > end {
        return Err(Error::configuration(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Decode a block saved on disk
pub async fn decode_saved_block(
    path: impl AsRef<Path>,
    station: &str,
    date: NaiveDate,
) -> Result<BlockResult> {
    let path = path.as_ref();
    let block = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    Ok(BlockDecoder::new(station).decode(&block, date))
}

/// A day whose block could not be fetched
#[derive(Debug, Clone, Serialize)]
pub struct UnavailableDate {
    pub date: NaiveDate,
    pub reason: String,
}

/// Counters for a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// Days in the requested range
    pub dates_requested: usize,

    /// Days with a decoded block
    pub dates_fetched: usize,

    /// Days skipped because the source had no block
    pub unavailable: Vec<UnavailableDate>,

    /// Decoded blocks that carried a gust column
    pub blocks_with_gust: usize,

    /// Line counters summed over all blocks
    pub lines: BlockStats,

    /// File written by the sink
    pub output_path: Option<PathBuf>,

    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total accepted records
    pub fn records(&self) -> usize {
        self.lines.accepted
    }

    pub fn dates_unavailable(&self) -> usize {
        self.unavailable.len()
    }

    /// Share of requested days with a block, as a percentage
    pub fn fetch_rate(&self) -> f64 {
        if self.dates_requested == 0 {
            0.0
        } else {
            (self.dates_fetched as f64 / self.dates_requested as f64) * 100.0
        }
    }

    fn record_block(&mut self, result: &BlockResult) {
        self.dates_fetched += 1;
        if result.has_gust_column() {
            self.blocks_with_gust += 1;
        }
        self.lines.merge(&result.stats);
    }

    fn record_unavailable(&mut self, date: NaiveDate, reason: String) {
        self.unavailable.push(UnavailableDate { date, reason });
    }
}

/// Drives fetching and decoding over a date range
#[derive(Debug)]
pub struct ScrapeRunner<S> {
    source: S,
    max_concurrent_requests: usize,
    show_progress: bool,
}

impl<S: ReportSource> ScrapeRunner<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            show_progress: false,
        }
    }

    /// Set how many blocks are fetched at once
    pub fn with_max_concurrent_requests(mut self, max_requests: usize) -> Self {
        self.max_concurrent_requests = max_requests.max(1);
        self
    }

    /// Show a progress bar over the dates
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, decode and sink every day from `start` to `end`
    ///
    /// Blocks are fetched concurrently but decoded and sunk in date order.
    /// Returns [`Error::ProcessingInterrupted`] if `cancel` fires first; the
    /// sink is not finished in that case.
    pub async fn run<K: RecordSink>(
        &self,
        station: &str,
        start: NaiveDate,
        end: NaiveDate,
        sink: &mut K,
        cancel: &CancellationToken,
    ) -> Result<RunStats> {
        let started = Instant::now();
        let dates = date_range(start, end)?;
        let decoder = BlockDecoder::new(station);

        let mut stats = RunStats::new();
        stats.dates_requested = dates.len();

        info!(
            "Scraping {} day(s) for {} from {} to {}",
            dates.len(),
            station,
            start,
            end
        );

        let progress = self.create_progress_bar(dates.len() as u64);

        let source = &self.source;
        let mut fetches = stream::iter(dates)
            .map(|date| async move { (date, source.fetch(station, date).await) })
            .buffered(self.max_concurrent_requests);

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    progress.abandon_with_message("cancelled");
                    return Err(Error::processing_interrupted(format!(
                        "cancelled after {} of {} days",
                        stats.dates_fetched + stats.dates_unavailable(),
                        stats.dates_requested
                    )));
                }
                next = fetches.next() => next,
            };

            let Some((date, fetched)) = next else {
                break;
            };
            progress.set_message(date.to_string());

            match fetched {
                Ok(block) => {
                    let result = decoder.decode(&block, date);
                    info!("{}: {}", date, result.stats.summary());
                    sink.accept(&result.records)?;
                    stats.record_block(&result);
                }
                Err(e) if !e.is_critical() => {
                    warn!("Skipping {}: {}", date, e);
                    stats.record_unavailable(date, e.to_string());
                }
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }

            progress.inc(1);
        }

        progress.finish_with_message("done");

        stats.output_path = sink.finish()?;
        stats.elapsed = started.elapsed();

        debug!(
            "Run finished in {:.2?}: {} records from {}/{} days",
            stats.elapsed,
            stats.records(),
            stats.dates_fetched,
            stats.dates_requested
        );

        Ok(stats)
    }

    fn create_progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} days {msg}")
                .map(|style| style.progress_chars("#>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    }
}
