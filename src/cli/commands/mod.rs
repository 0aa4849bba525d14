//! Command implementations for the sflist processor CLI
//!
//! Each command is implemented in its own module:
//! - `scrape`: fetch a date range and export one table
//! - `decode`: decode a single saved block

pub mod decode;
pub mod scrape;
pub mod shared;

use crate::Result;
use crate::app::services::scrape_runner::RunStats;
use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Main command runner
///
/// Dispatches to the subcommand handler. Returns a configuration error when
/// no subcommand was given; `main` prints help in that case before calling.
pub async fn run(args: Args, cancel: CancellationToken) -> Result<RunStats> {
    match args.command {
        Some(Commands::Scrape(scrape_args)) => scrape::run_scrape(scrape_args, cancel).await,
        Some(Commands::Decode(decode_args)) => decode::run_decode(decode_args).await,
        None => Err(crate::Error::configuration("No command given")),
    }
}
