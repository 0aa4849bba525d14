use clap::Parser;
use sflist_processor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        // Set up graceful shutdown handling
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                // Without a handler, never report a shutdown
                std::future::pending::<()>().await;
            }

            // Cancel all operations when Ctrl+C is received
            cancellation_token.cancel();
        };

        // Run the main command with cancellation support
        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(sflist_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Sflist Processor - Surface Station Report Decoder");
    println!("=================================================");
    println!();
    println!("Decode daily fixed-width station report listings into typed weather");
    println!("records and export a date range as one CSV or Parquet table.");
    println!();
    println!("USAGE:");
    println!("    sflist-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    scrape      Fetch and decode a date range for one station (main command)");
    println!("    decode      Decode a single saved report block");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Scrape January 2024 for Jeddah:");
    println!("    sflist-processor scrape --station OEJN --start 20240101 --end 20240131");
    println!();
    println!("    # Decode saved blocks instead of requesting them, writing Parquet:");
    println!("    sflist-processor scrape --start 20240101 --end 20240107 \\");
    println!("                            --source-dir ./blocks --format parquet");
    println!();
    println!("    # Inspect one saved block as JSON:");
    println!("    sflist-processor decode --input OEJN_20240124.txt --date 20240124 \\");
    println!("                            --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    sflist-processor <COMMAND> --help");
}
