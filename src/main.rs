//! CLI entry point for the stop wait time tool.
//!
//! Provides subcommands for computing mean waits per stop from a GTFS feed
//! and for summarizing a previously written result table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use stop_wait_times::{
    analyzers::summary::{longest_waits, summarize},
    fetch::load_source,
    output::{print_head, print_json, read_results, write_json},
    pipeline::{PipelineConfig, run},
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "stop_wait_times")]
#[command(about = "Average wait between scheduled arrivals at each GTFS stop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the mean wait per stop from stops.txt and stop_times.txt
    Compute {
        /// Path or URL of stops.txt
        #[arg(long, value_name = "FILE_OR_URL", default_value = "stops.txt")]
        stops: String,

        /// Path or URL of stop_times.txt
        #[arg(long, value_name = "FILE_OR_URL", default_value = "stop_times.txt")]
        stop_times: String,

        /// CSV file to write results to
        #[arg(short, long, default_value = "wait_time_per_stop.csv")]
        output: String,

        /// Number of result rows to print
        #[arg(long, default_value_t = 5)]
        head: usize,

        /// Optional: write a network summary as JSON to this path
        #[arg(long)]
        summary: Option<String>,
    },
    /// Summarize an existing wait_time_per_stop.csv
    Summarize {
        /// Result CSV to read
        #[arg(short, long, value_name = "FILE_OR_URL", default_value = "wait_time_per_stop.csv")]
        input: String,

        /// Number of longest-wait stops to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/stop_wait_times.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("stop_wait_times.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            stops,
            stop_times,
            output,
            head,
            summary,
        } => {
            let config = PipelineConfig {
                stops,
                stop_times,
                output,
            };
            let result = run(&config)?;

            print_head(&result.results, head);

            if let Some(path) = summary {
                write_json(&path, &summarize(&result.results))?;
            }
        }
        Commands::Summarize { input, top } => {
            let results = read_results(&load_source(&input)?)?;
            let summary = summarize(&results);

            info!(
                stops = summary.stop_count,
                mapped = summary.mapped_stop_count,
                "Result table loaded"
            );

            print_json(&summary)?;
            print_json(&longest_waits(&results, top))?;
        }
    }

    Ok(())
}
