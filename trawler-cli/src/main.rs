//! Trawler CLI - Command-line interface
//!
//! Scrapes a torrent index, resolves every release against Trakt and prints
//! the enriched records as JSON.

mod commands;
mod tracing_setup;

use std::path::PathBuf;

use clap::Parser;
use tracing_setup::CliLogLevel;

#[derive(Parser)]
#[command(name = "trawler")]
#[command(about = "Torrent index scraper with metadata enrichment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level (RUST_LOG overrides)
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: CliLogLevel,

    /// Directory for the full trace log of the last run
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_setup::init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())?;
    commands::handle_command(cli.command).await
}
