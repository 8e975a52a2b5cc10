//! Page-Fetch main entry point
//!
//! This is the command-line interface for fetching pages and printing their
//! stored metadata.

use anyhow::Context;
use clap::Parser;
use page_fetch::config::load_config_or_default;
use page_fetch::crawler::{run_batch, Action, Coordinator};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Page-Fetch: fetch web pages and record what they contain
///
/// Each page is stored as `<name>.html` next to `<name>-metadata.json`, which
/// records the link count, image count and fetch time. Use --metadata to print
/// the stored records instead of fetching.
#[derive(Parser, Debug)]
#[command(name = "page-fetch")]
#[command(version = "1.0.0")]
#[command(about = "Fetch web pages and record their link and image counts", long_about = None)]
struct Cli {
    /// URLs to fetch (or to look up with --metadata)
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Print the URL list and selected action; repeat for more logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print metadata stored by previous fetches instead of fetching
    #[arg(short, long)]
    metadata: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to store pages in (overrides the configuration file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config =
        load_config_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = cli.output_dir {
        config.storage.output_dir = dir;
    }

    let action = if cli.metadata {
        Action::LoadMetadata
    } else {
        Action::Fetch
    };

    if cli.verbose > 0 {
        println!("URLs: [{}]", cli.urls.join(" "));
        println!("{}", action.description());
    }

    let (coordinator, mut messages) =
        Coordinator::from_config(&config).context("Failed to set up the fetcher")?;
    let batch = run_batch(coordinator, action, cli.urls);

    while let Some(msg) = messages.recv().await {
        if !msg.is_silent() {
            println!("{}", msg);
        }
    }

    batch.await.context("Batch task failed")?;

    Ok(())
}

/// Accepts the single-dash `-metadata` spelling as an alias for `--metadata`
fn normalize_args(args: impl Iterator<Item = OsString>) -> Vec<OsString> {
    args.map(|arg| {
        if arg == "-metadata" {
            OsString::from("--metadata")
        } else {
            arg
        }
    })
    .collect()
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the reported messages.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_fetch=info,warn"),
            1 => EnvFilter::new("page_fetch=debug,info"),
            2 => EnvFilter::new("page_fetch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
