//! Word-Harvester main entry point
//!
//! Command-line interface for the resumable word-list crawler.

use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use word_harvester::config::{load_config, resolve_worker_count, Config, MAX_WORKERS};
use word_harvester::output::format_level_report;
use word_harvester::storage::{LevelStore, SqliteLevelStore};
use word_harvester::Coordinator;
use tracing_subscriber::EnvFilter;

/// Word-Harvester: a resumable crawler for word-game answer pages
///
/// Crawls the configured answer site, extracts per-level word lists into a
/// SQLite database, and keeps a progress ledger so an interrupted crawl can
/// simply be re-run to finish the remaining pages.
#[derive(Parser, Debug)]
#[command(name = "word-harvester")]
#[command(version = "1.0.0")]
#[command(about = "A resumable word-list crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Number of concurrent workers (1-10); prompts when omitted
    #[arg(short, long)]
    workers: Option<i64>,

    /// Print the stored word lists for one level and exit (no crawl)
    #[arg(short, long, value_name = "LEVEL", conflicts_with = "workers")]
    lookup: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if let Some(level) = cli.lookup {
        return lookup_level(&config, level);
    }

    let workers = match cli.workers {
        Some(n) => word_harvester::config::clamp_workers(n),
        None => match config.crawler.workers {
            Some(n) => n,
            None => prompt_worker_count()?,
        },
    };

    tracing::info!("Starting crawl with {} workers", workers);
    let mut coordinator = Coordinator::new(config, workers)?;

    // Ctrl-C stops submitting new pages; in-flight workers finish and the
    // ledger stays accurate for the next run.
    let cancel = coordinator.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight pages");
            cancel.cancel();
        }
    });

    let summary = coordinator.run().await?;

    println!(
        "Done: {} processed, {} failed, {} total",
        summary.succeeded, summary.failed, summary.total
    );
    if summary.failed > 0 {
        println!("Failed pages remain unprocessed; re-run to retry them.");
    }

    Ok(())
}

/// Prints the word lists stored for one level, or a not-found line
fn lookup_level(config: &Config, level: u32) -> anyhow::Result<()> {
    let store = SqliteLevelStore::open(Path::new(&config.output.levels_db_path))
        .with_context(|| format!("failed to open {}", config.output.levels_db_path))?;
    let record = store.get(level)?;
    print!("{}", format_level_report(level, record.as_ref()));
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("word_harvester=info,warn"),
            1 => EnvFilter::new("word_harvester=debug,info"),
            2 => EnvFilter::new("word_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Asks the user for a worker count on stdin
///
/// Unparsable input falls back to the default; numeric input is clamped to
/// the supported range.
fn prompt_worker_count() -> anyhow::Result<u32> {
    print!("Number of workers (max {}): ", MAX_WORKERS);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().lock().read_line(&mut input)?;

    Ok(resolve_worker_count(&input))
}
