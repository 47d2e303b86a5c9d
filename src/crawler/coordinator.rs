//! Crawl coordinator - main orchestration logic
//!
//! One run walks a fixed state machine: open both stores, seed the progress
//! ledger from the seed page when it is empty, read the unprocessed set once,
//! dispatch each URL to a bounded worker pool, collect outcomes in completion
//! order, and report. Failed URLs stay unprocessed, so re-invoking the
//! coordinator after any interruption resumes exactly where it left off.

use crate::config::{clamp_workers, Config};
use crate::crawler::discovery::discover;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::worker::{process_page, WorkerEnv};
use crate::storage::{
    ProgressStore, SharedLevels, SharedProgress, SqliteLevelStore, SqliteProgressStore,
};
use crate::{HarvestError, Result};
use reqwest::Client;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Cooperative cancellation signal
///
/// When set, the coordinator stops submitting new work; in-flight workers
/// finish on their own. URLs that never started stay unprocessed and are
/// picked up by the next run.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Aggregate result of one crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// URLs dispatched this run
    pub total: usize,
    /// URLs fully processed
    pub succeeded: usize,
    /// URLs that failed and remain unprocessed
    pub failed: usize,
}

/// Main crawl coordinator
pub struct Coordinator {
    config: Arc<Config>,
    progress: SharedProgress,
    levels: SharedLevels,
    client: Client,
    workers: u32,
    cancel: CancelFlag,
}

impl Coordinator {
    /// Creates a coordinator backed by the configured SQLite stores
    ///
    /// Opening either store (or building the HTTP client) is fatal to the
    /// run; nothing can proceed without durable state.
    pub fn new(config: Config, workers: u32) -> Result<Self> {
        let progress = SqliteProgressStore::open(Path::new(&config.output.progress_db_path))?;
        let levels = SqliteLevelStore::open(Path::new(&config.output.levels_db_path))?;

        Self::with_stores(
            config,
            workers,
            Arc::new(Mutex::new(progress)),
            Arc::new(Mutex::new(levels)),
        )
    }

    /// Creates a coordinator over caller-provided stores
    ///
    /// Used by tests to inject in-memory or failure-injecting stores.
    pub fn with_stores(
        config: Config,
        workers: u32,
        progress: SharedProgress,
        levels: SharedLevels,
    ) -> Result<Self> {
        let client =
            build_http_client(&config.crawler.user_agent).map_err(|e| HarvestError::Network {
                url: config.site.base_url.clone(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            config: Arc::new(config),
            progress,
            levels,
            client,
            workers: clamp_workers(workers as i64),
            cancel: CancelFlag::new(),
        })
    }

    /// Returns a handle that cancels this coordinator's dispatch loop
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Runs one crawl: seed if needed, dispatch, collect, report
    pub async fn run(&mut self) -> Result<RunSummary> {
        self.seed_if_empty().await?;

        let urls = self.progress.lock().unwrap().unprocessed()?;
        tracing::info!("{} pages to process with {} workers", urls.len(), self.workers);

        let env = WorkerEnv {
            client: self.client.clone(),
            level_marker: self.config.site.level_marker.clone(),
            min_delay_ms: self.config.crawler.min_delay_ms,
            max_delay_ms: self.config.crawler.max_delay_ms,
            progress: Arc::clone(&self.progress),
            levels: Arc::clone(&self.levels),
        };

        let semaphore = Arc::new(Semaphore::new(self.workers as usize));
        let mut tasks = JoinSet::new();
        let mut summary = RunSummary {
            total: urls.len(),
            succeeded: 0,
            failed: 0,
        };

        let mut dispatched = 0;
        for url in urls {
            // Waiting for a permit here bounds how many tasks run at once.
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .expect("worker semaphore closed");

            // Checked after the permit wait so a cancel raised while the
            // pool was saturated is seen before the next page goes out.
            if self.cancel.is_cancelled() {
                tracing::info!("Cancellation requested, no further pages will be dispatched");
                break;
            }

            let env = env.clone();
            dispatched += 1;

            tasks.spawn(async move {
                let outcome = process_page(&env, &url).await;
                drop(permit);
                outcome
            });
        }

        // Outcomes arrive in completion order; one failure never blocks the
        // rest of the pool.
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    if outcome.success {
                        summary.succeeded += 1;
                        println!("✓ {}", outcome.url);
                    } else {
                        summary.failed += 1;
                        println!("✗ {}", outcome.url);
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!("Worker task panicked: {}", e);
                }
            }
        }

        // Skipped URLs count as failures for reporting; they stay
        // unprocessed in the ledger.
        summary.failed += summary.total - dispatched;

        tracing::info!(
            "Run finished: {} succeeded, {} failed of {}",
            summary.succeeded,
            summary.failed,
            summary.total
        );

        Ok(summary)
    }

    /// Seeds the progress ledger from the seed page on the first run
    ///
    /// A discovery failure here is fatal: with an empty ledger there is
    /// nothing to resume from.
    async fn seed_if_empty(&self) -> Result<()> {
        let count = self.progress.lock().unwrap().count()?;
        if count > 0 {
            tracing::debug!("Ledger already holds {} pages, skipping discovery", count);
            return Ok(());
        }

        tracing::info!("Empty ledger, discovering level pages from {}", self.config.site.start_page);
        let links = discover(
            &self.client,
            &self.config.site.start_page,
            &self.config.site.base_url,
            &self.config.site.link_prefix,
        )
        .await?;

        if links.is_empty() {
            tracing::warn!("Seed page yielded no level links; site layout may have changed");
        } else {
            tracing::info!("Discovered {} level pages", links.len());
        }

        self.progress.lock().unwrap().insert_if_absent(&links)?;
        Ok(())
    }
}
