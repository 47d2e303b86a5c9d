//! Worker: the unit of concurrent work
//!
//! A worker processes exactly one page: fetch, extract, persist the level
//! records, mark the page processed, pause politely. Every error is caught
//! here, logged, and turned into a failure outcome so one bad page never
//! aborts the run. A failed page keeps `processed = false` and is retried by
//! the next run.

use crate::crawler::extractor::extract_levels;
use crate::crawler::fetcher::fetch_page;
use crate::storage::{LevelStore, ProgressStore, SharedLevels, SharedProgress};
use crate::HarvestError;
use rand::Rng;
use reqwest::Client;
use std::time::Duration;

/// Result of processing one page, consumed by the coordinator for reporting
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub url: String,
    pub success: bool,
}

/// Everything a worker needs besides its URL
///
/// Cloned once per spawned task; the stores are shared handles.
#[derive(Clone)]
pub struct WorkerEnv {
    pub client: Client,
    pub level_marker: String,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub progress: SharedProgress,
    pub levels: SharedLevels,
}

/// Processes a single page and reports the outcome
///
/// Success means fetch, extraction, every level upsert, and the processed
/// mark all completed. Extraction failure persists nothing; an upsert failure
/// partway through a page leaves the page unprocessed even though earlier
/// levels were written, so a later run re-processes it and the overwrite
/// semantics absorb the repetition.
pub async fn process_page(env: &WorkerEnv, url: &str) -> CrawlOutcome {
    match try_process(env, url).await {
        Ok(level_count) => {
            tracing::debug!("Processed {} ({} levels)", url, level_count);
            politeness_pause(env.min_delay_ms, env.max_delay_ms).await;
            CrawlOutcome {
                url: url.to_string(),
                success: true,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to process {}: {}", url, e);
            CrawlOutcome {
                url: url.to_string(),
                success: false,
            }
        }
    }
}

async fn try_process(env: &WorkerEnv, url: &str) -> Result<usize, HarvestError> {
    let body = fetch_page(&env.client, url).await?;

    // An empty extraction is a legitimate result: the page is still marked
    // processed so it is not refetched forever.
    let levels = extract_levels(&body, &env.level_marker).map_err(|message| {
        HarvestError::Parse {
            url: url.to_string(),
            message,
        }
    })?;

    let level_count = levels.len();
    {
        let mut store = env.levels.lock().unwrap();
        for level in &levels {
            store.upsert(level.level, &level.main_words, &level.bonus_words)?;
        }
    }

    env.progress.lock().unwrap().mark_processed(url)?;

    Ok(level_count)
}

/// Sleeps for a random duration inside the configured bounds
///
/// Not a correctness requirement, just manners toward the target server.
async fn politeness_pause(min_ms: u64, max_ms: u64) {
    if max_ms == 0 {
        return;
    }
    let millis = if min_ms >= max_ms {
        min_ms
    } else {
        rand::thread_rng().gen_range(min_ms..=max_ms)
    };
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
