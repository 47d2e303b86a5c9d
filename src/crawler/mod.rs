//! Crawler module for page fetching and processing
//!
//! This module contains the core crawl pipeline:
//! - HTTP client construction and page fetching
//! - Seed-page link discovery
//! - Level extraction from answer pages
//! - The bounded worker pool and run coordination

mod coordinator;
mod discovery;
mod extractor;
mod fetcher;
mod worker;

pub use coordinator::{CancelFlag, Coordinator, RunSummary};
pub use discovery::discover;
pub use extractor::{extract_levels, ExtractedLevel};
pub use fetcher::{build_http_client, fetch_page};
pub use worker::{process_page, CrawlOutcome, WorkerEnv};
