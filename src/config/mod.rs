//! Configuration module for Word-Harvester
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use word_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling from seed page: {}", config.site.start_page);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    clamp_workers, resolve_worker_count, Config, CrawlerConfig, OutputConfig, SiteConfig,
    DEFAULT_WORKERS, MAX_WORKERS, MIN_WORKERS,
};

// Re-export parser functions
pub use parser::load_config;
