//! Storage module for persisting crawl state
//!
//! Two independently-durable SQLite stores back the crawl:
//! - the progress ledger (`pages`), which makes the crawl resumable, and
//! - the level store (`levels`), which holds the extracted word lists.
//!
//! Workers share the stores behind `Arc<Mutex<_>>`; the stores are the sole
//! owners of their durable state and all mutation goes through their traits.

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_levels_schema, initialize_pages_schema};
pub use sqlite::{SqliteLevelStore, SqliteProgressStore};
pub use traits::{LevelStore, ProgressStore, StorageError, StorageResult};

use std::sync::{Arc, Mutex};

/// A progress ledger shared across workers
pub type SharedProgress = Arc<Mutex<dyn ProgressStore + Send>>;

/// A level store shared across workers
pub type SharedLevels = Arc<Mutex<dyn LevelStore + Send>>;

/// Word lists for a single puzzle level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRecord {
    pub level: u32,
    pub main_words: Vec<String>,
    pub bonus_words: Vec<String>,
}
