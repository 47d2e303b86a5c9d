//! Storage traits and error types
//!
//! This module defines the trait interfaces for the two persisted stores and
//! their shared error type. The traits exist so the coordinator and workers
//! can be exercised against test doubles as well as SQLite.

use crate::storage::LevelRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable ledger of discovered pages and whether each has been processed
///
/// All methods are atomic with respect to the store's persisted state. The
/// `processed` flag is monotonic: once a URL is marked it never reverts.
pub trait ProgressStore {
    /// Inserts a page record (processed = false) for each URL that does not
    /// already have one
    ///
    /// Duplicates are silently skipped; calling this twice with the same set
    /// leaves exactly one record per URL.
    fn insert_if_absent(&mut self, urls: &[String]) -> StorageResult<()>;

    /// Returns every URL with processed = false, in no particular order
    fn unprocessed(&self) -> StorageResult<Vec<String>>;

    /// Marks the given URL as processed
    ///
    /// A no-op (not an error) when the URL is absent.
    fn mark_processed(&mut self, url: &str) -> StorageResult<()>;

    /// Total number of stored URLs, processed or not
    ///
    /// A zero count means the seed page has never been discovered.
    fn count(&self) -> StorageResult<u64>;
}

/// Durable mapping from level number to its word lists
pub trait LevelStore {
    /// Replaces any existing record for `level` wholesale
    ///
    /// Last writer wins: re-processing a page overwrites prior values for
    /// every level it contains.
    fn upsert(&mut self, level: u32, main_words: &[String], bonus_words: &[String])
        -> StorageResult<()>;

    /// Looks up the word lists for a single level
    fn get(&self, level: u32) -> StorageResult<Option<LevelRecord>>;

    /// Total number of stored levels
    fn count(&self) -> StorageResult<u64>;
}
