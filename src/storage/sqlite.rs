//! SQLite store implementations
//!
//! This module provides the SQLite-backed implementations of the
//! [`ProgressStore`] and [`LevelStore`] traits. Each store owns its own
//! connection to its own database file; callers share a store across workers
//! behind an `Arc<Mutex<_>>`, which serializes every call against the
//! connection.

use crate::storage::schema::{initialize_levels_schema, initialize_pages_schema};
use crate::storage::traits::{LevelStore, ProgressStore, StorageResult};
use crate::storage::LevelRecord;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA temp_store = MEMORY;
";

/// SQLite-backed page-progress ledger
pub struct SqliteProgressStore {
    conn: Connection,
}

impl SqliteProgressStore {
    /// Opens (creating if absent) the progress database at `path`
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(PRAGMAS)?;
        initialize_pages_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory progress store (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_pages_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl ProgressStore for SqliteProgressStore {
    fn insert_if_absent(&mut self, urls: &[String]) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT OR IGNORE INTO pages (url) VALUES (?1)")?;
            for url in urls {
                stmt.execute(params![url])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn unprocessed(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url FROM pages WHERE processed = 0")?;

        let urls = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(urls)
    }

    fn mark_processed(&mut self, url: &str) -> StorageResult<()> {
        // Zero rows affected means the URL was never inserted; that is fine.
        self.conn.execute(
            "UPDATE pages SET processed = 1 WHERE url = ?1",
            params![url],
        )?;
        Ok(())
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// SQLite-backed level word-list store
pub struct SqliteLevelStore {
    conn: Connection,
}

impl SqliteLevelStore {
    /// Opens (creating if absent) the levels database at `path`
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(PRAGMAS)?;
        initialize_levels_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory level store (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_levels_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl LevelStore for SqliteLevelStore {
    fn upsert(
        &mut self,
        level: u32,
        main_words: &[String],
        bonus_words: &[String],
    ) -> StorageResult<()> {
        let main = main_words.join(",");
        let bonus = if bonus_words.is_empty() {
            None
        } else {
            Some(bonus_words.join(","))
        };

        self.conn.execute(
            "INSERT OR REPLACE INTO levels (level, main_words, bonus_words) VALUES (?1, ?2, ?3)",
            params![level, main, bonus],
        )?;
        Ok(())
    }

    fn get(&self, level: u32) -> StorageResult<Option<LevelRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT level, main_words, bonus_words FROM levels WHERE level = ?1",
                params![level],
                |row| {
                    let main: String = row.get(1)?;
                    let bonus: Option<String> = row.get(2)?;
                    Ok(LevelRecord {
                        level: row.get(0)?,
                        main_words: split_words(&main),
                        bonus_words: bonus.as_deref().map(split_words).unwrap_or_default(),
                    })
                },
            )
            .optional()?;

        Ok(record)
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM levels", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn split_words(blob: &str) -> Vec<String> {
    blob.split(',')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
