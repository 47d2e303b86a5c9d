//! Database schema definitions
//!
//! The crawl keeps two independent SQLite files: one for the page-progress
//! ledger and one for the extracted level word lists.

/// Schema for the progress database
pub const PAGES_SCHEMA_SQL: &str = r#"
-- Ledger of discovered level pages and their processing state
CREATE TABLE IF NOT EXISTS pages (
    url TEXT PRIMARY KEY,
    processed INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_pages_processed ON pages(processed);
"#;

/// Schema for the levels database
pub const LEVELS_SCHEMA_SQL: &str = r#"
-- Extracted word lists, one row per puzzle level
CREATE TABLE IF NOT EXISTS levels (
    level INTEGER PRIMARY KEY,
    main_words TEXT NOT NULL,
    bonus_words TEXT
);
"#;

/// Initializes the progress database schema
///
/// Safe to call on an already-initialized database.
pub fn initialize_pages_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(PAGES_SCHEMA_SQL)?;
    Ok(())
}

/// Initializes the levels database schema
///
/// Safe to call on an already-initialized database.
pub fn initialize_levels_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(LEVELS_SCHEMA_SQL)?;
    Ok(())
}
