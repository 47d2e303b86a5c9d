use serde::Deserialize;

/// Main configuration structure for Word-Harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL that discovered relative links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// The seed page listing every level page
    #[serde(rename = "start-page")]
    pub start_page: String,

    /// Path prefix an anchor must have to count as a level page
    #[serde(rename = "link-prefix")]
    pub link_prefix: String,

    /// Word a level heading starts with, followed by the level number
    #[serde(rename = "level-marker", default = "default_level_marker")]
    pub level_marker: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Identifying User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Number of concurrent workers; when absent the CLI prompts for it
    #[serde(default)]
    pub workers: Option<u32>,

    /// Lower bound of the politeness pause after each page (milliseconds)
    #[serde(rename = "min-delay-ms", default = "default_min_delay")]
    pub min_delay_ms: u64,

    /// Upper bound of the politeness pause after each page (milliseconds)
    #[serde(rename = "max-delay-ms", default = "default_max_delay")]
    pub max_delay_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite file holding the page-progress ledger
    #[serde(rename = "progress-db-path")]
    pub progress_db_path: String,

    /// Path to the SQLite file holding the extracted level word lists
    #[serde(rename = "levels-db-path")]
    pub levels_db_path: String,
}

fn default_level_marker() -> String {
    "Уровень".to_string()
}

fn default_min_delay() -> u64 {
    500
}

fn default_max_delay() -> u64 {
    1500
}

/// Bounds for the worker pool size
pub const MIN_WORKERS: u32 = 1;
pub const MAX_WORKERS: u32 = 10;

/// Worker count used when the user's input cannot be parsed
pub const DEFAULT_WORKERS: u32 = 5;

/// Clamps a requested worker count into the supported pool size range
pub fn clamp_workers(requested: i64) -> u32 {
    requested.clamp(MIN_WORKERS as i64, MAX_WORKERS as i64) as u32
}

/// Resolves raw user input into a worker count
///
/// Unparsable input falls back to [`DEFAULT_WORKERS`]; numeric input is
/// clamped into `1..=10`.
pub fn resolve_worker_count(input: &str) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(n) => clamp_workers(n),
        Err(_) => DEFAULT_WORKERS,
    }
}
