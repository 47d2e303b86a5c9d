use crate::config::types::{Config, MAX_WORKERS, MIN_WORKERS};
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Checks that URLs parse, required strings are non-empty, the delay range is
/// ordered, and an explicit worker count is inside the supported pool size.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site(config)?;
    validate_crawler(config)?;
    validate_output(config)?;
    Ok(())
}

fn validate_site(config: &Config) -> Result<(), ConfigError> {
    Url::parse(&config.site.base_url).map_err(|e| {
        ConfigError::Validation(format!("site.base-url is not a valid URL: {}", e))
    })?;

    let start = Url::parse(&config.site.start_page).map_err(|e| {
        ConfigError::Validation(format!("site.start-page is not a valid URL: {}", e))
    })?;

    if !matches!(start.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "site.start-page must be http(s), got scheme '{}'",
            start.scheme()
        )));
    }

    if config.site.link_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "site.link-prefix must not be empty".to_string(),
        ));
    }

    if config.site.level_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "site.level-marker must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawler(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler.user-agent must not be empty".to_string(),
        ));
    }

    if let Some(workers) = config.crawler.workers {
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&workers) {
            return Err(ConfigError::Validation(format!(
                "crawler.workers must be between {} and {}, got {}",
                MIN_WORKERS, MAX_WORKERS, workers
            )));
        }
    }

    if config.crawler.min_delay_ms > config.crawler.max_delay_ms {
        return Err(ConfigError::Validation(format!(
            "crawler.min-delay-ms ({}) exceeds crawler.max-delay-ms ({})",
            config.crawler.min_delay_ms, config.crawler.max_delay_ms
        )));
    }

    Ok(())
}

fn validate_output(config: &Config) -> Result<(), ConfigError> {
    if config.output.progress_db_path.is_empty() {
        return Err(ConfigError::Validation(
            "output.progress-db-path must not be empty".to_string(),
        ));
    }

    if config.output.levels_db_path.is_empty() {
        return Err(ConfigError::Validation(
            "output.levels-db-path must not be empty".to_string(),
        ));
    }

    if config.output.progress_db_path == config.output.levels_db_path {
        return Err(ConfigError::Validation(
            "progress and levels databases must be separate files".to_string(),
        ));
    }

    Ok(())
}
