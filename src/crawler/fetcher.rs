//! HTTP fetcher
//!
//! Builds the shared HTTP client and fetches page bodies. Any non-2xx
//! response counts as a fetch failure; the URL stays unprocessed and is
//! retried on a later run.

use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for every request in a run
///
/// # Arguments
///
/// * `user_agent` - Identifying User-Agent header value
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(HarvestError::HttpStatus)` - Non-2xx response
/// * `Err(HarvestError::Network)` - Connection, timeout, or body read failure
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, HarvestError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_request_error(url, &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| HarvestError::Network {
        url: url.to_string(),
        message: format!("failed to read body: {}", e),
    })
}

fn classify_request_error(url: &str, error: &reqwest::Error) -> HarvestError {
    let message = if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    };

    HarvestError::Network {
        url: url.to_string(),
        message,
    }
}
