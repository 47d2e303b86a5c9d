//! Seed-page link discovery
//!
//! Fetches the crawl's seed page once (on the first run only) and extracts
//! the set of level-page URLs to enqueue. Pure transformation aside from the
//! single fetch; persisted state is never touched here.

use crate::crawler::fetcher::fetch_page;
use crate::{HarvestError, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Level pages are linked as button anchors inside the seed page's lists.
const ANCHOR_SELECTOR: &str = "li > a.uk-button";

/// Discovers every level-page URL linked from the seed page
///
/// Anchors are matched by the button selector plus their href prefix and
/// resolved against `base_url` into absolute URLs. An empty result is not an
/// error; the caller decides whether zero links is worth a warning.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `seed_url` - The seed page listing every level page
/// * `base_url` - Base URL relative hrefs are resolved against
/// * `link_prefix` - Path prefix an href must have to count as a level page
pub async fn discover(
    client: &Client,
    seed_url: &str,
    base_url: &str,
    link_prefix: &str,
) -> Result<Vec<String>> {
    let body = fetch_page(client, seed_url).await?;
    let base = Url::parse(base_url)?;
    extract_level_links(&body, &base, link_prefix).map_err(|message| HarvestError::Parse {
        url: seed_url.to_string(),
        message,
    })
}

/// Extracts matching anchor hrefs from the seed page body
fn extract_level_links(
    html: &str,
    base: &Url,
    link_prefix: &str,
) -> std::result::Result<Vec<String>, String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(ANCHOR_SELECTOR)
        .map_err(|e| format!("invalid anchor selector: {:?}", e))?;

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h.trim(),
            None => continue,
        };
        if !href.starts_with(link_prefix) {
            continue;
        }
        match base.join(href) {
            Ok(absolute) => links.push(absolute.to_string()),
            Err(e) => {
                tracing::debug!("Skipping unjoinable href {}: {}", href, e);
            }
        }
    }

    Ok(links)
}
