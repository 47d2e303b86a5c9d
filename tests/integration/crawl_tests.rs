//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the answer site and exercise the
//! full pipeline: discovery, seeding, the bounded worker pool, extraction,
//! and the resumability of the progress ledger.

use std::sync::{Arc, Mutex};
use word_harvester::config::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use word_harvester::storage::{
    LevelStore, ProgressStore, SharedLevels, SharedProgress, SqliteLevelStore,
    SqliteProgressStore,
};
use word_harvester::Coordinator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at a mock server
fn create_test_config(base_url: &str, progress_db: &str, levels_db: &str) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            start_page: format!("{}/otvety/wow", base_url),
            link_prefix: "/otvety/wow-".to_string(),
            level_marker: "Level".to_string(),
        },
        crawler: CrawlerConfig {
            user_agent: "TestBot/1.0".to_string(),
            workers: Some(2),
            min_delay_ms: 0, // No politeness pauses in tests
            max_delay_ms: 0,
        },
        output: OutputConfig {
            progress_db_path: progress_db.to_string(),
            levels_db_path: levels_db.to_string(),
        },
    }
}

fn in_memory_stores() -> (SharedProgress, SharedLevels) {
    (
        Arc::new(Mutex::new(SqliteProgressStore::open_in_memory().unwrap())),
        Arc::new(Mutex::new(SqliteLevelStore::open_in_memory().unwrap())),
    )
}

/// Mounts a seed page listing the given level-page paths
async fn mount_seed_page(server: &MockServer, hrefs: &[&str]) {
    let items = hrefs
        .iter()
        .map(|h| format!(r#"<li><a class="uk-button" href="{}">{}</a></li>"#, h, h))
        .collect::<String>();
    Mock::given(method("GET"))
        .and(path("/otvety/wow"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(format!("<ul>{}</ul>", items)),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_end_to_end() {
    let server = MockServer::start().await;
    mount_seed_page(&server, &["/otvety/wow-1", "/otvety/wow-2"]).await;

    Mock::given(method("GET"))
        .and(path("/otvety/wow-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h2>Level 3</h2>
               <p><strong>Answers:</strong> CAT DOG
                  <span class="uk-text-meta">BONUS1, BONUS2</span></p>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/otvety/wow-2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h2>Level 4</h2><p>BIRD</p>"#,
        ))
        .mount(&server)
        .await;

    let (progress, levels) = in_memory_stores();
    let config = create_test_config(&server.uri(), "unused.db", "unused2.db");
    let mut coordinator = Coordinator::with_stores(
        config,
        2,
        Arc::clone(&progress),
        Arc::clone(&levels),
    )
    .unwrap();

    let summary = coordinator.run().await.unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 0);

    // Both pages were discovered, processed, and marked in the ledger.
    let store = progress.lock().unwrap();
    assert_eq!(store.count().unwrap(), 2);
    assert!(store.unprocessed().unwrap().is_empty());
    drop(store);

    // The extracted records match the pages exactly.
    let store = levels.lock().unwrap();
    assert_eq!(store.count().unwrap(), 2);

    let record = store.get(3).unwrap().unwrap();
    assert_eq!(record.main_words, vec!["CAT", "DOG"]);
    assert_eq!(record.bonus_words, vec!["BONUS1", "BONUS2"]);

    let record = store.get(4).unwrap().unwrap();
    assert_eq!(record.main_words, vec!["BIRD"]);
    assert!(record.bonus_words.is_empty());
}

#[tokio::test]
async fn test_failed_page_is_retried_on_next_run() {
    let server = MockServer::start().await;
    mount_seed_page(&server, &["/otvety/wow-1", "/otvety/wow-2"]).await;

    Mock::given(method("GET"))
        .and(path("/otvety/wow-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h2>Level 1</h2><p>GOOD</p>"#,
        ))
        .mount(&server)
        .await;

    // First run: page 2 is broken.
    let broken = Mock::given(method("GET"))
        .and(path("/otvety/wow-2"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount_as_scoped(&server)
        .await;

    let (progress, levels) = in_memory_stores();
    let config = create_test_config(&server.uri(), "unused.db", "unused2.db");
    let mut coordinator = Coordinator::with_stores(
        config.clone(),
        2,
        Arc::clone(&progress),
        Arc::clone(&levels),
    )
    .unwrap();

    let summary = coordinator.run().await.unwrap();
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        progress.lock().unwrap().unprocessed().unwrap(),
        vec![format!("{}/otvety/wow-2", server.uri())]
    );

    drop(broken);

    // Second run: the site recovered. Only the failed page is refetched
    // (the ledger is non-empty, so discovery is skipped too).
    Mock::given(method("GET"))
        .and(path("/otvety/wow-2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h2>Level 2</h2><p>FIXED</p>"#,
        ))
        .mount(&server)
        .await;

    let mut coordinator =
        Coordinator::with_stores(config, 2, Arc::clone(&progress), Arc::clone(&levels)).unwrap();
    let summary = coordinator.run().await.unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.succeeded, 1);

    assert!(progress.lock().unwrap().unprocessed().unwrap().is_empty());
    assert_eq!(levels.lock().unwrap().count().unwrap(), 2);
}

#[tokio::test]
async fn test_resume_across_file_backed_runs() {
    let server = MockServer::start().await;
    mount_seed_page(&server, &["/otvety/wow-1", "/otvety/wow-2", "/otvety/wow-3"]).await;

    for (page, body) in [
        ("/otvety/wow-1", "<h2>Level 1</h2><p>ONE</p>"),
        ("/otvety/wow-2", "<h2>Level 2</h2><p>TWO</p>"),
        ("/otvety/wow-3", "<h2>Level 3</h2><p>THREE</p>"),
    ] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let progress_db = dir.path().join("progress.db");
    let levels_db = dir.path().join("levels.db");
    let config = create_test_config(
        &server.uri(),
        progress_db.to_str().unwrap(),
        levels_db.to_str().unwrap(),
    );

    // Simulate an interrupted earlier run: seed the ledger and mark one
    // page already processed.
    {
        let mut store = SqliteProgressStore::open(&progress_db).unwrap();
        store
            .insert_if_absent(&[
                format!("{}/otvety/wow-1", server.uri()),
                format!("{}/otvety/wow-2", server.uri()),
                format!("{}/otvety/wow-3", server.uri()),
            ])
            .unwrap();
        store
            .mark_processed(&format!("{}/otvety/wow-1", server.uri()))
            .unwrap();
        assert_eq!(store.unprocessed().unwrap().len(), 2);
    }

    // A fresh coordinator over the same files picks up the remaining two.
    let mut coordinator = Coordinator::new(config, 2).unwrap();
    let summary = coordinator.run().await.unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.succeeded, 2);

    let store = SqliteProgressStore::open(&progress_db).unwrap();
    assert!(store.unprocessed().unwrap().is_empty());
    assert_eq!(store.count().unwrap(), 3);

    let levels = SqliteLevelStore::open(&levels_db).unwrap();
    assert_eq!(levels.get(2).unwrap().unwrap().main_words, vec!["TWO"]);
    assert_eq!(levels.get(3).unwrap().unwrap().main_words, vec!["THREE"]);
}

#[tokio::test]
async fn test_seeding_is_idempotent_across_runs() {
    let server = MockServer::start().await;
    mount_seed_page(&server, &["/otvety/wow-1"]).await;

    Mock::given(method("GET"))
        .and(path("/otvety/wow-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (progress, levels) = in_memory_stores();
    let config = create_test_config(&server.uri(), "unused.db", "unused2.db");

    // Two runs against a page that keeps failing: the ledger must still
    // hold exactly one record for the URL.
    for _ in 0..2 {
        let mut coordinator = Coordinator::with_stores(
            config.clone(),
            1,
            Arc::clone(&progress),
            Arc::clone(&levels),
        )
        .unwrap();
        let summary = coordinator.run().await.unwrap();
        assert_eq!(summary.failed, 1);
    }

    assert_eq!(progress.lock().unwrap().count().unwrap(), 1);
    assert_eq!(progress.lock().unwrap().unprocessed().unwrap().len(), 1);
}

#[tokio::test]
async fn test_seed_discovery_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/otvety/wow"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (progress, levels) = in_memory_stores();
    let config = create_test_config(&server.uri(), "unused.db", "unused2.db");
    let mut coordinator = Coordinator::with_stores(config, 2, progress, levels).unwrap();

    assert!(coordinator.run().await.is_err());
}
