//! End-to-end pipeline tests
//!
//! These tests run the full coordinator against a mock HTTP server standing
//! in for seed sites, the availability endpoint, and the save endpoint, with
//! frontier and output files in a temp directory.

use kioku::config::{ArchiveConfig, Config, GithubConfig, RunConfig, StoreConfig};
use kioku::pipeline::{Coordinator, RunMode};
use kioku::KiokuError;
use serde_json::json;
use std::path::Path;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a config pointing every endpoint at the mock server, with pacing
/// short enough for tests
fn test_config(server: &MockServer, frontier: &Path, output: &Path) -> Config {
    Config {
        run: RunConfig {
            max_seeds_per_run: 10,
            worker_count: 4,
            request_delay_ms: 100,
            fetch_timeout_secs: 5,
        },
        stores: StoreConfig {
            frontier_path: frontier.display().to_string(),
            output_path: output.display().to_string(),
        },
        archive: ArchiveConfig {
            availability_endpoint: format!("{}/wayback/available", server.uri()),
            save_endpoint: format!("{}/save", server.uri()),
            cooldown_ms: 10,
            retry_delay_ms: 10,
            save_timeout_secs: 5,
        },
        github: GithubConfig {
            // Deliberately points at a variable that is never set, so no
            // ambient GITHUB_TOKEN can leak API calls into the tests
            token_env: "KIOKU_TEST_UNSET_TOKEN".to_string(),
            api_base: server.uri(),
        },
        pattern: vec![],
    }
}

/// Mounts an availability endpoint that reports every URL as unarchived
async fn mount_nothing_archived(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/wayback/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"archived_snapshots": {}})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_archive_run_submits_only_unarchived() {
    let server = MockServer::start().await;
    let base = server.uri();
    let seed = format!("{}/seed", base);

    // Seed page: one relative link, one absolute link that is already archived
    Mock::given(method("GET"))
        .and(path("/seed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><body>
                <a href="/linked">fresh</a>
                <a href="{}/already">old</a>
            </body></html>"#,
            base
        )))
        .mount(&server)
        .await;

    // /already has a snapshot; everything else does not
    Mock::given(method("GET"))
        .and(path("/wayback/available"))
        .and(query_param("url", format!("{}/already", base)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "archived_snapshots": {"closest": {"available": true}}
        })))
        .mount(&server)
        .await;
    mount_nothing_archived(&server).await;

    // The archived URL must never be submitted
    Mock::given(method("GET"))
        .and(path(format!("/save/{}/already", base)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/save/.*"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let frontier = dir.path().join("frontier.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&frontier, format!("{}\n", seed)).unwrap();

    let config = test_config(&server, &frontier, &output);
    let coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run(RunMode::Archive).await.unwrap();

    assert_eq!(summary.seeds_processed, 1);
    assert_eq!(summary.urls_discovered, 3);
    assert_eq!(summary.already_archived, 1);
    assert_eq!(summary.archived, 2);
    assert_eq!(summary.failed, 0);

    // Seed left the frontier
    let remaining = std::fs::read_to_string(&frontier).unwrap();
    assert_eq!(remaining, "");
}

#[tokio::test]
async fn test_archive_run_expands_github_repo_links() {
    let server = MockServer::start().await;
    let base = server.uri();
    let seed = format!("{}/seed", base);

    Mock::given(method("GET"))
        .and(path("/seed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><a href="https://github.com/acme/widget">repo</a></body></html>"#,
        ))
        .mount(&server)
        .await;

    mount_nothing_archived(&server).await;

    Mock::given(method("GET"))
        .and(path_regex("^/save/.*"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let frontier = dir.path().join("frontier.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&frontier, format!("{}\n", seed)).unwrap();

    let config = test_config(&server, &frontier, &output);
    let coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run(RunMode::Archive).await.unwrap();

    // Seed, the repo root, and both zip guesses; no credential, so no API URLs
    assert_eq!(summary.urls_discovered, 4);
    assert_eq!(summary.archived, 4);

    let requests = server.received_requests().await.unwrap();
    let submitted: Vec<String> = requests
        .iter()
        .filter(|r| r.url.path().starts_with("/save/"))
        .map(|r| r.url.path().to_string())
        .collect();
    assert!(submitted.contains(&"/save/https://github.com/acme/widget".to_string()));
    assert!(submitted
        .contains(&"/save/https://github.com/acme/widget/archive/refs/heads/main.zip".to_string()));
    assert!(submitted
        .contains(&"/save/https://codeload.github.com/acme/widget/zip/refs/heads/main".to_string()));
}

#[tokio::test]
async fn test_record_run_is_idempotent() {
    let server = MockServer::start().await;
    let base = server.uri();
    let seed = format!("{}/seed", base);

    Mock::given(method("GET"))
        .and(path("/seed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><body><a href="{}/one">1</a><a href="{}/two">2</a></body></html>"#,
            base, base
        )))
        .mount(&server)
        .await;

    mount_nothing_archived(&server).await;

    // Everything is alive
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let frontier = dir.path().join("frontier.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&frontier, format!("{}\n", seed)).unwrap();

    let config = test_config(&server, &frontier, &output);

    let coordinator = Coordinator::new(config.clone()).unwrap();
    let summary = coordinator.run(RunMode::Record).await.unwrap();
    assert_eq!(summary.recorded, 3);

    let first_pass = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        first_pass,
        format!("{}/one\n{}/seed\n{}/two\n", base, base, base)
    );

    // Frontier was pruned; re-seed it and run again against the same output
    assert_eq!(std::fs::read_to_string(&frontier).unwrap(), "");
    std::fs::write(&frontier, format!("{}\n", seed)).unwrap();

    let coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run(RunMode::Record).await.unwrap();
    assert_eq!(summary.recorded, 0);

    let second_pass = std::fs::read_to_string(&output).unwrap();
    assert_eq!(second_pass, first_pass);
}

#[tokio::test]
async fn test_record_run_drops_dead_urls() {
    let server = MockServer::start().await;
    let base = server.uri();
    let seed = format!("{}/seed", base);

    Mock::given(method("GET"))
        .and(path("/seed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><body><a href="{}/dead">gone</a></body></html>"#,
            base
        )))
        .mount(&server)
        .await;

    mount_nothing_archived(&server).await;

    Mock::given(method("HEAD"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let frontier = dir.path().join("frontier.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&frontier, format!("{}\n", seed)).unwrap();

    let config = test_config(&server, &frontier, &output);
    let coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run(RunMode::Record).await.unwrap();

    assert_eq!(summary.recorded, 1);
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content, format!("{}/seed\n", base));
}

#[tokio::test]
async fn test_failed_submissions_still_prune_frontier() {
    let server = MockServer::start().await;
    let base = server.uri();
    let seed = format!("{}/seed", base);

    // No links; the seed itself is the only candidate
    Mock::given(method("GET"))
        .and(path("/seed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    mount_nothing_archived(&server).await;

    // Every submission attempt fails
    Mock::given(method("GET"))
        .and(path_regex("^/save/.*"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let frontier = dir.path().join("frontier.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&frontier, format!("{}\n", seed)).unwrap();

    let config = test_config(&server, &frontier, &output);
    let coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run(RunMode::Archive).await.unwrap();

    assert_eq!(summary.archived, 0);
    assert_eq!(summary.failed, 1);

    // The seed is gone regardless of the failure
    assert_eq!(std::fs::read_to_string(&frontier).unwrap(), "");
}

#[tokio::test]
async fn test_sustained_rate_limiting_halts_run_after_pruning() {
    let server = MockServer::start().await;
    let base = server.uri();
    let seed = format!("{}/seed", base);

    Mock::given(method("GET"))
        .and(path("/seed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    mount_nothing_archived(&server).await;

    Mock::given(method("GET"))
        .and(path_regex("^/save/.*"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let frontier = dir.path().join("frontier.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&frontier, format!("{}\n", seed)).unwrap();

    let config = test_config(&server, &frontier, &output);
    let coordinator = Coordinator::new(config).unwrap();
    let result = coordinator.run(RunMode::Archive).await;

    assert!(matches!(result, Err(KiokuError::RateLimitExceeded { .. })));

    // Forward progress: the seed was still removed
    assert_eq!(std::fs::read_to_string(&frontier).unwrap(), "");
}

#[tokio::test]
async fn test_empty_frontier_is_a_clean_noop() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let frontier = dir.path().join("frontier.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&frontier, "").unwrap();

    let config = test_config(&server, &frontier, &output);
    let coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run(RunMode::Archive).await.unwrap();

    assert_eq!(summary.seeds_processed, 0);
    assert_eq!(summary.urls_discovered, 0);
    assert_eq!(summary.archived, 0);
}

#[tokio::test]
async fn test_unreachable_seed_page_still_checks_the_seed() {
    let server = MockServer::start().await;
    let base = server.uri();
    let seed = format!("{}/seed", base);

    // The seed page itself 404s, so extraction yields nothing
    Mock::given(method("GET"))
        .and(path("/seed"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    mount_nothing_archived(&server).await;

    Mock::given(method("GET"))
        .and(path_regex("^/save/.*"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let frontier = dir.path().join("frontier.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&frontier, format!("{}\n", seed)).unwrap();

    let config = test_config(&server, &frontier, &output);
    let coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run(RunMode::Archive).await.unwrap();

    // The seed URL itself is still submitted
    assert_eq!(summary.urls_discovered, 1);
    assert_eq!(summary.archived, 1);
}
