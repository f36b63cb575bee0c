//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the catalog and run each phase
//! end-to-end against JSON artifacts in a temp directory.

use hoopstat::config::{CatalogConfig, Config, FetcherConfig, OutputConfig};
use hoopstat::crawler::{Coordinator, CrawlPhases, FetchPolicy, PageSource, RateLimitedFetcher};
use hoopstat::model::{Record, Stub};
use hoopstat::storage::{ArtifactStore, JsonFileStore};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server, with no pacing
fn create_test_config(base_url: &str, sections: &str, dir: &TempDir) -> Config {
    Config {
        catalog: CatalogConfig {
            base_url: base_url.to_string(),
            index_path: "/players/{letter}/".to_string(),
            sections: sections.to_string(),
        },
        fetcher: FetcherConfig {
            user_agent: "TestBot/1.0".to_string(),
            request_delay_ms: 0,
            timeout_secs: 5,
            connect_timeout_secs: 5,
            max_retries: 0,
            retry_backoff_ms: 0,
        },
        output: OutputConfig {
            roster_path: dir.path().join("roster.json").display().to_string(),
            detail_path: dir.path().join("detail.json").display().to_string(),
            checkpoint_every: 2,
        },
    }
}

fn live_coordinator(config: Config) -> Coordinator<RateLimitedFetcher, JsonFileStore> {
    Coordinator::from_config(config).expect("Failed to create coordinator")
}

fn index_body(players: &[(&str, &str)]) -> String {
    let rows: String = players
        .iter()
        .map(|(name, slug)| {
            format!(
                r#"<tr>
                    <th data-stat="player"><a href="/players/{slug}.html">{name}</a></th>
                    <td data-stat="year_min">1991</td>
                    <td data-stat="year_max">1995</td>
                    <td data-stat="birth_date">June 24, 1968</td>
                    <td data-stat="colleges"><a>Duke</a></td>
                </tr>"#
            )
        })
        .collect();
    format!(
        r#"<html><body><table id="players"><thead><tr><th>Player</th></tr></thead>
        <tbody>{rows}</tbody></table></body></html>"#
    )
}

fn profile_body(name: &str) -> String {
    format!(
        r#"<html><body>
        <h1><span>{name}</span></h1>
        <div id="meta"><p><span>6-10</span>, <span>240lb</span></p></div>
        <table id="per_game_stats">
          <tbody>
            <tr><th data-stat="year_id">1990-91</th><td data-stat="g">43</td></tr>
          </tbody>
          <tfoot><tr><th data-stat="year_id">Career</th><td data-stat="g">256</td></tr></tfoot>
        </table>
        </body></html>"#
    )
}

async fn mount_page(server: &MockServer, page: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn stub(name: &str, url: String) -> Stub {
    Stub {
        name: name.to_string(),
        start_year: "1991".to_string(),
        end_year: "1995".to_string(),
        birth_date: "June 24, 1968".to_string(),
        colleges: vec!["Duke".to_string()],
        profile_url: Some(url),
    }
}

#[tokio::test]
async fn test_roster_survives_failed_section() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/players/a/",
        200,
        index_body(&[("Alaa Abdelnaby", "a/abdelal01"), ("Zaid Abdul-Aziz", "a/abdulza01")]),
    )
    .await;
    mount_page(&mock_server, "/players/b/", 500, String::new()).await;
    mount_page(&mock_server, "/players/c/", 200, index_body(&[("Bruce Cole", "c/colebr01")])).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, "abc", &dir);
    let mut coordinator = live_coordinator(config);

    let summary = coordinator
        .run(CrawlPhases::Roster, &CancellationToken::new())
        .await
        .expect("Crawl failed");

    let report = summary.roster.expect("roster phase should have run");
    assert_eq!(report.accumulated, 2);
    assert_eq!(report.skipped, 1);
    assert!(summary.details.is_none());

    let stubs = coordinator.store().read_roster().unwrap();
    let names: Vec<&str> = stubs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Alaa Abdelnaby", "Zaid Abdul-Aziz", "Bruce Cole"]);
    assert_eq!(stubs[0].colleges, vec!["Duke"]);
    assert_eq!(
        stubs[0].profile_url.as_deref(),
        Some(format!("{}/players/a/abdelal01.html", base_url).as_str())
    );
    assert_eq!(coordinator.source().requests_made(), 3);
}

#[tokio::test]
async fn test_details_skip_missing_profile() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/players/a/one.html", 200, profile_body("Player One")).await;
    mount_page(&mock_server, "/players/a/two.html", 404, String::new()).await;
    mount_page(&mock_server, "/players/a/three.html", 200, profile_body("Player Three")).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, "a", &dir);
    let store = JsonFileStore::from_config(&config.output);
    store
        .write_roster(&[
            stub("One", format!("{}/players/a/one.html", base_url)),
            stub("Two", format!("{}/players/a/two.html", base_url)),
            stub("Three", format!("{}/players/a/three.html", base_url)),
        ])
        .unwrap();

    let mut coordinator = live_coordinator(config);
    let summary = coordinator
        .run(CrawlPhases::Details, &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert!(summary.roster.is_none());
    let report = summary.details.expect("details phase should have run");
    assert_eq!(report.accumulated, 2);
    assert_eq!(report.skipped, 1);

    let records: Vec<Record> = store.read_records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Player One");
    assert_eq!(records[1].name, "Player Three");
    assert_eq!(records[0].height.as_deref(), Some("6-10"));
    assert_eq!(records[0].weight.as_deref(), Some("240lb"));
    assert_eq!(records[0].season_stats[0].season, "1990-91");
    assert_eq!(records[0].career_stats.get("g"), Some("256"));
}

#[tokio::test]
async fn test_details_without_roster_fails() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config("http://127.0.0.1:9", "a", &dir);
    let mut coordinator = live_coordinator(config);

    let result = coordinator
        .run(CrawlPhases::Details, &CancellationToken::new())
        .await;

    assert!(result.is_err());
    assert_eq!(coordinator.source().requests_made(), 0);
}

#[tokio::test]
async fn test_full_crawl_both_phases() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/players/a/", 200, index_body(&[("Alaa Abdelnaby", "a/abdelal01")])).await;
    mount_page(&mock_server, "/players/b/", 200, index_body(&[("Mark Acres", "b/acresma01")])).await;
    mount_page(&mock_server, "/players/a/abdelal01.html", 200, profile_body("Alaa Abdelnaby")).await;
    mount_page(&mock_server, "/players/b/acresma01.html", 200, profile_body("Mark Acres")).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&base_url, "ab", &dir);
    let mut coordinator = live_coordinator(config);

    let summary = coordinator
        .run(CrawlPhases::All, &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert!(!summary.was_cancelled());
    assert_eq!(summary.roster.as_ref().map(|r| r.outputs), Some(2));
    assert_eq!(summary.details.as_ref().map(|r| r.outputs), Some(2));

    let records = coordinator.store().read_records().unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alaa Abdelnaby", "Mark Acres"]);
    assert_eq!(coordinator.source().requests_made(), 4);
}

#[tokio::test]
async fn test_cancelled_before_start_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0) // Should never be called
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), "abc", &dir);
    let mut coordinator = live_coordinator(config);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let summary = coordinator.run(CrawlPhases::All, &cancel).await.unwrap();

    assert!(summary.was_cancelled());
    assert!(summary.details.is_none());
    assert!(!dir.path().join("roster.json").exists());
    assert!(!dir.path().join("detail.json").exists());
}

#[tokio::test]
async fn test_retry_recovers_from_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/flaky", 200, "<html>ok</html>".to_string()).await;

    let policy = FetchPolicy {
        request_delay: std::time::Duration::ZERO,
        retry_backoff: std::time::Duration::from_millis(1),
        max_retries: 2,
        ..FetchPolicy::default()
    };
    let mut fetcher = RateLimitedFetcher::new(policy).unwrap();

    let result = fetcher.fetch(&format!("{}/flaky", mock_server.uri())).await;

    assert!(result.is_success());
    assert_eq!(fetcher.requests_made(), 2);
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/down", 503, String::new()).await;

    let policy = FetchPolicy {
        request_delay: std::time::Duration::ZERO,
        ..FetchPolicy::default()
    };
    let mut fetcher = RateLimitedFetcher::new(policy).unwrap();

    let result = fetcher.fetch(&format!("{}/down", mock_server.uri())).await;

    assert!(!result.is_success());
    assert_eq!(fetcher.requests_made(), 1);
}
