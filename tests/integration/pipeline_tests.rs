//! Integration tests for the pipeline
//!
//! These tests use wiremock to stand in for both the listing API and the
//! media catalog, and run the full pipeline over real HTTP.

use frame_tally::config::{Config, DetailConfig, HttpConfig, ListingConfig};
use frame_tally::crawler::Pipeline;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PATH: &str = "/api/public/v1.0/lists/movies/in_theaters.json";

/// Creates a test configuration pointing both endpoints at the mock server
fn create_test_config(base_url: &str, page_limit: u32) -> Config {
    Config {
        listing: ListingConfig {
            api_key: "test-key".to_string(),
            endpoint: format!("{}{}", base_url, LISTING_PATH),
            page_limit,
            start_page: 1,
            window_size: 4,
            window_pause_ms: 10, // Very short for testing
            max_windows: 20,
        },
        detail: DetailConfig {
            media_index_template: format!("{}/title/tt{{id}}/mediaindex?ref_=tt_pv_mi_sm", base_url),
            title_template: format!("{}/title/tt{{id}}", base_url),
            concurrency: 5,
            count_selector: "#left".to_string(),
        },
        http: HttpConfig {
            user_agent: "TestTally/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 5,
        },
    }
}

/// Mounts one listing page, expected to be requested `expected` times
async fn mount_listing_page(server: &MockServer, page: u32, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("apikey", "test-key"))
        .and(query_param("page", page.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected)
        .mount(server)
        .await;
}

/// Listing body with one movie per identifier
fn listing_body(total: u64, ids: &[&str]) -> String {
    let movies: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{"title": "Movie {}", "alternate_ids": {{"imdb": "{}"}}}}"#, id, id))
        .collect();
    format!(r#"{{"total": "{}", "movies": [{}]}}"#, total, movies.join(","))
}

fn media_index_body(count: u64) -> String {
    format!(
        r#"<html><body><div id="main"><div id="left">1-48 of {} photos</div></div></body></html>"#,
        count
    )
}

async fn mount_media_index(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/title/tt{}/mediaindex", id)))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_single_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let listing = r#"{"total": "2", "movies": [
        {"title": "Has Reference", "alternate_ids": {"imdb": "1000"}},
        {"title": "No Reference"}
    ]}"#;
    mount_listing_page(&mock_server, 1, listing.to_string(), 1).await;
    for page in 2..=4 {
        mount_listing_page(&mock_server, page, r#"{"movies": []}"#.to_string(), 1).await;
    }

    mount_media_index(
        &mock_server,
        "1000",
        ResponseTemplate::new(200).set_body_string(media_index_body(12)),
    )
    .await;

    let config = create_test_config(&base_url, 50);
    let pipeline = Pipeline::new(config).expect("Failed to create pipeline");
    let outcome = pipeline.run().await.expect("Run failed");

    let json = outcome.report.to_json(false).expect("Failed to serialize");
    assert_eq!(
        json,
        format!(
            r#"[{{"imdb_id":"1000","url":"{}/title/tt1000","count":12}}]"#,
            base_url
        )
    );
    assert_eq!(outcome.stats.entries_without_reference, 1);
}

#[tokio::test]
async fn test_single_window_when_total_fits() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // total=120 at 50 per page is covered by pages 1-4
    mount_listing_page(&mock_server, 1, listing_body(120, &["11", "12"]), 1).await;
    mount_listing_page(&mock_server, 2, listing_body(120, &["21"]), 1).await;
    mount_listing_page(&mock_server, 3, listing_body(120, &["31"]), 1).await;
    mount_listing_page(&mock_server, 4, r#"{"total": "120"}"#.to_string(), 1).await;
    mount_listing_page(&mock_server, 5, listing_body(120, &["51"]), 0).await;

    mount_media_index(
        &mock_server,
        "11",
        ResponseTemplate::new(200).set_body_string(media_index_body(3)),
    )
    .await;
    for id in ["12", "21", "31"] {
        mount_media_index(
            &mock_server,
            id,
            ResponseTemplate::new(200).set_body_string("<html><body></body></html>"),
        )
        .await;
    }

    let config = create_test_config(&base_url, 50);
    let outcome = Pipeline::new(config)
        .expect("Failed to create pipeline")
        .run()
        .await
        .expect("Run failed");

    assert_eq!(outcome.stats.windows, 1);
    assert_eq!(outcome.stats.listing_pages_requested, 4);
    assert_eq!(outcome.stats.listing_pages_valid, 3);
    assert_eq!(outcome.report.len(), 4);

    let counted: Vec<_> = outcome
        .report
        .records()
        .iter()
        .filter(|r| r.count > 0)
        .collect();
    assert_eq!(counted.len(), 1);
    assert_eq!(counted[0].imdb_id.as_str(), "11");
    assert_eq!(counted[0].count, 3);
    assert_eq!(outcome.stats.zero_count_records, 3);
}

#[tokio::test]
async fn test_windows_until_total_covered() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // total=120 at 10 per page needs pages 1-12, three windows
    for page in 1..=12u32 {
        let id = (1000 + page).to_string();
        mount_listing_page(&mock_server, page, listing_body(120, &[id.as_str(), "4242"]), 1).await;
    }
    mount_listing_page(&mock_server, 13, listing_body(120, &["9999"]), 0).await;

    mount_media_index(
        &mock_server,
        "4242",
        ResponseTemplate::new(200).set_body_string(media_index_body(42)),
    )
    .await;
    for page in 1..=12u32 {
        mount_media_index(
            &mock_server,
            &(1000 + page).to_string(),
            ResponseTemplate::new(200).set_body_string(media_index_body(1)),
        )
        .await;
    }

    let config = create_test_config(&base_url, 10);
    let outcome = Pipeline::new(config)
        .expect("Failed to create pipeline")
        .run()
        .await
        .expect("Run failed");

    assert_eq!(outcome.stats.windows, 3);
    assert_eq!(outcome.stats.identifiers, 13);
    assert_eq!(outcome.report.len(), 13);

    let shared = outcome
        .report
        .records()
        .iter()
        .find(|r| r.imdb_id.as_str() == "4242")
        .expect("Shared identifier missing");
    assert_eq!(shared.count, 42);
}

#[tokio::test]
async fn test_rate_limited_listing_page_is_dropped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing_page(&mock_server, 1, listing_body(60, &["1"]), 1).await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;
    for page in 3..=4 {
        mount_listing_page(&mock_server, page, "{}".to_string(), 1).await;
    }

    mount_media_index(
        &mock_server,
        "1",
        ResponseTemplate::new(200).set_body_string(media_index_body(5)),
    )
    .await;

    let config = create_test_config(&base_url, 50);
    let outcome = Pipeline::new(config)
        .expect("Failed to create pipeline")
        .run()
        .await
        .expect("Run failed");

    assert_eq!(outcome.stats.listing_pages_valid, 1);
    assert_eq!(outcome.report.len(), 1);
    assert_eq!(outcome.report.records()[0].count, 5);
}

#[tokio::test]
async fn test_failed_detail_page_yields_no_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing_page(&mock_server, 1, listing_body(3, &["1", "2", "3"]), 1).await;
    for page in 2..=4 {
        mount_listing_page(&mock_server, page, "{}".to_string(), 1).await;
    }

    mount_media_index(
        &mock_server,
        "1",
        ResponseTemplate::new(200).set_body_string(media_index_body(10)),
    )
    .await;
    mount_media_index(&mock_server, "2", ResponseTemplate::new(404)).await;
    mount_media_index(
        &mock_server,
        "3",
        ResponseTemplate::new(200).set_body_string("<html><body>No photos</body></html>"),
    )
    .await;

    let config = create_test_config(&base_url, 50);
    let outcome = Pipeline::new(config)
        .expect("Failed to create pipeline")
        .run()
        .await
        .expect("Run failed");

    assert_eq!(outcome.report.len(), 2);
    assert_eq!(outcome.stats.failed_details, 1);
    assert!(outcome
        .report
        .records()
        .iter()
        .all(|r| r.imdb_id.as_str() != "2"));

    let no_photos = outcome
        .report
        .records()
        .iter()
        .find(|r| r.imdb_id.as_str() == "3")
        .expect("Record for 3 missing");
    assert_eq!(no_photos.count, 0);
}

#[tokio::test]
async fn test_no_valid_listing_pages_gives_empty_report() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"error": "Invalid API key"}"#),
        )
        .expect(4)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 50);
    let outcome = Pipeline::new(config)
        .expect("Failed to create pipeline")
        .run()
        .await
        .expect("Run failed");

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.report.to_json(false).unwrap(), "[]");
    assert_eq!(outcome.stats.windows, 1);
}
