use crate::common::*;
use reelpick::crawler::{build_http_client, fetch_with_retry, RetryPolicy};
use reqwest::header::HeaderMap;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        backoff_base: Duration::from_millis(5),
    }
}

#[tokio::test]
async fn test_recovers_after_transient_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&create_test_config(&mock_server.uri())).unwrap();
    let url = format!("{}/flaky", mock_server.uri());

    let body = fetch_with_retry(&client, &url, HeaderMap::new(), fast_policy())
        .await
        .expect("No network error expected");

    assert_eq!(body.as_deref(), Some("finally"));
}

#[tokio::test]
async fn test_gives_up_after_budget_with_none() {
    let mock_server = MockServer::start().await;

    // Client errors are retried like any other non-success status
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&create_test_config(&mock_server.uri())).unwrap();
    let url = format!("{}/gone", mock_server.uri());

    let body = fetch_with_retry(&client, &url, HeaderMap::new(), fast_policy())
        .await
        .expect("No network error expected");

    assert!(body.is_none());
}

#[tokio::test]
async fn test_backoff_waits_between_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&create_test_config(&mock_server.uri())).unwrap();
    let url = format!("{}/slow", mock_server.uri());
    let policy = RetryPolicy {
        max_retries: 2,
        backoff_base: Duration::from_millis(40),
    };

    let started = Instant::now();
    let body = fetch_with_retry(&client, &url, HeaderMap::new(), policy)
        .await
        .unwrap();

    assert!(body.is_none());
    // 40ms before the second attempt, 80ms before the third
    assert!(started.elapsed() >= Duration::from_millis(120));
}

#[tokio::test]
async fn test_first_page_recovers_within_retry_budget() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, LIST_PATH, list_page(&["a", "b"], false)).await;

    let films = fetcher_for(&mock_server)
        .fetch_list(LIST_URL)
        .await
        .expect("List fetch failed");

    assert_eq!(slugs(&films), vec!["a", "b"]);
}
