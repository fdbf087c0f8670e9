use crate::common::*;
use reelpick::model::ResponseBody;
use reelpick::ListError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_feed_used_when_pages_unreachable() {
    let mock_server = MockServer::start().await;

    // No page mocks: every page request gets wiremock's default 404
    mount_feed(&mock_server, &["a", "b", "c"]).await;

    let films = fetcher_for(&mock_server)
        .fetch_list(LIST_URL)
        .await
        .expect("List fetch failed");

    assert_eq!(slugs(&films), vec!["a", "b", "c"]);
    assert_eq!(films[0].title, "Title a (2001)");
    assert_eq!(films[0].year, "2001");
    assert_eq!(films[0].source_url, "https://letterboxd.com/film/a/");
}

#[tokio::test]
async fn test_pages_win_over_feed() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, LIST_PATH, list_page(&["a", "b"], true)).await;
    mount_html(&mock_server, &page_path(2), list_page(&["c"], false)).await;
    mount_feed(&mock_server, &["x", "y", "z"]).await;

    let films = fetcher_for(&mock_server)
        .fetch_list(LIST_URL)
        .await
        .expect("List fetch failed");

    assert_eq!(slugs(&films), vec!["a", "b", "c"]);
    assert!(films.iter().all(|f| !["x", "y", "z"].contains(&f.slug.as_str())));
    assert!(films.iter().all(|f| f.year.is_empty()));
}

#[tokio::test]
async fn test_duplicates_across_pages_are_dropped() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, LIST_PATH, list_page(&["a", "b"], true)).await;
    mount_html(&mock_server, &page_path(2), list_page(&["b", "c", "a"], false)).await;

    let films = fetcher_for(&mock_server)
        .fetch_list(LIST_URL)
        .await
        .expect("List fetch failed");

    assert_eq!(slugs(&films), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_duplicates_in_feed_are_dropped() {
    let mock_server = MockServer::start().await;

    mount_feed(&mock_server, &["a", "b", "a", "c", "b"]).await;

    let films = fetcher_for(&mock_server)
        .fetch_list(LIST_URL)
        .await
        .expect("List fetch failed");

    assert_eq!(slugs(&films), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_empty_page_ends_walk_despite_next_link() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, LIST_PATH, list_page(&["a"], true)).await;
    mount_html(&mock_server, &page_path(2), list_page(&[], true)).await;

    Mock::given(method("GET"))
        .and(path(page_path(3)))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(&["z"], false)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let films = fetcher_for(&mock_server)
        .fetch_list(LIST_URL)
        .await
        .expect("List fetch failed");

    assert_eq!(slugs(&films), vec!["a"]);
}

#[tokio::test]
async fn test_two_consecutive_page_failures_keep_first_page() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, LIST_PATH, list_page(&["a", "b"], true)).await;

    // Three attempts per failing page
    for page in [2, 3] {
        Mock::given(method("GET"))
            .and(path(page_path(page)))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(page_path(4)))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(&["d"], false)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let films = fetcher_for(&mock_server)
        .fetch_list(LIST_URL)
        .await
        .expect("List fetch failed");

    assert_eq!(slugs(&films), vec!["a", "b"]);
}

#[tokio::test]
async fn test_single_page_failure_does_not_stop_walk() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, LIST_PATH, list_page(&["a"], true)).await;
    Mock::given(method("GET"))
        .and(path(page_path(2)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, &page_path(3), list_page(&["c"], false)).await;

    let films = fetcher_for(&mock_server)
        .fetch_list(LIST_URL)
        .await
        .expect("List fetch failed");

    assert_eq!(slugs(&films), vec!["a", "c"]);
}

#[tokio::test]
async fn test_page_requests_ask_for_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(header("accept", "text/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(&["a"], false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let films = fetcher_for(&mock_server)
        .fetch_list(LIST_URL)
        .await
        .expect("List fetch failed");

    assert_eq!(slugs(&films), vec!["a"]);
}

#[tokio::test]
async fn test_malformed_input_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let fetcher = fetcher_for(&mock_server);

    let response = fetcher.respond("not-a-url").await;

    assert_eq!(response.status, 400);
    assert!(matches!(response.body, ResponseBody::Error(_)));

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_both_sources_empty_is_404() {
    let mock_server = MockServer::start().await;

    // Nothing mounted: feed and pages both 404
    let fetcher = fetcher_for(&mock_server);

    let err = fetcher.fetch_list(LIST_URL).await.unwrap_err();
    assert!(matches!(err, ListError::EmptyResult));

    let response = fetcher.respond(LIST_URL).await;
    assert_eq!(response.status, 404);
    let json: serde_json::Value =
        serde_json::from_str(&response.to_json().unwrap()).expect("Valid JSON");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_html_error_page_in_place_of_feed_is_ignored() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        FEED_PATH,
        "<!DOCTYPE html><html><body>Sorry, we can't find the page</body></html>".to_string(),
    )
    .await;

    let response = fetcher_for(&mock_server).respond(LIST_URL).await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_success_response_body() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, LIST_PATH, list_page(&["heat", "alien"], false)).await;

    let response = fetcher_for(&mock_server).respond(LIST_URL).await;
    assert_eq!(response.status, 200);

    let json: serde_json::Value =
        serde_json::from_str(&response.to_json().unwrap()).expect("Valid JSON");
    assert_eq!(json["films"][0]["slug"], "heat");
    assert_eq!(json["films"][0]["sourceUrl"], "https://letterboxd.com/film/heat/");
    assert_eq!(json["films"][1]["title"], "Title alien");
}

#[tokio::test]
async fn test_equivalent_urls_hit_same_endpoints() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, LIST_PATH, list_page(&["a"], false)).await;

    let fetcher = fetcher_for(&mock_server);
    for input in [
        "https://LETTERBOXD.com/alice/list/favorites",
        "http://www.letterboxd.com/alice/list/favorites/",
        "letterboxd.com/alice/list/favorites/page/2/",
    ] {
        let films = fetcher.fetch_list(input).await.expect("List fetch failed");
        assert_eq!(slugs(&films), vec!["a"], "input {}", input);
    }
}
