// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dealerscope_ingest::engines::allowlist::HostAllowList;
use dealerscope_ingest::engines::fetch_guard::{GuardedFetcher, MAX_REDIRECT_HOPS};
use dealerscope_ingest::engines::traits::{FetchError, OutboundFetcher};

/// Guard pointed at the loopback mock server; membership checks stay active.
fn loopback_fetcher(timeout: Duration, max_body_bytes: usize) -> GuardedFetcher {
    let allowlist = HostAllowList::new(["127.0.0.1"]).permit_private_hosts();
    GuardedFetcher::with_limits(allowlist, timeout, max_body_bytes).unwrap()
}

fn default_loopback_fetcher() -> GuardedFetcher {
    loopback_fetcher(Duration::from_secs(5), 5_000_000)
}

#[tokio::test]
async fn test_fetch_returns_body_status_and_byte_count() {
    let server = MockServer::start().await;
    let body = "<html>2019 Ford pickup truck</html>";
    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let outcome = default_loopback_fetcher()
        .fetch(&format!("{}/listings", server.uri()))
        .await
        .unwrap();

    assert_eq!(outcome.status_code, 200);
    assert_eq!(outcome.body, body);
    assert_eq!(outcome.bytes_read, body.len());
}

#[tokio::test]
async fn test_redirect_to_disallowed_host_is_rejected_without_exposing_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/away"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "http://10.0.0.8/secret"),
        )
        .mount(&server)
        .await;

    let err = default_loopback_fetcher()
        .fetch(&format!("{}/away", server.uri()))
        .await
        .unwrap_err();

    match err {
        FetchError::RedirectNotAllowed(host) => assert_eq!(host, "10.0.0.8"),
        other => panic!("expected RedirectNotAllowed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_same_host_redirects_are_followed_with_revalidation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/end"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/end"))
        .respond_with(ResponseTemplate::new(200).set_body_string("arrived"))
        .mount(&server)
        .await;

    let outcome = default_loopback_fetcher()
        .fetch(&format!("{}/start", server.uri()))
        .await
        .unwrap();

    assert_eq!(outcome.status_code, 200);
    assert_eq!(outcome.body, "arrived");
}

#[tokio::test]
async fn test_redirect_loop_exhausts_the_hop_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&server)
        .await;

    let err = default_loopback_fetcher()
        .fetch(&format!("{}/loop", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::TooManyRedirects(limit) if limit == MAX_REDIRECT_HOPS));
}

#[tokio::test]
async fn test_redirect_without_location_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nowhere"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let err = default_loopback_fetcher()
        .fetch(&format!("{}/nowhere", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::MissingRedirectLocation));
}

#[tokio::test]
async fn test_oversize_body_aborts_while_streaming() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/huge"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'x'; 64 * 1024]))
        .mount(&server)
        .await;

    let err = loopback_fetcher(Duration::from_secs(5), 4096)
        .fetch(&format!("{}/huge", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::BodyTooLarge { limit: 4096 }));
}

#[tokio::test]
async fn test_slow_response_hits_the_shared_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = loopback_fetcher(Duration::from_millis(250), 5_000_000)
        .fetch(&format!("{}/slow", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout));
}

#[tokio::test]
async fn test_private_host_blocked_even_when_listed_without_the_test_override() {
    // Same membership set, but without permit_private_hosts: the private
    // pattern check takes precedence and no request is ever issued.
    let fetcher =
        GuardedFetcher::with_limits(HostAllowList::new(["127.0.0.1"]), Duration::from_secs(1), 1024)
            .unwrap();

    let err = fetcher.fetch("http://127.0.0.1/internal").await.unwrap_err();
    assert!(matches!(err, FetchError::HostNotAllowed(_)));
    assert!(err.to_string().contains("Host not allowed"));
}
