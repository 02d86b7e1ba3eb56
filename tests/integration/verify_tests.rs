//! Integration tests for link verification
//!
//! These tests use wiremock to create mock HTTP servers and check status handling,
//! redirect chains, failure categories and pool concurrency end-to-end.

use link_auditor::config::ClientConfig;
use link_auditor::verify::{check_urls_concurrently, FailureKind, Verifier};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn verifier() -> Verifier {
    Verifier::new(&ClientConfig::default()).expect("Failed to build verifier")
}

/// A local URL nothing is listening on
fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn verifier_with_timeout(secs: u64) -> Verifier {
    let config = ClientConfig {
        timeout_secs: secs,
        connect_timeout_secs: secs,
        ..ClientConfig::default()
    };
    Verifier::new(&config).expect("Failed to build verifier")
}

#[tokio::test]
async fn test_ok_and_not_found() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let verifier = verifier();

    let ok = verifier.get(&format!("{}/ok", base_url)).await;
    assert_eq!(ok.status_code, Some(200));
    assert!(ok.ok);
    assert_eq!(ok.message, "OK");
    assert!(!ok.redirect_info.has_redirects);
    assert_eq!(ok.redirect_info.final_url, format!("{}/ok", base_url));

    let missing = verifier.get(&format!("{}/missing", base_url)).await;
    assert_eq!(missing.status_code, Some(404));
    assert!(!missing.ok);
    assert_eq!(missing.message, "Not Found");
    assert!(missing.failure.is_none());
}

#[tokio::test]
async fn test_redirect_chain_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/b", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;

    // Relative Location resolves against the current hop
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/c"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let outcome = verifier().get(&format!("{}/a", base_url)).await;

    assert_eq!(outcome.status_code, Some(200));
    assert!(outcome.ok);
    let info = &outcome.redirect_info;
    assert!(info.has_redirects);
    assert_eq!(info.redirect_count, 2);
    assert_eq!(info.status_codes, vec![301, 302]);
    assert_eq!(
        info.urls,
        vec![format!("{}/b", base_url), format!("{}/c", base_url)]
    );
    assert_eq!(info.final_url, format!("{}/c", base_url));
}

#[tokio::test]
async fn test_redirect_to_broken_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(308).insert_header("location", "/gone"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let outcome = verifier().get(&format!("{}/moved", base_url)).await;

    assert_eq!(outcome.status_code, Some(410));
    assert!(!outcome.ok);
    assert_eq!(outcome.redirect_info.redirect_count, 1);
    assert_eq!(outcome.redirect_info.final_url, format!("{}/gone", base_url));
}

#[tokio::test]
async fn test_too_many_redirects() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/loop"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/loop", base_url);
    let outcome = verifier().get(&url).await;

    assert_eq!(outcome.status_code, None);
    assert!(!outcome.ok);
    assert_eq!(
        outcome.message,
        "Network error: Will not follow more than 5 redirects"
    );
    assert!(matches!(outcome.failure, Some(FailureKind::Network(_))));
    assert_eq!(outcome.redirect_info.final_url, url);
    assert!(!outcome.redirect_info.has_redirects);
}

#[tokio::test]
async fn test_head_falls_back_to_get() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = verifier().check_url(&format!("{}/no-head", base_url)).await;

    assert_eq!(outcome.status_code, Some(200));
    assert!(outcome.ok);
}

#[tokio::test]
async fn test_head_success_skips_get() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = verifier().check_url(&format!("{}/page", base_url)).await;
    assert!(outcome.ok);
}

#[tokio::test]
async fn test_head_server_error_not_retried() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = verifier().check_url(&format!("{}/broken", base_url)).await;
    assert_eq!(outcome.status_code, Some(500));
    assert!(!outcome.ok);
    assert_eq!(outcome.message, "Internal Server Error");
}

#[tokio::test]
async fn test_timeout_category() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let url = format!("{}/slow", base_url);
    let outcome = verifier_with_timeout(1).get(&url).await;

    assert_eq!(outcome.status_code, None);
    assert!(!outcome.ok);
    assert_eq!(outcome.failure, Some(FailureKind::Timeout));
    assert_eq!(outcome.message, "Connection timed out");
    assert_eq!(outcome.redirect_info.final_url, url);
}

#[tokio::test]
async fn test_connection_refused_category() {
    let outcome = verifier().get(&refused_url()).await;

    assert_eq!(outcome.status_code, None);
    assert_eq!(outcome.failure, Some(FailureKind::ConnectionRefused));
    assert_eq!(outcome.message, "Could not connect to server");
}

#[tokio::test]
async fn test_dns_failure_category() {
    let outcome = verifier().get("http://link-auditor-test.invalid/").await;

    assert_eq!(outcome.status_code, None);
    assert_eq!(outcome.failure, Some(FailureKind::Dns));
    assert_eq!(outcome.message, "Domain could not be resolved (DNS error)");
}

#[tokio::test]
async fn test_fetch_html() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>hi</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/old-page"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/page"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&mock_server)
        .await;

    let verifier = verifier();

    let html = verifier.fetch_html(&format!("{}/page", base_url)).await;
    assert_eq!(html.as_deref(), Some("<html><body>hi</body></html>"));

    let html = verifier.fetch_html(&format!("{}/old-page", base_url)).await;
    assert_eq!(html.as_deref(), Some("<html><body>hi</body></html>"));

    assert!(verifier.fetch_html(&format!("{}/error", base_url)).await.is_none());
}

#[tokio::test]
async fn test_pool_one_outcome_per_distinct_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let ok = format!("{}/ok", base_url);
    let missing = format!("{}/missing", base_url);
    let urls = vec![ok.clone(), missing.clone(), ok.clone()];

    let outcomes = check_urls_concurrently(&verifier(), &urls, 10).await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[&ok].ok);
    assert_eq!(outcomes[&missing].status_code, Some(404));
}

#[tokio::test]
async fn test_pool_empty_input() {
    let outcomes = check_urls_concurrently(&verifier(), &[], 10).await;
    assert!(outcomes.is_empty());
}

#[tokio::test]
async fn test_pool_respects_concurrency_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..6).map(|i| format!("{}/slow/{}", base_url, i)).collect();

    // Six requests, two at a time: at least three rounds of 300ms
    let started = Instant::now();
    let outcomes = check_urls_concurrently(&verifier(), &urls, 2).await;
    let elapsed = started.elapsed();

    assert_eq!(outcomes.len(), 6);
    assert!(outcomes.values().all(|o| o.ok));
    assert!(
        elapsed >= Duration::from_millis(850),
        "finished too fast for concurrency 2: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_pool_clamps_zero_concurrency() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..2).map(|i| format!("{}/p/{}", base_url, i)).collect();

    let started = Instant::now();
    let outcomes = check_urls_concurrently(&verifier(), &urls, 0).await;

    assert_eq!(outcomes.len(), 2);
    assert!(started.elapsed() >= Duration::from_millis(390));
}

#[tokio::test]
async fn test_pool_failures_stay_inside_batch() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let slow = format!("{}/slow", base_url);
    let ok = format!("{}/ok", base_url);
    let refused = refused_url();
    let urls = vec![slow.clone(), refused.clone(), ok.clone()];

    let outcomes = check_urls_concurrently(&verifier_with_timeout(1), &urls, 3).await;

    assert_eq!(outcomes.len(), 3);

    let timed_out = &outcomes[&slow];
    assert_eq!(timed_out.status_code, None);
    assert!(!timed_out.ok);
    assert_eq!(timed_out.failure, Some(FailureKind::Timeout));
    assert_eq!(timed_out.message, "Connection timed out");
    assert_eq!(timed_out.redirect_info.final_url, slow);

    let unreachable = &outcomes[&refused];
    assert_eq!(unreachable.status_code, None);
    assert_eq!(unreachable.failure, Some(FailureKind::ConnectionRefused));
    assert_eq!(unreachable.message, "Could not connect to server");

    assert_eq!(outcomes[&ok].status_code, Some(200));
    assert!(outcomes[&ok].ok);
}
