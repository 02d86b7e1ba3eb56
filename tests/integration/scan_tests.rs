//! Integration tests for full scans
//!
//! These tests serve pages from wiremock mock servers and run the scanner end-to-end:
//! link set building, verification, result shaping and stored scan jobs.

use link_auditor::config::{parse_config, ClientConfig};
use link_auditor::model::{FieldValue, LinkType, Page, PageStatus};
use link_auditor::scan::{LinkMode, ScanJob, ScanOptions, ScanResults, Scanner};
use link_auditor::source::{ContentSource, ManifestSource, PageFilter, SiteRegistry};
use link_auditor::storage::{JobState, ScanStore, SqliteScanStore};
use link_auditor::url::SiteHosts;
use link_auditor::verify::Verifier;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a home page linking to an internal page, a missing page, an ignored page and
/// an external page (the same server reached through `localhost`)
async fn mount_site(mock_server: &MockServer) {
    let port = mock_server.address().port();
    let html = format!(
        r#"<html><body>
            <a href="/about">About</a>
            <a href="/missing">Missing</a>
            <a href="/private/secret">Secret</a>
            <a href="about">About again</a>
            <a href="mailto:team@example.com">Mail</a>
            <a href="http://localhost:{}/partner">Partner</a>
        </body></html>"#,
        port
    );

    Mock::given(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(mock_server)
        .await;

    Mock::given(path("/about"))
        .respond_with(ResponseTemplate::new(200))
        .mount(mock_server)
        .await;

    Mock::given(path("/partner"))
        .respond_with(ResponseTemplate::new(200))
        .mount(mock_server)
        .await;

    Mock::given(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(mock_server)
        .await;
}

fn scanner(base_url: &str) -> Scanner {
    let verifier = Verifier::new(&ClientConfig::default()).expect("Failed to build verifier");
    Scanner::new(verifier, SiteHosts::from_base_urls([base_url]))
}

fn home_page(base_url: &str) -> Page {
    Page {
        id: "1".to_string(),
        title: "Home".to_string(),
        url: format!("{}/", base_url),
        status: PageStatus::Live,
        site_label: "Default".to_string(),
        edit_url: Some(format!("{}/admin/entries/1", base_url)),
        section: Some("pages".to_string()),
        entry_type: None,
        fields: FieldValue::Null,
    }
}

fn options(mode: LinkMode) -> ScanOptions {
    ScanOptions {
        link_mode: mode,
        ignore_patterns: vec!["/PRIVATE/".to_string()],
        ..ScanOptions::default()
    }
}

#[tokio::test]
async fn test_live_page_scan_both_modes() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();
    let port = mock_server.address().port();

    let results = scanner(&base_url)
        .scan(&[home_page(&base_url)], &options(LinkMode::Both))
        .await;

    let ScanResults::Grouped(pages) = results else {
        panic!("expected grouped results");
    };
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].page.title, "Home");

    let links = &pages[0].links;
    let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
    let partner = format!("http://localhost:{}/partner", port);
    assert_eq!(
        urls,
        vec![
            format!("{}/", base_url).as_str(),
            format!("{}/about", base_url).as_str(),
            format!("{}/missing", base_url).as_str(),
            partner.as_str(),
        ]
    );

    // Entry URL
    assert_eq!(links[0].link_type, LinkType::Internal);
    assert!(links[0].ok);

    assert_eq!(links[1].link_type, LinkType::Internal);
    assert_eq!(links[1].status_code, Some(200));
    assert!(links[1].ok);

    assert_eq!(links[2].status_code, Some(404));
    assert!(!links[2].ok);
    assert_eq!(links[2].message, "Not Found");

    assert_eq!(links[3].link_type, LinkType::External);
    assert!(links[3].ok);

    assert!(links.iter().all(|l| l.source_entity_id == "1"));
    assert_eq!(pages[0].broken_count(), 1);
}

#[tokio::test]
async fn test_internal_mode_drops_external_links() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let results = scanner(&base_url)
        .scan(&[home_page(&base_url)], &options(LinkMode::Internal))
        .await;

    let ScanResults::Grouped(pages) = results else {
        panic!("expected grouped results");
    };
    assert_eq!(pages[0].links.len(), 3);
    assert!(pages[0]
        .links
        .iter()
        .all(|l| l.link_type == LinkType::Internal));
}

#[tokio::test]
async fn test_external_mode_flat_results() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();
    let port = mock_server.address().port();

    let results = scanner(&base_url)
        .scan(&[home_page(&base_url)], &options(LinkMode::External))
        .await;

    let ScanResults::Flat(links) = results else {
        panic!("expected flat results");
    };
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].link.url, format!("http://localhost:{}/partner", port));
    assert_eq!(links[0].link.link_type, LinkType::External);
    assert!(links[0].link.ok);
    assert_eq!(links[0].found_on, "Home");
    assert_eq!(
        links[0].found_on_url,
        Some(format!("{}/admin/entries/1", base_url))
    );
}

#[tokio::test]
async fn test_unreachable_page_contributes_entry_url_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let page = Page {
        url: format!("{}/down", base_url),
        ..home_page(&base_url)
    };
    let result = scanner(&base_url)
        .scan_page(&page, &ScanOptions::default())
        .await;

    assert_eq!(result.links.len(), 1);
    assert_eq!(result.links[0].status_code, Some(503));
    assert!(!result.links[0].ok);
}

#[tokio::test]
async fn test_page_fetch_transport_failure_contributes_entry_url_only() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let base_url = format!("http://127.0.0.1:{}", port);

    let result = scanner(&base_url)
        .scan_page(&home_page(&base_url), &ScanOptions::default())
        .await;

    assert_eq!(result.links.len(), 1);
    let entry = &result.links[0];
    assert_eq!(entry.url, format!("{}/", base_url));
    assert_eq!(entry.link_type, LinkType::Internal);
    assert_eq!(entry.status_code, None);
    assert!(!entry.ok);
    assert_eq!(entry.message, "Could not connect to server");
}

#[tokio::test]
async fn test_non_live_page_uses_field_content() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    // A draft is never fetched
    Mock::given(method("GET"))
        .and(path("/draft"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fields = FieldValue::map([
        (
            "body",
            FieldValue::text(format!(
                "Read <a href=\"{}/about\">this</a> and {}/missing today",
                base_url, base_url
            )),
        ),
        (
            "blocks",
            FieldValue::List(vec![FieldValue::map([(
                "download",
                FieldValue::text(format!("{}/files/guide.pdf", base_url)),
            )])]),
        ),
    ]);
    let page = Page {
        id: "7".to_string(),
        url: format!("{}/draft", base_url),
        status: PageStatus::Draft,
        fields,
        ..home_page(&base_url)
    };

    let result = scanner(&base_url)
        .scan_page(&page, &ScanOptions::default())
        .await;

    let urls: Vec<&str> = result.links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/about", base_url).as_str(),
            format!("{}/missing", base_url).as_str(),
        ]
    );
    assert!(result.links[0].ok);
    assert_eq!(result.links[1].status_code, Some(404));
    assert!(result.links.iter().all(|l| l.source_entity_id == "7"));
}

#[tokio::test]
async fn test_scan_job_stores_results() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let manifest = format!(
        r#"
[[page]]
id = "1"
title = "Home"
url = "{base}/"

[[page]]
id = "2"
title = "Old draft"
url = "{base}/draft"
status = "draft"

[[page]]
id = "3"
title = "Menu placeholder"
"#,
        base = base_url
    );
    let source = ManifestSource::parse(&manifest).unwrap();
    assert_eq!(source.len(), 2);

    let mut store = SqliteScanStore::in_memory(3600).unwrap();
    let job = ScanJob::new("alice", PageFilter::default(), options(LinkMode::Both))
        .with_config_hash("cafebabe");

    job.queue(&mut store).unwrap();
    assert_eq!(
        store.get_status("alice").unwrap().unwrap().state,
        JobState::Queued
    );

    let stored = job
        .run(&scanner(&base_url), &source, &mut store)
        .await
        .unwrap();

    // Only the live page passes the default filter
    let ScanResults::Grouped(pages) = &stored.results else {
        panic!("expected grouped results");
    };
    assert_eq!(pages.len(), 1);
    assert_eq!(stored.results.link_count(), 4);
    assert_eq!(stored.results.broken_count(), 1);

    let status = store.get_status("alice").unwrap().unwrap();
    assert_eq!(status.state, JobState::Completed);
    assert_eq!(status.progress, 1.0);
    assert!(status.scanned_at.is_some());

    let loaded = store.get_results("alice").unwrap().unwrap();
    assert_eq!(loaded.results, stored.results);
    assert_eq!(loaded.config_hash.as_deref(), Some("cafebabe"));

    // Other owners see nothing
    assert!(store.get_results("bob").unwrap().is_none());
}

#[tokio::test]
async fn test_config_sites_mark_links_internal() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();
    let port = mock_server.address().port();

    // Listing the localhost alias as a site makes the partner link internal
    let config = parse_config(&format!(
        r#"
[[site]]
label = "Default"
base-url = "{}/"

[[site]]
label = "Partner"
base-url = "http://localhost:{}/"
"#,
        base_url, port
    ))
    .unwrap();

    let verifier = Verifier::new(&config.client).unwrap();
    let scanner = Scanner::new(verifier, config.list_site_hosts());
    let source = ManifestSource::from_pages(vec![home_page(&base_url)]);
    let pages = source.list_scannable_pages(&PageFilter::default()).unwrap();

    let results = scanner.scan(&pages, &options(LinkMode::Internal)).await;

    assert_eq!(results.link_count(), 4);
    assert!(results
        .found_links()
        .iter()
        .all(|found| found.link.link_type == LinkType::Internal));
}
