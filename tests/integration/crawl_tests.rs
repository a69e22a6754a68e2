//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch, extract and crawl cycle end-to-end.

use reconcrawl::config::CrawlConfig;
use reconcrawl::crawler::{crawl, crawl_all, Coordinator};
use reconcrawl::{CrawlPhase, CrawlStatus, ReconError};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration without politeness delay
fn create_test_config(seed: &str) -> CrawlConfig {
    CrawlConfig::new(seed)
        .with_delay(Duration::ZERO)
        .with_timeout(Duration::from_secs(5))
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>Test</title></head><body>{}</body></html>",
            body
        ),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html(body))
        .mount(server)
        .await;
}

async fn mount_unvisited(server: &MockServer, page: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html("should not be fetched"))
        .expect(0) // Should never be called
        .mount(server)
        .await;
}

fn values(items: Vec<&reconcrawl::TrackingItem>) -> Vec<String> {
    items.into_iter().map(|item| item.value.clone()).collect()
}

#[tokio::test]
async fn test_redirected_seed_single_page() {
    // Seed server redirects to a second origin, like example.com -> www.example.com
    let seed_server = MockServer::start().await;
    let final_server = MockServer::start().await;
    let final_url = format!("{}/", final_server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", final_url.as_str()))
        .expect(1)
        .mount(&seed_server)
        .await;

    mount_page(
        &final_server,
        "/",
        r#"<p>Write to contact@example.com</p>
           <a href="mailto:support@example.com">Email support</a>
           <p>or call +1 (555) 123-4567</p>
           <a href="/about">About</a>"#,
    )
    .await;
    mount_unvisited(&final_server, "/about").await;

    let report = crawl(create_test_config(&seed_server.uri()))
        .await
        .expect("Crawl failed");

    assert_eq!(report.final_url(), final_url);
    assert_eq!(
        values(report.emails()),
        vec!["contact@example.com", "support@example.com"]
    );
    assert_eq!(values(report.phones()), vec!["+1-555-123-4567"]);
    assert_eq!(report.pages_fetched(), 1);
    assert_eq!(report.status(), CrawlStatus::Completed);
    assert!(report
        .findings()
        .iter()
        .all(|item| item.source_url.as_deref() == Some(final_url.as_str())));
}

#[tokio::test]
async fn test_recursive_crawl_collects_from_all_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<p>Main office: info@example.com</p>
           <a href="/contact">Contact</a>
           <a href="/about">About</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/contact",
        r#"<p>Sales: sales@example.com, 555.123.4567</p><a href="/">Home</a>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/about",
        r#"<p>Reach sales@example.com or (555) 987-6543</p>"#,
    )
    .await;

    let config = create_test_config(&base_url).with_recursive(true);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 3);
    assert_eq!(report.pages_failed(), 0);
    assert_eq!(
        values(report.emails()),
        vec!["info@example.com", "sales@example.com"]
    );
    assert_eq!(
        values(report.phones()),
        vec!["+1-555-123-4567", "+1-555-987-6543"]
    );

    // First sighting wins
    let sales = report
        .emails()
        .into_iter()
        .find(|item| item.value == "sales@example.com")
        .expect("sales email missing");
    assert_eq!(
        sales.source_url.as_deref(),
        Some(format!("{}/contact", base_url).as_str())
    );
}

#[tokio::test]
async fn test_non_recursive_fetches_only_seed() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/other">Other</a>"#).await;
    mount_unvisited(&mock_server, "/other").await;

    let report = crawl(create_test_config(&mock_server.uri()))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 1);
    assert!(report.findings().is_empty());
}

#[tokio::test]
async fn test_max_pages_budget() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/p1">1</a><a href="/p2">2</a><a href="/p3">3</a>
           <a href="/p4">4</a><a href="/p5">5</a>"#,
    )
    .await;
    mount_page(&mock_server, "/p1", "one").await;
    mount_page(&mock_server, "/p2", "two").await;

    // Breadth-first: the budget of 3 is spent on the seed, p1 and p2
    for page in ["/p3", "/p4", "/p5"] {
        mount_unvisited(&mock_server, page).await;
    }

    let config = create_test_config(&mock_server.uri())
        .with_recursive(true)
        .with_max_pages(3);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 3);
}

#[tokio::test]
async fn test_failed_fetches_spend_page_budget() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/bad1">1</a><a href="/bad2">2</a><a href="/bad3">3</a>
           <a href="/bad4">4</a><a href="/ok">ok</a>"#,
    )
    .await;
    for page in ["/bad1", "/bad2"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    // Seed plus two failures use up a budget of 3
    for page in ["/bad3", "/bad4", "/ok"] {
        mount_unvisited(&mock_server, page).await;
    }

    let config = create_test_config(&mock_server.uri())
        .with_recursive(true)
        .with_max_pages(3);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 1);
    assert_eq!(report.pages_failed(), 2);
}

#[tokio::test]
async fn test_max_pages_one_fetches_only_seed() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/p1">1</a>"#).await;
    mount_unvisited(&mock_server, "/p1").await;

    let config = create_test_config(&mock_server.uri())
        .with_recursive(true)
        .with_max_pages(1);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 1);
}

#[tokio::test]
async fn test_seed_http_error_fails_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut coordinator = Coordinator::new(create_test_config(&mock_server.uri()));
    let err = coordinator.run().await.unwrap_err();

    assert!(matches!(err, ReconError::Http { status: 500, .. }));
    assert_eq!(err.kind(), "http");
    assert_eq!(coordinator.phase(), CrawlPhase::Failed);
}

#[tokio::test]
async fn test_seed_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("slow").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri()).with_timeout(Duration::from_millis(300));
    let err = crawl(config).await.unwrap_err();

    assert!(matches!(err, ReconError::Timeout { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/ok">Ok</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "found@example.com").await;

    let config = create_test_config(&mock_server.uri()).with_recursive(true);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 2);
    assert_eq!(report.pages_failed(), 1);
    assert_eq!(values(report.emails()), vec!["found@example.com"]);
}

#[tokio::test]
async fn test_cross_origin_links_not_followed() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<a href="{}/elsewhere">Elsewhere</a><a href="/local">Local</a>"#,
            other_server.uri()
        ),
    )
    .await;
    mount_page(&mock_server, "/local", "local").await;
    mount_unvisited(&other_server, "/elsewhere").await;

    let config = create_test_config(&mock_server.uri()).with_recursive(true);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 2);
}

#[tokio::test]
async fn test_url_variants_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r##"<a href="/a">1</a><a href="/a/">2</a><a href="/a#team">3</a>
                <a href="/">home</a><a href="#top">top</a>"##,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/a/?$"))
        .respond_with(html(r#"<a href="/">home</a><a href="/a">self</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri()).with_recursive(true);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 2);
}

#[tokio::test]
async fn test_redirected_page_not_fetched_again() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/old">Old</a><a href="/new">New</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html("new@example.com"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri()).with_recursive(true);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 2);
    assert_eq!(values(report.emails()), vec!["new@example.com"]);
}

#[tokio::test]
async fn test_redirect_loop() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/loop"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
        .mount(&mock_server)
        .await;

    let err = crawl(create_test_config(&mock_server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, ReconError::RedirectLoop { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_redirect_chain_too_long() {
    let mock_server = MockServer::start().await;

    for hop in 0..12 {
        let next = format!("/r/{}", hop + 1);
        Mock::given(method("GET"))
            .and(path(format!("/r/{}", hop)))
            .respond_with(ResponseTemplate::new(301).insert_header("location", next.as_str()))
            .mount(&mock_server)
            .await;
    }

    let seed = format!("{}/r/0", mock_server.uri());
    let err = crawl(create_test_config(&seed)).await.unwrap_err();
    assert!(matches!(err, ReconError::RedirectLoop { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_redirect_chain_within_limit() {
    let mock_server = MockServer::start().await;

    for hop in 0..10 {
        let next = format!("/r/{}", hop + 1);
        Mock::given(method("GET"))
            .and(path(format!("/r/{}", hop)))
            .respond_with(ResponseTemplate::new(302).insert_header("location", next.as_str()))
            .mount(&mock_server)
            .await;
    }
    mount_page(&mock_server, "/r/10", "end@example.com").await;

    let seed = format!("{}/r/0", mock_server.uri());
    let report = crawl(create_test_config(&seed)).await.expect("Crawl failed");
    assert_eq!(report.final_url(), format!("{}/r/10", mock_server.uri()));
}

#[tokio::test]
async fn test_redirect_without_location_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&mock_server)
        .await;

    let err = crawl(create_test_config(&mock_server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(302));
}

#[tokio::test]
async fn test_non_html_counted_but_not_scanned() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/api">API</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"email": "json@example.com"}"#, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri()).with_recursive(true);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 2);
    assert!(report.findings().is_empty());
}

#[tokio::test]
async fn test_assets_and_excluded_links_not_followed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/brochure.pdf">PDF</a><a href="/logo.png">Logo</a>
           <a href="/account/logout">Log out</a><a href="/team">Team</a>"#,
    )
    .await;
    mount_page(&mock_server, "/team", "team@example.com").await;
    mount_unvisited(&mock_server, "/brochure.pdf").await;
    mount_unvisited(&mock_server, "/logo.png").await;
    mount_unvisited(&mock_server, "/account/logout").await;

    let config = create_test_config(&mock_server.uri())
        .with_recursive(true)
        .with_exclude_patterns(vec!["logout".to_string()]);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 2);
    assert_eq!(values(report.emails()), vec!["team@example.com"]);
}

#[tokio::test]
async fn test_account_pages_skipped_with_default_config() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/Login">Sign in</a><a href="/signup">Join</a>
           <a href="/wp-admin/">Admin</a><a href="/about">About</a>"#,
    )
    .await;
    mount_page(&mock_server, "/about", "about@example.com").await;
    for page in ["/Login", "/signup", "/wp-admin/"] {
        mount_unvisited(&mock_server, page).await;
    }

    let config = create_test_config(&mock_server.uri()).with_recursive(true);
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 2);
    assert_eq!(values(report.emails()), vec!["about@example.com"]);
}

#[tokio::test]
async fn test_politeness_delay_between_fetches() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/p1">1</a><a href="/p2">2</a>"#,
    )
    .await;
    mount_page(&mock_server, "/p1", "one").await;
    mount_page(&mock_server, "/p2", "two").await;

    let config = create_test_config(&mock_server.uri())
        .with_recursive(true)
        .with_delay(Duration::from_millis(200));

    let start = Instant::now();
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched(), 3);
    // Two waits: before p1 and before p2
    assert!(start.elapsed() >= Duration::from_millis(380));
}

#[tokio::test]
async fn test_cancel_before_seed_resolves() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("slow").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let mut coordinator =
        Coordinator::new(create_test_config(&mock_server.uri())).with_cancellation(cancel);
    let err = coordinator.run().await.unwrap_err();

    assert!(matches!(err, ReconError::Cancelled));
    assert_eq!(coordinator.phase(), CrawlPhase::Cancelled);
}

#[tokio::test]
async fn test_cancel_mid_crawl_keeps_partial_results() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<p>seed@example.com</p><a href="/slow">Slow</a><a href="/later">Later</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("slow@example.com").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;
    mount_unvisited(&mock_server, "/later").await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let config = create_test_config(&mock_server.uri()).with_recursive(true);
    let mut coordinator = Coordinator::new(config).with_cancellation(cancel);
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.status(), CrawlStatus::Cancelled);
    assert_eq!(coordinator.phase(), CrawlPhase::Cancelled);
    assert_eq!(report.pages_fetched(), 1);
    assert_eq!(values(report.emails()), vec!["seed@example.com"]);
}

#[tokio::test]
async fn test_crawl_all_preserves_seed_order() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    let broken = MockServer::start().await;

    mount_page(&first, "/", "first@example.com").await;
    mount_page(&second, "/", "second@example.com").await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&broken)
        .await;

    let configs = vec![
        create_test_config(&second.uri()),
        create_test_config(&broken.uri()),
        create_test_config(&first.uri()),
    ];
    let results = crawl_all(configs, 2, CancellationToken::new()).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, second.uri());
    assert_eq!(results[1].0, broken.uri());
    assert_eq!(results[2].0, first.uri());

    let second_report = results[0].1.as_ref().expect("second crawl failed");
    assert_eq!(values(second_report.emails()), vec!["second@example.com"]);
    assert!(matches!(
        results[1].1,
        Err(ReconError::Http { status: 503, .. })
    ));
    assert!(results[2].1.is_ok());
}
