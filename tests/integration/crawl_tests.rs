//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end through the reqwest-backed fetcher.

use sitegrep::config::{Config, CrawlerConfig, UserAgentConfig};
use sitegrep::crawler::{crawl, CrawlFailure, CrawlOutcome, FetchError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn create_test_config(max_depth: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth,
            request_timeout_secs: 1,
            connect_timeout_secs: 1,
            ..CrawlerConfig::default()
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: Some("https://example.com/contact".to_string()),
        },
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0 (+https://example.com/contact)"))
        .respond_with(html(&format!(
            r#"<h1>Home</h1>
            <a href="{}/page1">Page 1</a>
            <a href="/page2">Page 2</a>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/page1", "Content one with a Keyword").await;
    mount_page(&mock_server, "/page2", "Content two").await;

    let config = create_test_config(2);
    let (crawler, report) = crawl(&config, &base_url, &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    assert_eq!(report.outcome, CrawlOutcome::Completed);
    assert_eq!(report.pages_indexed, 3);
    assert!(crawler.failures().is_empty());

    let urls: Vec<&str> = crawler.index().urls().collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );

    assert_eq!(crawler.search("KEYWORD"), vec![format!("{}/page1", base_url)]);
    assert_eq!(crawler.search("content").len(), 2);
}

#[tokio::test]
async fn test_other_host_never_fetched() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;

    mount_page(
        &site,
        "/",
        &format!(r#"<a href="{}/x">Elsewhere</a>"#, other.uri()),
    )
    .await;

    Mock::given(method("GET"))
        .respond_with(html("Other"))
        .expect(0)
        .mount(&other)
        .await;

    let config = create_test_config(2);
    let (crawler, _) = crawl(&config, &site.uri(), &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    assert_eq!(crawler.index().len(), 1);
    assert_eq!(crawler.visited().len(), 1);
    assert!(crawler.failures().is_empty());
}

#[tokio::test]
async fn test_http_error_is_isolated() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">B</a><a href="/ok">C</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "Still here").await;

    let config = create_test_config(2);
    let (crawler, report) = crawl(&config, &mock_server.uri(), &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.pages_failed, 1);
    assert!(crawler.index().contains(&format!("{}/ok", mock_server.uri())));

    let (url, failure) = &crawler.failures()[0];
    assert_eq!(url, &format!("{}/missing", mock_server.uri()));
    assert_eq!(failure, &CrawlFailure::Fetch(FetchError::Status { status: 404 }));
}

#[tokio::test]
async fn test_non_text_content_rejected() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/logo.png">Logo</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, 0x50, 0x4e, 0x47], "image/png"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(1);
    let (crawler, _) = crawl(&config, &mock_server.uri(), &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    assert_eq!(crawler.index().len(), 1);
    assert!(matches!(
        &crawler.failures()[0].1,
        CrawlFailure::Fetch(FetchError::UnsupportedContent { content_type }) if content_type == "image/png"
    ));
}

#[tokio::test]
async fn test_timeout_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/slow">Slow</a><a href="/fast">Fast</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("Too late").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/fast", "Quick").await;

    let config = create_test_config(1);
    let (crawler, report) = crawl(&config, &mock_server.uri(), &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    assert_eq!(report.outcome, CrawlOutcome::Completed);
    assert_eq!(crawler.failures().len(), 1);
    assert_eq!(crawler.failures()[0].1, CrawlFailure::Fetch(FetchError::Timeout));
    assert!(crawler.index().contains(&format!("{}/fast", mock_server.uri())));
}

#[tokio::test]
async fn test_redirect_does_not_widen_scope() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;

    mount_page(&site, "/", r#"<a href="/hop">Hop</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/hop"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/landing", other.uri()).as_str()),
        )
        .mount(&site)
        .await;
    mount_page(&site, "/child", "Child on the seed host").await;

    // The landing page links to its own host and to a relative path
    mount_page(
        &other,
        "/landing",
        &format!(r#"Landing <a href="{}/elsewhere">Away</a><a href="/child">Child</a>"#, other.uri()),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(html("Should not be crawled"))
        .expect(0)
        .mount(&other)
        .await;

    let config = create_test_config(3);
    let (crawler, _) = crawl(&config, &site.uri(), &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    // Indexed under the requested URL, not the redirect target
    let hop = format!("{}/hop", site.uri());
    assert!(crawler.index().get(&hop).unwrap().contains("Landing"));
    assert!(!crawler.index().contains(&format!("{}/landing", other.uri())));

    // Relative links resolve against the seed, so /child stays on the seed host
    assert!(crawler.index().contains(&format!("{}/child", site.uri())));
    assert!(!crawler.visited().contains(&format!("{}/elsewhere", other.uri())));
}

#[tokio::test]
async fn test_unreachable_seed() {
    // Nothing listens on port 9 of localhost in the test environment
    let config = create_test_config(2);
    let (crawler, report) = crawl(&config, "http://127.0.0.1:9/", &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    assert_eq!(report.outcome, CrawlOutcome::Completed);
    assert!(crawler.index().is_empty());
    assert_eq!(crawler.visited().len(), 1);
    assert!(crawler.failures()[0].1.is_fetch());
}

#[tokio::test]
async fn test_page_limit_from_config() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#).await;
    mount_page(&mock_server, "/a", "A").await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html("B"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(2);
    config.crawler.max_pages = Some(2);
    let (crawler, report) = crawl(&config, &mock_server.uri(), &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    assert_eq!(report.outcome, CrawlOutcome::PageLimitReached);
    assert_eq!(crawler.index().len(), 2);
}

#[tokio::test]
async fn test_redirect_chain_over_limit_fails() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/r1">Hop</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/r1"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", format!("{}/r2", base_url).as_str()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r2"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", format!("{}/end", base_url).as_str()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/end"))
        .respond_with(html("End of the chain"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(1);
    config.crawler.max_redirects = 1;
    let (crawler, report) = crawl(&config, &base_url, &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    assert_eq!(report.outcome, CrawlOutcome::Completed);

    let r1 = format!("{}/r1", base_url);
    assert!(crawler.visited().contains(&r1));
    assert!(!crawler.index().contains(&r1));

    assert_eq!(crawler.failures().len(), 1);
    let (url, failure) = &crawler.failures()[0];
    assert_eq!(url, &r1);
    assert!(matches!(failure, CrawlFailure::Fetch(FetchError::Redirect(_))));
}

#[tokio::test]
async fn test_html_page_with_stray_nul_is_indexed() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "Hello keyword \u{0} world").await;

    let config = create_test_config(0);
    let (crawler, report) = crawl(&config, &mock_server.uri(), &CancellationToken::new())
        .await
        .expect("Failed to build crawler");

    assert_eq!(report.pages_indexed, 1);
    assert!(crawler.failures().is_empty());
    assert_eq!(crawler.search("keyword"), vec![format!("{}/", mock_server.uri())]);
}
