//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use std::time::Duration;
use sumi_sitemap::config::{Config, Scheme};
use sumi_sitemap::crawler::{crawl, FetchError, HttpFetcher, PageFetcher};
use sumi_sitemap::output::render_sitemap;
use sumi_sitemap::state::{PageState, Sitemap};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a plain-HTTP configuration suitable for the mock server
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.scheme = Scheme::Http;
    config.crawler.fetch_timeout = 5;
    config.crawler.connect_timeout = 2;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

/// Extracts the `host:port` authority the crawler is pointed at
fn server_domain(server: &MockServer) -> String {
    let url = url::Url::parse(&server.uri()).expect("Failed to parse base URL");
    format!(
        "{}:{}",
        url.host_str().expect("Failed to extract host"),
        url.port().expect("Mock server has an explicit port")
    )
}

/// Mounts an HTML page that must be fetched exactly once
async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .expect(1)
        .mount(server)
        .await;
}

fn child_paths(sitemap: &Sitemap, page: &str) -> Vec<String> {
    let id = sitemap.find(page).expect("page in sitemap");
    sitemap
        .node(id)
        .children()
        .iter()
        .map(|child| sitemap.node(*child).path().to_string())
        .collect()
}

#[tokio::test]
async fn test_linear_chain() {
    let server = MockServer::start().await;
    let domain = server_domain(&server);

    mount_page(&server, "/", r#"<html><body><a href="/a">A</a></body></html>"#).await;
    mount_page(&server, "/a", r#"<a href="/b">B</a>"#).await;
    mount_page(&server, "/b", "<p>end of the line</p>").await;

    let sitemap = crawl(&create_test_config(), &domain)
        .await
        .expect("Crawl failed");

    assert_eq!(sitemap.len(), 3);
    assert_eq!(child_paths(&sitemap, "/"), vec!["/a"]);
    assert_eq!(child_paths(&sitemap, "/a"), vec!["/b"]);
    assert!(child_paths(&sitemap, "/b").is_empty());

    let b = sitemap.find("/b").unwrap();
    assert_eq!(sitemap.depth(b), 2);
    assert!(sitemap
        .iter()
        .all(|(id, _)| sitemap.node(id).state() == PageState::Processed));
}

#[tokio::test]
async fn test_cycle_is_fetched_once() {
    let server = MockServer::start().await;
    let domain = server_domain(&server);

    mount_page(&server, "/", r#"<a href="/a">A</a>"#).await;
    let back_links = format!(
        r#"<a href="/">home</a><a href="http://{}/a/">self</a><a href="/a?page=2#top">again</a>"#,
        domain
    );
    mount_page(&server, "/a", &back_links).await;

    let sitemap = crawl(&create_test_config(), &domain)
        .await
        .expect("Crawl failed");

    assert_eq!(sitemap.len(), 2);
    assert_eq!(child_paths(&sitemap, "/"), vec!["/a"]);
    assert!(child_paths(&sitemap, "/a").is_empty());

    // Every mount expects exactly one request
    server.verify().await;
}

#[tokio::test]
async fn test_links_outside_the_site_are_excluded() {
    let server = MockServer::start().await;
    let domain = server_domain(&server);

    mount_page(
        &server,
        "/",
        r##"
        <a href="https://other.example/x">elsewhere</a>
        <a href="mailto:someone@example.com">mail</a>
        <a href="./relative">dot</a>
        <a href="#section">fragment</a>
        <a href="">empty</a>
        <a href="/kept/">kept</a>
        "##,
    )
    .await;
    mount_page(&server, "/kept", "<p>leaf</p>").await;

    let sitemap = crawl(&create_test_config(), &domain)
        .await
        .expect("Crawl failed");

    assert_eq!(sitemap.len(), 2);
    assert_eq!(child_paths(&sitemap, "/"), vec!["/kept"]);
}

#[tokio::test]
async fn test_missing_page_is_contained() {
    let server = MockServer::start().await;
    let domain = server_domain(&server);

    mount_page(&server, "/", r#"<a href="/missing">gone</a><a href="/ok">ok</a>"#).await;
    mount_page(&server, "/ok", "<p>fine</p>").await;
    // wiremock answers unmatched requests with 404

    let sitemap = crawl(&create_test_config(), &domain)
        .await
        .expect("A dead link should not abort the crawl");

    assert_eq!(child_paths(&sitemap, "/"), vec!["/missing", "/ok"]);

    let missing = sitemap.node(sitemap.find("/missing").unwrap());
    assert_eq!(missing.state(), PageState::DeadLink);
    assert_eq!(missing.error(), Some("HTTP 404"));
    assert!(missing.children().is_empty());

    let ok = sitemap.node(sitemap.find("/ok").unwrap());
    assert_eq!(ok.state(), PageState::Processed);
}

#[tokio::test]
async fn test_fail_fast_aborts_on_first_error() {
    let server = MockServer::start().await;
    let domain = server_domain(&server);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"<a href="/broken">x</a>"#, "text/html"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = create_test_config();
    config.crawler.fail_fast = true;

    let result = crawl(&config, &domain).await;
    match result {
        Err(sumi_sitemap::SitemapError::Fetch { path, source }) => {
            assert_eq!(path, "/broken");
            assert_eq!(source, FetchError::Status { status: 500 });
        }
        other => panic!("Expected a fetch error, got {:?}", other.map(|s| s.len())),
    }
}

#[tokio::test]
async fn test_non_html_pages_have_no_links() {
    let server = MockServer::start().await;
    let domain = server_domain(&server);

    mount_page(&server, "/", r#"<a href="/report.txt">report</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/report.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"<a href="/hidden">no</a>"#, "text/plain"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sitemap = crawl(&create_test_config(), &domain)
        .await
        .expect("Crawl failed");

    assert_eq!(sitemap.len(), 2);
    assert!(!sitemap.contains("/hidden"));
    let report = sitemap.node(sitemap.find("/report.txt").unwrap());
    assert_eq!(report.state(), PageState::Processed);
}

#[tokio::test]
async fn test_root_redirect_to_alias_host_is_followed() {
    let server = MockServer::start().await;
    let alias = MockServer::start().await;
    let domain = server_domain(&server);

    let location = format!("{}/", alias.uri());
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", location.as_str()))
        .expect(1)
        .mount(&server)
        .await;
    let alias_page = format!(
        r#"<a href="/docs">docs</a><a href="{}/foreign">foreign</a>"#,
        alias.uri()
    );
    mount_page(&alias, "/", &alias_page).await;
    mount_page(&server, "/docs", "<p>docs</p>").await;

    let sitemap = crawl(&create_test_config(), &domain)
        .await
        .expect("Crawl failed");

    let root = sitemap.node(sitemap.root());
    assert_eq!(root.state(), PageState::Processed);
    assert_eq!(child_paths(&sitemap, "/"), vec!["/docs"]);
    assert!(!sitemap.contains("/foreign"));
    assert_eq!(sitemap.len(), 2);
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let server = MockServer::start().await;
    let domain = server_domain(&server);

    mount_page(
        &server,
        "/",
        r#"<a href="/slow">slow</a><a href="/fast">fast</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<a href="/never">never</a>"#, "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/fast", r#"<a href="/fast/leaf">leaf</a>"#).await;
    mount_page(&server, "/fast/leaf", "<p>leaf</p>").await;

    let mut config = create_test_config();
    config.crawler.fetch_timeout = 1;

    let sitemap = crawl(&config, &domain)
        .await
        .expect("A timeout should not abort the crawl");

    let slow = sitemap.node(sitemap.find("/slow").unwrap());
    assert_eq!(slow.state(), PageState::Unreachable);
    assert_eq!(slow.error(), Some("request timed out"));
    assert!(slow.children().is_empty());
    assert!(!sitemap.contains("/never"));

    assert_eq!(
        sitemap.node(sitemap.find("/fast").unwrap()).state(),
        PageState::Processed
    );
    assert!(sitemap.contains("/fast/leaf"));
}

#[tokio::test]
async fn test_fetcher_reports_status() {
    let server = MockServer::start().await;
    let domain = server_domain(&server);

    Mock::given(method("GET"))
        .and(path("/teapot"))
        .respond_with(ResponseTemplate::new(418))
        .mount(&server)
        .await;
    mount_page(&server, "/page", r#"<a href="/x">x</a>"#).await;

    let fetcher = HttpFetcher::new(&create_test_config()).expect("client");

    let err = fetcher.fetch(&domain, "/teapot").await.unwrap_err();
    assert_eq!(err, FetchError::Status { status: 418 });
    assert_eq!(err.page_state(), PageState::Failed);

    let body = fetcher.fetch(&domain, "/page").await.expect("page body");
    assert_eq!(body, br#"<a href="/x">x</a>"#.to_vec());
}

#[tokio::test]
async fn test_unreachable_domain() {
    // Bind and drop a listener so the port is known to be closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let domain = format!("127.0.0.1:{}", port);
    let sitemap = crawl(&create_test_config(), &domain)
        .await
        .expect("An unreachable root still yields a sitemap");

    assert_eq!(sitemap.len(), 1);
    let root = sitemap.node(sitemap.root());
    assert_eq!(root.state(), PageState::Unreachable);
}

#[tokio::test]
async fn test_rendered_sitemap() {
    let server = MockServer::start().await;
    let domain = server_domain(&server);

    mount_page(&server, "/", r#"<a href="/docs">docs</a><a href="/about">about</a>"#).await;
    mount_page(&server, "/docs", r#"<a href="/docs/intro">intro</a>"#).await;
    mount_page(&server, "/about", "<p>about</p>").await;
    mount_page(&server, "/docs/intro", "<p>intro</p>").await;

    let sitemap = crawl(&create_test_config(), &domain)
        .await
        .expect("Crawl failed");

    let rendered = render_sitemap(&sitemap, &domain);
    let expected = format!(
        "{} sitemap\n/\n /docs\n    /docs/intro\n /about\n",
        domain
    );
    assert_eq!(rendered, expected);
}
