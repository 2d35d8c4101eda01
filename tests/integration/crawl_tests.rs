//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_sweep::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use site_sweep::crawler::Coordinator;
use site_sweep::output::{load_statistics, write_report};
use site_sweep::state::{ErrorKind, PageRecord, PageState};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the given seed
fn create_test_config(seed_url: &str, max_depth: u32, file_template: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed_url: seed_url.to_string(),
            max_depth,
            request_delay: 0.0,
            request_timeout: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
        },
        output: OutputConfig {
            file_template: file_template.to_string(),
        },
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

/// Mounts a small site:
///
/// ```text
/// /        -> /page1, page2, foreign link, #top
/// /page1   -> /, /logo.png
/// /page2   -> /missing, /old
/// /logo.png  image
/// /missing   404
/// /old       301 to /page1
/// ```
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r##"<html><head>
                <title> Home </title>
                <meta name="Description" content=" Welcome ">
                <meta name="keywords" content="home,start">
            </head><body>
                <h1>Front page</h1>
                <a href="/page1">Page 1</a>
                <a href="page2">Page 2</a>
                <a href="https://foreign.example/elsewhere">Elsewhere</a>
                <a href="#top">Top</a>
            </body></html>"##,
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(
            r#"<html><head><title>Page 1</title></head><body>
                <a href="/">Home</a>
                <a href="/logo.png">Logo</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html(
            r#"<html><head><title>Page 2</title></head><body>
                <h1>Second</h1>
                <a href="/missing">Gone</a>
                <a href="/old">Moved</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x89, b'P', b'N', b'G'])
                .insert_header("content-type", "image/png"),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/page1"))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_site(&server).await;

    let config = create_test_config(&base_url, 2, "");
    let state = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    // Home, page1, page2 and the logo; the foreign link is never fetched
    assert_eq!(state.page_count(), 4);

    match state.record(&base_url) {
        Some(PageRecord::Html(meta)) => {
            assert_eq!(meta.title.as_deref(), Some("Home"));
            assert_eq!(meta.description.as_deref(), Some("Welcome"));
            assert_eq!(meta.keywords.as_deref(), Some("home,start"));
            assert_eq!(meta.heading.as_deref(), Some("Front page"));
        }
        other => panic!("Expected an HTML record for the seed, got {:?}", other),
    }

    let logo = format!("{}/logo.png", base_url);
    assert_eq!(
        state.record(&logo),
        Some(&PageRecord::Media {
            content_type: "image/png".to_string()
        })
    );
    assert_eq!(state.media_urls().to_vec(), vec![logo]);

    let errors = state.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .any(|e| e.url == format!("{}/missing", base_url) && e.kind == ErrorKind::Http(404)));
    assert!(errors
        .iter()
        .any(|e| e.url == format!("{}/old", base_url) && e.reason == "HTTP 301"));

    assert_eq!(
        state.visited().state_of(&format!("{}/missing", base_url)),
        Some(PageState::HttpError)
    );
    assert!(!state.is_visited("https://foreign.example/elsewhere"));
    assert!(state.finished_at().is_some());

    // Mock expectations (each path exactly once) are verified when the server drops
}

#[tokio::test]
async fn test_depth_limit_stops_link_following() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><head><title>Root</title></head><body><a href="/deeper">Deeper</a></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/deeper"))
        .respond_with(html("<html><head><title>Deeper</title></head></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&base_url, 0, "");
    let state = Coordinator::new(config).unwrap().run().await;

    assert_eq!(state.page_count(), 1);
    assert!(state.errors().is_empty());
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(html("<html><head><title>Agent</title></head></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), 1, "");
    let state = Coordinator::new(config).unwrap().run().await;

    // An unmatched user agent would have produced a 404 error instead
    assert_eq!(state.page_count(), 1);
    assert!(state.errors().is_empty());
}

#[tokio::test]
async fn test_unreachable_seed_records_transport_error() {
    let config = create_test_config("http://127.0.0.1:9", 2, "");
    let state = Coordinator::new(config).unwrap().run().await;

    assert_eq!(state.page_count(), 0);
    assert_eq!(state.errors().len(), 1);
    assert_eq!(state.errors()[0].kind, ErrorKind::Transport);
    assert!(state.errors()[0].reason.starts_with("transport: "));
    assert_eq!(
        state.visited().state_of("http://127.0.0.1:9"),
        Some(PageState::TransportError)
    );
}

#[tokio::test]
async fn test_csv_report_sorted_by_url() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_site(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("crawler_{}.csv");
    let config = create_test_config(&base_url, 2, &template.to_string_lossy());
    let output = config.output.clone();

    let state = Coordinator::new(config).unwrap().run().await;
    let written = write_report(&state, &output)
        .expect("Failed to write report")
        .expect("Expected a report file");

    let host = base_url.trim_start_matches("http://");
    assert_eq!(written, dir.path().join(format!("crawler_{}.csv", host)));

    let mut reader = csv::Reader::from_path(&written).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["url", "title", "description", "keywords", "h1"]);

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();

    let urls: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    let mut sorted = urls.clone();
    sorted.sort();
    assert_eq!(urls, sorted);
    assert_eq!(rows.len(), 4);

    let logo_row = rows
        .iter()
        .find(|r| r[0].ends_with("/logo.png"))
        .expect("Logo row missing");
    assert_eq!(logo_row[1], "mediafile");
    assert_eq!(logo_row[2], "image/png");

    let page1_row = rows
        .iter()
        .find(|r| r[0].ends_with("/page1"))
        .expect("Page 1 row missing");
    assert_eq!(page1_row[1], "Page 1");
    assert_eq!(page1_row[4], "");

    let stats = load_statistics(&state);
    assert_eq!(stats.total_pages, 4);
    assert_eq!(stats.media_files, 1);
    assert_eq!(stats.errors.len(), 2);
}

#[tokio::test]
async fn test_no_report_when_nothing_recorded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("report_{}.csv");
    let config = create_test_config(&server.uri(), 2, &template.to_string_lossy());
    let output = config.output.clone();

    let state = Coordinator::new(config).unwrap().run().await;

    assert_eq!(state.errors()[0].reason, "HTTP 500");
    assert_eq!(write_report(&state, &output).unwrap(), None);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
