use crate::common::{fetch, file_names, mount_page, run, store_paths};
use chrono::Utc;
use page_fetch::config::FetcherConfig;
use page_fetch::crawler::Action;
use page_fetch::{FetchError, PageMetadata};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn read_metadata(path: &std::path::Path) -> PageMetadata {
    let raw = std::fs::read(path).expect("Failed to read metadata file");
    serde_json::from_slice(&raw).expect("Failed to parse metadata file")
}

#[tokio::test]
async fn test_batch_with_failing_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/one", r#"<a href="/two">two</a><img src="x.png">"#).await;
    mount_page(&mock_server, "/two", r#"<a href="/one">one</a><a href="/">home</a>"#).await;

    let dir = TempDir::new().unwrap();
    let valid1 = format!("{}/one", base_url);
    let valid2 = format!("{}/two", base_url);
    let urls = vec![valid1.clone(), "invalid-url".to_string(), valid2.clone()];

    let messages = fetch(dir.path(), urls).await;

    assert_eq!(messages.len(), 3);
    assert!(messages[0].is_silent());
    assert!(messages[1].is_error());
    assert_eq!(messages[1].msg, "Error occurred during Fetch Request generation");
    assert!(matches!(messages[1].err, Some(FetchError::Request { .. })));
    assert!(messages[2].is_silent());

    // Two files per valid URL and nothing for the invalid one
    assert_eq!(file_names(dir.path()).len(), 4);
    let (body1, meta1) = store_paths(dir.path(), &valid1);
    let (body2, meta2) = store_paths(dir.path(), &valid2);
    assert!(body1.exists() && meta1.exists());
    assert!(body2.exists() && meta2.exists());
    let (invalid_body, invalid_meta) = store_paths(dir.path(), "invalid-url");
    assert!(!invalid_body.exists() && !invalid_meta.exists());

    let first = read_metadata(&meta1);
    assert_eq!(first.url, valid1);
    assert_eq!(first.link_count, 1);
    assert_eq!(first.image_count, 1);

    let second = read_metadata(&meta2);
    assert_eq!(second.link_count, 2);
    assert_eq!(second.image_count, 0);
}

#[tokio::test]
async fn test_body_stored_verbatim() {
    let mock_server = MockServer::start().await;
    let html = "<html><body><p>caf\u{e9}</p><img src=\"a\"><img src=\"b\"/></body></html>";
    mount_page(&mock_server, "/page", html).await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}/page", mock_server.uri());

    let messages = fetch(dir.path(), vec![url.clone()]).await;

    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_silent());
    let (body, meta) = store_paths(dir.path(), &url);
    assert_eq!(std::fs::read_to_string(body).unwrap(), html);
    assert_eq!(read_metadata(&meta).image_count, 2);
}

#[tokio::test]
async fn test_fetch_time_recorded() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<html></html>").await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}/", mock_server.uri());

    let before = Utc::now();
    fetch(dir.path(), vec![url.clone()]).await;
    let after = Utc::now();

    let (_, meta) = store_paths(dir.path(), &url);
    let metadata = read_metadata(&meta);
    assert!(metadata.last_fetch_time >= before);
    assert!(metadata.last_fetch_time <= after);
}

#[tokio::test]
async fn test_error_status_page_is_still_stored() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("<h1>Not found</h1><a href=\"/\">home</a>"),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}/missing", mock_server.uri());

    let messages = fetch(dir.path(), vec![url.clone()]).await;

    assert_eq!(messages.len(), 1);
    assert!(!messages[0].is_error());
    let (_, meta) = store_paths(dir.path(), &url);
    assert_eq!(read_metadata(&meta).link_count, 1);
}

#[tokio::test]
async fn test_invalid_utf8_reports_but_still_saves() {
    let mock_server = MockServer::start().await;
    let mut body = b"<a href=\"/\">x</a><img>".to_vec();
    body.extend_from_slice(&[0xff, 0xfe, 0xfd]);
    body.extend_from_slice(b"<a href=\"/late\">late</a>");
    Mock::given(method("GET"))
        .and(path("/binary"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}/binary", mock_server.uri());

    let messages = fetch(dir.path(), vec![url.clone()]).await;

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].msg, "Error when extracting metadata");
    assert!(matches!(messages[0].err, Some(FetchError::Extract(_))));
    assert!(messages[1].is_silent());

    let (stored_body, meta) = store_paths(dir.path(), &url);
    assert_eq!(std::fs::read(stored_body).unwrap(), body);
    let metadata = read_metadata(&meta);
    assert_eq!(metadata.link_count, 2);
    assert_eq!(metadata.image_count, 1);
}

#[tokio::test]
async fn test_request_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<a>late</a>")
                .set_delay(Duration::from_millis(2000)),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = FetcherConfig {
        connect_timeout_ms: 3000,
        request_timeout_ms: 200,
    };
    let url = format!("{}/slow", mock_server.uri());

    let messages = run(dir.path(), &config, Action::Fetch, vec![url]).await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].msg, "Error occurred while Fetching the Page");
    let err = messages[0].err.as_ref().expect("expected an error");
    assert!(err.is_timeout());
    assert!(file_names(dir.path()).is_empty());
}

#[tokio::test]
async fn test_connection_refused_continues_batch() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/ok", "<img>").await;

    let dir = TempDir::new().unwrap();
    let ok_url = format!("{}/ok", mock_server.uri());
    let urls = vec!["http://127.0.0.1:1/".to_string(), ok_url.clone()];

    let messages = fetch(dir.path(), urls).await;

    assert_eq!(messages.len(), 2);
    assert!(matches!(messages[0].err, Some(FetchError::Network { .. })));
    assert!(messages[1].is_silent());
    assert_eq!(file_names(dir.path()).len(), 2);
}

#[tokio::test]
async fn test_refetch_overwrites_files() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/same", "<a></a><a></a>").await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}/same", mock_server.uri());

    fetch(dir.path(), vec![url.clone()]).await;
    let (body, meta) = store_paths(dir.path(), &url);
    let first_body = std::fs::read(&body).unwrap();
    let first_fetch = read_metadata(&meta).last_fetch_time;

    fetch(dir.path(), vec![url.clone()]).await;

    assert_eq!(file_names(dir.path()).len(), 2);
    assert_eq!(std::fs::read(&body).unwrap(), first_body);
    let second = read_metadata(&meta);
    assert_eq!(second.link_count, 2);
    assert!(second.last_fetch_time >= first_fetch);
}

#[tokio::test]
async fn test_trailing_slash_shares_files() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/dir/", "<img>").await;
    mount_page(&mock_server, "/dir", "<img><img>").await;

    let dir = TempDir::new().unwrap();
    let with_slash = format!("{}/dir/", mock_server.uri());
    let without_slash = format!("{}/dir", mock_server.uri());

    fetch(dir.path(), vec![with_slash, without_slash.clone()]).await;

    // The second fetch replaced the first
    assert_eq!(file_names(dir.path()).len(), 2);
    let (_, meta) = store_paths(dir.path(), &without_slash);
    let metadata = read_metadata(&meta);
    assert_eq!(metadata.url, without_slash);
    assert_eq!(metadata.image_count, 2);
}
