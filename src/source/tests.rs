// Source loading tests.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::error_handling::ErrorType;

fn doc(name: &str, api: &str) -> String {
    json!({"cache_time": 7200, "api_site": {"api_1": {"name": name, "api": api}}}).to_string()
}

async fn serve(server: &MockServer, route: &str, body: String, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_load_base58_source_over_http() {
    let server = MockServer::start().await;
    let body = bs58::encode(doc("G1-豆瓣", "http://db").as_bytes()).into_string();
    serve(&server, "/sub.b58", body, 200).await;

    let client = reqwest::Client::new();
    let sub = load_subscription(&client, &format!("{}/sub.b58", server.uri()))
        .await
        .expect("source should load");

    assert_eq!(sub.api_site.len(), 1);
    assert_eq!(sub.api_site.get("api_1").unwrap().name(), Some("G1-豆瓣"));
    assert_eq!(sub.extra.get("cache_time"), Some(&json!(7200)));
}

#[tokio::test]
async fn test_load_base64_source_over_http() {
    let server = MockServer::start().await;
    serve(&server, "/sub.b64", STANDARD.encode(doc("A", "http://a")), 200).await;

    let client = reqwest::Client::new();
    let sub = load_subscription(&client, &format!("{}/sub.b64", server.uri()))
        .await
        .expect("source should load");
    assert_eq!(sub.api_site.sites().next().unwrap().api(), Some("http://a"));
}

#[tokio::test]
async fn test_http_error_status_is_fetch_error() {
    let server = MockServer::start().await;
    serve(&server, "/missing", String::new(), 404).await;

    let client = reqwest::Client::new();
    let err = load_subscription(&client, &format!("{}/missing", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), ErrorType::SourceFetchError);
    assert!(err.to_string().contains("/missing"));
}

#[tokio::test]
async fn test_load_plain_json_from_local_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", doc("Local", "http://local")).unwrap();

    let client = reqwest::Client::new();
    let sub = load_subscription(&client, file.path().to_str().unwrap())
        .await
        .expect("local file should load");
    assert_eq!(sub.api_site.len(), 1);
}

#[tokio::test]
async fn test_missing_local_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let client = reqwest::Client::new();
    let err = load_subscription(&client, missing.to_str().unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), ErrorType::SourceReadError);
}

#[tokio::test]
async fn test_non_object_document_is_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[1, 2, 3]").unwrap();

    let client = reqwest::Client::new();
    let err = load_subscription(&client, file.path().to_str().unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), ErrorType::SourceParseError);
}

#[tokio::test]
async fn test_load_all_skips_failures_and_keeps_order() {
    let server = MockServer::start().await;
    serve(&server, "/first", doc("First", "http://1"), 200).await;
    serve(&server, "/broken", "not json at all!".to_string(), 200).await;
    serve(&server, "/down", String::new(), 500).await;
    serve(&server, "/second", doc("Second", "http://2"), 200).await;

    let sources: Vec<String> = ["/first", "/broken", "/down", "/second"]
        .iter()
        .map(|p| format!("{}{}", server.uri(), p))
        .collect();
    let stats = ProcessingStats::new();
    let client = reqwest::Client::new();

    let loaded = load_all(&client, &sources, &stats).await;

    let names: Vec<_> = loaded
        .iter()
        .map(|s| s.api_site.sites().next().unwrap().name().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(stats.get_error_count(ErrorType::SourceParseError), 1);
    assert_eq!(stats.get_error_count(ErrorType::SourceFetchError), 1);
}

#[tokio::test]
async fn test_document_without_sites_loads_empty() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"cache_time\": 1}}").unwrap();

    let client = reqwest::Client::new();
    let sub = load_subscription(&client, file.path().to_str().unwrap())
        .await
        .unwrap();
    assert!(sub.api_site.is_empty());
}
