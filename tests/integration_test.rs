//! End-to-end merge runs against local mock servers.

use std::path::Path;
use std::time::Duration;

use serde_json::{json, Value};
use sub_merge::{run_merge, Config};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_source(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn serve_endpoint(server: &MockServer, route: &str, delay_ms: u64) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(delay_ms)))
        .mount(server)
        .await;
}

fn read_output(path: &Path) -> Value {
    let encoded = std::fs::read_to_string(path).expect("output file");
    let bytes = bs58::decode(encoded.trim()).into_vec().expect("base58 output");
    serde_json::from_slice(&bytes).expect("JSON output")
}

fn config(sources: Vec<String>, output: &Path) -> Config {
    Config {
        sources,
        output: output.to_path_buf(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_full_run_merges_selects_and_ranks() {
    let server = MockServer::start().await;
    let base = server.uri();
    serve_endpoint(&server, "/fast", 0).await;
    serve_endpoint(&server, "/slow", 600).await;
    serve_endpoint(&server, "/douban", 400).await;

    let source_a = json!({
        "cache_time": 100,
        "spider": "keep-me",
        "api_site": {
            "api_1": {"name": "G1-CN", "api": format!("{base}/fast"), "detail": "x"},
            "api_2": {"name": "G1-豆瓣", "api": format!("{base}/douban")}
        }
    });
    let source_b = json!({
        "api_site": [
            {"name": "G2-CN", "api": format!("{base}/slow")},
            {"name": "G2-豆瓣", "api": format!("{base}/douban")},
            {"name": "No endpoint"}
        ]
    });
    serve_source(
        &server,
        "/a.b58",
        bs58::encode(source_a.to_string().as_bytes()).into_string(),
    )
    .await;
    serve_source(&server, "/b.json", source_b.to_string()).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("merged_config.b58");
    let report = run_merge(Config {
        ttl: Some(300),
        cache_time: Some("7200".to_string()),
        strip_source_tags: true,
        ..config(
            vec![format!("{base}/a.b58"), format!("{base}/b.json")],
            &output,
        )
    })
    .await
    .expect("run should succeed");

    assert_eq!(report.sources_total, 2);
    assert_eq!(report.sources_loaded, 2);
    assert_eq!(report.sites_merged, 3);
    assert_eq!(report.sites_output, 2);
    assert_eq!(report.probes_issued, 3);
    assert_eq!(report.output_path, output);

    let doc = read_output(&output);
    assert_eq!(doc["cache_time"], json!("7200"));
    assert_eq!(doc["spider"], json!("keep-me"));

    let sites = doc["api_site"].as_object().unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites["api_1"]["name"], json!("CN"));
    assert_eq!(sites["api_1"]["detail"], json!("x"));
    assert!(sites["api_1"]["ttl"].as_u64().unwrap() < 300);

    // Protected: kept even though it is over the ceiling
    assert_eq!(sites["api_2"]["name"], json!("豆瓣"));
    assert!(sites["api_2"]["ttl"].as_u64().unwrap() >= 400);
}

#[tokio::test]
async fn test_probe_budget_leaves_rest_untested() {
    let server = MockServer::start().await;
    let base = server.uri();
    serve_endpoint(&server, "/one", 0).await;
    serve_endpoint(&server, "/two", 0).await;
    serve_endpoint(&server, "/three", 0).await;

    let source = json!({"api_site": [
        {"name": "One", "api": format!("{base}/one")},
        {"name": "Two", "api": format!("{base}/two")},
        {"name": "Three", "api": format!("{base}/three")}
    ]});
    serve_source(&server, "/sub", source.to_string()).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.b58");
    let report = run_merge(Config {
        max_test_sites: Some(1),
        ..config(vec![format!("{base}/sub")], &output)
    })
    .await
    .unwrap();

    assert_eq!(report.probes_issued, 1);
    let doc = read_output(&output);
    let sites = doc["api_site"].as_object().unwrap();
    assert_eq!(sites["api_1"]["name"], json!("One"));
    assert!(sites["api_1"]["ttl"].is_u64());
    assert_eq!(sites["api_2"]["ttl"], json!("infinite"));
    assert_eq!(sites["api_3"]["ttl"], json!("infinite"));

    let received = server.received_requests().await.unwrap();
    let heads = received
        .iter()
        .filter(|r| r.method.as_str() == "HEAD")
        .count();
    assert_eq!(heads, 1);
}

#[tokio::test]
async fn test_failing_source_is_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("local.json");
    std::fs::write(
        &local,
        json!({"api_site": {"x": {"name": "Builtin", "type": 3}}}).to_string(),
    )
    .unwrap();
    let output = dir.path().join("out.b58");

    let report = run_merge(config(
        vec![format!("{base}/gone"), local.display().to_string()],
        &output,
    ))
    .await
    .unwrap();

    assert_eq!(report.sources_loaded, 1);
    assert_eq!(report.probes_issued, 0);
    let doc = read_output(&output);
    assert_eq!(doc["api_site"]["api_1"]["name"], json!("Builtin"));
    assert_eq!(doc["api_site"]["api_1"]["ttl"], json!(0));
}

#[tokio::test]
async fn test_json_copy_matches_encoded_output() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("local.json");
    std::fs::write(&local, json!({"api_site": [{"name": "豆瓣"}]}).to_string()).unwrap();
    let output = dir.path().join("out.b58");
    let json_output = dir.path().join("out.json");

    let report = run_merge(Config {
        json_output: Some(json_output.clone()),
        ..config(vec![local.display().to_string()], &output)
    })
    .await
    .unwrap();

    let json_text = std::fs::read_to_string(&json_output).unwrap();
    assert_eq!(json_text.len(), report.json_bytes);
    assert_eq!(
        serde_json::from_str::<Value>(&json_text).unwrap(),
        read_output(&output)
    );
    assert!(json_text.contains("豆瓣"));
    assert!(report.encoded_bytes > report.json_bytes);
}
