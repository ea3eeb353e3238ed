// Merge/dedup tests.

use serde_json::json;

use super::*;
use crate::normalize::normalized_site_name;

fn sub(value: serde_json::Value) -> Subscription {
    serde_json::from_value(value).expect("subscription")
}

#[test]
fn test_merge_empty_input_is_empty() {
    let stats = ProcessingStats::new();
    let merged = merge_subscriptions(&[], &stats);
    assert!(merged.api_site.is_empty());
    assert!(merged.extra.is_empty());
}

#[test]
fn test_identical_api_across_sources_kept_once() {
    let stats = ProcessingStats::new();
    let a = sub(json!({"api_site": {"api_1": {"name": "G1-豆瓣", "api": "http://slow"}}}));
    let b = sub(json!({"api_site": {"api_1": {"name": "G2-豆瓣", "api": "http://slow"}}}));

    let merged = merge_subscriptions(&[a, b], &stats);

    assert_eq!(merged.api_site.len(), 1);
    let site = merged.api_site.sites().next().unwrap();
    assert_eq!(site.name(), Some("G1-豆瓣"));
    assert_eq!(normalized_site_name(site), "豆瓣");
    assert_eq!(stats.get_info_count(InfoType::DuplicateSiteDropped), 1);
}

#[test]
fn test_new_sites_appended_with_fresh_keys() {
    let stats = ProcessingStats::new();
    let a = sub(json!({"api_site": [
        {"name": "A", "api": "http://a"},
        {"name": "B", "api": "http://b"}
    ]}));
    let b = sub(json!({"api_site": {
        "x": {"name": "C", "api": "http://c"},
        "y": {"name": "A again", "api": "http://a"}
    }}));

    let merged = merge_subscriptions(&[a, b], &stats);

    let keys: Vec<&str> = merged.api_site.keys().collect();
    assert_eq!(keys, vec!["api_1", "api_2", "api_3"]);
    assert_eq!(merged.api_site.get("api_3").unwrap().name(), Some("C"));
}

#[test]
fn test_base_sites_without_api_always_kept() {
    let stats = ProcessingStats::new();
    let a = sub(json!({"api_site": [
        {"name": "local one"},
        {"name": "local two"}
    ]}));
    let b = sub(json!({"api_site": [{"name": "remote without api"}]}));

    let merged = merge_subscriptions(&[a, b], &stats);

    assert_eq!(merged.api_site.len(), 2);
    assert_eq!(stats.get_info_count(InfoType::SiteWithoutApiDropped), 1);
}

#[test]
fn test_later_sources_cannot_repeat_endpointless_site() {
    let stats = ProcessingStats::new();
    let base = sub(json!({"api_site": [{"name": "Builtin", "api": "http://a"}]}));
    let extra = || sub(json!({"api_site": [{"name": "Builtin"}]}));

    let merged = merge_subscriptions(&[base, extra(), extra()], &stats);

    assert_eq!(merged.api_site.len(), 1);
    assert_eq!(stats.get_info_count(InfoType::SiteWithoutApiDropped), 2);
}

#[test]
fn test_duplicates_within_later_source_dropped() {
    let stats = ProcessingStats::new();
    let a = sub(json!({"api_site": []}));
    let b = sub(json!({"api_site": [
        {"name": "X", "api": "http://dup"},
        {"name": "Y", "api": "http://dup"}
    ]}));

    let merged = merge_subscriptions(&[a, b], &stats);
    assert_eq!(merged.api_site.len(), 1);
}

#[test]
fn test_base_passthrough_fields_kept_and_others_ignored() {
    let stats = ProcessingStats::new();
    let a = sub(json!({"cache_time": 7200, "spider": "base"}));
    let b = sub(json!({"cache_time": 60, "extra": true, "api_site": [{"api": "http://b"}]}));

    let merged = merge_subscriptions(&[a, b], &stats);

    assert_eq!(merged.extra.get("cache_time"), Some(&json!(7200)));
    assert_eq!(merged.extra.get("spider"), Some(&json!("base")));
    assert!(merged.extra.get("extra").is_none());
    assert_eq!(merged.api_site.len(), 1);
}

#[test]
fn test_merge_does_not_mutate_inputs() {
    let stats = ProcessingStats::new();
    let inputs = vec![
        sub(json!({"api_site": [{"name": "A", "api": "http://a"}]})),
        sub(json!({"api_site": [{"name": "B", "api": "http://b"}]})),
    ];
    let snapshot = inputs.clone();

    let _ = merge_subscriptions(&inputs, &stats);
    assert_eq!(inputs, snapshot);
}
