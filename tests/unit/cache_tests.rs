//! Unit tests for the TTL result cache.

use std::time::Duration;

use chrono::{DateTime, Utc};
use gemini_search_mcp::store::ResultCache;

const TTL: Duration = Duration::from_secs(3600);

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000 + seconds, 0).expect("valid timestamp")
}

#[tokio::test]
async fn repeated_get_returns_same_value() {
    let cache = ResultCache::new(TTL);
    cache.put_at("q", "answer".into(), at(0)).await;

    let first = cache.get_at("q", at(10)).await;
    let second = cache.get_at("q", at(10)).await;
    assert_eq!(first.as_deref(), Some("answer"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn entry_present_just_before_ttl_and_absent_just_after() {
    let cache = ResultCache::new(TTL);
    cache.put_at("q", "answer".into(), at(0)).await;

    assert_eq!(cache.get_at("q", at(3599)).await.as_deref(), Some("answer"));
    assert_eq!(cache.get_at("q", at(3600)).await, None);
    assert_eq!(cache.get_at("q", at(3601)).await, None);
}

#[tokio::test]
async fn expired_entries_are_not_swept_eagerly() {
    let cache = ResultCache::new(TTL);
    cache.put_at("q", "answer".into(), at(0)).await;

    assert_eq!(cache.get_at("q", at(7200)).await, None);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn put_overwrites_existing_value() {
    let cache = ResultCache::new(TTL);
    cache.put_at("q", "one".into(), at(0)).await;
    cache.put_at("q", "two".into(), at(5)).await;

    assert_eq!(cache.get_at("q", at(6)).await.as_deref(), Some("two"));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn keys_are_not_normalized() {
    let cache = ResultCache::new(TTL);
    cache.put_at("Query", "upper".into(), at(0)).await;

    assert_eq!(cache.get_at("query", at(1)).await, None);
    assert_eq!(cache.get_at("Query ", at(1)).await, None);
    assert_eq!(cache.get_at("Query", at(1)).await.as_deref(), Some("upper"));
}

#[tokio::test]
async fn invalidate_reports_existence() {
    let cache = ResultCache::new(TTL);
    cache.put("q", "answer".into()).await;

    assert!(cache.invalidate("q").await);
    assert!(!cache.invalidate("q").await);
    assert_eq!(cache.get("q").await, None);
}

#[tokio::test]
async fn invalidate_all_returns_prior_count() {
    let cache = ResultCache::new(TTL);
    cache.put("a", "1".into()).await;
    cache.put("b", "2".into()).await;

    assert_eq!(cache.invalidate_all().await, 2);
    assert_eq!(cache.invalidate_all().await, 0);
    assert!(cache.is_empty().await);
}
