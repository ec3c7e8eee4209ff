use std::time::Duration;

use scour_cache::{LinkDedup, QueryDedup};
use scour_core::SearchResult;

fn results() -> Vec<SearchResult> {
    vec![SearchResult::new("t", "c", "https://example.com", 1.0)]
}

#[test]
fn duplicate_detection_is_normalization_insensitive() {
    let dedup = QueryDedup::new();
    dedup.mark_searched("Foo Bar", Some(results()));
    assert!(dedup.is_duplicate("foo   bar"));
    assert!(dedup.is_duplicate("FOO BAR "));
    assert!(!dedup.is_duplicate("foo baz"));
}

#[test]
fn duplicate_expires_after_window() {
    let dedup = QueryDedup::with_window(Duration::from_millis(40), 100);
    dedup.mark_searched("foo", Some(results()));
    assert!(dedup.is_duplicate("foo"));

    std::thread::sleep(Duration::from_millis(80));
    assert!(!dedup.is_duplicate("foo"));
    // The stale entry was deleted by the failed lookup.
    assert_eq!(dedup.stats().size, 0);
}

#[test]
fn duplicate_result_round_trips() {
    let dedup = QueryDedup::new();
    dedup.mark_searched("foo", Some(results()));
    assert_eq!(dedup.duplicate_result("foo"), Some(results()));
}

#[test]
fn zero_result_search_is_still_a_duplicate() {
    // `None` records "searched, found nothing" — the query is a duplicate
    // but there is no payload to replay.
    let dedup = QueryDedup::new();
    dedup.mark_searched("rare query", None);
    assert!(dedup.is_duplicate("rare query"));
    assert_eq!(dedup.duplicate_result("rare query"), None);
}

#[test]
fn store_is_trimmed_to_capacity() {
    let dedup = QueryDedup::with_window(Duration::from_secs(300), 10);
    for i in 0..25 {
        dedup.mark_searched(&format!("query {i}"), None);
    }
    assert_eq!(dedup.stats().size, 10);
}

#[test]
fn link_dedup_detects_repeats() {
    let dedup = LinkDedup::new();
    dedup.add_urls(&["https://a", "https://b"]);
    assert!(dedup.is_duplicate("https://a"));
    assert!(!dedup.is_duplicate("https://c"));
}

#[test]
fn link_dedup_evicts_first_added_past_capacity() {
    let dedup = LinkDedup::new();
    let urls: Vec<String> = (0..101).map(|i| format!("https://site{i}")).collect();
    dedup.add_urls(&urls);

    assert_eq!(dedup.stats().size, 100);
    assert!(!dedup.is_duplicate("https://site0"));
    assert!(dedup.is_duplicate("https://site1"));
    assert!(dedup.is_duplicate("https://site100"));
}

#[test]
fn link_dedup_readding_does_not_refresh_position() {
    let dedup = LinkDedup::with_capacity(2);
    dedup.add_urls(&["https://a", "https://b"]);
    // Re-adding "a" leaves it the oldest entry.
    dedup.add_urls(&["https://a", "https://c"]);

    assert!(!dedup.is_duplicate("https://a"));
    assert!(dedup.is_duplicate("https://b"));
    assert!(dedup.is_duplicate("https://c"));
}

#[test]
fn link_dedup_clear() {
    let dedup = LinkDedup::new();
    dedup.add_urls(&["https://a"]);
    dedup.clear();
    assert_eq!(dedup.stats().size, 0);
    assert!(!dedup.is_duplicate("https://a"));
}
