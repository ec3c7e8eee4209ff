use std::sync::Arc;

use scour::core::{ScourConfig, SearchResult, UrlContent};
use scour::embeddings::FakeEmbeddings;
use scour::ScourContext;

fn context() -> ScourContext {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
    ScourContext::with_provider(ScourConfig::default(), Arc::new(FakeEmbeddings::new(8)))
        .expect("default config is valid")
}

fn sample_results() -> Vec<SearchResult> {
    vec![
        SearchResult::new(
            "Rust async book",
            "asynchronous programming in rust with tokio",
            "https://example.com/async-book",
            0.9,
        ),
        SearchResult::new(
            "Tokio tutorial",
            "tokio runtime tasks and channels",
            "https://example.com/tokio",
            0.8,
        ),
        SearchResult::new(
            "Bread recipes",
            "sourdough starter and hydration",
            "https://example.com/bread",
            0.7,
        ),
        SearchResult::new(
            "Gardening tips",
            "compost and soil ph",
            "https://example.com/garden",
            0.6,
        ),
        SearchResult::new(
            "Rust error handling",
            "result option and the question mark operator in rust",
            "https://example.com/errors",
            0.5,
        ),
    ]
}

#[tokio::test]
async fn full_search_flow_misses_then_hits() {
    let ctx = context();
    let query = "rust async programming";

    // First pass: everything misses.
    assert!(!ctx.is_duplicate_query(query));
    assert!(ctx.find_similar_results(query).await.is_none());
    assert!(ctx.get_search_result(query).is_none());

    // "Upstream search" happened; store and track its output.
    let results = sample_results();
    ctx.set_search_result(query, results.clone());
    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    ctx.add_links(&urls);

    let reranked = ctx.hybrid_rerank(query, results.clone(), 2).await;
    assert_eq!(reranked.len(), 2);
    assert!(reranked[0].hybrid_score >= reranked[1].hybrid_score);

    ctx.sessions().increment_search_round("s1");
    ctx.sessions().record_search("s1", query);
    ctx.store_similar_results(query, results.clone()).await;
    ctx.mark_query_searched(query, Some(results.clone()));

    // Second pass: every tier reports the earlier work.
    assert!(ctx.is_duplicate_query(query));
    assert_eq!(ctx.duplicate_query_results(query), Some(results.clone()));
    assert_eq!(ctx.get_search_result(query), Some(results.clone()));
    assert_eq!(
        ctx.find_similar_results("Rust   ASYNC programming").await,
        Some(results)
    );
    assert!(ctx.is_duplicate_link("https://example.com/tokio"));
    assert!(ctx
        .sessions()
        .cache_hint("s1", "rust async")
        .contains("Previously searched a similar query"));
}

#[tokio::test]
async fn url_tier_round_trips() {
    let ctx = context();
    let content = UrlContent::new("<h1>hi</h1>", "# hi");
    ctx.set_url_content("https://example.com/page", content.clone());
    assert_eq!(ctx.get_url_content("https://example.com/page"), Some(content));
    assert!(ctx.get_url_content("https://example.com/other").is_none());
}

#[tokio::test]
async fn disabled_embedding_degrades_to_passthrough() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
    let mut config = ScourConfig::default();
    config.embedding.enabled = false;
    let ctx = ScourContext::with_provider(config, Arc::new(FakeEmbeddings::new(8)))
        .expect("config is valid");

    let results = sample_results();
    let reranked = ctx.hybrid_rerank("rust", results.clone(), 2).await;
    // Pass-through keeps the original order and scores.
    assert_eq!(reranked.len(), results.len());
    for (reranked, original) in reranked.iter().zip(&results) {
        assert_eq!(reranked.result.url, original.url);
        assert_eq!(reranked.hybrid_score, original.score);
        assert_eq!(reranked.sparse_score, 0.0);
    }

    // The semantic tier is inert without embeddings.
    ctx.store_similar_results("rust", results).await;
    assert!(ctx.find_similar_results("rust").await.is_none());
}

#[tokio::test]
async fn small_candidate_set_is_not_reranked() {
    let ctx = context();
    let results = sample_results().into_iter().take(2).collect::<Vec<_>>();
    let reranked = ctx.hybrid_rerank("rust", results.clone(), 5).await;
    assert_eq!(reranked.len(), 2);
    assert_eq!(reranked[0].result, results[0]);
    assert_eq!(reranked[0].hybrid_score, results[0].score);
}

#[tokio::test]
async fn dense_rerank_orders_by_vector_similarity() {
    let ctx = context();
    let reranked = ctx.dense_rerank("rust async", sample_results(), 3).await;
    assert_eq!(reranked.len(), 3);
    for pair in reranked.windows(2) {
        assert!(pair[0].dense_score >= pair[1].dense_score);
    }
    for item in &reranked {
        assert_eq!(item.sparse_score, 0.0);
        assert_eq!(item.hybrid_score, item.dense_score);
    }
}

#[tokio::test]
async fn clear_caches_empties_every_tier() {
    let ctx = context();
    let results = sample_results();
    ctx.set_search_result("q", results.clone());
    ctx.set_url_content("https://example.com", UrlContent::new("<p>x</p>", "x"));
    ctx.store_similar_results("q", results.clone()).await;
    ctx.mark_query_searched("q", Some(results));
    ctx.add_links(&["https://example.com"]);

    ctx.clear_caches().await;

    assert_eq!(ctx.result_cache_stats().total_size, 0);
    assert_eq!(ctx.url_cache_stats().size, 0);
    assert_eq!(ctx.semantic_cache_stats().await.size, 0);
    assert_eq!(ctx.query_dedup_stats().size, 0);
    assert_eq!(ctx.link_dedup_stats().size, 0);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = ScourConfig::default();
    config.cache.max_size = 0;
    assert!(ScourContext::new(config).is_err());
}
