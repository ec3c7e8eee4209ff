use std::sync::Arc;
use std::time::Duration;

use scour_cache::{
    CacheStats, LinkDedup, QueryDedup, ResultCache, ResultCacheStats, SemanticCache, UrlCache,
};
use scour_core::{Embeddings, ScourConfig, ScourError, SearchResult, UrlContent};
use scour_embeddings::{
    EmbeddingCache, EmbeddingService, HttpBackend, OllamaEmbeddings, OllamaEmbeddingsConfig,
};
use scour_retrieval::{rerank, FusionWeights, HybridResult};
use scour_session::{start_sweeper, SessionTracker, SweeperHandle, DEFAULT_SWEEP_INTERVAL};

/// Owns one instance of every cache and tracker and exposes the operation
/// surface the retrieval orchestrator works against.
///
/// Construct one at startup and pass it by reference; nothing here is a
/// process-wide singleton. All returned data is an owned copy, so callers
/// never hold a reference into a cache.
pub struct ScourContext {
    config: ScourConfig,
    embedder: Arc<EmbeddingService>,
    result_cache: Arc<ResultCache>,
    url_cache: UrlCache,
    semantic_cache: SemanticCache,
    query_dedup: QueryDedup,
    link_dedup: LinkDedup,
    session_tracker: Arc<SessionTracker>,
}

impl ScourContext {
    /// Wire up against an Ollama embedding provider per the config.
    pub fn new(config: ScourConfig) -> Result<Self, ScourError> {
        let provider = Arc::new(OllamaEmbeddings::new(
            OllamaEmbeddingsConfig::new(&config.embedding.model)
                .with_base_url(&config.embedding.host),
            Arc::new(HttpBackend::new()),
        ));
        Self::with_provider(config, provider)
    }

    /// Wire up against an explicit embedding provider. Used by tests and
    /// by callers with a non-Ollama provider.
    pub fn with_provider(
        config: ScourConfig,
        provider: Arc<dyn Embeddings>,
    ) -> Result<Self, ScourError> {
        config.validate()?;

        let result_cache = Arc::new(ResultCache::new(&config.cache));
        let embedder = Arc::new(
            EmbeddingService::new(provider, &config.embedding)
                .with_cache(Arc::clone(&result_cache) as Arc<dyn EmbeddingCache>),
        );
        let semantic_cache =
            SemanticCache::new(Arc::clone(&embedder), config.hybrid.similarity_threshold);
        let url_cache = UrlCache::new(&config.cache);

        Ok(Self {
            config,
            embedder,
            result_cache,
            url_cache,
            semantic_cache,
            query_dedup: QueryDedup::new(),
            link_dedup: LinkDedup::new(),
            session_tracker: Arc::new(SessionTracker::new()),
        })
    }

    pub fn config(&self) -> &ScourConfig {
        &self.config
    }

    pub fn embedder(&self) -> &Arc<EmbeddingService> {
        &self.embedder
    }

    // Exact-match cache tiers.

    pub fn get_search_result(&self, query: &str) -> Option<Vec<SearchResult>> {
        self.result_cache.get_search(query)
    }

    pub fn set_search_result(&self, query: &str, results: Vec<SearchResult>) {
        self.result_cache.set_search(query, results);
    }

    pub fn get_embedding(&self, text: &str) -> Option<Vec<f32>> {
        self.result_cache.get_embedding(text)
    }

    pub fn set_embedding(&self, text: &str, embedding: Vec<f32>) {
        self.result_cache.set_embedding(text, embedding);
    }

    pub fn get_url_content(&self, url: &str) -> Option<UrlContent> {
        self.url_cache.get(url)
    }

    pub fn set_url_content(&self, url: &str, content: UrlContent) {
        self.url_cache.set(url, content);
    }

    // Dedup checks.

    pub fn is_duplicate_query(&self, query: &str) -> bool {
        self.query_dedup.is_duplicate(query)
    }

    /// Results of a recent identical search, if any. `Some(vec![])` never
    /// occurs; a remembered zero-result search yields `None` here but
    /// still reports as a duplicate.
    pub fn duplicate_query_results(&self, query: &str) -> Option<Vec<SearchResult>> {
        self.query_dedup.duplicate_result(query)
    }

    pub fn mark_query_searched(&self, query: &str, results: Option<Vec<SearchResult>>) {
        self.query_dedup.mark_searched(query, results);
    }

    pub fn is_duplicate_link(&self, url: &str) -> bool {
        self.link_dedup.is_duplicate(url)
    }

    pub fn add_links<S: AsRef<str>>(&self, urls: &[S]) {
        self.link_dedup.add_urls(urls);
    }

    // Semantic cache.

    pub async fn find_similar_results(&self, query: &str) -> Option<Vec<SearchResult>> {
        self.semantic_cache.find_similar(query).await
    }

    pub async fn store_similar_results(&self, query: &str, results: Vec<SearchResult>) {
        self.semantic_cache.store(query, results).await;
    }

    // Scoring.

    /// Fuse lexical and vector rankings over `candidates` with the
    /// configured weights. Pass-through when embedding is disabled or the
    /// set already fits in `top_k`.
    pub async fn hybrid_rerank(
        &self,
        query: &str,
        candidates: Vec<SearchResult>,
        top_k: usize,
    ) -> Vec<HybridResult> {
        rerank(
            query,
            candidates,
            top_k,
            self.fusion_weights(),
            true,
            &self.embedder,
        )
        .await
    }

    /// Rank by vector similarity alone, skipping the lexical blend.
    pub async fn dense_rerank(
        &self,
        query: &str,
        candidates: Vec<SearchResult>,
        top_k: usize,
    ) -> Vec<HybridResult> {
        rerank(
            query,
            candidates,
            top_k,
            self.fusion_weights(),
            false,
            &self.embedder,
        )
        .await
    }

    fn fusion_weights(&self) -> FusionWeights {
        FusionWeights {
            sparse: self.config.hybrid.sparse_weight,
            dense: self.config.hybrid.dense_weight,
        }
    }

    // Session tracking.

    pub fn sessions(&self) -> &SessionTracker {
        &self.session_tracker
    }

    /// Spawn the periodic session sweep. Call from within a tokio runtime
    /// and hold the handle until shutdown.
    pub fn start_session_sweeper(&self) -> SweeperHandle {
        self.start_session_sweeper_with_period(DEFAULT_SWEEP_INTERVAL)
    }

    pub fn start_session_sweeper_with_period(&self, period: Duration) -> SweeperHandle {
        start_sweeper(Arc::clone(&self.session_tracker), period)
    }

    // Maintenance.

    /// Empty every cache tier. Session rolling state is kept.
    pub async fn clear_caches(&self) {
        self.result_cache.clear();
        self.url_cache.clear();
        self.semantic_cache.clear().await;
        self.query_dedup.clear();
        self.link_dedup.clear();
    }

    pub fn result_cache_stats(&self) -> ResultCacheStats {
        self.result_cache.stats()
    }

    pub fn url_cache_stats(&self) -> CacheStats {
        self.url_cache.stats()
    }

    pub async fn semantic_cache_stats(&self) -> CacheStats {
        self.semantic_cache.stats().await
    }

    pub fn query_dedup_stats(&self) -> CacheStats {
        self.query_dedup.stats()
    }

    pub fn link_dedup_stats(&self) -> CacheStats {
        self.link_dedup.stats()
    }
}
