use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use scour_core::{normalize_key, SearchResult};
use scour_embeddings::EmbeddingService;
use scour_retrieval::{cosine_similarity, Bm25};
use tokio::sync::RwLock;

use crate::ttl::CacheStats;

const KEY_MAX_LEN: usize = 100;
const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);
const DEFAULT_MAX_ENTRIES: usize = 50;

/// Weighting of the lexical vs vector channel when matching stored queries.
const BM25_WEIGHT: f64 = 0.7;
const EMBEDDING_WEIGHT: f64 = 0.3;

struct SemanticEntry {
    /// Original, unnormalized query text.
    query: String,
    embedding: Vec<f32>,
    results: Vec<SearchResult>,
    stamp: Instant,
}

/// Approximate cache keyed by query similarity rather than exact match.
///
/// A lookup embeds the incoming query and scores it against every live
/// entry with `0.7 * BM25 + 0.3 * cosine` over the corpus of stored query
/// texts; a stored entry whose score strictly exceeds the threshold is
/// treated as a hit even though the literal text differs. An incoming
/// query whose normalized form equals a stored key hits without scoring.
pub struct SemanticCache {
    embedder: Arc<EmbeddingService>,
    entries: RwLock<HashMap<String, SemanticEntry>>,
    similarity_threshold: f64,
    ttl: Duration,
    max_entries: usize,
}

impl SemanticCache {
    /// Create a cache with the given match threshold. A typical value is
    /// 0.95, so only near-identical queries match.
    pub fn new(embedder: Arc<EmbeddingService>, similarity_threshold: f64) -> Self {
        Self {
            embedder,
            entries: RwLock::new(HashMap::new()),
            similarity_threshold,
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_capacity(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    fn is_expired(&self, entry: &SemanticEntry) -> bool {
        entry.stamp.elapsed() > self.ttl
    }

    /// Find a stored entry similar enough to `query` to reuse its results.
    /// Expired entries encountered during the scan are purged. A hit
    /// refreshes the matched entry's timestamp.
    pub async fn find_similar(&self, query: &str) -> Option<Vec<SearchResult>> {
        if !self.embedder.is_enabled() {
            return None;
        }

        let query_embedding = self.embedder.embed(query).await;
        if query_embedding.is_empty() {
            return None;
        }

        let mut entries = self.entries.write().await;
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| self.is_expired(entry))
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            entries.remove(&key);
        }

        let exact_key = normalize_key(query, KEY_MAX_LEN);
        if let Some(entry) = entries.get_mut(&exact_key) {
            entry.stamp = Instant::now();
            tracing::debug!(query, "semantic cache exact-key hit");
            return Some(entry.results.clone());
        }

        let corpus: Vec<String> = entries.values().map(|entry| entry.query.clone()).collect();
        let scorer = Bm25::new(&corpus);

        let mut best: Option<(String, f64)> = None;
        for (key, entry) in entries.iter() {
            if entry.embedding.len() != query_embedding.len() {
                continue;
            }

            let lexical = scorer.score(query, &entry.query);
            let vector = cosine_similarity(&query_embedding, &entry.embedding) as f64;
            let hybrid = BM25_WEIGHT * lexical + EMBEDDING_WEIGHT * vector;

            if hybrid > self.similarity_threshold
                && best.as_ref().is_none_or(|(_, score)| hybrid > *score)
            {
                best = Some((key.clone(), hybrid));
            }
        }

        let (key, score) = best?;
        let entry = entries.get_mut(&key).expect("matched key present");
        entry.stamp = Instant::now();
        tracing::debug!(query, score, "semantic cache similarity hit");
        Some(entry.results.clone())
    }

    /// Store results under the query's embedding. No-op when embedding is
    /// disabled or the provider fails.
    pub async fn store(&self, query: &str, results: Vec<SearchResult>) {
        if !self.embedder.is_enabled() {
            return;
        }

        let embedding = self.embedder.embed(query).await;
        if embedding.is_empty() {
            return;
        }

        let key = normalize_key(query, KEY_MAX_LEN);
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.get_mut(&key) {
            entry.query = query.to_string();
            entry.embedding = embedding;
            entry.results = results;
            entry.stamp = Instant::now();
            return;
        }

        while entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stamp)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => entries.remove(&key),
                None => break,
            };
        }

        // Guard against eviction failing to free a slot.
        if entries.len() < self.max_entries {
            entries.insert(
                key,
                SemanticEntry {
                    query: query.to_string(),
                    embedding,
                    results,
                    stamp: Instant::now(),
                },
            );
        }
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.read().await.len(),
            max_size: self.max_entries,
        }
    }
}
