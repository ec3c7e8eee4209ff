use std::collections::HashMap;
use std::sync::Arc;

use scour_core::{EmbeddingConfig, Embeddings};
use tokio::sync::{Mutex, OnceCell};

use crate::chunk::chunk_text;

/// Read-through store for computed vectors. Implemented by the combined
/// search/embedding cache tier in `scour-cache`.
pub trait EmbeddingCache: Send + Sync {
    fn get(&self, text: &str) -> Option<Vec<f32>>;
    fn set(&self, text: &str, embedding: Vec<f32>);
}

/// Degrading adapter in front of an `Embeddings` provider.
///
/// Every failure mode — provider error, disabled feature, blank input —
/// surfaces as an empty vector, never an error, so callers fall back to
/// lexical-only scoring. Long text is chunked into word windows and the
/// first window is embedded.
///
/// Concurrent calls for the same text are coalesced: only one provider
/// request is in flight per input at a time, and latecomers await its
/// result instead of paying the embedding cost again.
pub struct EmbeddingService {
    provider: Arc<dyn Embeddings>,
    cache: Option<Arc<dyn EmbeddingCache>>,
    enabled: bool,
    chunk_size: usize,
    chunk_overlap: usize,
    in_flight: Mutex<HashMap<String, Arc<OnceCell<Vec<f32>>>>>,
}

impl EmbeddingService {
    pub fn new(provider: Arc<dyn Embeddings>, config: &EmbeddingConfig) -> Self {
        Self {
            provider,
            cache: None,
            enabled: config.enabled,
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Attach a read-through vector cache.
    pub fn with_cache(mut self, cache: Arc<dyn EmbeddingCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Embed `text`, returning an empty vector on any failure or disablement.
    pub async fn embed(&self, text: &str) -> Vec<f32> {
        if !self.enabled || text.trim().is_empty() {
            return vec![];
        }

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(text) {
                return hit;
            }
        }

        let cell = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight
                .entry(text.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let embedding = cell.get_or_init(|| self.compute(text)).await.clone();

        // A fresh cell per settled computation, so a failed call can retry.
        self.in_flight.lock().await.remove(text);

        embedding
    }

    async fn compute(&self, text: &str) -> Vec<f32> {
        let chunks = chunk_text(text, self.chunk_size, self.chunk_overlap);
        let Some(first) = chunks.first() else {
            return vec![];
        };

        match self.provider.embed_query(first).await {
            Ok(embedding) => {
                if !embedding.is_empty() {
                    if let Some(cache) = &self.cache {
                        cache.set(text, embedding.clone());
                    }
                }
                embedding
            }
            Err(e) => {
                tracing::warn!(error = %e, "embedding failed, degrading to lexical-only");
                vec![]
            }
        }
    }
}
