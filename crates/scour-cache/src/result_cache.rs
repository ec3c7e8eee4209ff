use std::sync::RwLock;
use std::time::Duration;

use scour_core::{normalize_key, CacheConfig, SearchResult};
use scour_embeddings::EmbeddingCache;

use crate::ttl::{EvictionPolicy, TtlCache};

const KEY_MAX_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TierKey {
    Search(String),
    Embedding(String),
}

#[derive(Debug, Clone)]
enum TierValue {
    Search(Vec<SearchResult>),
    Embedding(Vec<f32>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCacheStats {
    pub search_size: usize,
    pub embedding_size: usize,
    pub total_size: usize,
    pub hits: u64,
}

/// Combined search-result and embedding-vector cache.
///
/// Both tiers live in one `TtlCache` and share a single capacity budget;
/// under pressure the least-read entry is evicted regardless of which tier
/// it belongs to.
pub struct ResultCache {
    inner: RwLock<TtlCache<TierKey, TierValue>>,
    search_enabled: bool,
    embedding_enabled: bool,
}

impl ResultCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_ttl(config, config.ttl())
    }

    /// Like `new` but with an explicit TTL, for expiry tests.
    pub fn with_ttl(config: &CacheConfig, ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(TtlCache::new(
                EvictionPolicy::LeastHits,
                ttl,
                config.max_size,
            )),
            search_enabled: config.search_enabled,
            embedding_enabled: config.embedding_enabled,
        }
    }

    pub fn get_search(&self, query: &str) -> Option<Vec<SearchResult>> {
        if !self.search_enabled {
            return None;
        }
        let key = TierKey::Search(normalize_key(query, KEY_MAX_LEN));
        match self.inner.write().expect("cache lock").get(&key) {
            Some(TierValue::Search(results)) => Some(results),
            _ => None,
        }
    }

    pub fn set_search(&self, query: &str, results: Vec<SearchResult>) {
        if !self.search_enabled {
            return;
        }
        let key = TierKey::Search(normalize_key(query, KEY_MAX_LEN));
        self.inner
            .write()
            .expect("cache lock")
            .set(key, TierValue::Search(results));
    }

    pub fn get_embedding(&self, text: &str) -> Option<Vec<f32>> {
        if !self.embedding_enabled {
            return None;
        }
        let key = TierKey::Embedding(normalize_key(text, KEY_MAX_LEN));
        match self.inner.write().expect("cache lock").get(&key) {
            Some(TierValue::Embedding(embedding)) => Some(embedding),
            _ => None,
        }
    }

    pub fn set_embedding(&self, text: &str, embedding: Vec<f32>) {
        if !self.embedding_enabled {
            return;
        }
        let key = TierKey::Embedding(normalize_key(text, KEY_MAX_LEN));
        self.inner
            .write()
            .expect("cache lock")
            .set(key, TierValue::Embedding(embedding));
    }

    pub fn clear(&self) {
        self.inner.write().expect("cache lock").clear();
    }

    pub fn stats(&self) -> ResultCacheStats {
        let inner = self.inner.read().expect("cache lock");
        let search_size = inner
            .iter()
            .filter(|(k, _)| matches!(k, TierKey::Search(_)))
            .count();
        ResultCacheStats {
            search_size,
            embedding_size: inner.len() - search_size,
            total_size: inner.len(),
            hits: inner.total_hits(),
        }
    }
}

impl EmbeddingCache for ResultCache {
    fn get(&self, text: &str) -> Option<Vec<f32>> {
        self.get_embedding(text)
    }

    fn set(&self, text: &str, embedding: Vec<f32>) {
        self.set_embedding(text, embedding);
    }
}
