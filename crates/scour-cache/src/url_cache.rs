use std::sync::RwLock;
use std::time::Duration;

use scour_core::{CacheConfig, UrlContent};

use crate::ttl::{CacheStats, EvictionPolicy, TtlCache};

/// Fetched-page cache keyed by URL. Evicts purely by recency of
/// insert/refresh, unlike the hit-counted search/embedding tier.
pub struct UrlCache {
    inner: RwLock<TtlCache<String, UrlContent>>,
    enabled: bool,
}

impl UrlCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_ttl(config, config.ttl())
    }

    /// Like `new` but with an explicit TTL, for expiry tests.
    pub fn with_ttl(config: &CacheConfig, ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(TtlCache::new(
                EvictionPolicy::OldestFirst,
                ttl,
                config.max_size,
            )),
            enabled: config.url_enabled,
        }
    }

    pub fn get(&self, url: &str) -> Option<UrlContent> {
        if !self.enabled {
            return None;
        }
        self.inner.write().expect("cache lock").get(&url.to_string())
    }

    pub fn set(&self, url: &str, content: UrlContent) {
        if !self.enabled {
            return;
        }
        self.inner
            .write()
            .expect("cache lock")
            .set(url.to_string(), content);
    }

    pub fn clear(&self) {
        self.inner.write().expect("cache lock").clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.read().expect("cache lock").stats()
    }
}
