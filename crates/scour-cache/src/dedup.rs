use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;
use std::time::{Duration, Instant};

use scour_core::{normalize_key, SearchResult};

use crate::ttl::CacheStats;

const QUERY_KEY_MAX_LEN: usize = 200;
const DEFAULT_WINDOW: Duration = Duration::from_secs(5 * 60);
const MAX_RECENT_SEARCHES: usize = 100;
const MAX_SEEN_URLS: usize = 100;

struct DedupEntry {
    stamp: Instant,
    /// `None` records a search that legitimately produced zero results,
    /// as opposed to a query never searched at all.
    results: Option<Vec<SearchResult>>,
}

/// Short-window detector for literal query repeats.
///
/// Keys are normalized query text shared across all sessions. Entries
/// outside the window are deleted on next lookup.
pub struct QueryDedup {
    recent: RwLock<HashMap<String, DedupEntry>>,
    window: Duration,
    max_entries: usize,
}

impl QueryDedup {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW, MAX_RECENT_SEARCHES)
    }

    pub fn with_window(window: Duration, max_entries: usize) -> Self {
        Self {
            recent: RwLock::new(HashMap::new()),
            window,
            max_entries,
        }
    }

    pub fn is_duplicate(&self, query: &str) -> bool {
        let key = normalize_key(query, QUERY_KEY_MAX_LEN);
        let mut recent = self.recent.write().expect("dedup lock");
        match recent.get(&key) {
            None => false,
            Some(entry) if entry.stamp.elapsed() < self.window => true,
            Some(_) => {
                recent.remove(&key);
                false
            }
        }
    }

    pub fn duplicate_result(&self, query: &str) -> Option<Vec<SearchResult>> {
        let key = normalize_key(query, QUERY_KEY_MAX_LEN);
        let mut recent = self.recent.write().expect("dedup lock");
        match recent.get(&key) {
            None => None,
            Some(entry) if entry.stamp.elapsed() < self.window => entry.results.clone(),
            Some(_) => {
                recent.remove(&key);
                None
            }
        }
    }

    /// Record a performed search, trimming oldest entries beyond capacity.
    pub fn mark_searched(&self, query: &str, results: Option<Vec<SearchResult>>) {
        let key = normalize_key(query, QUERY_KEY_MAX_LEN);
        let mut recent = self.recent.write().expect("dedup lock");
        recent.insert(
            key,
            DedupEntry {
                stamp: Instant::now(),
                results,
            },
        );

        while recent.len() > self.max_entries {
            let oldest = recent
                .iter()
                .min_by_key(|(_, entry)| entry.stamp)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => recent.remove(&key),
                None => break,
            };
        }
    }

    pub fn clear(&self) {
        self.recent.write().expect("dedup lock").clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.recent.read().expect("dedup lock").len(),
            max_size: self.max_entries,
        }
    }
}

impl Default for QueryDedup {
    fn default() -> Self {
        Self::new()
    }
}

struct LinkDedupInner {
    seen: HashMap<String, Instant>,
    insertion_order: VecDeque<String>,
}

/// Bounded set of previously returned URLs. No TTL: entries only leave
/// under capacity pressure, oldest insertion first.
pub struct LinkDedup {
    inner: RwLock<LinkDedupInner>,
    max_urls: usize,
}

impl LinkDedup {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SEEN_URLS)
    }

    pub fn with_capacity(max_urls: usize) -> Self {
        Self {
            inner: RwLock::new(LinkDedupInner {
                seen: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
            max_urls,
        }
    }

    pub fn is_duplicate(&self, url: &str) -> bool {
        self.inner.read().expect("dedup lock").seen.contains_key(url)
    }

    pub fn add_urls<S: AsRef<str>>(&self, urls: &[S]) {
        let mut inner = self.inner.write().expect("dedup lock");
        for url in urls {
            let url = url.as_ref();
            if !inner.seen.contains_key(url) {
                inner.seen.insert(url.to_string(), Instant::now());
                inner.insertion_order.push_back(url.to_string());
            }
        }

        while inner.seen.len() > self.max_urls {
            match inner.insertion_order.pop_front() {
                Some(oldest) => {
                    inner.seen.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write().expect("dedup lock");
        inner.seen.clear();
        inner.insertion_order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.inner.read().expect("dedup lock").seen.len(),
            max_size: self.max_urls,
        }
    }
}

impl Default for LinkDedup {
    fn default() -> Self {
        Self::new()
    }
}
