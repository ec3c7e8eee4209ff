use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::RwLock;
use std::time::{Duration, Instant};

const MAX_TRACKED_QUERIES: usize = 20;
const MAX_TRACKED_URLS: usize = 50;
const MAX_RESULTS_CACHE_SIZE: usize = 100;
const MAX_CONTENT_CACHE_SIZE: usize = 200;
const SESSION_KEY_MAX_LEN: usize = 100;

/// How often the background sweep runs by default.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30 * 60);
const DEFAULT_MAX_SESSION_AGE: Duration = Duration::from_secs(60 * 60);

/// Rolling per-session state. Created lazily on first touch.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub search_round: u64,
    pub url_read_round: u64,
    pub total_searches: u64,
    pub total_urls_read: u64,
    /// Most-recent-first, deduplicated, capped at 20.
    pub searched_queries: VecDeque<String>,
    /// Most-recent-first, deduplicated, capped at 50.
    pub read_urls: VecDeque<String>,
    pub session_start_time: Instant,
}

impl SessionContext {
    fn new() -> Self {
        Self {
            search_round: 0,
            url_read_round: 0,
            total_searches: 0,
            total_urls_read: 0,
            searched_queries: VecDeque::new(),
            read_urls: VecDeque::new(),
            session_start_time: Instant::now(),
        }
    }
}

/// Point-in-time counters for one session plus the global cache sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub searches: u64,
    pub urls: u64,
    pub round: u64,
    pub uptime: Duration,
    pub search_cache_size: usize,
    pub url_cache_size: usize,
}

/// Occupancy of one of the global serialized-text caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatus {
    pub size: usize,
    pub max_size: usize,
}

/// Insertion-order bounded text cache. Overwriting an existing key keeps
/// its position; eviction always drops the oldest insertion.
struct FifoCache {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
    max_size: usize,
}

impl FifoCache {
    fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_size,
        }
    }

    fn insert(&mut self, key: String, value: String) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, value);
            return;
        }
        while self.entries.len() >= self.max_size {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    fn status(&self) -> CacheStatus {
        CacheStatus {
            size: self.entries.len(),
            max_size: self.max_size,
        }
    }
}

/// Tracks what each session has already searched and read, and renders
/// that history as short hint strings for the orchestrator to feed back
/// to the caller.
///
/// All operations are synchronous; sessions are created lazily by any
/// accessor. Two process-wide FIFO caches hold serialized search results
/// and page content so hints can report the cached payload size.
pub struct SessionTracker {
    sessions: RwLock<HashMap<String, SessionContext>>,
    search_results_cache: RwLock<FifoCache>,
    url_content_cache: RwLock<FifoCache>,
    max_session_age: Duration,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            search_results_cache: RwLock::new(FifoCache::new(MAX_RESULTS_CACHE_SIZE)),
            url_content_cache: RwLock::new(FifoCache::new(MAX_CONTENT_CACHE_SIZE)),
            max_session_age: DEFAULT_MAX_SESSION_AGE,
        }
    }

    /// Sessions idle beyond this age are removed by [`sweep_expired`].
    ///
    /// [`sweep_expired`]: SessionTracker::sweep_expired
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_session_age = max_age;
        self
    }

    fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut SessionContext) -> R) -> R {
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(SessionContext::new);
        f(session)
    }

    pub fn increment_search_round(&self, session_id: &str) {
        self.with_session(session_id, |session| session.search_round += 1);
    }

    pub fn increment_url_read_round(&self, session_id: &str) {
        self.with_session(session_id, |session| session.url_read_round += 1);
    }

    /// Count the search and remember the normalized query. An already
    /// tracked query keeps its position in the rolling list.
    pub fn record_search(&self, session_id: &str, query: &str) {
        let normalized = normalize_session_query(query);
        self.with_session(session_id, |session| {
            session.total_searches += 1;
            if !session.searched_queries.contains(&normalized) {
                session.searched_queries.push_front(normalized);
                session.searched_queries.truncate(MAX_TRACKED_QUERIES);
            }
        });
    }

    pub fn record_url_read(&self, session_id: &str, url: &str) {
        self.with_session(session_id, |session| {
            session.total_urls_read += 1;
            if !session.read_urls.iter().any(|seen| seen == url) {
                session.read_urls.push_front(url.to_string());
                session.read_urls.truncate(MAX_TRACKED_URLS);
            }
        });
    }

    /// Store the serialized result text for a query in the global cache.
    pub fn cache_search_results(&self, query: &str, results: impl Into<String>) {
        let key = normalize_session_query(query);
        self.search_results_cache
            .write()
            .expect("cache lock poisoned")
            .insert(key, results.into());
    }

    /// Store the serialized page content for a URL in the global cache.
    pub fn cache_url_content(&self, url: &str, content: impl Into<String>) {
        self.url_content_cache
            .write()
            .expect("cache lock poisoned")
            .insert(url.to_string(), content.into());
    }

    /// Snapshot of the session's rolling state.
    pub fn context(&self, session_id: &str) -> SessionContext {
        self.with_session(session_id, |session| session.clone())
    }

    /// Human-readable search progress: round, total count and the most
    /// recent queries.
    pub fn search_context(&self, session_id: &str) -> String {
        self.with_session(session_id, |session| {
            let mut text = format!(
                "[Search progress] round {}, {} searches completed\n",
                session.search_round, session.total_searches
            );
            if !session.searched_queries.is_empty() {
                let recent: Vec<&str> = session
                    .searched_queries
                    .iter()
                    .take(5)
                    .map(String::as_str)
                    .collect();
                text.push_str(&format!("[Searched] {}", recent.join(", ")));
                if session.searched_queries.len() > 5 {
                    text.push_str(&format!(" (of {} total)", session.searched_queries.len()));
                }
            }
            text
        })
    }

    /// Human-readable reading progress: round, total count and the most
    /// recently read URLs.
    pub fn url_read_context(&self, session_id: &str) -> String {
        self.with_session(session_id, |session| {
            let mut text = format!(
                "[Reading progress] round {}, {} pages read\n",
                session.url_read_round, session.total_urls_read
            );
            if !session.read_urls.is_empty() {
                let recent: Vec<&str> = session
                    .read_urls
                    .iter()
                    .take(3)
                    .map(String::as_str)
                    .collect();
                text.push_str(&format!("[Read] {}", recent.join(", ")));
                if session.read_urls.len() > 3 {
                    text.push_str(&format!(" (of {} total)", session.read_urls.len()));
                }
            }
            text
        })
    }

    /// Short hint when the query literally overlaps (substring in either
    /// direction) a tracked query or URL. Empty string when nothing
    /// matches.
    pub fn cache_hint(&self, session_id: &str, query: &str) -> String {
        let normalized = query.trim().to_lowercase();
        self.with_session(session_id, |session| {
            let mut hints = Vec::new();
            if let Some(searched) = session
                .searched_queries
                .iter()
                .find(|searched| contains_either(searched, &normalized))
            {
                hints.push(format!("Previously searched a similar query: \"{searched}\""));
            }
            if session
                .read_urls
                .iter()
                .any(|url| contains_either(url, &normalized))
            {
                hints.push("Previously read a related page".to_string());
            }
            hints.join("\n")
        })
    }

    /// Like [`cache_hint`], additionally reporting the cached payload
    /// size from the global caches, and falling back to a Jaccard
    /// word-overlap signal (floor 0.6) over the three most recent
    /// queries when no substring match exists.
    ///
    /// [`cache_hint`]: SessionTracker::cache_hint
    pub fn detailed_cache_hint(&self, session_id: &str, query: &str) -> String {
        let normalized = query.trim().to_lowercase();
        let session = self.context(session_id);
        let mut hints = Vec::new();

        let found_search = session
            .searched_queries
            .iter()
            .find(|searched| contains_either(searched, &normalized));
        if let Some(searched) = found_search {
            hints.push(format!("Cached search results for \"{searched}\""));
            let cache = self.search_results_cache.read().expect("cache lock poisoned");
            if let Some(results) = cache.get(searched) {
                let count = results.split("\n\n").count();
                hints.push(format!("  -> {} results, {} chars", count, results.len()));
            }
        }

        let found_url = session
            .read_urls
            .iter()
            .find(|url| contains_either(url, &normalized));
        if let Some(url) = found_url {
            hints.push("Cached page content".to_string());
            let cache = self.url_content_cache.read().expect("cache lock poisoned");
            if let Some(content) = cache.get(url) {
                hints.push(format!("  -> {} chars", content.len()));
            }
        }

        if found_search.is_none() && found_url.is_none() {
            for searched in session.searched_queries.iter().take(3) {
                let similarity = jaccard_similarity(&normalized, searched);
                if similarity > 0.6 {
                    hints.push(format!(
                        "Related search history: \"{}\" ({:.0}% similar)",
                        searched,
                        similarity * 100.0
                    ));
                    break;
                }
            }
        }

        hints.join("\n")
    }

    /// Search progress, reading progress and the current cache hint in
    /// one block, empty sections omitted.
    pub fn combined_context(&self, session_id: &str) -> String {
        let parts = [
            self.search_context(session_id),
            self.url_read_context(session_id),
            self.cache_hint(session_id, ""),
        ];
        parts
            .iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn search_cache_status(&self) -> CacheStatus {
        self.search_results_cache
            .read()
            .expect("cache lock poisoned")
            .status()
    }

    pub fn url_cache_status(&self) -> CacheStatus {
        self.url_content_cache
            .read()
            .expect("cache lock poisoned")
            .status()
    }

    /// Drop the session's rolling state. The global caches are unaffected.
    pub fn reset_session(&self, session_id: &str) {
        self.sessions
            .write()
            .expect("session lock poisoned")
            .remove(session_id);
    }

    pub fn stats(&self, session_id: &str) -> SessionStats {
        let session = self.context(session_id);
        SessionStats {
            searches: session.total_searches,
            urls: session.total_urls_read,
            round: session.search_round,
            uptime: session.session_start_time.elapsed(),
            search_cache_size: self.search_cache_status().size,
            url_cache_size: self.url_cache_status().size,
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().expect("session lock poisoned").len()
    }

    /// Remove every session started longer ago than the max session age.
    /// Returns the number of sessions removed.
    pub fn sweep_expired(&self) -> usize {
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        let before = sessions.len();
        sessions.retain(|_, session| session.session_start_time.elapsed() <= self.max_session_age);
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = sessions.len(), "swept idle sessions");
        }
        removed
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_session_query(query: &str) -> String {
    query
        .trim()
        .to_lowercase()
        .chars()
        .take(SESSION_KEY_MAX_LEN)
        .collect()
}

fn contains_either(tracked: &str, query: &str) -> bool {
    tracked.contains(query) || query.contains(tracked)
}

/// Jaccard similarity over whitespace-tokenized word sets. 1.0 for equal
/// strings, 0.0 when either side is empty.
fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_lowercases_trims_and_caps() {
        assert_eq!(normalize_session_query("  Rust ASYNC  "), "rust async");
        let long = "x".repeat(200);
        assert_eq!(normalize_session_query(&long).chars().count(), 100);
    }

    #[test]
    fn jaccard_extremes() {
        assert_eq!(jaccard_similarity("rust tokio", "Rust Tokio"), 1.0);
        assert_eq!(jaccard_similarity("", "anything"), 0.0);
        assert_eq!(jaccard_similarity("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn jaccard_partial_overlap() {
        let similarity = jaccard_similarity("rust tokio runtime", "tokio runtime rust tuning");
        assert!((similarity - 0.75).abs() < 1e-9);
    }
}
