use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Which entry goes first when a cache is over capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Evict the entry with the oldest insert/refresh time.
    OldestFirst,
    /// Evict the entry with the fewest successful reads.
    LeastHits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
}

#[derive(Debug)]
struct Entry<V> {
    data: V,
    stamp: Instant,
    hits: u64,
    /// Monotonic insert/refresh sequence, doubles as an ordering tiebreak.
    seq: u64,
}

/// Capacity- and TTL-bounded key/value store.
///
/// Expired entries are purged lazily on read; eviction under capacity
/// pressure follows the configured `EvictionPolicy`. An ordered side index
/// keyed by `(policy metric, seq)` keeps the victim lookup at O(log n)
/// instead of a full-map scan.
///
/// Not internally synchronized — tier wrappers put this behind a lock.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    /// (metric, seq) -> key, ascending; the first entry is the next victim.
    order: BTreeMap<(u64, u64), K>,
    /// key -> its current slot in `order`.
    slots: HashMap<K, (u64, u64)>,
    policy: EvictionPolicy,
    ttl: Duration,
    max_size: usize,
    next_seq: u64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(policy: EvictionPolicy, ttl: Duration, max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: BTreeMap::new(),
            slots: HashMap::new(),
            policy,
            ttl,
            max_size,
            next_seq: 0,
        }
    }

    fn metric(&self, entry: &Entry<V>) -> u64 {
        match self.policy {
            EvictionPolicy::OldestFirst => entry.seq,
            EvictionPolicy::LeastHits => entry.hits,
        }
    }

    fn reindex(&mut self, key: &K) {
        let entry = &self.entries[key];
        let slot = (self.metric(entry), entry.seq);
        if let Some(old) = self.slots.insert(key.clone(), slot) {
            self.order.remove(&old);
        }
        self.order.insert(slot, key.clone());
    }

    fn remove(&mut self, key: &K) {
        if self.entries.remove(key).is_some() {
            if let Some(slot) = self.slots.remove(key) {
                self.order.remove(&slot);
            }
        }
    }

    /// Look up `key`. Expired entries are deleted and reported as a miss;
    /// a hit bumps the entry's read count.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            None => None,
            Some(entry) if entry.stamp.elapsed() > self.ttl => {
                self.remove(key);
                None
            }
            Some(_) => {
                let entry = self.entries.get_mut(key).expect("present");
                entry.hits += 1;
                let data = entry.data.clone();
                self.reindex(key);
                Some(data)
            }
        }
    }

    /// Insert or overwrite. Overwriting refreshes the timestamp and bumps
    /// the hit count; inserting evicts per policy until below capacity.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.data = value;
            entry.stamp = Instant::now();
            entry.hits += 1;
            entry.seq = self.next_seq;
            self.next_seq += 1;
            self.reindex(&key);
            return;
        }

        while self.entries.len() >= self.max_size {
            if !self.evict_one() {
                break;
            }
        }

        if self.entries.len() < self.max_size {
            let entry = Entry {
                data: value,
                stamp: Instant::now(),
                hits: match self.policy {
                    // A fresh entry starts with the write counted, so it is
                    // not automatically the next eviction victim.
                    EvictionPolicy::LeastHits => 1,
                    EvictionPolicy::OldestFirst => 0,
                },
                seq: self.next_seq,
            };
            self.next_seq += 1;
            self.entries.insert(key.clone(), entry);
            self.reindex(&key);
        }
    }

    fn evict_one(&mut self) -> bool {
        match self.order.pop_first() {
            Some((_, key)) => {
                self.slots.remove(&key);
                self.entries.remove(&key);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.slots.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            max_size: self.max_size,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, e)| (k, &e.data))
    }

    pub fn total_hits(&self) -> u64 {
        self.entries.values().map(|e| e.hits).sum()
    }
}
