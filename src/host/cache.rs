use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// The host's themes-scoped object cache.
///
/// The loader's contract with it is delete-then-repopulate under a TTL.
/// Concurrent requests may race on the same key; last writer wins, which
/// is tolerable because the merged listing is idempotent and TTL-bounded.
pub trait ThemeCache {
    fn delete(&mut self, key: &str);

    /// Add an entry if the key is not already live. Mirrors the host
    /// cache's add semantics: an existing live entry is left untouched.
    fn add(&mut self, key: &str, listing: BTreeMap<PathBuf, String>, ttl: Duration);

    fn get(&self, key: &str) -> Option<BTreeMap<PathBuf, String>>;
}

/// In-memory [`ThemeCache`] for tests and embedded hosts.
#[derive(Debug, Default)]
pub struct MemoryThemeCache {
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    stored_at: Instant,
    ttl: Duration,
    listing: BTreeMap<PathBuf, String>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

impl MemoryThemeCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeCache for MemoryThemeCache {
    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn add(&mut self, key: &str, listing: BTreeMap<PathBuf, String>, ttl: Duration) {
        let live = self.entries.get(key).is_some_and(|e| !e.is_expired());
        if live {
            return;
        }
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                ttl,
                listing,
            },
        );
    }

    fn get(&self, key: &str) -> Option<BTreeMap<PathBuf, String>> {
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            return None;
        }
        Some(entry.listing.clone())
    }
}
