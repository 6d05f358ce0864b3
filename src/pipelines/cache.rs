use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::sentiment::Prediction;

// Bounded LRU keyed by normalized text. A racing miss on the same key computes twice and
// the later insert wins; entries are never partially written.
type CacheStorage = LruCache<String, Prediction>;

/// Normalize text into its cache key: trimmed and lower-cased.
pub fn cache_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Thread-safe text → prediction cache shared by all requests.
pub struct ResultCache {
    cache: Option<Mutex<CacheStorage>>,
}

impl ResultCache {
    /// Create a cache holding at most `capacity` entries. A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, CacheStorage>> {
        self.cache
            .as_ref()
            .map(|cache| cache.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Look up a prediction, marking it most recently used.
    pub fn get(&self, key: &str) -> Option<Prediction> {
        self.lock()?.get(key).cloned()
    }

    /// Store a prediction, evicting the least recently used entry when full.
    pub fn insert(&self, key: String, prediction: Prediction) {
        if let Some(mut cache) = self.lock() {
            cache.put(key, prediction);
        }
    }

    /// Whether caching is enabled at all.
    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Drop every cached prediction.
    pub fn clear(&self) {
        if let Some(mut cache) = self.lock() {
            cache.clear();
        }
    }

    /// Number of cached predictions. Always zero when disabled.
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |cache| cache.len())
    }

    /// Whether no predictions are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_CAPACITY)
    }
}
