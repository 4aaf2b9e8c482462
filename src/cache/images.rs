//! Converted-image cache with LRU eviction.
//!
//! Keeps PNG output of the proxy in memory, keyed by source URL, so a client
//! that redisplays the same descriptors does not refetch them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Maximum number of images to keep in cache.
pub const DEFAULT_MAX_ENTRIES: usize = 64;

/// Image cache with LRU eviction policy.
pub struct ImageCache {
    /// PNG bytes indexed by source URL.
    images: HashMap<String, CacheEntry>,
    /// Maximum number of entries to keep.
    max_entries: usize,
}

/// A cached image with access timestamp.
struct CacheEntry {
    png: Arc<Vec<u8>>,
    last_accessed: Instant,
}

impl ImageCache {
    /// Creates a new cache with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Creates a new cache with specified capacity. Zero disables caching.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            images: HashMap::new(),
            max_entries,
        }
    }

    /// Returns the image for `url`, updating its access time.
    pub fn get(&mut self, url: &str) -> Option<Arc<Vec<u8>>> {
        let entry = self.images.get_mut(url)?;
        entry.last_accessed = Instant::now();
        Some(Arc::clone(&entry.png))
    }

    /// Inserts an image into the cache.
    ///
    /// If the cache is full, the least recently used entry is evicted first.
    pub fn put(&mut self, url: impl Into<String>, png: Arc<Vec<u8>>) {
        if self.max_entries == 0 {
            return;
        }

        let url = url.into();
        if self.images.len() >= self.max_entries && !self.images.contains_key(&url) {
            self.evict_lru();
        }

        self.images.insert(
            url,
            CacheEntry {
                png,
                last_accessed: Instant::now(),
            },
        );
    }

    pub fn contains(&self, url: &str) -> bool {
        self.images.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Evicts the least recently used entry, returning its URL.
    fn evict_lru(&mut self) -> Option<String> {
        let oldest = self
            .images
            .iter()
            .min_by_key(|(_, entry)| entry.last_accessed)
            .map(|(k, _)| k.clone())?;

        self.images.remove(&oldest);
        Some(oldest)
    }

    /// Clears all entries from the cache.
    pub fn clear(&mut self) {
        self.images.clear();
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}
