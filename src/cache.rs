use dashmap::DashMap;
use std::sync::Arc;

/// Thread-safe in-memory cache mapping short_key -> original_url.
///
/// Backed by a DashMap so every read and write runs under the owning shard's
/// lock. The cache only ever holds a subset of the store's rows: entries are
/// added when a link is created and when a lookup misses and the store
/// answers. Nothing is ever evicted.
#[derive(Clone, Debug)]
pub struct LinkCache {
    inner: Arc<DashMap<String, String>>,
}

impl LinkCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Insert a mapping.
    pub fn set(&self, short_key: impl Into<String>, original_url: impl Into<String>) {
        self.inner.insert(short_key.into(), original_url.into());
    }

    /// Look up a short key. Returns a clone of the original URL if present.
    pub fn get(&self, short_key: &str) -> Option<String> {
        self.inner.get(short_key).map(|v| v.clone())
    }

    pub fn contains(&self, short_key: &str) -> bool {
        self.inner.contains_key(short_key)
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for LinkCache {
    fn default() -> Self {
        Self::new()
    }
}
