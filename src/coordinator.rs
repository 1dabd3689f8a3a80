//! Read-through coordination between the in-memory [`LinkCache`] and the
//! backing [`UrlStore`].
//!
//! Writes go to the store first and to the cache only once the store has
//! accepted them. Reads try the cache and fall back to the store, copying a
//! store hit into the cache. Listings always come from the store.

use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    cache::LinkCache,
    db::UrlStore,
    error::{ShortenError, StoreError},
    models::UrlMapping,
};

/// Keys that would be shadowed by a fixed route and so could never redirect.
pub const RESERVED_KEYS: &[&str] = &["add", "health", "shorten", "urls"];

pub struct Coordinator {
    cache: LinkCache,
    store: Arc<dyn UrlStore>,
    store_timeout: Duration,
}

impl Coordinator {
    pub fn new(store: Arc<dyn UrlStore>, store_timeout: Duration) -> Self {
        Self {
            cache: LinkCache::new(),
            store,
            store_timeout,
        }
    }

    pub fn cache(&self) -> &LinkCache {
        &self.cache
    }

    /// Register `short_key` → `original_url`.
    ///
    /// Both values are trimmed. A key already in the cache is rejected
    /// without touching the store; a key the store already holds is rejected
    /// by its primary key. Either way the caller sees
    /// [`ShortenError::DuplicateKey`] and nothing is cached.
    pub async fn create(
        &self,
        short_key: &str,
        original_url: &str,
    ) -> Result<UrlMapping, ShortenError> {
        let original_url = original_url.trim();
        if original_url.is_empty() {
            return Err(ShortenError::BadInput("URL parameter is missing".into()));
        }

        let short_key = short_key.trim();
        if short_key.is_empty() {
            return Err(ShortenError::BadInput("Shortkey parameter is missing".into()));
        }
        if short_key.contains('/') {
            return Err(ShortenError::BadInput("Shortkey may not contain '/'".into()));
        }
        if RESERVED_KEYS.contains(&short_key) {
            return Err(ShortenError::BadInput(format!("shortkey {short_key} is reserved.")));
        }

        if self.cache.contains(short_key) {
            tracing::warn!("Rejected duplicate short key '{}' (cached)", short_key);
            return Err(ShortenError::DuplicateKey(short_key.to_owned()));
        }

        match self.bounded(self.store.insert(short_key, original_url)).await {
            Ok(()) => {}
            Err(StoreError::Duplicate(key)) => {
                tracing::warn!("Rejected duplicate short key '{}' (stored)", key);
                return Err(ShortenError::DuplicateKey(key));
            }
            Err(e) => {
                tracing::error!("Failed to store short key '{}': {:?}", short_key, e);
                return Err(e.into());
            }
        }

        self.cache.set(short_key, original_url);
        tracing::info!("Created short key '{}' -> {}", short_key, original_url);

        Ok(UrlMapping::new(short_key, original_url))
    }

    /// Look up the original URL for `short_key`.
    pub async fn resolve(&self, short_key: &str) -> Result<String, ShortenError> {
        if short_key.is_empty() {
            return Err(ShortenError::BadInput("Shortened key is missing".into()));
        }

        if let Some(url) = self.cache.get(short_key) {
            tracing::debug!("Cache hit for '{}'", short_key);
            return Ok(url);
        }

        tracing::debug!("Cache miss for '{}'", short_key);
        match self.bounded(self.store.find(short_key)).await {
            Ok(Some(url)) => {
                // Backfill the cache for next time
                self.cache.set(short_key, url.clone());
                Ok(url)
            }
            Ok(None) => Err(ShortenError::NotFound(short_key.to_owned())),
            Err(e) => {
                tracing::error!("Store error looking up short key '{}': {:?}", short_key, e);
                Err(e.into())
            }
        }
    }

    /// Every mapping the store holds. The cache is not consulted.
    pub async fn list_all(&self) -> Result<Vec<UrlMapping>, ShortenError> {
        self.bounded(self.store.list()).await.map_err(|e| {
            tracing::error!("Failed to list URLs: {:?}", e);
            ShortenError::Store(e)
        })
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(self.store_timeout))?
    }
}
