//! Key/value cache capability used for translation resolution and API
//! response caching.
//!
//! The cache is an injected capability rather than a process-wide global, so
//! the resolver can be exercised deterministically in tests with an
//! in-memory fake and swapped for an external store without touching
//! callers. Entries expire a fixed interval after insertion; there is no
//! sliding expiration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// String key/value store with per-entry TTL.
///
/// Implementations may be backed by an external store and are allowed to
/// fail; callers treat `get` failures as misses and log `set`/`delete`
/// failures without propagating them.
#[async_trait]
pub trait FaqCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache with lazy TTL expiry.
///
/// Expired entries are removed when read; there is no background sweeper.
#[derive(Default)]
pub struct MemoryCache {
    // RwLock allows concurrent readers while inserts take exclusive access.
    inner: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (possibly expired but unswept) entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl FaqCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Take a write lock so expired entries can be evicted in place.
        let mut guard = self.inner.write().await;
        if let Some(entry) = guard.get(key) {
            if Instant::now() >= entry.expires_at {
                guard.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        // Compute expiry once so reads only compare Instants.
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.inner.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.write().await.remove(key);
        Ok(())
    }
}
