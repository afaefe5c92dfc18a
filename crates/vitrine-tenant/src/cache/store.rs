//! Cache store abstraction and the in-process moka implementation
//!
//! The store holds opaque string values under string keys with an optional
//! per-entry TTL. It is never a source of truth: callers treat read errors
//! as a miss and write errors as a no-op. The trait seam exists so a remote
//! store can be injected without touching the services.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use vitrine_common::VitrineError;

/// Key-value cache with optional per-entry TTL
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, VitrineError>;

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), VitrineError>;

    async fn delete(&self, key: &str) -> Result<(), VitrineError>;
}

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Option<Duration>,
}

/// Expiry policy reading the TTL recorded on each entry
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        entry.ttl
    }
}

/// In-process cache store backed by moka
pub struct MemoryCacheStore {
    inner: Cache<String, Entry>,
}

impl MemoryCacheStore {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new(100_000)
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, VitrineError> {
        Ok(self.inner.get(key).await.map(|entry| entry.value))
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), VitrineError> {
        self.inner
            .insert(key.to_string(), Entry { value, ttl })
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), VitrineError> {
        self.inner.invalidate(key).await;
        Ok(())
    }
}
