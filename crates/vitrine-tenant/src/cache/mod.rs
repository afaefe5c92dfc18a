//! Read-through cache over tenant and portfolio projections
//!
//! `TenantCache` wraps an injected `CacheStore` with the application's key
//! scheme, TTL, envelope validation, and failure policy: reads degrade to
//! a miss, writes and evictions are best-effort and never propagate.

pub mod retry;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use vitrine_common::{portfolio_key, subdomain_key};

use crate::snapshot::{PortfolioView, TenantSnapshot};

pub use store::{CacheStore, MemoryCacheStore};

/// Default TTL for cached projections (one hour)
pub const DEFAULT_TTL_SECONDS: u64 = 3_600;

#[derive(Clone)]
pub struct TenantCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl TenantCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Fetch a tenant snapshot; errors and invalid payloads are a miss
    pub async fn get_snapshot(&self, slug: &str) -> Option<TenantSnapshot> {
        let key = subdomain_key(slug);
        match retry::with_retry("get", || self.store.get(&key)).await {
            Ok(Some(raw)) => {
                let decoded = TenantSnapshot::decode(&raw);
                if decoded.is_none() {
                    tracing::debug!(key, "discarding cache entry with invalid shape");
                }
                decoded
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "cache read failed, falling back to directory");
                None
            }
        }
    }

    /// Whether any entry exists under the slug's key, valid or not.
    ///
    /// Used only as an optimistic pre-check during provisioning; the
    /// directory remains the arbiter.
    pub async fn has_subdomain(&self, slug: &str) -> bool {
        let key = subdomain_key(slug);
        matches!(
            retry::with_retry("get", || self.store.get(&key)).await,
            Ok(Some(_))
        )
    }

    /// Best-effort snapshot write with TTL
    pub async fn put_snapshot(&self, snapshot: &TenantSnapshot) {
        let key = subdomain_key(&snapshot.slug);
        let raw = match snapshot.encode() {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key, error = %err, "snapshot encoding failed, skipping cache write");
                return;
            }
        };
        if let Err(err) =
            retry::with_retry("set", || self.store.set(&key, raw.clone(), Some(self.ttl))).await
        {
            tracing::warn!(key, error = %err, "cache write failed");
        }
    }

    /// Fetch a portfolio view; errors and invalid payloads are a miss
    pub async fn get_portfolio_view(&self, tenant_id: i64) -> Option<PortfolioView> {
        let key = portfolio_key(tenant_id);
        match retry::with_retry("get", || self.store.get(&key)).await {
            Ok(Some(raw)) => {
                let decoded = PortfolioView::decode(&raw);
                if decoded.is_none() {
                    tracing::debug!(key, "discarding cache entry with invalid shape");
                }
                decoded
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "cache read failed, falling back to directory");
                None
            }
        }
    }

    /// Best-effort portfolio view write with TTL
    pub async fn put_portfolio_view(&self, view: &PortfolioView) {
        let key = portfolio_key(view.tenant_id);
        let raw = match view.encode() {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key, error = %err, "view encoding failed, skipping cache write");
                return;
            }
        };
        if let Err(err) =
            retry::with_retry("set", || self.store.set(&key, raw.clone(), Some(self.ttl))).await
        {
            tracing::warn!(key, error = %err, "cache write failed");
        }
    }

    /// Best-effort eviction of the snapshot key
    pub async fn evict_subdomain(&self, slug: &str) {
        self.evict(&subdomain_key(slug)).await;
    }

    /// Best-effort eviction of the portfolio view key
    pub async fn evict_portfolio(&self, tenant_id: i64) {
        self.evict(&portfolio_key(tenant_id)).await;
    }

    async fn evict(&self, key: &str) {
        if let Err(err) = retry::with_retry("delete", || self.store.delete(key)).await {
            // Serving stale data after an explicit edit is worse than a
            // transient cache error; staleness stays bounded by the TTL.
            tracing::warn!(key, error = %err, "cache eviction failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SNAPSHOT_VERSION;

    fn cache() -> TenantCache {
        TenantCache::new(
            Arc::new(MemoryCacheStore::default()),
            Duration::from_secs(DEFAULT_TTL_SECONDS),
        )
    }

    fn snapshot(slug: &str) -> TenantSnapshot {
        TenantSnapshot {
            version: SNAPSHOT_VERSION,
            tenant_id: 7,
            slug: slug.to_string(),
            display_name: "Acme".to_string(),
            icon: None,
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn test_put_get_evict_snapshot() {
        let cache = cache();
        cache.put_snapshot(&snapshot("acme")).await;
        assert_eq!(
            cache.get_snapshot("acme").await.map(|s| s.slug),
            Some("acme".to_string())
        );
        assert!(cache.has_subdomain("acme").await);

        cache.evict_subdomain("acme").await;
        assert!(cache.get_snapshot("acme").await.is_none());
        assert!(!cache.has_subdomain("acme").await);
    }

    #[tokio::test]
    async fn test_invalid_shape_reads_as_miss_but_blocks_claim() {
        let store: Arc<dyn CacheStore> = Arc::new(MemoryCacheStore::default());
        let cache = TenantCache::new(store.clone(), Duration::from_secs(60));

        store
            .set(
                &subdomain_key("acme"),
                r#"{"version":99,"slug":"acme"}"#.to_string(),
                None,
            )
            .await
            .unwrap();

        // Read path fails closed to the directory.
        assert!(cache.get_snapshot("acme").await.is_none());
        // The uniqueness pre-check still sees the key as occupied.
        assert!(cache.has_subdomain("acme").await);
    }
}
