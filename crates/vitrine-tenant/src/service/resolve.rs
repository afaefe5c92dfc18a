//! Tenant resolution (read path)
//!
//! `resolve` is the dominant read path: cache first, directory on miss,
//! best-effort repopulation. It is idempotent and safe to call
//! concurrently; the cache write is advisory.

use sea_orm::DatabaseConnection;

use vitrine_common::{VitrineError, normalize_slug};
use vitrine_persistence::directory;

use crate::cache::TenantCache;
use crate::snapshot::TenantSnapshot;

/// Resolve a slug to its canonical tenant snapshot
pub async fn resolve(
    db: &DatabaseConnection,
    cache: &TenantCache,
    slug: &str,
) -> Result<TenantSnapshot, VitrineError> {
    let slug = normalize_slug(slug);
    if slug.is_empty() {
        return Err(VitrineError::TenantNotFound(slug));
    }

    if let Some(snapshot) = cache.get_snapshot(&slug).await {
        return Ok(snapshot);
    }

    let tenant = directory::find_tenant_by_slug(db, &slug)
        .await?
        .ok_or_else(|| VitrineError::TenantNotFound(slug.clone()))?;

    let snapshot = TenantSnapshot::from_tenant(&tenant);
    cache.put_snapshot(&snapshot).await;

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use sea_orm::{DatabaseBackend, MockDatabase};

    use vitrine_persistence::entity::tenant;

    use super::*;
    use crate::cache::MemoryCacheStore;

    fn cache() -> TenantCache {
        TenantCache::new(Arc::new(MemoryCacheStore::default()), Duration::from_secs(60))
    }

    fn tenant_row(slug: &str) -> tenant::Model {
        let now = chrono::Utc::now().naive_utc();
        tenant::Model {
            id: 7,
            slug: slug.to_string(),
            display_name: "Acme".to_string(),
            icon: Some("🎨".to_string()),
            owner_id: 10,
            settings: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_miss_falls_back_to_directory_and_populates_cache() {
        // Exactly one query result: a second directory lookup would fail.
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![tenant_row("acme")]])
            .into_connection();
        let cache = cache();

        let first = resolve(&db, &cache, "acme").await.unwrap();
        assert_eq!(first.slug, "acme");
        assert_eq!(first.display_name, "Acme");

        // Served from cache now; the mock has no results left.
        let second = resolve(&db, &cache, "acme").await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<tenant::Model>::new()])
            .into_connection();

        let err = resolve(&db, &cache(), "ghost").await.unwrap_err();
        assert!(matches!(err, VitrineError::TenantNotFound(_)));
    }

    #[tokio::test]
    async fn test_input_is_sanitized_before_lookup() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![tenant_row("acme")]])
            .into_connection();
        let cache = cache();

        // Mixed case and stray characters on the read path are sanitized,
        // not rejected.
        let snapshot = resolve(&db, &cache, "AcMe!").await.unwrap();
        assert_eq!(snapshot.slug, "acme");
    }

    #[tokio::test]
    async fn test_empty_candidate_is_not_found_without_io() {
        let db = MockDatabase::new(DatabaseBackend::MySql).into_connection();
        let err = resolve(&db, &cache(), "!!!").await.unwrap_err();
        assert!(matches!(err, VitrineError::TenantNotFound(_)));
    }
}
