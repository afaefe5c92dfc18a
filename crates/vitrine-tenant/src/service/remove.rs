//! Deletion workflow
//!
//! Only the owning account may delete a tenant. Cache eviction happens
//! strictly after the directory delete commits; evicting first would let a
//! concurrent read repopulate the cache with a row that is about to
//! disappear, resurrecting a stale entry for a full TTL.

use sea_orm::DatabaseConnection;

use vitrine_common::{VitrineError, normalize_slug};
use vitrine_persistence::directory;

use crate::cache::TenantCache;

/// Delete the tenant claimed under `slug`, on behalf of `subject`
pub async fn remove(
    db: &DatabaseConnection,
    cache: &TenantCache,
    subject: &str,
    slug: &str,
) -> Result<(), VitrineError> {
    let slug = normalize_slug(slug);

    let account = directory::find_account_by_subject(db, subject)
        .await?
        .ok_or_else(|| VitrineError::AccountNotFound(subject.to_string()))?;

    let tenant = directory::find_tenant_by_slug(db, &slug)
        .await?
        .ok_or_else(|| VitrineError::TenantNotFound(slug.clone()))?;

    if tenant.owner_id != account.id {
        return Err(VitrineError::Forbidden(
            "only the owner can delete this site".to_string(),
        ));
    }

    directory::delete_tenant_cascade(db, tenant.id).await?;

    tracing::info!(slug = %tenant.slug, tenant_id = tenant.id, "tenant deleted");

    // After commit only.
    cache.evict_subdomain(&tenant.slug).await;
    cache.evict_portfolio(tenant.id).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use vitrine_persistence::entity::{account, tenant};

    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::snapshot::{SNAPSHOT_VERSION, TenantSnapshot};

    fn cache() -> TenantCache {
        TenantCache::new(Arc::new(MemoryCacheStore::default()), Duration::from_secs(60))
    }

    fn account_row(id: i64, subject: &str) -> account::Model {
        let now = chrono::Utc::now().naive_utc();
        account::Model {
            id,
            subject: subject.to_string(),
            name: None,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn tenant_row(id: i64, slug: &str, owner_id: i64) -> tenant::Model {
        let now = chrono::Utc::now().naive_utc();
        tenant::Model {
            id,
            slug: slug.to_string(),
            display_name: "Acme".to_string(),
            icon: None,
            owner_id,
            settings: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden_and_nothing_is_deleted() {
        // No exec results appended: any delete statement would fail the mock.
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![account_row(10, "sub-1")]])
            .append_query_results([vec![tenant_row(7, "acme", 99)]])
            .into_connection();

        let err = remove(&db, &cache(), "sub-1", "acme").await.unwrap_err();
        assert!(matches!(err, VitrineError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_unknown_tenant_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![account_row(10, "sub-1")]])
            .append_query_results([Vec::<tenant::Model>::new()])
            .into_connection();

        let err = remove(&db, &cache(), "sub-1", "ghost").await.unwrap_err();
        assert!(matches!(err, VitrineError::TenantNotFound(_)));
    }

    #[tokio::test]
    async fn test_owner_delete_evicts_cache_entries() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![account_row(10, "sub-1")]])
            .append_query_results([vec![tenant_row(7, "acme", 10)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let cache = cache();
        cache
            .put_snapshot(&TenantSnapshot {
                version: SNAPSHOT_VERSION,
                tenant_id: 7,
                slug: "acme".to_string(),
                display_name: "Acme".to_string(),
                icon: None,
                created_at: 0,
            })
            .await;

        remove(&db, &cache, "sub-1", "acme").await.unwrap();
        assert!(cache.get_snapshot("acme").await.is_none());
        assert!(cache.get_portfolio_view(7).await.is_none());
    }
}
