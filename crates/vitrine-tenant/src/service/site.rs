//! Tenant site page assembly
//!
//! Produces the data the (external) page renderer consumes: the tenant
//! snapshot plus its published portfolio, both served read-through.

use sea_orm::DatabaseConnection;
use serde::Serialize;

use vitrine_common::VitrineError;
use vitrine_persistence::portfolio_store;

use crate::cache::TenantCache;
use crate::snapshot::{PortfolioView, TenantSnapshot};

use super::resolve;

/// Everything a tenant page render needs
#[derive(Clone, Debug, Serialize)]
pub struct SitePage {
    pub tenant: TenantSnapshot,
    /// Absent when the tenant has no published portfolio
    pub portfolio: Option<PortfolioView>,
}

/// Assemble the page data for a tenant slug
pub async fn site_page(
    db: &DatabaseConnection,
    cache: &TenantCache,
    slug: &str,
) -> Result<SitePage, VitrineError> {
    let tenant = resolve::resolve(db, cache, slug).await?;

    let portfolio = match cache.get_portfolio_view(tenant.tenant_id).await {
        Some(view) => Some(view),
        None => {
            let row = portfolio_store::find_published_by_tenant(db, tenant.tenant_id).await?;
            match row {
                Some(row) => {
                    let view = PortfolioView::from_portfolio(&row);
                    cache.put_portfolio_view(&view).await;
                    Some(view)
                }
                None => None,
            }
        }
    };

    Ok(SitePage { tenant, portfolio })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use sea_orm::{DatabaseBackend, MockDatabase};

    use vitrine_persistence::entity::{portfolio, tenant};

    use super::*;
    use crate::cache::MemoryCacheStore;

    fn cache() -> TenantCache {
        TenantCache::new(Arc::new(MemoryCacheStore::default()), Duration::from_secs(60))
    }

    fn tenant_row() -> tenant::Model {
        let now = chrono::Utc::now().naive_utc();
        tenant::Model {
            id: 7,
            slug: "acme".to_string(),
            display_name: "Acme".to_string(),
            icon: None,
            owner_id: 10,
            settings: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn portfolio_row() -> portfolio::Model {
        let now = chrono::Utc::now().naive_utc();
        portfolio::Model {
            id: 3,
            tenant_id: 7,
            title: "Acme".to_string(),
            description: None,
            content: Some("hello".to_string()),
            published: true,
            media_files: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_site_page_caches_portfolio_view() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![tenant_row()]])
            .append_query_results([vec![portfolio_row()]])
            .into_connection();
        let cache = cache();

        let page = site_page(&db, &cache, "acme").await.unwrap();
        assert_eq!(page.tenant.slug, "acme");
        assert_eq!(
            page.portfolio.as_ref().and_then(|p| p.content.as_deref()),
            Some("hello")
        );

        // Second assembly is served entirely from cache; the mock has no
        // query results left.
        let again = site_page(&db, &cache, "acme").await.unwrap();
        assert_eq!(again.portfolio.map(|p| p.portfolio_id), Some(3));
    }

    #[tokio::test]
    async fn test_site_page_without_published_portfolio() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![tenant_row()]])
            .append_query_results([Vec::<portfolio::Model>::new()])
            .into_connection();

        let page = site_page(&db, &cache(), "acme").await.unwrap();
        assert!(page.portfolio.is_none());
    }
}
