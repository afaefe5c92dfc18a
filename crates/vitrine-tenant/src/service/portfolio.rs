//! Portfolio mutations with cache invalidation
//!
//! This is the write-then-invalidate path: the directory update commits
//! first, then both cache keys for the tenant are evicted. Eviction is
//! attempted even when it fails; staleness after an explicit edit is
//! bounded by the TTL either way.

use sea_orm::DatabaseConnection;

use vitrine_common::VitrineError;
use vitrine_persistence::entity::{portfolio, tenant};
use vitrine_persistence::{PortfolioPatch, directory, portfolio_store};

use crate::cache::TenantCache;

/// Load a portfolio and verify the subject owns its tenant
async fn load_owned(
    db: &DatabaseConnection,
    subject: &str,
    portfolio_id: i64,
) -> Result<(portfolio::Model, tenant::Model), VitrineError> {
    let account = directory::find_account_by_subject(db, subject)
        .await?
        .ok_or_else(|| VitrineError::AccountNotFound(subject.to_string()))?;

    let row = portfolio_store::find_by_id(db, portfolio_id)
        .await?
        .ok_or(VitrineError::PortfolioNotFound(portfolio_id))?;

    let tenant = directory::find_tenant_by_id(db, row.tenant_id)
        .await?
        .ok_or_else(|| VitrineError::TenantNotFound(row.tenant_id.to_string()))?;

    if tenant.owner_id != account.id {
        return Err(VitrineError::Forbidden(
            "only the owner can edit this portfolio".to_string(),
        ));
    }

    Ok((row, tenant))
}

/// Fetch a portfolio for its owner's editor
pub async fn fetch(
    db: &DatabaseConnection,
    subject: &str,
    portfolio_id: i64,
) -> Result<portfolio::Model, VitrineError> {
    let (row, _tenant) = load_owned(db, subject, portfolio_id).await?;
    Ok(row)
}

/// Apply a partial update and invalidate the tenant's cache entries
pub async fn update(
    db: &DatabaseConnection,
    cache: &TenantCache,
    subject: &str,
    portfolio_id: i64,
    patch: PortfolioPatch,
) -> Result<portfolio::Model, VitrineError> {
    let (row, tenant) = load_owned(db, subject, portfolio_id).await?;

    let updated = portfolio_store::apply_patch(db, row, patch).await?;

    tracing::debug!(portfolio_id, tenant_id = tenant.id, "portfolio updated");

    cache.evict_subdomain(&tenant.slug).await;
    cache.evict_portfolio(tenant.id).await;

    Ok(updated)
}

/// Delete a portfolio and invalidate the tenant's cache entries
pub async fn remove(
    db: &DatabaseConnection,
    cache: &TenantCache,
    subject: &str,
    portfolio_id: i64,
) -> Result<(), VitrineError> {
    let (row, tenant) = load_owned(db, subject, portfolio_id).await?;

    portfolio_store::delete(db, row.id).await?;

    tracing::debug!(portfolio_id, tenant_id = tenant.id, "portfolio deleted");

    cache.evict_subdomain(&tenant.slug).await;
    cache.evict_portfolio(tenant.id).await;

    Ok(())
}
