//! Tenant listings for the landing page and dashboard

use sea_orm::DatabaseConnection;
use serde::Serialize;

use vitrine_common::VitrineError;
use vitrine_persistence::directory;
use vitrine_persistence::entity::tenant;

/// Fallback icon for tenants that never set one
const DEFAULT_ICON: &str = "📄";

/// Listing row for a tenant
#[derive(Clone, Debug, Serialize)]
pub struct TenantSummary {
    pub tenant_id: i64,
    pub slug: String,
    pub display_name: String,
    pub icon: String,
    /// Creation time as epoch milliseconds
    pub created_at: i64,
}

impl From<tenant::Model> for TenantSummary {
    fn from(row: tenant::Model) -> Self {
        Self {
            tenant_id: row.id,
            display_name: row.display_name,
            icon: row.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            created_at: row.created_at.and_utc().timestamp_millis(),
            slug: row.slug,
        }
    }
}

/// All tenants, newest first
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<TenantSummary>, VitrineError> {
    let rows = directory::list_tenants(db).await?;
    Ok(rows.into_iter().map(TenantSummary::from).collect())
}

/// The authenticated subject's tenants, newest first
pub async fn list_for_owner(
    db: &DatabaseConnection,
    subject: &str,
) -> Result<Vec<TenantSummary>, VitrineError> {
    let account = directory::find_account_by_subject(db, subject)
        .await?
        .ok_or_else(|| VitrineError::AccountNotFound(subject.to_string()))?;

    let rows = directory::list_tenants_by_owner(db, account.id).await?;
    Ok(rows.into_iter().map(TenantSummary::from).collect())
}
