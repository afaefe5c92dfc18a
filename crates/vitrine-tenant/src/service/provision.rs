//! Provisioning workflow
//!
//! Stages: validating -> checking_uniqueness -> creating -> caching -> done.
//! The cache and directory pre-checks only reject early; the unique index
//! on `tenant.slug` is what actually serializes concurrent claims, and a
//! unique violation on insert surfaces as the same conflict error.

use sea_orm::DatabaseConnection;

use vitrine_common::{VitrineError, is_normalized_slug, is_valid_icon, normalize_slug};
use vitrine_persistence::{NewTenant, directory};

use crate::cache::TenantCache;
use crate::snapshot::{SNAPSHOT_VERSION, TenantSnapshot};

use super::SiteAddress;

/// Requested slug/icon/display-name triple
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ProvisionRequest {
    pub slug: String,
    pub icon: String,
    pub display_name: String,
}

/// Visible result of a completed provisioning run
#[derive(Clone, Debug, serde::Serialize)]
pub struct ProvisionOutcome {
    pub tenant_id: i64,
    pub slug: String,
    /// Public URL of the new site, `<protocol>://<slug>.<root-domain>`
    pub url: String,
}

fn validate(req: &ProvisionRequest) -> Result<(), VitrineError> {
    if req.slug.is_empty() || req.icon.is_empty() || req.display_name.is_empty() {
        return Err(VitrineError::Validation(
            "subdomain, icon, and display name are required".to_string(),
        ));
    }

    if !is_valid_icon(&req.icon) {
        return Err(VitrineError::Validation(
            "please enter a valid emoji (maximum 10 characters)".to_string(),
        ));
    }

    // The caller must submit an already-normalized slug; silently fixing
    // it up would claim a different name than the one requested.
    if normalize_slug(&req.slug) != req.slug {
        return Err(VitrineError::Validation(
            "subdomain can only have lowercase letters, numbers, and hyphens".to_string(),
        ));
    }
    if !is_normalized_slug(&req.slug) {
        return Err(VitrineError::Validation(
            "subdomain must be between 1 and 63 characters".to_string(),
        ));
    }

    Ok(())
}

/// Claim a subdomain for the authenticated subject and create its site
pub async fn provision(
    db: &DatabaseConnection,
    cache: &TenantCache,
    site: &SiteAddress,
    subject: &str,
    req: ProvisionRequest,
) -> Result<ProvisionOutcome, VitrineError> {
    // validating
    validate(&req)?;

    // The subject must already map to a profile row; provisioning never
    // auto-creates accounts.
    let account = directory::find_account_by_subject(db, subject)
        .await?
        .ok_or_else(|| VitrineError::AccountNotFound(subject.to_string()))?;

    // checking_uniqueness: optimistic pre-checks, cache then directory
    if cache.has_subdomain(&req.slug).await {
        return Err(VitrineError::SlugTaken(req.slug));
    }
    if directory::find_tenant_by_slug(db, &req.slug).await?.is_some() {
        return Err(VitrineError::SlugTaken(req.slug));
    }

    // creating: tenant + default portfolio, atomically; a concurrent
    // winner shows up here as a unique violation mapped to SlugTaken
    let tenant_id = directory::create_tenant_with_portfolio(
        db,
        NewTenant {
            slug: req.slug.clone(),
            display_name: req.display_name.clone(),
            icon: req.icon.clone(),
            owner_id: account.id,
        },
    )
    .await?;

    tracing::info!(slug = %req.slug, tenant_id, owner_id = account.id, "tenant provisioned");

    // caching: advisory
    let snapshot = TenantSnapshot {
        version: SNAPSHOT_VERSION,
        tenant_id,
        slug: req.slug.clone(),
        display_name: req.display_name,
        icon: Some(req.icon),
        created_at: chrono::Utc::now().timestamp_millis(),
    };
    cache.put_snapshot(&snapshot).await;

    // done
    Ok(ProvisionOutcome {
        tenant_id,
        url: site.tenant_url(&req.slug),
        slug: req.slug,
    })
}
