//! Versioned cache payloads
//!
//! Cache values carry an explicit schema version and are shape-checked on
//! decode. A stale entry written by a prior schema fails closed to the
//! directory fallback instead of surfacing malformed data.

use serde::{Deserialize, Serialize};

use vitrine_persistence::MediaFile;
use vitrine_persistence::entity::{portfolio, tenant};

/// Current schema version for cache payloads
pub const SNAPSHOT_VERSION: u32 = 1;

/// Canonical projection of a tenant, cached under `subdomain:<slug>`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TenantSnapshot {
    pub version: u32,
    pub tenant_id: i64,
    pub slug: String,
    pub display_name: String,
    pub icon: Option<String>,
    /// Creation time as epoch milliseconds
    pub created_at: i64,
}

impl TenantSnapshot {
    pub fn from_tenant(tenant: &tenant::Model) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            tenant_id: tenant.id,
            slug: tenant.slug.clone(),
            display_name: tenant.display_name.clone(),
            icon: tenant.icon.clone(),
            created_at: tenant.created_at.and_utc().timestamp_millis(),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode and shape-check a cached payload; any mismatch is a miss
    pub fn decode(raw: &str) -> Option<Self> {
        let snapshot: Self = serde_json::from_str(raw).ok()?;
        if snapshot.version != SNAPSHOT_VERSION
            || snapshot.slug.is_empty()
            || snapshot.display_name.is_empty()
        {
            return None;
        }
        Some(snapshot)
    }
}

/// Published-portfolio projection, cached under `portfolio:tenant:<id>`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioView {
    pub version: u32,
    pub portfolio_id: i64,
    pub tenant_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub media_files: Vec<MediaFile>,
    /// Last update as epoch milliseconds
    pub updated_at: i64,
}

impl PortfolioView {
    pub fn from_portfolio(row: &portfolio::Model) -> Self {
        let media_files = row
            .media_files
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        Self {
            version: SNAPSHOT_VERSION,
            portfolio_id: row.id,
            tenant_id: row.tenant_id,
            title: row.title.clone(),
            content: row.content.clone(),
            media_files,
            updated_at: row.updated_at.and_utc().timestamp_millis(),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let view: Self = serde_json::from_str(raw).ok()?;
        if view.version != SNAPSHOT_VERSION || view.portfolio_id <= 0 {
            return None;
        }
        Some(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> TenantSnapshot {
        TenantSnapshot {
            version: SNAPSHOT_VERSION,
            tenant_id: 7,
            slug: "acme".to_string(),
            display_name: "Acme".to_string(),
            icon: Some("🎨".to_string()),
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let encoded = snapshot().encode().unwrap();
        assert_eq!(TenantSnapshot::decode(&encoded), Some(snapshot()));
    }

    #[test]
    fn test_stale_version_fails_closed() {
        let mut stale = snapshot();
        stale.version = SNAPSHOT_VERSION + 1;
        let encoded = stale.encode().unwrap();
        assert_eq!(TenantSnapshot::decode(&encoded), None);
    }

    #[test]
    fn test_partial_payload_fails_closed() {
        // Missing required fields from a prior schema version.
        assert_eq!(
            TenantSnapshot::decode(r#"{"version":1,"slug":"acme"}"#),
            None
        );
        // Present but empty required field.
        assert_eq!(
            TenantSnapshot::decode(
                r#"{"version":1,"tenant_id":7,"slug":"","display_name":"Acme","icon":null,"created_at":0}"#
            ),
            None
        );
        // Not JSON at all.
        assert_eq!(TenantSnapshot::decode("not json"), None);
    }

    #[test]
    fn test_portfolio_view_tolerates_bad_media_json() {
        let now = chrono::Utc::now().naive_utc();
        let row = portfolio::Model {
            id: 3,
            tenant_id: 7,
            title: "Acme".to_string(),
            description: None,
            content: Some("hello".to_string()),
            published: true,
            media_files: Some("{broken".to_string()),
            created_at: now,
            updated_at: now,
        };
        let view = PortfolioView::from_portfolio(&row);
        assert!(view.media_files.is_empty());
        assert_eq!(view.content.as_deref(), Some("hello"));
    }
}
