//! Application state shared across all handlers
//!
//! The state is assembled once in `main` (the composition root) and
//! injected into handlers; there are no module-level client singletons.

use sea_orm::DatabaseConnection;

use vitrine_tenant::{SiteAddress, TenantCache};

use super::config::Configuration;

pub struct AppState {
    pub configuration: Configuration,
    /// Tenant Directory connection (source of truth)
    pub db: DatabaseConnection,
    /// Read-through cache over tenant projections
    pub cache: TenantCache,
    /// Public protocol/root-domain for building tenant URLs
    pub site: SiteAddress,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field("db", &"<DatabaseConnection>")
            .field("cache", &"<TenantCache>")
            .field("site", &self.site)
            .finish()
    }
}
