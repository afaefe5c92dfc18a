//! Tenant service layer
//!
//! Services are free functions over `&DatabaseConnection` plus the injected
//! `TenantCache`, constructed at the composition root (no ambient globals).

pub mod listing;
pub mod portfolio;
pub mod provision;
pub mod remove;
pub mod resolve;
pub mod site;

/// Public address parameters of the deployment, used to build tenant URLs
#[derive(Clone, Debug)]
pub struct SiteAddress {
    /// `http` outside production, `https` in production
    pub protocol: String,
    /// Apex domain tenants hang off of, e.g. `example.com`
    pub root_domain: String,
}

impl SiteAddress {
    pub fn new(protocol: impl Into<String>, root_domain: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            root_domain: root_domain.into(),
        }
    }

    /// Public URL of a tenant's site
    pub fn tenant_url(&self, slug: &str) -> String {
        format!("{}://{}.{}", self.protocol, slug, self.root_domain)
    }
}
