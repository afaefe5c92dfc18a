//! Vitrine Tenant - resolution, provisioning, and cache consistency
//!
//! This crate implements the core of the multi-tenant layer:
//! - `cache`: read-through cache over an injected `CacheStore`
//! - `snapshot`: versioned, shape-checked cache payloads
//! - `service`: resolution, provisioning, deletion, portfolio mutation,
//!   listings, and site page assembly

pub mod cache;
pub mod service;
pub mod snapshot;

// Re-exports for convenience
pub use cache::{CacheStore, MemoryCacheStore, TenantCache};
pub use service::SiteAddress;
pub use snapshot::{PortfolioView, SNAPSHOT_VERSION, TenantSnapshot};
