//! Vitrine Common - Shared types and utilities
//!
//! This crate provides the foundational types used across all Vitrine components:
//! - Error types and error codes
//! - Slug and icon validation

pub mod error;
pub mod validation;

// Re-exports for convenience
pub use error::{ErrorCode, VitrineError};
pub use validation::{is_normalized_slug, is_valid_icon, normalize_slug};

/// Reserved hostname labels that never resolve to a tenant
pub const RESERVED_LABELS: &[&str] = &["www"];

/// Maximum length of a tenant slug (leftmost DNS label)
pub const SLUG_MAX_LENGTH: usize = 63;

/// Maximum length of a tenant icon string
pub const ICON_MAX_LENGTH: usize = 10;

/// Cache key prefix for tenant snapshots keyed by slug
pub const SUBDOMAIN_KEY_PREFIX: &str = "subdomain:";

/// Cache key prefix for portfolio views keyed by tenant id
pub const PORTFOLIO_KEY_PREFIX: &str = "portfolio:tenant:";

/// Build the cache key for a tenant snapshot
pub fn subdomain_key(slug: &str) -> String {
    format!("{}{}", SUBDOMAIN_KEY_PREFIX, slug)
}

/// Build the cache key for a tenant's portfolio view
pub fn portfolio_key(tenant_id: i64) -> String {
    format!("{}{}", PORTFOLIO_KEY_PREFIX, tenant_id)
}
