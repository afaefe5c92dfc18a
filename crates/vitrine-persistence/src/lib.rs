//! Vitrine Persistence - Database entities and the tenant directory
//!
//! This crate provides:
//! - SeaORM entity definitions for accounts, tenants, and portfolios
//! - The Tenant Directory query/mutation layer (source of truth)
//! - The portfolio store

pub mod directory;
pub mod entity;
pub mod model;
pub mod portfolio_store;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;

// Re-export model types
pub use model::{MediaFile, NewTenant, PortfolioPatch};
