//! Entity re-exports

pub use super::account::Entity as Account;
pub use super::portfolio::Entity as Portfolio;
pub use super::tenant::Entity as Tenant;
