//! Request middleware: host-based tenant routing and authentication

pub mod auth;
pub mod host;

pub use auth::Authentication;
pub use host::HostResolver;
