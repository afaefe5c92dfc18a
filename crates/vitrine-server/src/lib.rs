//! Vitrine Server - HTTP front end for the multi-tenant portfolio builder
//!
//! Request flow: the host resolver rewrites `<slug>.<root>` requests to
//! the tenant site routes, the authentication middleware attaches the
//! caller's identity, and the v1 API drives the tenant/portfolio services.

pub mod api;
pub mod auth;
pub mod middleware;
pub mod model;
pub mod startup;
