//! HTTP API surface

pub mod site;
pub mod v1;
