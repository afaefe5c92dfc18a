//! V1 API routing configuration

use actix_web::{Scope, web};

pub mod portfolio;
pub mod tenant;

/// Create the v1 API routes
pub fn routes() -> Scope {
    web::scope("/api/v1")
        .service(tenant::routes())
        .service(portfolio::routes())
}
