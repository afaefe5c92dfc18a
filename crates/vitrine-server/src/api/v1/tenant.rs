//! Tenant management endpoints

use actix_web::{HttpRequest, Responder, Scope, delete, get, post, web};

use vitrine_tenant::service::provision::ProvisionRequest;
use vitrine_tenant::service::{listing, provision, remove, resolve};

use crate::auth;
use crate::model::{ApiResult, AppState, error_response};

/// Claim a subdomain and create its site
#[post("")]
pub async fn create_tenant(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ProvisionRequest>,
) -> impl Responder {
    let subject = match auth::require_subject(&req) {
        Ok(subject) => subject,
        Err(err) => return error_response(&err),
    };

    match provision::provision(
        &state.db,
        &state.cache,
        &state.site,
        &subject,
        body.into_inner(),
    )
    .await
    {
        Ok(outcome) => ApiResult::http_success(outcome),
        Err(err) => error_response(&err),
    }
}

/// All tenants, newest first (public landing page)
#[get("")]
pub async fn list_tenants(state: web::Data<AppState>) -> impl Responder {
    match listing::list_all(&state.db).await {
        Ok(tenants) => ApiResult::http_success(tenants),
        Err(err) => error_response(&err),
    }
}

/// The authenticated caller's tenants (dashboard)
#[get("/mine")]
pub async fn my_tenants(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let subject = match auth::require_subject(&req) {
        Ok(subject) => subject,
        Err(err) => return error_response(&err),
    };

    match listing::list_for_owner(&state.db, &subject).await {
        Ok(tenants) => ApiResult::http_success(tenants),
        Err(err) => error_response(&err),
    }
}

/// Resolve a slug to its tenant snapshot
#[get("/{slug}")]
pub async fn get_tenant(state: web::Data<AppState>, slug: web::Path<String>) -> impl Responder {
    match resolve::resolve(&state.db, &state.cache, &slug).await {
        Ok(snapshot) => ApiResult::http_success(snapshot),
        Err(err) => error_response(&err),
    }
}

/// Delete a tenant and its content; owner only
#[delete("/{slug}")]
pub async fn delete_tenant(
    state: web::Data<AppState>,
    req: HttpRequest,
    slug: web::Path<String>,
) -> impl Responder {
    let subject = match auth::require_subject(&req) {
        Ok(subject) => subject,
        Err(err) => return error_response(&err),
    };

    match remove::remove(&state.db, &state.cache, &subject, &slug).await {
        Ok(()) => ApiResult::http_success(()),
        Err(err) => error_response(&err),
    }
}

/// Tenant routes
pub fn routes() -> Scope {
    web::scope("/tenants")
        .service(create_tenant)
        .service(list_tenants)
        .service(my_tenants)
        .service(get_tenant)
        .service(delete_tenant)
}
