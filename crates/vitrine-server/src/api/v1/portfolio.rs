//! Portfolio editor endpoints

use actix_web::{HttpRequest, Responder, Scope, delete, get, patch, web};

use vitrine_persistence::PortfolioPatch;
use vitrine_tenant::service::portfolio;

use crate::auth;
use crate::model::{ApiResult, AppState, error_response};

/// Fetch a portfolio; owner only
#[get("/{id}")]
pub async fn get_portfolio(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: web::Path<i64>,
) -> impl Responder {
    let subject = match auth::require_subject(&req) {
        Ok(subject) => subject,
        Err(err) => return error_response(&err),
    };

    match portfolio::fetch(&state.db, &subject, *id).await {
        Ok(row) => ApiResult::http_success(row),
        Err(err) => error_response(&err),
    }
}

/// Apply a partial update; owner only
#[patch("/{id}")]
pub async fn update_portfolio(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: web::Path<i64>,
    body: web::Json<PortfolioPatch>,
) -> impl Responder {
    let subject = match auth::require_subject(&req) {
        Ok(subject) => subject,
        Err(err) => return error_response(&err),
    };

    match portfolio::update(&state.db, &state.cache, &subject, *id, body.into_inner()).await {
        Ok(row) => ApiResult::http_success(row),
        Err(err) => error_response(&err),
    }
}

/// Delete a portfolio; owner only
#[delete("/{id}")]
pub async fn delete_portfolio(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: web::Path<i64>,
) -> impl Responder {
    let subject = match auth::require_subject(&req) {
        Ok(subject) => subject,
        Err(err) => return error_response(&err),
    };

    match portfolio::remove(&state.db, &state.cache, &subject, *id).await {
        Ok(()) => ApiResult::http_success(()),
        Err(err) => error_response(&err),
    }
}

/// Portfolio routes
pub fn routes() -> Scope {
    web::scope("/portfolios")
        .service(get_portfolio)
        .service(update_portfolio)
        .service(delete_portfolio)
}
