// Authentication middleware for Actix-web
//
// Verifies the bearer token minted by the external identity provider and
// inserts an AuthContext into the request extensions. Requests without a
// valid token still pass through; handlers that need an identity call
// `auth::require_subject` and map its error to 401.

use actix_service::forward_ready;
use actix_utils::future::{Ready, ok};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web::Data,
};
use futures::future::LocalBoxFuture;

use crate::auth::{self, AuthContext};
use crate::model::AppState;

const AUTHORIZATION_HEADER: &str = "Authorization";
const BEARER_PREFIX: &str = "Bearer ";

// Authentication middleware transformer
pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware { service })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: S,
}

/// Extract the bearer token from the `Authorization` header
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(header_val) = req.headers().get(AUTHORIZATION_HEADER)
        && let Ok(s) = header_val.to_str()
        && let Some(token) = s.trim().strip_prefix(BEARER_PREFIX)
    {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    None
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if Method::OPTIONS != *req.method() {
            let mut auth_context = AuthContext::default();

            if let Some(token) = extract_token(&req) {
                auth_context.token_provided = true;

                if let Some(app_state) = req.app_data::<Data<AppState>>() {
                    let secret_key = app_state.configuration.token_secret_key();
                    match auth::decode_token_cached(&token, &secret_key) {
                        Ok(claims) => {
                            auth_context.subject = Some(claims.sub);
                        }
                        Err(err) => {
                            tracing::debug!(error = %err, "bearer token rejected");
                        }
                    }
                } else {
                    tracing::error!("AppState not found in request app_data");
                }
            }

            // Always insert AuthContext so handlers can inspect it
            req.extensions_mut().insert(auth_context);
        }

        let res = self.service.call(req);

        Box::pin(async move { res.await.map(ServiceResponse::map_into_left_body) })
    }
}
