// Host resolver middleware for Actix-web
//
// Derives a tenant slug from the Host header and rewrites the request to
// the tenant-scoped route, so `<slug>.<root>/path` behaves identically to
// `/<site-prefix>/<slug>/path`. Pure string work on the request head: no
// directory or cache access, O(1) per request. Registered outside the
// authentication middleware so it runs first.

use std::str::FromStr;

use actix_service::forward_ready;
use actix_utils::future::{Ready, ok};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{Uri, header},
};
use futures::future::LocalBoxFuture;

use vitrine_common::RESERVED_LABELS;

/// Extract the tenant slug candidate from a request host.
///
/// Returns `None` (pass through) when the host is the apex itself, does
/// not end with the root domain (custom domains are out of scope), the
/// label is reserved, or more than one label sits left of the root domain.
fn candidate_slug(host: &str, root_domain: &str) -> Option<String> {
    if host.eq_ignore_ascii_case(root_domain) {
        return None;
    }

    let host = host.to_ascii_lowercase();
    let label = host
        .strip_suffix(&root_domain.to_ascii_lowercase())?
        .strip_suffix('.')?;

    if label.is_empty() || label.contains('.') || RESERVED_LABELS.contains(&label) {
        return None;
    }

    Some(label.to_string())
}

// Host resolver middleware transformer
pub struct HostResolver {
    root_domain: String,
    site_prefix: String,
}

impl HostResolver {
    pub fn new(root_domain: impl Into<String>, site_prefix: impl Into<String>) -> Self {
        Self {
            root_domain: root_domain.into(),
            site_prefix: site_prefix.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for HostResolver
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = HostResolverMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(HostResolverMiddleware {
            service,
            root_domain: self.root_domain.clone(),
            site_prefix: self.site_prefix.clone(),
        })
    }
}

pub struct HostResolverMiddleware<S> {
    service: S,
    root_domain: String,
    site_prefix: String,
}

impl<S, B> Service<ServiceRequest> for HostResolverMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        if let Some(host) = host
            && let Some(slug) = candidate_slug(&host, &self.root_domain)
        {
            let original = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            let rewritten = format!("/{}/{}{}", self.site_prefix, slug, original);

            match Uri::from_str(&rewritten) {
                Ok(uri) => {
                    tracing::debug!(%host, %slug, target = %rewritten, "rewriting tenant host");
                    req.head_mut().uri = uri;
                }
                Err(err) => {
                    tracing::warn!(%host, error = %err, "rewritten uri is invalid, passing through");
                }
            }
        }

        let res = self.service.call(req);
        Box::pin(res)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpRequest, HttpResponse, web};

    use super::*;

    #[test]
    fn test_candidate_slug_rules() {
        assert_eq!(
            candidate_slug("acme.example.com", "example.com"),
            Some("acme".to_string())
        );
        assert_eq!(
            candidate_slug("ACME.Example.COM", "example.com"),
            Some("acme".to_string())
        );
        // Apex, reserved label, foreign host, multi-level label.
        assert_eq!(candidate_slug("example.com", "example.com"), None);
        assert_eq!(candidate_slug("www.example.com", "example.com"), None);
        assert_eq!(candidate_slug("other.com", "example.com"), None);
        assert_eq!(candidate_slug("a.b.example.com", "example.com"), None);
        // Suffix match without a label boundary is not a subdomain.
        assert_eq!(candidate_slug("notexample.com", "example.com"), None);
        // Root domain may carry a port in non-production deployments.
        assert_eq!(
            candidate_slug("acme.localhost:3000", "localhost:3000"),
            Some("acme".to_string())
        );
    }

    async fn echo_path(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(req.uri().to_string())
    }

    #[actix_web::test]
    async fn test_tenant_host_is_rewritten_with_query() {
        let app = actix_web::test::init_service(
            App::new()
                .wrap(HostResolver::new("example.com", "s"))
                .route("/s/{slug}/{tail:.*}", web::get().to(echo_path))
                .default_service(web::to(echo_path)),
        )
        .await;

        let req = actix_web::test::TestRequest::get()
            .uri("/about?tab=work")
            .insert_header((header::HOST, "acme.example.com"))
            .to_request();
        let body = actix_web::test::call_and_read_body(&app, req).await;
        assert_eq!(body, "/s/acme/about?tab=work");
    }

    #[actix_web::test]
    async fn test_apex_and_www_pass_through() {
        let app = actix_web::test::init_service(
            App::new()
                .wrap(HostResolver::new("example.com", "s"))
                .default_service(web::to(echo_path)),
        )
        .await;

        for host in ["example.com", "www.example.com"] {
            let req = actix_web::test::TestRequest::get()
                .uri("/about")
                .insert_header((header::HOST, host))
                .to_request();
            let body = actix_web::test::call_and_read_body(&app, req).await;
            assert_eq!(body, "/about", "host {host} must pass through");
        }
    }

    #[actix_web::test]
    async fn test_foreign_host_passes_through() {
        let app = actix_web::test::init_service(
            App::new()
                .wrap(HostResolver::new("example.com", "s"))
                .default_service(web::to(echo_path)),
        )
        .await;

        let req = actix_web::test::TestRequest::get()
            .uri("/")
            .insert_header((header::HOST, "custom-domain.io"))
            .to_request();
        let body = actix_web::test::call_and_read_body(&app, req).await;
        assert_eq!(body, "/");
    }
}
