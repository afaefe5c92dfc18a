//! Tenant site endpoints
//!
//! These are the rewrite targets of the host resolver: a request for
//! `<slug>.<root>/...` lands here as `/<site-prefix>/<slug>/...`. The
//! response is the page data the renderer consumes; an unknown slug is a
//! plain 404 so the frontend can show its generic landing page.

use actix_web::{Responder, Scope, get, web};

use vitrine_tenant::service::site;

use crate::model::{ApiResult, AppState, error_response};

#[get("/{slug}")]
pub async fn site_root(state: web::Data<AppState>, slug: web::Path<String>) -> impl Responder {
    render(&state, &slug).await
}

#[get("/{slug}/{tail:.*}")]
pub async fn site_path(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (slug, _tail) = path.into_inner();
    render(&state, &slug).await
}

async fn render(state: &AppState, slug: &str) -> actix_web::HttpResponse {
    match site::site_page(&state.db, &state.cache, slug).await {
        Ok(page) => ApiResult::http_success(page),
        Err(err) => error_response(&err),
    }
}

/// Tenant site routes under the configured prefix
pub fn routes(site_prefix: &str) -> Scope {
    web::scope(&format!("/{site_prefix}"))
        .service(site_root)
        .service(site_path)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::header, test};
    use sea_orm::{DatabaseBackend, MockDatabase};

    use vitrine_persistence::entity::{portfolio, tenant};
    use vitrine_tenant::{MemoryCacheStore, TenantCache};

    use super::*;
    use crate::middleware::HostResolver;
    use crate::model::Configuration;

    fn tenant_row() -> tenant::Model {
        let now = chrono::Utc::now().naive_utc();
        tenant::Model {
            id: 7,
            slug: "acme".to_string(),
            display_name: "Acme".to_string(),
            icon: Some("🎨".to_string()),
            owner_id: 10,
            settings: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn portfolio_row() -> portfolio::Model {
        let now = chrono::Utc::now().naive_utc();
        portfolio::Model {
            id: 3,
            tenant_id: 7,
            title: "Acme".to_string(),
            description: None,
            content: Some("hello".to_string()),
            published: true,
            media_files: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_web::test]
    async fn test_tenant_host_serves_site_page() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![tenant_row()]])
            .append_query_results([vec![portfolio_row()]])
            .into_connection();
        let configuration = Configuration::default();
        let cache = TenantCache::new(
            Arc::new(MemoryCacheStore::default()),
            configuration.cache_ttl(),
        );
        let state = AppState {
            site: configuration.site_address(),
            configuration,
            db,
            cache,
        };

        let app = test::init_service(
            App::new()
                .wrap(HostResolver::new("example.com", "s"))
                .app_data(web::Data::new(state))
                .service(routes("s")),
        )
        .await;

        // <slug>.<root>/ must behave identically to /s/<slug>/.
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::HOST, "acme.example.com"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["tenant"]["slug"], "acme");
        assert_eq!(body["data"]["portfolio"]["content"], "hello");
    }

    #[actix_web::test]
    async fn test_unknown_slug_is_404() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<tenant::Model>::new()])
            .into_connection();
        let configuration = Configuration::default();
        let cache = TenantCache::new(
            Arc::new(MemoryCacheStore::default()),
            configuration.cache_ttl(),
        );
        let state = AppState {
            site: configuration.site_address(),
            configuration,
            db,
            cache,
        };

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(routes("s")),
        )
        .await;

        let req = test::TestRequest::get().uri("/s/ghost").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }
}
