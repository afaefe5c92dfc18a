//! HTTP server setup

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use crate::api;
use crate::middleware::{Authentication, HostResolver};
use crate::model::AppState;

/// Creates and binds the main HTTP server.
///
/// Middleware order matters: the host resolver is registered last so that
/// it runs first, before authentication and routing, rewriting tenant
/// hosts to their `/<site-prefix>/<slug>/...` routes.
pub fn main_server(app_state: Arc<AppState>, address: String, port: u16) -> std::io::Result<Server> {
    let root_domain = app_state.configuration.root_domain();
    let site_prefix = app_state.configuration.site_prefix();

    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Authentication)
            .wrap(HostResolver::new(
                root_domain.clone(),
                site_prefix.clone(),
            ))
            .app_data(web::Data::from(app_state.clone()))
            .service(api::v1::routes())
            .service(api::site::routes(&site_prefix))
    })
    .bind((address, port))?
    .run())
}
