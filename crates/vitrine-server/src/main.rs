//! Main entry point for the Vitrine server.

use std::sync::Arc;

use tracing::info;

use vitrine_server::model::{AppState, Configuration};
use vitrine_server::startup::{self, LoggingConfig};
use vitrine_tenant::{MemoryCacheStore, TenantCache};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = Configuration::new();

    let _logging_guard = startup::init_logging(&LoggingConfig {
        directory: configuration.log_directory(),
        level: configuration.log_level(),
    })?;

    let db = configuration.database_connection().await?;
    info!("connected to tenant directory");

    let cache = TenantCache::new(
        Arc::new(MemoryCacheStore::new(configuration.cache_capacity())),
        configuration.cache_ttl(),
    );

    let address = configuration.server_address();
    let port = configuration.server_port();
    let root_domain = configuration.root_domain();

    let app_state = Arc::new(AppState {
        site: configuration.site_address(),
        configuration,
        db,
        cache,
    });

    info!(%address, port, %root_domain, "starting vitrine server");

    startup::main_server(app_state, address, port)?.await?;

    Ok(())
}
