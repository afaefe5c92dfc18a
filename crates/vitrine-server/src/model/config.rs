//! Configuration management for the Vitrine server
//!
//! Configuration is layered: `conf/vitrine.yml`, then `VITRINE_*`
//! environment variables, then command-line overrides.

use std::time::Duration;

use clap::Parser;
use config::{Config, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use vitrine_tenant::SiteAddress;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_ROOT_DOMAIN: &str = "localhost:8080";
const DEFAULT_SITE_PREFIX: &str = "s";
const DEFAULT_CACHE_TTL_SECONDS: u64 = 3_600;
const DEFAULT_CACHE_CAPACITY: u64 = 100_000;
const DEFAULT_TOKEN_EXPIRE_SECONDS: i64 = 86_400;

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command()]
struct Cli {
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    #[arg(long = "root-domain")]
    root_domain: Option<String>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix("vitrine")
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/vitrine").required(false));

        if let Some(v) = args.port {
            config_builder = config_builder
                .set_override("vitrine.server.port", v)
                .expect("Failed to set server port override");
        }
        if let Some(v) = args.root_domain {
            config_builder = config_builder
                .set_override("vitrine.root_domain", v)
                .expect("Failed to set root domain override");
        }
        if let Some(v) = args.database_url {
            config_builder = config_builder
                .set_override("vitrine.db.url", v)
                .expect("Failed to set database URL override");
        }

        let app_config = config_builder
            .build()
            .expect("Failed to build configuration - check conf/vitrine.yml");

        Configuration { config: app_config }
    }

    // ========================================================================
    // Server
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string("vitrine.server.address")
            .unwrap_or("0.0.0.0".to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int("vitrine.server.port")
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    // ========================================================================
    // Tenant routing
    // ========================================================================

    pub fn root_domain(&self) -> String {
        self.config
            .get_string("vitrine.root_domain")
            .unwrap_or(DEFAULT_ROOT_DOMAIN.to_string())
    }

    /// Path prefix tenant hosts are rewritten under, e.g. `s` in `/s/{slug}`
    pub fn site_prefix(&self) -> String {
        self.config
            .get_string("vitrine.site_prefix")
            .unwrap_or(DEFAULT_SITE_PREFIX.to_string())
    }

    pub fn is_production(&self) -> bool {
        self.config.get_bool("vitrine.production").unwrap_or(false)
    }

    pub fn external_protocol(&self) -> String {
        if self.is_production() {
            "https".to_string()
        } else {
            "http".to_string()
        }
    }

    pub fn site_address(&self) -> SiteAddress {
        SiteAddress::new(self.external_protocol(), self.root_domain())
    }

    // ========================================================================
    // Cache
    // ========================================================================

    pub fn cache_ttl(&self) -> Duration {
        let seconds = self
            .config
            .get_int("vitrine.cache.ttl_seconds")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECONDS);
        Duration::from_secs(seconds)
    }

    pub fn cache_capacity(&self) -> u64 {
        self.config
            .get_int("vitrine.cache.capacity")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_CACHE_CAPACITY)
    }

    // ========================================================================
    // Auth
    // ========================================================================

    pub fn token_secret_key(&self) -> String {
        self.config
            .get_string("vitrine.auth.token_secret")
            .unwrap_or("vitrine-dev-secret-change-me".to_string())
    }

    pub fn token_expire_seconds(&self) -> i64 {
        self.config
            .get_int("vitrine.auth.token_expire_seconds")
            .unwrap_or(DEFAULT_TOKEN_EXPIRE_SECONDS)
    }

    // ========================================================================
    // Database
    // ========================================================================

    pub fn database_url(&self) -> String {
        self.config
            .get_string("vitrine.db.url")
            .unwrap_or("mysql://root@localhost:3306/vitrine".to_string())
    }

    pub async fn database_connection(&self) -> Result<DatabaseConnection, sea_orm::DbErr> {
        let mut options = ConnectOptions::new(self.database_url());
        options
            .max_connections(
                self.config
                    .get_int("vitrine.db.max_connections")
                    .ok()
                    .and_then(|v| u32::try_from(v).ok())
                    .unwrap_or(20),
            )
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        Database::connect(options).await
    }

    // ========================================================================
    // Logging
    // ========================================================================

    pub fn log_directory(&self) -> Option<String> {
        self.config.get_string("vitrine.logs.path").ok()
    }

    pub fn log_level(&self) -> String {
        self.config
            .get_string("vitrine.logs.level")
            .unwrap_or("info".to_string())
    }
}
