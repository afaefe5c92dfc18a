//! Logging setup
//!
//! Console output is always on; when a log directory is configured, a
//! daily-rotated `vitrine.log` is written through a non-blocking appender.
//! The returned guard must be held for the lifetime of the process or
//! buffered log lines are lost on shutdown.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

pub struct LoggingConfig {
    pub directory: Option<String>,
    pub level: String,
}

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let console_layer = fmt::layer()
        .with_target(true)
        .boxed();

    match &config.directory {
        Some(directory) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, directory, "vitrine.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_ansi(false).with_writer(writer).boxed();

            Registry::default()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .try_init()?;

            Ok(Some(guard))
        }
        None => {
            Registry::default()
                .with(env_filter)
                .with(console_layer)
                .try_init()?;

            Ok(None)
        }
    }
}
