//! Server startup: logging and HTTP

pub mod http;
pub mod logging;

pub use http::main_server;
pub use logging::{LoggingConfig, init_logging};
