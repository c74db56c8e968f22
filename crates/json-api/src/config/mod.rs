//! Server configuration module

use clap::Parser;

use crate::config::{
    database::DatabaseConfig,
    logging::{LoggingConfig, TracingConfig},
    notifications::NotificationsConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod database;
pub(crate) mod logging;
pub(crate) mod notifications;
pub(crate) mod server;

pub(crate) use logging::LogFormat;
pub(crate) use server::AppEnv;

/// `ShopEase` JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "shopease-json", about = "ShopEase JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Trace export settings.
    #[command(flatten)]
    pub tracing: TracingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Order status notification settings.
    #[command(flatten)]
    pub notifications: NotificationsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
