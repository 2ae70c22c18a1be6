use std::env;
use tracing::{error, info, warn};

use crate::config::ConfigError;

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the server binds to
    pub host: String,
    /// Port the server listens on
    pub port: u16,
}

impl AppConfig {
    /// Load the listener configuration from environment variables
    ///
    /// Expected environment variables:
    /// - APP_HOST: Bind address (defaults to 127.0.0.1)
    /// - APP_PORT: Listen port (defaults to 8080)
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| {
            warn!("APP_HOST not set, using default: 127.0.0.1");
            "127.0.0.1".to_string()
        });

        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| {
                warn!("APP_PORT not set, using default: 8080");
                "8080".to_string()
            })
            .parse::<u16>()
            .map_err(|e| {
                error!("Invalid APP_PORT value: {}", e);
                ConfigError::InvalidValue(format!("APP_PORT: {}", e))
            })?;

        let config = AppConfig { host, port };
        config.validate()?;
        info!("App configuration loaded: {}:{}", config.host, config.port);
        Ok(config)
    }

    /// Create AppConfig for testing
    pub fn from_test_env() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            error!("App host is empty");
            return Err(ConfigError::ValidationError(
                "APP_HOST cannot be empty".to_string(),
            ));
        }
        if self.host.parse::<std::net::IpAddr>().is_err() {
            error!("App host is not a valid IP address: {}", self.host);
            return Err(ConfigError::ValidationError(format!(
                "APP_HOST must be an IP address, got '{}'",
                self.host
            )));
        }
        Ok(())
    }
}
