use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
}

/// Application configuration, loaded once in `main` and passed explicitly.
/// There is deliberately no global config singleton; handlers see only the
/// state they are given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Environment-specific defaults, then explicit env overrides
        let mut config = match environment {
            Environment::Production => Self::production(url),
            Environment::Staging => Self::staging(url),
            Environment::Development => Self::development(url),
        };

        if let Ok(v) = env::var("PORT") {
            config.server.port = v.parse().unwrap_or(config.server.port);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections =
                v.parse().unwrap_or(config.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT") {
            config.database.connect_timeout_secs =
                v.parse().unwrap_or(config.database.connect_timeout_secs);
        }

        Ok(config)
    }

    fn development(url: String) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url,
                max_connections: 10,
                connect_timeout_secs: 30,
            },
        }
    }

    fn staging(url: String) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url,
                max_connections: 20,
                connect_timeout_secs: 10,
            },
        }
    }

    fn production(url: String) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url,
                max_connections: 50,
                connect_timeout_secs: 5,
            },
        }
    }
}
