use std::env;

use auth::SigningAlgorithm;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Upper bound for `jwt.token_lifetime_minutes` (one year).
pub const MAX_TOKEN_LIFETIME_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: SigningAlgorithm,
    pub token_lifetime_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// Where identities and todos are kept.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Postgres,
    /// Process-local tables, lost on restart
    Memory,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults for the token and storage settings
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("jwt.algorithm", "HS256")?
            .set_default(
                "jwt.token_lifetime_minutes",
                auth::DEFAULT_TOKEN_LIFETIME_MINUTES,
            )?
            .set_default("storage.backend", "postgres")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize::<Config>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let lifetime = self.jwt.token_lifetime_minutes;
        if lifetime <= 0 || lifetime > MAX_TOKEN_LIFETIME_MINUTES {
            return Err(ConfigError::Message(format!(
                "jwt.token_lifetime_minutes must be between 1 and {}, got {}",
                MAX_TOKEN_LIFETIME_MINUTES, lifetime
            )));
        }

        Ok(self)
    }
}
