use std::env;
use thiserror::Error;

/// Address and port are fixed; only the database is configured externally.
pub const HOST: &str = "0.0.0.0";
pub const PORT: u16 = 8000;
/// The only browser origin allowed to call the API
pub const ALLOWED_ORIGIN: &str = "http://localhost:8001";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: &'static str,
    pub port: u16,
    pub allowed_origin: &'static str,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_database_url(env::var("DATABASE_URL").ok())
    }

    fn from_database_url(database_url: Option<String>) -> Result<Self, ConfigError> {
        let database_url = database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        Ok(Self {
            database_url,
            host: HOST,
            port: PORT,
            allowed_origin: ALLOWED_ORIGIN,
        })
    }

    pub fn bind_address(&self) -> (&'static str, u16) {
        (self.host, self.port)
    }
}
