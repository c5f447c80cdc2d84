//! Service configuration read from the environment at startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SHARE_TOKEN_LEN: usize = 16;
pub const DEFAULT_FORM_NAME_MIN_LEN: usize = 4;

/// Shortest share token accepted from configuration.
const MIN_SHARE_TOKEN_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub share_token_len: usize,
    pub form_name_min_len: usize,
}

impl ServerConfig {
    /// # Errors
    ///
    /// `Missing` when `DATABASE_URL` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Ok(Self::with_database_url(url)),
            _ => Err(ConfigError::Missing("DATABASE_URL")),
        }
    }

    /// Everything but the database URL comes from optional variables.
    #[must_use]
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            port: env_parse("PORT", DEFAULT_PORT),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS).max(1),
            share_token_len: env_parse("SHARE_TOKEN_LEN", DEFAULT_SHARE_TOKEN_LEN).max(MIN_SHARE_TOKEN_LEN),
            form_name_min_len: env_parse("FORM_NAME_MIN_LEN", DEFAULT_FORM_NAME_MIN_LEN),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
