use crate::domain::services::forms::ValidationMode;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a number, got '{0}'")]
    InvalidPort(String),
    #[error("GENRE_STATE_CHECKS: {0}")]
    InvalidValidationMode(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// `strict` checks genres/states on artists as well as venues.
    pub validation_mode: ValidationMode,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port_raw = lookup("PORT").unwrap_or_else(|| "5000".to_string());
        let port = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        let validation_mode = match lookup("GENRE_STATE_CHECKS") {
            Some(raw) => raw.parse().map_err(ConfigError::InvalidValidationMode)?,
            None => ValidationMode::default(),
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://fyyur.db".to_string()),
            port,
            validation_mode,
        })
    }
}
