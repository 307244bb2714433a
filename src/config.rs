use std::env;

use thiserror::Error;

pub const PORT_VAR: &str = "PORT";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("${0} must be set.")]
    Missing(&'static str),
    #[error("${var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Location of the SQLite database, `:memory:` included.
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let port = required(PORT_VAR)?;
        let port = port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
            var: PORT_VAR,
            value: port.clone(),
        })?;
        let database_url = required(DATABASE_URL_VAR)?;

        Ok(Config { port, database_url })
    }

    pub fn bind_address(&self) -> (&'static str, u16) {
        ("0.0.0.0", self.port)
    }
}
