//! Connection to the maintenance store.

use log::{error, info};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::STORE_MAX_CONNECTIONS;
use crate::error_handling::{DatabaseError, EnvGateError};

/// Variable holding the store host
pub const DB_HOST_VAR: &str = "MAINTENANCE_DB_HOST";
/// Variable holding the store port
pub const DB_PORT_VAR: &str = "MAINTENANCE_DB_PORT";
/// Variable holding the store user
pub const DB_USER_VAR: &str = "MAINTENANCE_DB_USER";
/// Variable holding the store password
pub const DB_PASSWORD_VAR: &str = "MAINTENANCE_DB_PASSWORD";
/// Variable holding the database name
pub const DB_NAME_VAR: &str = "MAINTENANCE_DB_NAME";

const DEFAULT_DB_PORT: u16 = 5432;

/// Connection parameters of the maintenance store.
#[derive(Clone)]
pub struct StoreConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Login user
    pub username: String,
    /// Login password
    pub password: String,
    /// Database name
    pub database: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl StoreConfig {
    /// Reads the parameters from the process environment.
    ///
    /// # Errors
    ///
    /// See [`StoreConfig::from_lookup`].
    pub fn from_env() -> Result<Self, EnvGateError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the parameters through `lookup`.
    ///
    /// The port defaults to 5432 when unset.
    ///
    /// # Errors
    ///
    /// Returns `EnvGateError::Missing` listing every unset or empty required
    /// variable, or `EnvGateError::InvalidValue` for a port that is not a number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EnvGateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut missing = Vec::new();
        let mut require = |name: &str| {
            get(name).unwrap_or_else(|| {
                missing.push(name.to_string());
                String::new()
            })
        };
        let host = require(DB_HOST_VAR);
        let username = require(DB_USER_VAR);
        let password = require(DB_PASSWORD_VAR);
        let database = require(DB_NAME_VAR);
        if !missing.is_empty() {
            return Err(EnvGateError::Missing(missing));
        }

        let port = match get(DB_PORT_VAR) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| EnvGateError::InvalidValue {
                    name: DB_PORT_VAR.to_string(),
                    value,
                })?,
            None => DEFAULT_DB_PORT,
        };

        Ok(Self {
            host,
            port,
            username,
            password,
            database,
        })
    }

    /// Postgres connection options for these parameters.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Opens the connection pool of the maintenance store.
///
/// # Errors
///
/// Returns `DatabaseError::ConnectError` if no connection can be established.
pub async fn connect_store(config: &StoreConfig) -> Result<PgPool, DatabaseError> {
    let pool = PgPoolOptions::new()
        .max_connections(STORE_MAX_CONNECTIONS)
        .connect_with(config.connect_options())
        .await
        .map_err(|e| {
            error!(
                "Failed to connect to {}:{}/{}: {e}",
                config.host, config.port, config.database
            );
            DatabaseError::ConnectError(e)
        })?;

    info!(
        "Connected to maintenance store {}:{}/{}",
        config.host, config.port, config.database
    );
    Ok(pool)
}
