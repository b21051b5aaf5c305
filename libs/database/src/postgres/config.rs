use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use sea_orm::ConnectOptions;
use std::time::Duration;

/// PostgreSQL connection pool configuration
///
/// Construct manually with [`PostgresConfig::new`] or load from environment
/// variables via [`FromEnv`].
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL (required)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Connection idle timeout in seconds
    pub idle_timeout_secs: u64,

    /// Connection max lifetime in seconds
    pub max_lifetime_secs: u64,

    /// Enable SQL query logging
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    /// Create a config with default pool settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 100,
            min_connections: 5,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 8,
            max_lifetime_secs: 8,
            sqlx_logging: true,
        }
    }

    /// Convert into SeaORM [`ConnectOptions`]
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url);
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .sqlx_logging(self.sqlx_logging);
        options
    }
}

impl FromEnv for PostgresConfig {
    /// Reads `DATABASE_URL` (required) plus optional pool tuning variables
    /// `DATABASE_MAX_CONNECTIONS` and `DATABASE_MIN_CONNECTIONS`.
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;

        let max_connections = env_or_default("DATABASE_MAX_CONNECTIONS", "100")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DATABASE_MAX_CONNECTIONS".to_string(),
                details: format!("{}", e),
            })?;

        let min_connections = env_or_default("DATABASE_MIN_CONNECTIONS", "5")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DATABASE_MIN_CONNECTIONS".to_string(),
                details: format!("{}", e),
            })?;

        let mut config = Self::new(url);
        config.max_connections = max_connections;
        config.min_connections = min_connections;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = PostgresConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn from_env_reads_pool_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/pacer")),
                ("DATABASE_MAX_CONNECTIONS", Some("20")),
                ("DATABASE_MIN_CONNECTIONS", Some("2")),
            ],
            || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config.max_connections, 20);
                assert_eq!(config.min_connections, 2);
            },
        );
    }
}
