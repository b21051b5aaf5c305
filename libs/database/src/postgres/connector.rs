use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;

use super::PostgresConfig;
use crate::common::{retry, retry_with_backoff, RetryConfig};

/// Connect to PostgreSQL with default pool settings
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;

    info!("Successfully connected to PostgreSQL database");

    Ok(db)
}

/// Connect using a [`PostgresConfig`]
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Connect with custom connection options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database with custom options");
    Ok(db)
}

/// Connect to PostgreSQL with automatic retry on failure
///
/// Uses exponential backoff with jitter so transient startup races (the
/// database container coming up after the app) do not take the process down.
pub async fn connect_with_retry(
    database_url: &str,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let url = database_url.to_string();

    match retry_config {
        Some(config) => retry_with_backoff(|| connect(&url), config).await,
        None => retry(|| connect(&url)).await,
    }
}

/// Connect from a config with automatic retry on failure
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();

    match retry_config {
        Some(retry_config) => {
            retry_with_backoff(
                || {
                    let opts = options.clone();
                    connect_with_options(opts)
                },
                retry_config,
            )
            .await
        }
        None => {
            retry(|| {
                let opts = options.clone();
                connect_with_options(opts)
            })
            .await
        }
    }
}

/// Apply all pending migrations for the given migrator
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running database migrations for {}", app_name);
    M::up(db, None).await?;
    info!("Database migrations complete");
    Ok(())
}
