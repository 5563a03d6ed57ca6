//! Database connection management

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::utils::errors::CampusHubError;

pub type DatabasePool = Pool<Postgres>;

/// Pool tuning derived from the database section of the settings
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/campushub".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            ..Self::default()
        }
    }
}

/// Connect the pool and verify it answers a round trip
pub async fn create_pool(config: &PoolConfig) -> Result<DatabasePool, CampusHubError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(&config.url)
        .await?;

    health_check(&pool).await?;

    info!(
        max_connections = config.max_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Apply pending migrations from the migrations directory
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), CampusHubError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Liveness probe used by the pool setup and the health endpoint
pub async fn health_check(pool: &DatabasePool) -> Result<(), CampusHubError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_pool_config_from_settings_keeps_tuning_defaults() {
        let settings = Settings::default();
        let config = PoolConfig::from(&settings.database);
        assert_eq!(config.url, settings.database.url);
        assert_eq!(config.max_connections, settings.database.max_connections);
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));
        assert!(config.idle_timeout.is_some());
    }
}
