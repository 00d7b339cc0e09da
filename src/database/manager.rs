use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, PgPool,
};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Leader/follower pool pair. Reads go to the follower, writes to the leader.
/// Without a follower URL both handles share the leader pool.
#[derive(Clone)]
pub struct DatabaseManager {
    leader: PgPool,
    follower: PgPool,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let leader_url = config
            .leader_url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let leader = Self::open_pool(leader_url, config).await?;
        info!("Connected leader pool: {}", Self::redact(leader_url)?);

        let follower = match config.follower_url.as_deref() {
            Some(url) if url != leader_url => {
                let pool = Self::open_pool(url, config).await?;
                info!("Connected follower pool: {}", Self::redact(url)?);
                pool
            }
            _ => leader.clone(),
        };

        Ok(Self { leader, follower })
    }

    pub fn from_pools(leader: PgPool, follower: PgPool) -> Self {
        Self { leader, follower }
    }

    pub fn leader(&self) -> &PgPool {
        &self.leader
    }

    pub fn follower(&self) -> &PgPool {
        &self.follower
    }

    async fn open_pool(url: &str, config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let mut options: PgConnectOptions = url
            .parse()
            .map_err(|e: sqlx::Error| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
        // sqlx logs each statement through tracing unless told not to.
        if !config.enable_query_logging {
            options = options.disable_statement_logging();
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;
        Ok(pool)
    }

    /// Pings both pools
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.leader).await?;
        sqlx::query("SELECT 1").execute(&self.follower).await?;
        Ok(())
    }

    /// Applies `migrations/` to the leader.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(&self.leader).await?;
        info!("Migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.follower.close().await;
        self.leader.close().await;
        info!("Closed database pools");
    }

    /// Connection string with the password masked, for logs.
    fn redact(database_url: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(database_url)
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
        if url.password().is_some() {
            url.set_password(Some("****"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl("cannot mask password".to_string()))?;
        }
        Ok(url.to_string())
    }
}
