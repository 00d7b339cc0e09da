use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;

use shopdesk::database::DatabaseManager;

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Leader/follower manager over `TEST_DATABASE_URL` with migrations applied,
/// or `None` when no test database is configured.
pub async fn test_db() -> Result<Option<DatabaseManager>> {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping postgres test");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .context("failed to connect to TEST_DATABASE_URL")?;
    let db = DatabaseManager::from_pools(pool.clone(), pool);
    db.migrate().await.context("failed to migrate test database")?;
    Ok(Some(db))
}

/// Unique per test run, so parallel tests never see each other's rows.
pub fn unique(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}-{}-{}", prefix, nanos, n)
}
