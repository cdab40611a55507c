use crate::config::get_config;
use crate::error::Result;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool};

pub async fn create_pool() -> Result<SqlitePool> {
    let config = get_config();
    if !Sqlite::database_exists(&config.database_url).await? {
        Sqlite::create_database(&config.database_url).await?;
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// A single connection: every `sqlite::memory:` connection is its own
/// database, so a larger pool would hand out empty schemas.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}
