use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::errors::{PageViewError, Result};
use migration::{Migrator, MigratorTrait};

/// 判断 SQLite URL 是否为内存数据库
pub fn is_sqlite_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// SQLite 连接池参数
///
/// 内存库的数据只存在于连接上，连接一旦被回收整个库就没了，
/// 因此常驻一个连接且不设空闲/生命周期上限。
pub fn sqlite_pool_options(
    database_url: &str,
    max_connections: u32,
    timeout: Duration,
) -> sea_orm::sqlx::sqlite::SqlitePoolOptions {
    let options = sea_orm::sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(timeout);

    if is_sqlite_memory_url(database_url) {
        options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
    }
}

/// 连接 SQLite 数据库（带自动创建和性能优化）
pub async fn connect_sqlite(
    database_url: &str,
    max_connections: u32,
    timeout: Duration,
) -> Result<DatabaseConnection> {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
    use std::str::FromStr;

    let mut opt = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| {
            PageViewError::database_config(format!("Invalid SQLite URL '{}': {}", database_url, e))
        })?
        .create_if_missing(true)
        .foreign_keys(true)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(timeout)
        .pragma("temp_store", "memory");

    if !is_sqlite_memory_url(database_url) {
        opt = opt.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = sqlite_pool_options(database_url, max_connections, timeout)
        .connect_with(opt)
        .await
        .map_err(|e| {
            PageViewError::storage_unavailable(format!("Cannot connect to SQLite database: {}", e))
        })?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 连接通用数据库（MySQL/PostgreSQL）
pub async fn connect_generic(
    database_url: &str,
    backend_name: &str,
    max_connections: u32,
    timeout: Duration,
) -> Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(false);

    Database::connect(opt).await.map_err(|e| {
        PageViewError::storage_unavailable(format!(
            "Cannot connect to {} database: {}",
            backend_name.to_uppercase(),
            e
        ))
    })
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| PageViewError::storage_unavailable(format!("Migration failed: {}", e)))?;

    info!("Database migrations completed");
    Ok(())
}
