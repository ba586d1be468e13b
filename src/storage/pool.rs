//! r2d2 connection pool over SQLite
//!
//! Every connection handed out by the pool has foreign keys enabled; the
//! cascading deletes of the schema depend on it.

use std::path::Path;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;

use crate::Result;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

pub const DEFAULT_POOL_SIZE: u32 = 4;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool over a database file (created if it doesn't exist)
pub fn file_pool(path: &Path, max_size: u32) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;",
        )
    });

    let pool = r2d2::Pool::builder()
        .max_size(max_size.max(1))
        .connection_timeout(CONNECTION_TIMEOUT)
        .build(manager)?;
    tracing::debug!("Opened pool over {} (max_size={})", path.display(), max_size.max(1));
    Ok(pool)
}

/// Open a single-connection pool over a private in-memory database.
///
/// The connection is never recycled, otherwise the database would vanish
/// with it.
pub fn memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = r2d2::Pool::builder()
        .max_size(1)
        .min_idle(Some(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(CONNECTION_TIMEOUT)
        .build(manager)?;
    Ok(pool)
}
