//! # Pool and Configuration
//!
//! Opens the SQLite pool the user repository runs on.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLEAN_DB_PATH, CLEAN_DB_MAX_CONNECTIONS                                │
//! │       │  DbConfig::from_env()                                           │
//! │       ▼                                                                 │
//! │  DbConfig { location: File(path) | Memory, pool bounds, migrate }       │
//! │       │  Database::new(config)                                          │
//! │       ▼                                                                 │
//! │  SqlitePool ── WAL, synchronous=NORMAL, foreign keys ──► migrations     │
//! │       │  db.users()                                                     │
//! │       ▼                                                                 │
//! │  SqliteUserRepository (clones the pool handle)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::SqliteUserRepository;

/// Environment variable holding the database path.
pub const DB_PATH_ENV: &str = "CLEAN_DB_PATH";

/// Environment variable holding the pool size.
pub const DB_MAX_CONNECTIONS_ENV: &str = "CLEAN_DB_MAX_CONNECTIONS";

/// Path used when [`DB_PATH_ENV`] is unset.
pub const DEFAULT_DB_PATH: &str = "./clean_dev.db";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A file, created on first connect.
    File(PathBuf),
    /// A private in-memory database that disappears with the pool.
    Memory,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Memory => f.write_str(":memory:"),
        }
    }
}

/// Pool settings.
///
/// ```rust
/// use clean_db::{DbConfig, Location};
///
/// let config = DbConfig::file("/var/lib/users.db").with_max_connections(8);
/// assert_eq!(config.max_connections, 8);
/// assert!(matches!(config.location, Location::File(_)));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: Location,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a query waits for a free connection.
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    /// Apply embedded migrations on connect.
    pub migrate: bool,
}

impl DbConfig {
    /// A file-backed database at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: Location::File(path.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            migrate: true,
        }
    }

    /// An isolated in-memory database, used by tests.
    ///
    /// Pinned to one connection: a second connection would open a second,
    /// empty database.
    pub fn in_memory() -> Self {
        DbConfig {
            location: Location::Memory,
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            migrate: true,
        }
    }

    /// Reads [`DB_PATH_ENV`] and [`DB_MAX_CONNECTIONS_ENV`].
    pub fn from_env() -> DbResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over any key lookup.
    pub fn from_lookup<F>(lookup: F) -> DbResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(DB_PATH_ENV).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let config = DbConfig::file(path);

        let Some(raw) = lookup(DB_MAX_CONNECTIONS_ENV) else {
            return Ok(config);
        };
        match raw.trim().parse::<u32>() {
            Ok(max) if max > 0 => Ok(config.with_max_connections(max)),
            _ => Err(DbError::InvalidConfig {
                key: DB_MAX_CONNECTIONS_ENV,
                value: raw,
            }),
        }
    }

    /// Caps the pool at `max` connections; the floor follows if needed.
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self.min_connections = self.min_connections.min(max);
        self
    }

    /// Skips migrations on connect.
    pub fn without_migrations(mut self) -> Self {
        self.migrate = false;
        self
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        let options = match &self.location {
            Location::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
            // a fresh options value names a fresh in-memory database
            Location::Memory => SqliteConnectOptions::new().in_memory(true),
        };

        options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
    }
}

// =============================================================================
// Database
// =============================================================================

/// An open pool plus the repositories built on it.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, applies pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(location = %config.location, "Opening database");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(config.connect_options())
            .await
            .map_err(|err| DbError::Connect(err.to_string()))?;

        debug!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Pool ready"
        );

        let db = Database { pool };
        if config.migrate {
            migrations::run_migrations(&db.pool).await?;
        }
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The user repository over this pool.
    ///
    /// ```rust,ignore
    /// let controller = UserController::new(Arc::new(db.users()));
    /// ```
    pub fn users(&self) -> SqliteUserRepository {
        SqliteUserRepository::new(self.pool.clone())
    }

    /// Closes every connection; later queries fail with a pool-closed
    /// error.
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }

    /// True if the pool can still run a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn test_in_memory_database_is_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let first = Database::new(DbConfig::in_memory()).await.unwrap();
        let second = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO users (id, name, surname, email, password) VALUES ('x', 'a', 'b', 'c@d.io', 'password')")
            .execute(first.pool())
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(second.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_closed_database_fails_health_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[test]
    fn test_from_lookup_reads_settings() {
        let config = DbConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/var/lib/users.db"),
            (DB_MAX_CONNECTIONS_ENV, " 8 "),
        ]))
        .unwrap();
        assert_eq!(config.location, Location::File(PathBuf::from("/var/lib/users.db")));
        assert_eq!(config.max_connections, 8);

        let defaults = DbConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(defaults.location.to_string(), DEFAULT_DB_PATH);
        assert_eq!(defaults.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(defaults.migrate);
    }

    #[test]
    fn test_from_lookup_rejects_bad_pool_size() {
        for raw in ["zero", "0", "-3"] {
            let err = DbConfig::from_lookup(lookup(&[(DB_MAX_CONNECTIONS_ENV, raw)])).unwrap_err();
            assert!(matches!(err, DbError::InvalidConfig { key: DB_MAX_CONNECTIONS_ENV, .. }));
        }
    }

    #[test]
    fn test_pool_floor_follows_cap() {
        let config = DbConfig::file("users.db").with_max_connections(1).without_migrations();
        assert_eq!(config.min_connections, 1);
        assert!(!config.migrate);
        assert_eq!(DbConfig::in_memory().location.to_string(), ":memory:");
    }
}
