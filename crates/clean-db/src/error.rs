//! # Adapter Errors
//!
//! What can go wrong between the user repository and SQLite.
//!
//! ## Where These End Up
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sqlx::Error / MigrateError                                             │
//! │       │  From                                                           │
//! │       ▼                                                                 │
//! │  DbError ──► logged with full detail by the repository                  │
//! │       │  Operation::failed(err)                                         │
//! │       ▼                                                                 │
//! │  UserRepositoryError::Persistence { code: "impossible_…", detail }     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Response errors["generic"]: PERSISTENCE_ERROR with the code only       │
//! │                                                                         │
//! │  Startup paths (Database::new, DbConfig::from_env) return DbError       │
//! │  directly to the binary.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The pool could not open a connection to the database file.
    #[error("cannot open database: {0}")]
    Connect(String),

    /// The pool was closed before the query ran.
    #[error("database pool is closed")]
    PoolClosed,

    /// Every connection stayed busy past the acquire timeout.
    #[error("timed out waiting for a database connection")]
    PoolExhausted,

    /// An embedded migration failed to apply.
    #[error("migration failed: {0}")]
    Migration(String),

    /// A UNIQUE constraint rejected a write.
    ///
    /// `constraint` is SQLite's `<table>.<column>` label, e.g. `users.id`.
    #[error("duplicate value for {constraint}")]
    UniqueViolation { constraint: String },

    /// SQLite rejected the statement.
    #[error("query rejected: {0}")]
    Query(String),

    /// A row could not be decoded into a record.
    #[error("cannot decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    /// An environment setting has an unusable value.
    #[error("invalid {key}: '{value}'")]
    InvalidConfig { key: &'static str, value: String },

    /// Anything sqlx reports that has no category above.
    #[error("unexpected database error: {0}")]
    Other(String),
}

const UNIQUE_FAILED: &str = "UNIQUE constraint failed: ";

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => match db_err.message().strip_prefix(UNIQUE_FAILED) {
                Some(constraint) => DbError::UniqueViolation {
                    constraint: constraint.to_string(),
                },
                None => DbError::Query(db_err.message().to_string()),
            },
            sqlx::Error::ColumnDecode { index, source } => DbError::Decode {
                column: index,
                reason: source.to_string(),
            },
            sqlx::Error::PoolClosed => DbError::PoolClosed,
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            other => DbError::Other(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
