//! # SQLite User Repository
//!
//! Implements the `UserRepository` port on the `users` table.
//!
//! ## Row Decoding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteRow ──► row_to_record() ──► Record ──► Mapper ──► UserEntity     │
//! │                 column by column:                                       │
//! │                   NULL    → null                                        │
//! │                   INTEGER → number                                      │
//! │                   REAL    → number                                      │
//! │                   TEXT    → string                                      │
//! │                                                                         │
//! │  UserEntity ──► Mapper ──► Record ──► bound in COLUMNS order           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this module knows the shape of a user beyond the column list;
//! a row that no longer maps (e.g. an email edited by hand) surfaces as a
//! Persistence error instead of a partially-built entity.

use async_trait::async_trait;
use clean_core::{Mapper, Record};
use clean_users::{Operation, UserEntity, UserId, UserRepository, UserRepositoryError, UserRepositoryResult};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, TypeInfo, ValueRef};
use tracing::{debug, warn};

use crate::error::DbError;

/// Columns of the `users` table, in bind order.
const COLUMNS: &[&str] = &["id", "name", "surname", "email", "password"];

const SELECT_ALL: &str = "SELECT id, name, surname, email, password FROM users ORDER BY rowid";
const SELECT_ONE: &str = "SELECT id, name, surname, email, password FROM users WHERE id = ?1";
const COUNT_ONE: &str = "SELECT COUNT(*) FROM users WHERE id = ?1";
const COUNT_ALL: &str = "SELECT COUNT(*) FROM users";
const INSERT: &str =
    "INSERT INTO users (id, name, surname, email, password) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE: &str =
    "UPDATE users SET name = ?2, surname = ?3, email = ?4, password = ?5 WHERE id = ?1";
const DELETE: &str = "DELETE FROM users WHERE id = ?1";

// =============================================================================
// Row Decoding
// =============================================================================

/// Decodes one column into its JSON counterpart by storage class.
fn column_value(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage = raw.type_info().name().to_string();

    match storage.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get::<i64, _>(index).map(Value::from),
        "REAL" => row.try_get::<f64, _>(index).map(Value::from),
        _ => row.try_get::<String, _>(index).map(Value::String),
    }
}

/// Reads every column of `row` into a record keyed by column name.
pub fn row_to_record(row: &SqliteRow) -> Result<Record, sqlx::Error> {
    use sqlx::Column;

    let mut record = Record::new();
    for column in row.columns() {
        record.insert(column.name().to_string(), column_value(row, column.ordinal())?);
    }
    Ok(record)
}

// =============================================================================
// Repository
// =============================================================================

/// `UserRepository` backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
    mapper: Mapper,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteUserRepository {
            pool,
            mapper: Mapper::new(),
        }
    }

    /// Number of stored users.
    pub async fn count(&self) -> UserRepositoryResult<i64> {
        sqlx::query_scalar(COUNT_ALL)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| storage_failure(Operation::All, err))
    }

    /// Runs `sql` with the user's columns bound as ?1..?5.
    async fn write(&self, sql: &str, user: &UserEntity, operation: Operation) -> UserRepositoryResult<u64> {
        let record = self.mapper.to_array(user);
        let mut query = sqlx::query(sql);
        for column in COLUMNS {
            query = query.bind(record.get(*column).and_then(Value::as_str).map(str::to_owned));
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|err| storage_failure(operation, err))?;
        Ok(result.rows_affected())
    }
}

/// Categorizes and logs a sqlx failure, keeping only the stable code for
/// callers.
fn storage_failure(operation: Operation, err: sqlx::Error) -> UserRepositoryError {
    let err = DbError::from(err);
    warn!(?operation, error = %err, "User query failed");
    operation.failed(err)
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn all(&self) -> UserRepositoryResult<Vec<UserEntity>> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| storage_failure(Operation::All, err))?;

        let records = rows
            .iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| storage_failure(Operation::All, err))?;

        debug!(count = records.len(), "Loaded users");
        Ok(self.mapper.to_multiple_object(&records)?)
    }

    async fn get_by_user_id(&self, id: &UserId) -> UserRepositoryResult<UserEntity> {
        let row = sqlx::query(SELECT_ONE)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| storage_failure(Operation::Get, err))?
            .ok_or_else(|| UserRepositoryError::not_found(id.value()))?;

        let record = row_to_record(&row).map_err(|err| storage_failure(Operation::Get, err))?;
        Ok(self.mapper.to_object(&record)?)
    }

    async fn find_by_user_id(&self, id: &UserId) -> UserRepositoryResult<bool> {
        let count: i64 = sqlx::query_scalar(COUNT_ONE)
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| storage_failure(Operation::Find, err))?;
        Ok(count > 0)
    }

    async fn add(&self, user: &UserEntity) -> UserRepositoryResult<()> {
        debug!(id = %user.id, "Inserting user");
        self.write(INSERT, user, Operation::Add).await?;
        Ok(())
    }

    async fn update(&self, user: &UserEntity) -> UserRepositoryResult<()> {
        debug!(id = %user.id, "Updating user");
        self.write(UPDATE, user, Operation::Update).await?;
        Ok(())
    }

    async fn delete_by_user_id(&self, id: &UserId) -> UserRepositoryResult<()> {
        debug!(id = %id, "Deleting user");
        sqlx::query(DELETE)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|err| storage_failure(Operation::Delete, err))?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use clean_users::Email;
    use serde_json::json;

    async fn repo() -> (Database, SqliteUserRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();
        (db, repo)
    }

    fn user(id: &str, name: &str) -> UserEntity {
        UserEntity::new(
            UserId::create_from_string(id).unwrap(),
            name,
            "Tester",
            Email::new(format!("{}@example.com", name.to_lowercase())).unwrap(),
            "correct-horse",
        )
    }

    #[tokio::test]
    async fn test_add_get_and_find() {
        let (_db, repo) = repo().await;
        let ada = user("u-1", "Ada");

        repo.add(&ada).await.unwrap();

        assert_eq!(repo.get_by_user_id(&ada.id).await.unwrap(), ada);
        assert!(repo.find_by_user_id(&ada.id).await.unwrap());
        assert!(!repo.find_by_user_id(&user("u-2", "Grace").id).await.unwrap());
    }

    #[tokio::test]
    async fn test_all_keeps_insertion_order() {
        let (_db, repo) = repo().await;
        let users = [user("c", "Ada"), user("a", "Grace"), user("b", "Barbara")];
        for u in &users {
            repo.add(u).await.unwrap();
        }

        assert_eq!(repo.all().await.unwrap(), users.to_vec());
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let (_db, repo) = repo().await;
        let err = repo.get_by_user_id(&user("abc", "Ada").id).await.unwrap_err();
        assert_eq!(err, UserRepositoryError::not_found("abc"));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_db, repo) = repo().await;
        let mut ada = user("u-1", "Ada");
        repo.add(&ada).await.unwrap();
        repo.add(&user("u-2", "Grace")).await.unwrap();

        ada.surname = "Lovelace".to_string();
        repo.update(&ada).await.unwrap();
        repo.delete_by_user_id(&user("u-2", "Grace").id).await.unwrap();

        assert_eq!(repo.all().await.unwrap(), vec![ada]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_add_failure() {
        let (_db, repo) = repo().await;
        repo.add(&user("u-1", "Ada")).await.unwrap();

        let err = repo.add(&user("u-1", "Grace")).await.unwrap_err();
        assert!(matches!(
            err,
            UserRepositoryError::Persistence { code: "impossible_add_user", .. }
        ));
    }

    #[tokio::test]
    async fn test_corrupt_row_is_persistence_error() {
        let (db, repo) = repo().await;
        sqlx::query("INSERT INTO users (id, name, surname, email, password) VALUES ('u-1', 'Ada', 'L', 'not-an-email', 'pw')")
            .execute(db.pool())
            .await
            .unwrap();

        let err = repo.all().await.unwrap_err();
        assert!(matches!(
            err,
            UserRepositoryError::Persistence { code: "corrupt_user_record", .. }
        ));
    }

    #[tokio::test]
    async fn test_closed_pool_reports_operation_code() {
        let (db, repo) = repo().await;
        db.close().await;

        let err = repo.all().await.unwrap_err();
        assert!(matches!(
            err,
            UserRepositoryError::Persistence { code: "impossible_get_users", .. }
        ));
    }

    #[tokio::test]
    async fn test_row_to_record_decodes_storage_classes() {
        let (db, _repo) = repo().await;
        let row = sqlx::query("SELECT 'x' AS label, 42 AS amount, 1.5 AS ratio, NULL AS \"nothing\"")
            .fetch_one(db.pool())
            .await
            .unwrap();

        let record = row_to_record(&row).unwrap();
        assert_eq!(
            Value::Object(record),
            json!({ "label": "x", "amount": 42, "ratio": 1.5, "nothing": null })
        );
    }
}
