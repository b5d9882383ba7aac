//! # clean-db: SQLite Adapter
//!
//! Provides the SQLite implementation of the user repository port, plus
//! the pool, configuration and migrations it needs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UserController / use cases (clean-users)                               │
//! │       │  Arc<dyn UserRepository>                                        │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     clean-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────────┐  ┌────────────┐ │   │
//! │  │   │   Database    │    │ SqliteUserRepository│  │ Migrations │ │   │
//! │  │   │   (pool.rs)   │◄───│   (repository.rs)   │  │ (embedded) │ │   │
//! │  │   └───────────────┘    └─────────────────────┘  └────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (CLEAN_DB_PATH)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use clean_db::{Database, DbConfig};
//! use clean_users::UserController;
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let controller = UserController::new(Arc::new(db.users()));
//! let reply = controller.list().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, Location};
pub use repository::SqliteUserRepository;

/// Installs the `tracing` subscriber used by the binaries.
///
/// Honors `RUST_LOG`; defaults to `info,clean=debug,sqlx=warn`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,clean=debug,sqlx=warn"));

    // a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clean_core::{Collection, Request, Response, UseCase};
    use clean_users::{
        AddUserUseCase, DeleteUserUseCase, ListUsersUseCase, UserController,
        USERS_KEY,
    };
    use serde_json::Value;
    use std::sync::Arc;

    fn body(name: &str) -> Collection {
        Collection::new()
            .with("name", name)
            .with("surname", "Tester")
            .with("email", format!("{}@example.com", name.to_lowercase()))
            .with("password", "correct-horse")
    }

    #[tokio::test]
    async fn test_use_cases_over_sqlite() {
        init_tracing();
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repository = Arc::new(db.users());

        let add = AddUserUseCase::new(repository.clone());
        for name in ["Ada", "Grace", "Barbara"] {
            let mut response = Response::new();
            add.invoke(&Request::new(body(name)), &mut response).await;
            assert!(response.is_success(), "{response:?}");
        }

        let mut response = Response::new();
        ListUsersUseCase::new(repository.clone())
            .invoke(&Request::empty(), &mut response)
            .await;

        assert!(response.is_success());
        let users = response.data().get(USERS_KEY).and_then(Value::as_array).unwrap();
        let names: Vec<_> = users.iter().map(|u| u["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Ada", "Grace", "Barbara"]);
    }

    #[tokio::test]
    async fn test_controller_over_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let controller = UserController::new(Arc::new(db.users()));

        let created = controller.add(body("Ada").into_inner()).await;
        assert_eq!(created.status, 201);
        let id = created.response.data().get("user").unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string();

        assert_eq!(controller.get(&id).await.status, 200);
        assert_eq!(controller.delete(&id).await.status, 204);
        assert_eq!(controller.get(&id).await.status, 404);

        let mut response = Response::new();
        DeleteUserUseCase::new(Arc::new(db.users()))
            .invoke(&Request::new(Collection::new().with("id", "abc")), &mut response)
            .await;
        assert!(!response.is_success());
    }
}
