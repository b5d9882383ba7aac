//! # clean-users: User Domain
//!
//! A complete domain built on `clean-core`: the user entity and its value
//! objects, the repository port, the five user use cases, and the
//! controller that drives them from a transport.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  controller     UserController ──► Reply { status, response }          │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  use_cases      List / Get / Add / Update / Delete (UseCase impls)     │
//! │      │              │ validation        │ Mapper                        │
//! │      ▼              ▼                   ▼                               │
//! │  repository     UserRepository port  ◄── memory::InMemoryUserRepository│
//! │                                      ◄── clean-db::SqliteUserRepository│
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  entity         UserEntity { UserId, Email, ... }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use clean_users::{InMemoryUserRepository, UserController};
//!
//! async fn delete_missing() {
//!     let controller = UserController::new(Arc::new(InMemoryUserRepository::new()));
//!     let reply = controller.delete("abc").await;
//!     assert_eq!(reply.status, 404);
//! }
//! ```

pub mod controller;
pub mod entity;
pub mod error;
pub mod memory;
pub mod repository;
pub mod transformer;
pub mod use_cases;
pub mod validation;
pub mod value_objects;

pub use controller::{status_for, status_for_error, Reply, UserController};
pub use entity::UserEntity;
pub use error::{UserFieldError, UserRepositoryError, UserRepositoryResult, USER_NOT_FOUND};
pub use memory::InMemoryUserRepository;
pub use repository::{Operation, UserRepository};
pub use transformer::UserTransformer;
pub use use_cases::{
    AddUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
    USERS_KEY, USER_KEY,
};
pub use value_objects::{Email, UserId};
