//! # User Repository Port
//!
//! The storage interface the user use cases depend on. Adapters live in
//! other crates (`clean-db` for SQLite) or in [`memory`](crate::memory)
//! for tests.
//!
//! Every failure comes back as a [`UserRepositoryError`] value; adapters
//! never panic on storage faults. Persistence failures carry the stable
//! code of the [`Operation`] that failed.

use async_trait::async_trait;

use crate::entity::UserEntity;
use crate::error::{UserRepositoryError, UserRepositoryResult};
use crate::value_objects::UserId;

/// Repository operations, each with the code reported when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    All,
    Get,
    Find,
    Add,
    Update,
    Delete,
}

impl Operation {
    /// Stable failure code placed in the Response.
    pub fn failure_code(self) -> &'static str {
        match self {
            Operation::All => "impossible_get_users",
            Operation::Get => "impossible_get_user",
            Operation::Find => "impossible_find_user",
            Operation::Add => "impossible_add_user",
            Operation::Update => "impossible_update_user",
            Operation::Delete => "impossible_delete_user",
        }
    }

    /// Builds the Persistence error for this operation.
    pub fn failed(self, detail: impl ToString) -> UserRepositoryError {
        UserRepositoryError::persistence(self.failure_code(), detail)
    }
}

/// Storage for [`UserEntity`] values.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, in storage order.
    async fn all(&self) -> UserRepositoryResult<Vec<UserEntity>>;

    /// The user with `id`; `NotFound` when absent.
    async fn get_by_user_id(&self, id: &UserId) -> UserRepositoryResult<UserEntity>;

    /// Whether a user with `id` exists.
    async fn find_by_user_id(&self, id: &UserId) -> UserRepositoryResult<bool>;

    /// Stores a new user.
    async fn add(&self, user: &UserEntity) -> UserRepositoryResult<()>;

    /// Overwrites the stored user with the same id.
    async fn update(&self, user: &UserEntity) -> UserRepositoryResult<()>;

    /// Removes the user with `id`. Removing a missing user is not an error.
    async fn delete_by_user_id(&self, id: &UserId) -> UserRepositoryResult<()>;

    /// Allocates an id for a user about to be added.
    fn next_id(&self) -> UserId {
        UserId::generate()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_codes_are_distinct() {
        let ops = [
            Operation::All,
            Operation::Get,
            Operation::Find,
            Operation::Add,
            Operation::Update,
            Operation::Delete,
        ];
        let codes: std::collections::HashSet<_> = ops.iter().map(|op| op.failure_code()).collect();
        assert_eq!(codes.len(), ops.len());
    }

    #[test]
    fn test_failed_builds_persistence_error() {
        assert_eq!(
            Operation::Delete.failed("locked"),
            UserRepositoryError::Persistence {
                code: "impossible_delete_user",
                detail: "locked".to_string(),
            }
        );
    }
}
