//! # In-Memory User Repository
//!
//! A [`UserRepository`] backed by a `Vec`, used by the use-case tests and
//! by callers that want the user domain without a database.
//!
//! Besides storing users it records every port call it receives, and can
//! be told to fail chosen operations, so tests can assert both "the
//! repository was never touched" and "a storage failure becomes a
//! PERSISTENCE_ERROR".

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::entity::UserEntity;
use crate::error::{UserRepositoryError, UserRepositoryResult};
use crate::repository::{Operation, UserRepository};
use crate::value_objects::UserId;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<UserEntity>>,
    failing: HashSet<Operation>,
    calls: Mutex<Vec<Operation>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with users, kept in the given order.
    pub fn with_users(mut self, users: impl IntoIterator<Item = UserEntity>) -> Self {
        self.users.get_mut().extend(users);
        self
    }

    /// Make `operation` return its Persistence error from now on.
    pub fn failing_on(mut self, operation: Operation) -> Self {
        self.failing.insert(operation);
        self
    }

    /// Every port call received so far, in order.
    pub async fn calls(&self) -> Vec<Operation> {
        self.calls.lock().await.clone()
    }

    /// Snapshot of the stored users.
    pub async fn snapshot(&self) -> Vec<UserEntity> {
        self.users.read().await.clone()
    }

    async fn enter(&self, operation: Operation) -> UserRepositoryResult<()> {
        self.calls.lock().await.push(operation);
        if self.failing.contains(&operation) {
            debug!(?operation, "Injected repository failure");
            return Err(operation.failed("injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn all(&self) -> UserRepositoryResult<Vec<UserEntity>> {
        self.enter(Operation::All).await?;
        Ok(self.users.read().await.clone())
    }

    async fn get_by_user_id(&self, id: &UserId) -> UserRepositoryResult<UserEntity> {
        self.enter(Operation::Get).await?;
        self.users
            .read()
            .await
            .iter()
            .find(|user| &user.id == id)
            .cloned()
            .ok_or_else(|| UserRepositoryError::not_found(id.value()))
    }

    async fn find_by_user_id(&self, id: &UserId) -> UserRepositoryResult<bool> {
        self.enter(Operation::Find).await?;
        Ok(self.users.read().await.iter().any(|user| &user.id == id))
    }

    async fn add(&self, user: &UserEntity) -> UserRepositoryResult<()> {
        self.enter(Operation::Add).await?;
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.id == user.id) {
            return Err(Operation::Add.failed(format!("duplicate id {}", user.id)));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &UserEntity) -> UserRepositoryResult<()> {
        self.enter(Operation::Update).await?;
        let mut users = self.users.write().await;
        if let Some(existing) = users.iter_mut().find(|existing| existing.id == user.id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn delete_by_user_id(&self, id: &UserId) -> UserRepositoryResult<()> {
        self.enter(Operation::Delete).await?;
        self.users.write().await.retain(|user| &user.id != id);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
