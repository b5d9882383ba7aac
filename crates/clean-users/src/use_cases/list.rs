//! List every user.

use std::sync::Arc;

use async_trait::async_trait;
use clean_core::{Mapper, Request, Response, UseCase};
use serde_json::Value;
use tracing::debug;

use super::{fail_with_repository_error, USERS_KEY};
use crate::repository::UserRepository;

/// Places every stored user, in storage order, under `data["users"]`.
pub struct ListUsersUseCase {
    repository: Arc<dyn UserRepository>,
    mapper: Mapper,
}

impl ListUsersUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        ListUsersUseCase {
            repository,
            mapper: Mapper::new(),
        }
    }
}

#[async_trait]
impl UseCase for ListUsersUseCase {
    async fn execute(&self, _request: &Request, response: &mut Response) {
        let users = match self.repository.all().await {
            Ok(users) => users,
            Err(err) => return fail_with_repository_error(response, "list_users", err),
        };

        debug!(count = users.len(), "Listing users");
        let records = self
            .mapper
            .to_multiple_array(&users)
            .into_iter()
            .map(Value::Object)
            .collect::<Vec<_>>();

        response.add_data(USERS_KEY, Value::Array(records));
        response.set_as_success();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
