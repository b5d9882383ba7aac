//! Fetch one user by id.

use std::sync::Arc;

use async_trait::async_trait;
use clean_core::{Mapper, Request, Response, UseCase};

use super::{check_user_id, fail_with_repository_error, succeed_with_user, user_id_or_fail};
use crate::repository::UserRepository;
use crate::validation::FieldErrors;

/// Places the user with the requested `id` under `data["user"]`.
pub struct GetUserUseCase {
    repository: Arc<dyn UserRepository>,
    mapper: Mapper,
}

impl GetUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        GetUserUseCase {
            repository,
            mapper: Mapper::new(),
        }
    }
}

#[async_trait]
impl UseCase for GetUserUseCase {
    fn is_valid(&self, request: &Request, response: &mut Response) -> bool {
        let mut errors = FieldErrors::new();
        check_user_id(request, &mut errors);
        errors.report(response)
    }

    async fn execute(&self, request: &Request, response: &mut Response) {
        let Some(id) = user_id_or_fail(request, response) else {
            return;
        };

        match self.repository.get_by_user_id(&id).await {
            Ok(user) => succeed_with_user(response, &self.mapper, &user),
            Err(err) => fail_with_repository_error(response, "get_user", err),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
