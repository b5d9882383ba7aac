//! Overwrite an existing user.

use std::sync::Arc;

use async_trait::async_trait;
use clean_core::{ApplicationError, Mapper, Request, Response, UseCase, GENERIC_ERROR_KEY};
use tracing::{info, warn};

use super::{
    check_user_id, fail_not_found, fail_with_repository_error, succeed_with_user,
    user_id_or_fail, UserFields,
};
use crate::repository::UserRepository;
use crate::validation::FieldErrors;

/// Replaces every field of the user with the requested `id`.
pub struct UpdateUserUseCase {
    repository: Arc<dyn UserRepository>,
    mapper: Mapper,
}

impl UpdateUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        UpdateUserUseCase {
            repository,
            mapper: Mapper::new(),
        }
    }
}

#[async_trait]
impl UseCase for UpdateUserUseCase {
    fn is_valid(&self, request: &Request, response: &mut Response) -> bool {
        let mut errors = FieldErrors::new();
        check_user_id(request, &mut errors);
        UserFields::check(request, &mut errors);
        errors.report(response)
    }

    async fn execute(&self, request: &Request, response: &mut Response) {
        let Some(id) = user_id_or_fail(request, response) else {
            return;
        };
        let mut errors = FieldErrors::new();
        let Some(fields) = UserFields::check(request, &mut errors) else {
            errors.report(response);
            response.set_as_failed();
            return;
        };

        match self.repository.find_by_user_id(&id).await {
            Ok(true) => {}
            Ok(false) => return fail_not_found(response),
            Err(err) => return fail_with_repository_error(response, "update_user", err),
        }

        let user = match fields.into_entity(id, &self.mapper) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "Updated user did not map");
                response.fail_with(GENERIC_ERROR_KEY, ApplicationError::generic("invalid_user_data"));
                return;
            }
        };

        if let Err(err) = self.repository.update(&user).await {
            return fail_with_repository_error(response, "update_user", err);
        }

        info!(id = %user.id, "User updated");
        succeed_with_user(response, &self.mapper, &user);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
