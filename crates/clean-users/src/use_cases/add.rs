//! Register a new user.

use std::sync::Arc;

use async_trait::async_trait;
use clean_core::{ApplicationError, Mapper, Request, Response, UseCase, GENERIC_ERROR_KEY};
use tracing::{info, warn};

use super::{fail_with_repository_error, succeed_with_user, UserFields};
use crate::repository::UserRepository;
use crate::validation::FieldErrors;

/// Allocates an id, stores the user and returns it under `data["user"]`.
pub struct AddUserUseCase {
    repository: Arc<dyn UserRepository>,
    mapper: Mapper,
}

impl AddUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        AddUserUseCase {
            repository,
            mapper: Mapper::new(),
        }
    }
}

#[async_trait]
impl UseCase for AddUserUseCase {
    fn is_valid(&self, request: &Request, response: &mut Response) -> bool {
        let mut errors = FieldErrors::new();
        UserFields::check(request, &mut errors);
        errors.report(response)
    }

    async fn execute(&self, request: &Request, response: &mut Response) {
        let mut errors = FieldErrors::new();
        let Some(fields) = UserFields::check(request, &mut errors) else {
            errors.report(response);
            response.set_as_failed();
            return;
        };

        let id = self.repository.next_id();
        let user = match fields.into_entity(id, &self.mapper) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "New user did not map");
                response.fail_with(GENERIC_ERROR_KEY, ApplicationError::generic("invalid_user_data"));
                return;
            }
        };

        if let Err(err) = self.repository.add(&user).await {
            return fail_with_repository_error(response, "add_user", err);
        }

        info!(id = %user.id, "User added");
        succeed_with_user(response, &self.mapper, &user);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryUserRepository;
    use crate::repository::Operation;
    use crate::use_cases::fixtures::{assert_consistent, body};
    use crate::use_cases::USER_KEY;
    use clean_core::ErrorType;
    use serde_json::json;

    #[tokio::test]
    async fn test_adds_user_with_generated_id() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = AddUserUseCase::new(repo.clone());
        let mut response = Response::new();

        use_case.invoke(&Request::new(body()), &mut response).await;

        assert!(response.is_success());
        let stored = repo.snapshot().await;
        assert_eq!(stored.len(), 1);

        let data = response.data().get(USER_KEY).unwrap();
        assert_eq!(data["id"], json!(stored[0].id.value()));
        assert_eq!(data["name"], json!("Grace"));
        assert_eq!(repo.calls().await, vec![Operation::Add]);
    }

    #[tokio::test]
    async fn test_invalid_body_short_circuits() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = AddUserUseCase::new(repo.clone());
        let request = Request::new(body().with("email", "nope").with("password", "short"));
        let mut response = Response::new();

        use_case.invoke(&request, &mut response).await;

        assert!(!response.is_success());
        assert_eq!(response.errors_for("email")[0].message(), "invalid_email");
        assert_eq!(response.errors_for("password")[0].message(), "password_too_short");
        assert_eq!(response.errors_for("password")[0].kind(), ErrorType::Validation);
        assert!(repo.calls().await.is_empty());
        assert_consistent(&response);
    }

    #[tokio::test]
    async fn test_storage_failure_is_persistence_error() {
        let repo = InMemoryUserRepository::new().failing_on(Operation::Add);
        let use_case = AddUserUseCase::new(Arc::new(repo));
        let mut response = Response::new();

        use_case.invoke(&Request::new(body()), &mut response).await;

        assert!(!response.is_success());
        assert_eq!(
            response.errors_for(GENERIC_ERROR_KEY)[0].message(),
            "impossible_add_user"
        );
        assert!(!response.data().has(USER_KEY));
    }
}
