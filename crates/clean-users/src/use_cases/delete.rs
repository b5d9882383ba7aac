//! Remove a user.

use std::sync::Arc;

use async_trait::async_trait;
use clean_core::{Request, Response, UseCase};
use tracing::info;

use super::{check_user_id, fail_not_found, fail_with_repository_error, user_id_or_fail};
use crate::repository::UserRepository;
use crate::validation::FieldErrors;

/// Deletes the user with the requested `id`. Produces no data.
pub struct DeleteUserUseCase {
    repository: Arc<dyn UserRepository>,
}

impl DeleteUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        DeleteUserUseCase { repository }
    }
}

#[async_trait]
impl UseCase for DeleteUserUseCase {
    fn is_valid(&self, request: &Request, response: &mut Response) -> bool {
        let mut errors = FieldErrors::new();
        check_user_id(request, &mut errors);
        errors.report(response)
    }

    async fn execute(&self, request: &Request, response: &mut Response) {
        let Some(id) = user_id_or_fail(request, response) else {
            return;
        };

        match self.repository.find_by_user_id(&id).await {
            Ok(true) => {}
            Ok(false) => return fail_not_found(response),
            Err(err) => return fail_with_repository_error(response, "delete_user", err),
        }

        if let Err(err) = self.repository.delete_by_user_id(&id).await {
            return fail_with_repository_error(response, "delete_user", err);
        }

        info!(id = %id, "User deleted");
        response.set_as_success();
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
    use crate::use_cases::fixtures::{assert_consistent, id_request, user};
    use clean_core::{ErrorType, GENERIC_ERROR_KEY};

    #[tokio::test]
    async fn test_deletes_existing_user() {
        let repo = Arc::new(
            InMemoryUserRepository::new().with_users([user("u-1", "Ada"), user("u-2", "Grace")]),
        );
        let use_case = DeleteUserUseCase::new(repo.clone());
        let mut response = Response::new();

        use_case.invoke(&id_request("u-1"), &mut response).await;

        assert!(response.is_success());
        assert!(response.data().is_empty());
        assert_eq!(repo.snapshot().await, vec![user("u-2", "Grace")]);
    }

    #[tokio::test]
    async fn test_deleting_unknown_id_is_not_found() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = DeleteUserUseCase::new(repo.clone());
        let mut response = Response::new();

        use_case.invoke(&id_request("abc"), &mut response).await;

        assert!(!response.is_success());
        let errors = response.errors_for(GENERIC_ERROR_KEY);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ErrorType::NotFoundEntity);
        assert_eq!(repo.calls().await, vec![Operation::Find]);
        assert_consistent(&response);
    }

    #[tokio::test]
    async fn test_delete_failure_is_persistence_error() {
        let repo = InMemoryUserRepository::new()
            .with_users([user("u-1", "Ada")])
            .failing_on(Operation::Delete);
        let use_case = DeleteUserUseCase::new(Arc::new(repo));
        let mut response = Response::new();

        use_case.invoke(&id_request("u-1"), &mut response).await;

        assert!(!response.is_success());
        assert_eq!(
            response.errors_for(GENERIC_ERROR_KEY)[0].message(),
            "impossible_delete_user"
        );
    }

    #[tokio::test]
    async fn test_missing_id_is_validation_error() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = DeleteUserUseCase::new(repo.clone());
        let mut response = Response::new();

        use_case.invoke(&Request::empty(), &mut response).await;

        assert_eq!(response.errors_for("id")[0].message(), "invalid_user_id");
        assert!(repo.calls().await.is_empty());
    }
}
