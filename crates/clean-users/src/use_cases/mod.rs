//! # User Use Cases
//!
//! One [`UseCase`](clean_core::UseCase) per user operation.
//!
//! ## Shared Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_valid()   field validators → errors keyed by field name            │
//! │                                  (ERROR_VALIDATION)                     │
//! │  execute()    repository call  → Ok:  data["user" | "users"], success  │
//! │                                → Err: errors["generic"], failed        │
//! │                                       (ENTITY_NOT_FOUND /               │
//! │                                        PERSISTENCE_ERROR)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Use case             | Input                               | Data key  |
//! |----------------------|-------------------------------------|-----------|
//! | [`ListUsersUseCase`] | none                                | `users`   |
//! | [`GetUserUseCase`]   | `id`                                | `user`    |
//! | [`AddUserUseCase`]   | `name`, `surname`, `email`, `password` | `user` |
//! | [`UpdateUserUseCase`]| `id` + the add fields               | `user`    |
//! | [`DeleteUserUseCase`]| `id`                                | none      |

mod add;
mod delete;
mod get;
mod list;
mod update;

pub use add::AddUserUseCase;
pub use delete::DeleteUserUseCase;
pub use get::GetUserUseCase;
pub use list::ListUsersUseCase;
pub use update::UpdateUserUseCase;

use clean_core::{
    ApplicationError, Collection, Mapper, MapperResult, Record, Request, Response,
    GENERIC_ERROR_KEY,
};
use serde_json::Value;
use tracing::warn;

use crate::entity::UserEntity;
use crate::error::{UserRepositoryError, USER_NOT_FOUND};
use crate::validation::{
    validate_email, validate_name, validate_password, validate_user_id, FieldErrors,
};
use crate::value_objects::{Email, UserId};

/// Data key for a single user.
pub const USER_KEY: &str = "user";

/// Data key for a list of users.
pub const USERS_KEY: &str = "users";

// =============================================================================
// Request Parsing
// =============================================================================

/// Body fields shared by add and update.
#[derive(Debug)]
struct UserFields {
    name: String,
    surname: String,
    email: Email,
    password: String,
}

impl UserFields {
    /// Validates every body field, recording each failure.
    fn check(request: &Request, errors: &mut FieldErrors) -> Option<Self> {
        let name = errors.check("name", validate_name(request, "name"));
        let surname = errors.check("surname", validate_name(request, "surname"));
        let email = errors.check("email", validate_email(request));
        let password = errors.check("password", validate_password(request));

        Some(UserFields {
            name: name?,
            surname: surname?,
            email: email?,
            password: password?,
        })
    }

    /// Builds the user these fields describe.
    fn into_entity(self, id: UserId, mapper: &Mapper) -> MapperResult<UserEntity> {
        let record: Record = Collection::new()
            .with("id", String::from(id))
            .with("name", self.name)
            .with("surname", self.surname)
            .with("email", String::from(self.email))
            .with("password", self.password)
            .into_inner();
        mapper.to_object(&record)
    }
}

/// Reads `id`, recording a failure under the `id` key.
fn check_user_id(request: &Request, errors: &mut FieldErrors) -> Option<UserId> {
    errors.check("id", validate_user_id(request))
}

/// Re-derives the id in `execute`; fails the response if it cannot.
fn user_id_or_fail(request: &Request, response: &mut Response) -> Option<UserId> {
    match validate_user_id(request) {
        Ok(id) => Some(id),
        Err(err) => {
            response.fail_with("id", err.to_application_error());
            None
        }
    }
}

// =============================================================================
// Response Folding
// =============================================================================

/// Folds a repository failure into the generic error bag.
fn fail_with_repository_error(response: &mut Response, use_case: &str, err: UserRepositoryError) {
    warn!(use_case, error = %err, "Repository call failed");
    response.fail_with(GENERIC_ERROR_KEY, err.to_application_error());
}

/// Reports a user that `find_by_user_id` did not find.
fn fail_not_found(response: &mut Response) {
    response.fail_with(GENERIC_ERROR_KEY, ApplicationError::not_found(USER_NOT_FOUND));
}

/// Places one user under `data["user"]` and marks success.
fn succeed_with_user(response: &mut Response, mapper: &Mapper, user: &UserEntity) {
    response.add_data(USER_KEY, Value::Object(mapper.to_array(user)));
    response.set_as_success();
}

// =============================================================================
// Shared Test Fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(id: &str, name: &str) -> UserEntity {
        UserEntity::new(
            UserId::create_from_string(id).unwrap(),
            name,
            "Tester",
            Email::new(format!("{}@example.com", name.to_lowercase())).unwrap(),
            "correct-horse",
        )
    }

    pub fn body() -> Collection {
        Collection::new()
            .with("name", "Grace")
            .with("surname", "Hopper")
            .with("email", "grace@example.com")
            .with("password", "cobol-1959")
    }

    pub fn id_request(id: &str) -> Request {
        Request::new(Collection::new().with("id", id))
    }

    /// Checks the flag/error invariant on a finished response.
    pub fn assert_consistent(response: &Response) {
        if response.has_errors() {
            assert!(!response.is_success(), "errors present but success reported: {:?}", response);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_fields_report_every_failure() {
        let mut errors = FieldErrors::new();
        assert!(UserFields::check(&Request::empty(), &mut errors).is_none());

        let mut response = Response::new();
        errors.report(&mut response);
        for field in ["name", "surname", "email", "password"] {
            assert_eq!(response.errors_for(field).len(), 1, "{field}");
        }
    }

    #[test]
    fn test_user_fields_build_entity_through_mapper() {
        let mut errors = FieldErrors::new();
        let fields = UserFields::check(&Request::new(fixtures::body()), &mut errors).unwrap();
        let id = UserId::create_from_string("u-9").unwrap();

        let user = fields.into_entity(id.clone(), &Mapper).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email.value(), "grace@example.com");
        assert!(errors.is_empty());
    }
}
