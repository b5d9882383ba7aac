//! # User Controller
//!
//! The inbound boundary for the user use cases. A transport layer (HTTP
//! handler, CLI command) hands it route parameters and a parsed body and
//! gets back a [`Reply`]: a status code and the finished [`Response`].
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  body + route id ──► Request          (id merged over the body)         │
//! │  Response::new()  ──► use_case.invoke(&request, &mut response)          │
//! │                   ──► UserTransformer on data["user"] / data["users"]   │
//! │                   ──► status_for()    (classification, never message)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use clean_core::{Collection, ErrorType, Record, Request, Response, Transformer, UseCase};
use serde::Serialize;

use crate::repository::UserRepository;
use crate::transformer::UserTransformer;
use crate::use_cases::{
    AddUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
    USERS_KEY, USER_KEY,
};

// =============================================================================
// Status Mapping
// =============================================================================

/// Status for one error classification.
pub fn status_for_error(kind: ErrorType) -> u16 {
    match kind {
        ErrorType::Validation => 400,
        ErrorType::NotFoundEntity => 404,
        ErrorType::Persistence | ErrorType::Generic => 500,
    }
}

/// Status for a finished response.
///
/// Successful responses get `on_success`. Failed ones get the most severe
/// status among their errors, or 500 when a failure carries no error.
pub fn status_for(response: &Response, on_success: u16) -> u16 {
    if response.is_success() {
        return on_success;
    }
    response
        .errors()
        .values()
        .flatten()
        .map(|error| status_for_error(error.kind()))
        .max()
        .unwrap_or(500)
}

/// What the controller hands back to the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub status: u16,
    #[serde(flatten)]
    pub response: Response,
}

// =============================================================================
// Controller
// =============================================================================

pub struct UserController {
    list: ListUsersUseCase,
    get: GetUserUseCase,
    add: AddUserUseCase,
    update: UpdateUserUseCase,
    delete: DeleteUserUseCase,
    transformer: UserTransformer,
}

impl UserController {
    /// Wires every user use case to `repository`.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        UserController {
            list: ListUsersUseCase::new(repository.clone()),
            get: GetUserUseCase::new(repository.clone()),
            add: AddUserUseCase::new(repository.clone()),
            update: UpdateUserUseCase::new(repository.clone()),
            delete: DeleteUserUseCase::new(repository),
            transformer: UserTransformer,
        }
    }

    /// `GET /users`
    pub async fn list(&self) -> Reply {
        self.run(&self.list, Request::empty(), 200).await
    }

    /// `GET /users/{id}`
    pub async fn get(&self, id: &str) -> Reply {
        self.run(&self.get, Self::with_id(Record::new(), id), 200).await
    }

    /// `POST /users`
    pub async fn add(&self, body: Record) -> Reply {
        self.run(&self.add, Request::from(body), 201).await
    }

    /// `PUT /users/{id}`
    pub async fn update(&self, id: &str, body: Record) -> Reply {
        self.run(&self.update, Self::with_id(body, id), 200).await
    }

    /// `DELETE /users/{id}`
    pub async fn delete(&self, id: &str) -> Reply {
        self.run(&self.delete, Self::with_id(Record::new(), id), 204).await
    }

    /// The route id wins over any `id` in the body.
    fn with_id(body: Record, id: &str) -> Request {
        Request::new(Collection::from(body).with("id", id))
    }

    async fn run(&self, use_case: &dyn UseCase, request: Request, on_success: u16) -> Reply {
        let mut response = Response::new();
        use_case.invoke(&request, &mut response).await;

        if let Some(user) = response.remove_data(USER_KEY) {
            response.add_data(USER_KEY, self.transformer.map_value(user));
        }
        if let Some(users) = response.remove_data(USERS_KEY) {
            response.add_data(USERS_KEY, self.transformer.map_multiple_value(users));
        }

        Reply {
            status: status_for(&response, on_success),
            response,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
