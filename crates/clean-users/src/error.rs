//! # Error Types
//!
//! Errors raised by the user domain.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UserFieldError        value object / input field rejected              │
//! │       │                                                                 │
//! │       ▼  is_valid()                                                     │
//! │  response.errors[<field>] += ApplicationError(code, ERROR_VALIDATION)   │
//! │                                                                         │
//! │  UserRepositoryError   collaborator failure                             │
//! │       │                                                                 │
//! │       ▼  execute()                                                      │
//! │  response.errors["generic"] += ApplicationError(code, NOT_FOUND /       │
//! │                                                 PERSISTENCE)            │
//! │                                                                         │
//! │  Neither error type ever leaves a use case.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clean_core::{ApplicationError, MapperError};
use thiserror::Error;

/// Stable code placed in the Response when a user does not exist.
pub const USER_NOT_FOUND: &str = "user_not_found";

// =============================================================================
// Field Errors
// =============================================================================

/// A user input field or value object was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserFieldError {
    /// Identifier is empty, too long, or has characters outside `[A-Za-z0-9_-]`.
    #[error("'{0}' is not a valid user id")]
    InvalidUserId(String),

    /// Address has no local part, no domain, or stray whitespace.
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    /// A required field is missing, empty or not a string.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl UserFieldError {
    /// Machine-readable code placed in the Response.
    pub fn code(&self) -> String {
        match self {
            UserFieldError::InvalidUserId(_) => "invalid_user_id".to_string(),
            UserFieldError::InvalidEmail(_) => "invalid_email".to_string(),
            UserFieldError::Required { field } => format!("{field}_required"),
            UserFieldError::TooShort { field, .. } => format!("{field}_too_short"),
            UserFieldError::TooLong { field, .. } => format!("{field}_too_long"),
        }
    }

    /// Converts into a validation descriptor.
    pub fn to_application_error(&self) -> ApplicationError {
        ApplicationError::validation(self.code())
    }
}

// =============================================================================
// Repository Errors
// =============================================================================

/// Failures reported by [`UserRepository`](crate::UserRepository)
/// implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserRepositoryError {
    /// No user with the given id.
    #[error("user not found: {id}")]
    NotFound { id: String },

    /// Storage failed. `code` is stable, `detail` is for logs only.
    #[error("{code}: {detail}")]
    Persistence { code: &'static str, detail: String },
}

impl UserRepositoryError {
    /// Creates a NotFound error.
    pub fn not_found(id: impl Into<String>) -> Self {
        UserRepositoryError::NotFound { id: id.into() }
    }

    /// Creates a Persistence error.
    pub fn persistence(code: &'static str, detail: impl ToString) -> Self {
        UserRepositoryError::Persistence {
            code,
            detail: detail.to_string(),
        }
    }

    /// Converts into the descriptor a use case places in the Response.
    ///
    /// Carries the stable code only, never `detail`.
    pub fn to_application_error(&self) -> ApplicationError {
        match self {
            UserRepositoryError::NotFound { .. } => ApplicationError::not_found(USER_NOT_FOUND),
            UserRepositoryError::Persistence { code, .. } => ApplicationError::persistence(*code),
        }
    }
}

/// Rows that come back from storage but do not map are a storage fault.
impl From<MapperError> for UserRepositoryError {
    fn from(err: MapperError) -> Self {
        UserRepositoryError::persistence("corrupt_user_record", err)
    }
}

/// Result type for repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

// =============================================================================
// Unit Tests
// =============================================================================
