//! # Input Validation
//!
//! Field rules applied by the use cases' `is_valid` step, before any
//! repository call.
//!
//! Each validator reads one key from the [`Request`] and either returns
//! the typed value or a [`UserFieldError`]. [`FieldErrors`] collects the
//! failures under the field name so `is_valid` can report every violation
//! at once rather than stopping at the first.

use clean_core::{Request, Response};

use crate::error::UserFieldError;
use crate::value_objects::{Email, UserId};

/// Maximum length for name and surname.
pub const NAME_MAX: usize = 100;

/// Minimum password length.
pub const PASSWORD_MIN: usize = 8;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, UserFieldError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Reads `id` as a [`UserId`].
///
/// A missing id reads as the empty string and is rejected the same way
/// as a malformed one.
pub fn validate_user_id(request: &Request) -> ValidationResult<UserId> {
    UserId::create_from_string(request.get_str("id", ""))
}

/// Reads `email` as an [`Email`].
pub fn validate_email(request: &Request) -> ValidationResult<Email> {
    match request.get_str("email", "") {
        "" => Err(UserFieldError::Required { field: "email" }),
        raw => Email::new(raw),
    }
}

/// Reads a required, trimmed, length-bounded text field.
///
/// ## Example
/// ```rust
/// use clean_core::{Collection, Request};
/// use clean_users::validation::validate_name;
///
/// let request = Request::new(Collection::new().with("name", "  Ada "));
/// assert_eq!(validate_name(&request, "name").unwrap(), "Ada");
/// assert!(validate_name(&request, "surname").is_err());
/// ```
pub fn validate_name(request: &Request, field: &'static str) -> ValidationResult<String> {
    let value = request.get_str(field, "").trim();

    if value.is_empty() {
        return Err(UserFieldError::Required { field });
    }

    if value.chars().count() > NAME_MAX {
        return Err(UserFieldError::TooLong {
            field,
            max: NAME_MAX,
        });
    }

    Ok(value.to_string())
}

/// Reads `password`. Stored as given, never trimmed.
pub fn validate_password(request: &Request) -> ValidationResult<String> {
    let value = request.get_str("password", "");

    if value.is_empty() {
        return Err(UserFieldError::Required { field: "password" });
    }

    if value.chars().count() < PASSWORD_MIN {
        return Err(UserFieldError::TooShort {
            field: "password",
            min: PASSWORD_MIN,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Error Collection
// =============================================================================

/// Accumulates field failures and flushes them into a [`Response`].
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<(&'static str, UserFieldError)>,
}

impl FieldErrors {
    /// Creates an empty collector.
    pub fn new() -> Self {
        FieldErrors::default()
    }

    /// Records the error of `result`, if any, under `field`.
    pub fn check<T>(&mut self, field: &'static str, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push((field, err));
                None
            }
        }
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds every recorded failure to `response`; returns whether it is
    /// still error-free.
    pub fn report(self, response: &mut Response) -> bool {
        for (field, err) in self.errors {
            response.add_error(field, err.to_application_error());
        }
        !response.has_errors()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
