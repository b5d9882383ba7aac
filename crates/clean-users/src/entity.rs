//! # User Entity

use crate::value_objects::{Email, UserId};

/// A registered user.
///
/// Maps to the flat record
/// `{ "id", "name", "surname", "email", "password" }`; the value objects
/// are stored as their plain strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntity {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub email: Email,
    pub password: String,
}

clean_core::mappable!(UserEntity {
    id: UserId,
    name: String,
    surname: String,
    email: Email,
    password: String,
});

impl UserEntity {
    /// Assembles a user from already-validated parts.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        surname: impl Into<String>,
        email: Email,
        password: impl Into<String>,
    ) -> Self {
        UserEntity {
            id,
            name: name.into(),
            surname: surname.into(),
            email,
            password: password.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
