//! # Value Objects
//!
//! Validated wrappers around the primitives stored in a user record.
//!
//! Both types map to and from a plain JSON string, so
//! [`mappable!`](clean_core::mappable) can nest them inside
//! [`UserEntity`](crate::UserEntity) and flatten them back out.

use std::fmt;

use clean_core::{FieldValue, MapperError, MapperResult, NonNullField};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::UserFieldError;

/// Maximum length of a user id.
pub const USER_ID_MAX: usize = 64;

// =============================================================================
// UserId
// =============================================================================

/// Stable user identifier.
///
/// Generated ids are hyphenated v4 UUIDs; stored ids only need to be
/// 1..=64 characters from `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validates and wraps `raw`.
    pub fn create_from_string(raw: impl Into<String>) -> Result<Self, UserFieldError> {
        let raw = raw.into();
        let well_formed = !raw.is_empty()
            && raw.len() <= USER_ID_MAX
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if well_formed {
            Ok(UserId(raw))
        } else {
            Err(UserFieldError::InvalidUserId(raw))
        }
    }

    /// Allocates a fresh random id.
    pub fn generate() -> Self {
        UserId(Uuid::new_v4().to_string())
    }

    /// The stored string.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserFieldError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        UserId::create_from_string(raw)
    }
}

impl FieldValue for UserId {
    const EXPECTED: &'static str = "user id string";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        let raw = String::from_field(field, value)?;
        UserId::create_from_string(raw).map_err(|err| MapperError::invalid(field, err))
    }

    fn to_field(&self) -> Value {
        Value::String(self.0.clone())
    }
}

impl NonNullField for UserId {}

// =============================================================================
// Email
// =============================================================================

/// Email address with a non-empty local part and a dotted domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validates and wraps `raw`.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserFieldError> {
        let raw = raw.into();
        if is_valid_email(&raw) {
            Ok(Email(raw))
        } else {
            Err(UserFieldError::InvalidEmail(raw))
        }
    }

    /// The stored address.
    pub fn value(&self) -> &str {
        &self.0
    }
}

fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserFieldError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Email::new(raw)
    }
}

impl FieldValue for Email {
    const EXPECTED: &'static str = "email string";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        let raw = String::from_field(field, value)?;
        Email::new(raw).map_err(|err| MapperError::invalid(field, err))
    }

    fn to_field(&self) -> Value {
        Value::String(self.0.clone())
    }
}

impl NonNullField for Email {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_accepts_opaque_ids() {
        assert!(UserId::create_from_string("abc").is_ok());
        assert!(UserId::create_from_string("user_42-x").is_ok());
        assert!(UserId::create_from_string(UserId::generate().to_string()).is_ok());
    }

    #[test]
    fn test_user_id_rejects_malformed() {
        let too_long = "a".repeat(USER_ID_MAX + 1);
        for raw in ["", "has space", "semi;colon", too_long.as_str()] {
            assert_eq!(
                UserId::create_from_string(raw),
                Err(UserFieldError::InvalidUserId(raw.to_string())),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let a = UserId::generate();
        let b = UserId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.value()).is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(Email::new("ada@example.com").is_ok());
        for raw in ["", "ada", "@example.com", "ada@", "ada@localhost", "a b@x.io", "a@b@c.io", "ada@x..io"] {
            assert!(Email::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_field_value_unwraps_to_string() {
        let id = UserId::create_from_string("abc").unwrap();
        assert_eq!(id.to_field(), json!("abc"));
        assert_eq!(UserId::from_field("id", &json!("abc")).unwrap(), id);
    }

    #[test]
    fn test_field_value_is_strict() {
        assert!(matches!(
            UserId::from_field("id", &json!(42)),
            Err(MapperError::TypeMismatch { .. })
        ));
        assert!(matches!(
            Email::from_field("email", &json!("nope")),
            Err(MapperError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let email: Email = serde_json::from_value(json!("ada@example.com")).unwrap();
        assert_eq!(serde_json::to_value(&email).unwrap(), json!("ada@example.com"));
        assert!(serde_json::from_value::<Email>(json!("nope")).is_err());
    }
}
