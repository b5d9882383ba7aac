//! # Error Types
//!
//! Rust error types raised inside clean-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  clean-core errors (this file)                                         │
//! │  ├── InvalidEnumMember - closed-set value type rejected its input      │
//! │  └── MapperError       - record could not become an entity             │
//! │                                                                         │
//! │  Collaborator errors (domain crates)                                   │
//! │  └── UserRepositoryError - not found / persistence failure             │
//! │                                                                         │
//! │  None of these leave a use case. They are folded into the Response    │
//! │  error bag as ApplicationError descriptors (see application_error).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Invalid Enum Member
// =============================================================================

/// A value type was asked for a name or value outside its closed set.
///
/// Kept as its own type so validation code can tell it apart from any
/// other argument failure and turn it into a structured error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{given}' is not a member of {enum_name}")]
pub struct InvalidEnumMember {
    /// Name of the value type that rejected the input.
    pub enum_name: &'static str,
    /// The rejected name or value, rendered as a string.
    pub given: String,
}

impl InvalidEnumMember {
    /// Creates a new error for `enum_name`.
    pub fn new(enum_name: &'static str, given: impl Into<String>) -> Self {
        InvalidEnumMember {
            enum_name,
            given: given.into(),
        }
    }
}

// =============================================================================
// Mapper Error
// =============================================================================

/// Errors raised while converting records into typed entities.
///
/// A failed mapping never yields a partially populated entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapperError {
    /// A required key is absent from the record.
    #[error("missing field '{field}'")]
    MissingField { field: String },

    /// The stored value has the wrong JSON type for the declared field.
    ///
    /// ## When This Occurs
    /// - `"42"` supplied for an integer field
    /// - `1` supplied for a string field
    /// - an object supplied where a scalar value object is expected
    #[error("field '{field}' expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The value has the right JSON type but the nested value type
    /// refused it.
    #[error("field '{field}' has invalid value: {reason}")]
    InvalidValue { field: String, reason: String },

    /// The input handed to the mapper was not an object.
    #[error("expected a record object, found {found}")]
    NotARecord { found: &'static str },

    /// One record inside a sequence failed to map.
    #[error("record at index {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<MapperError>,
    },
}

impl MapperError {
    /// Creates a MissingField error.
    pub fn missing(field: impl Into<String>) -> Self {
        MapperError::MissingField {
            field: field.into(),
        }
    }

    /// Creates an InvalidValue error.
    pub fn invalid(field: impl Into<String>, reason: impl ToString) -> Self {
        MapperError::InvalidValue {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    /// Wraps this error with the position of the failing record.
    pub fn at_index(self, index: usize) -> Self {
        MapperError::AtIndex {
            index,
            source: Box::new(self),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for mapping results.
pub type MapperResult<T> = Result<T, MapperError>;

// =============================================================================
// Unit Tests
// =============================================================================
