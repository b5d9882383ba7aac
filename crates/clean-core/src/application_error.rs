//! # Application Errors
//!
//! The descriptors a use case places in the [`Response`](crate::Response)
//! error bag, and the fixed taxonomy that classifies them.
//!
//! ## Classification → Boundary Status
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ErrorType            Raised when                     Typical status    │
//! │  ───────────────────  ──────────────────────────────  ──────────────    │
//! │  ERROR_VALIDATION     isValid() rejected the input    400               │
//! │  ENTITY_NOT_FOUND     collaborator found no entity    404               │
//! │  PERSISTENCE_ERROR    collaborator storage failure    500               │
//! │  GENERIC_ERROR        anything unclassified           500               │
//! │                                                                         │
//! │  Boundaries branch on the ErrorType, never on the message text.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Bag key for errors that do not belong to a single input field.
pub const GENERIC_ERROR_KEY: &str = "generic";

crate::enum_type! {
    /// Classification attached to every [`ApplicationError`].
    pub enum ErrorType: &'static str {
        /// Input failed validation before any domain logic ran.
        Validation("ERROR_VALIDATION") = "ERROR_VALIDATION",
        /// A collaborator reported the requested entity does not exist.
        NotFoundEntity("ENTITY_NOT_FOUND") = "ENTITY_NOT_FOUND",
        /// A collaborator failed to read or write its storage.
        Persistence("PERSISTENCE_ERROR") = "PERSISTENCE_ERROR",
        /// Unclassified failure.
        Generic("GENERIC_ERROR") = "GENERIC_ERROR",
    }
}

/// One error descriptor: a stable message or code plus its classification.
///
/// ## Serialization
/// ```json
/// { "message": "user_not_found", "type": "ENTITY_NOT_FOUND" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationError {
    message: String,
    #[serde(rename = "type")]
    kind: ErrorType,
}

impl ApplicationError {
    /// Creates a descriptor with an explicit classification.
    pub fn new(message: impl Into<String>, kind: ErrorType) -> Self {
        ApplicationError {
            message: message.into(),
            kind,
        }
    }

    /// Creates an [`ErrorType::Validation`] descriptor.
    pub fn validation(message: impl Into<String>) -> Self {
        ApplicationError::new(message, ErrorType::Validation)
    }

    /// Creates an [`ErrorType::NotFoundEntity`] descriptor.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApplicationError::new(message, ErrorType::NotFoundEntity)
    }

    /// Creates an [`ErrorType::Persistence`] descriptor.
    pub fn persistence(message: impl Into<String>) -> Self {
        ApplicationError::new(message, ErrorType::Persistence)
    }

    /// Creates an [`ErrorType::Generic`] descriptor.
    pub fn generic(message: impl Into<String>) -> Self {
        ApplicationError::new(message, ErrorType::Generic)
    }

    /// The message or error code.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The classification.
    pub fn kind(&self) -> ErrorType {
        self.kind
    }
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
