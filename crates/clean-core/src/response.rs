//! # Response
//!
//! Mutable result carrier populated by exactly one use-case invocation.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Boundary                      UseCase                                  │
//! │  ────────                      ───────                                  │
//! │  let mut response =                                                    │
//! │      Response::new();                                                  │
//! │        │                                                                │
//! │        │  &mut response  ────►  sole writer while invoke() runs        │
//! │        │                        add_data / add_error / set_as_*        │
//! │        │  ◄──── borrow ends ──  invoke() returns                       │
//! │        ▼                                                                │
//! │  response.is_success()                                                 │
//! │  response.data() / errors()   (read-only from here on)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The flag starts out [`Outcome::Pending`], which reads as "not a success".

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::application_error::ApplicationError;
use crate::collection::Collection;

/// Error bag: category key → ordered descriptors.
pub type ErrorBag = BTreeMap<String, Vec<ApplicationError>>;

/// Where an invocation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing has set the flag yet.
    #[default]
    Pending,
    /// The use case completed its domain logic.
    Succeeded,
    /// Validation or domain logic failed.
    Failed,
}

/// Result of a use-case invocation: flag, data payload and error bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    outcome: Outcome,
    data: Collection,
    errors: ErrorBag,
}

impl Response {
    /// Creates an empty, pending response.
    pub fn new() -> Self {
        Response::default()
    }

    // -------------------------------------------------------------------------
    // Flag
    // -------------------------------------------------------------------------

    /// Marks the invocation as successful.
    pub fn set_as_success(&mut self) {
        self.outcome = Outcome::Succeeded;
    }

    /// Marks the invocation as failed.
    pub fn set_as_failed(&mut self) {
        self.outcome = Outcome::Failed;
    }

    /// True only after [`set_as_success`](Self::set_as_success).
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Succeeded
    }

    /// The raw outcome, including the pending state.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Stores `value` under `key` in the payload.
    pub fn add_data(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.set(key, value);
    }

    /// Removes and returns the payload entry under `key`.
    pub fn remove_data(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// The full payload.
    pub fn data(&self) -> &Collection {
        &self.data
    }

    // -------------------------------------------------------------------------
    // Errors
    // -------------------------------------------------------------------------

    /// Appends `error` to the bag named `category`, creating the bag if
    /// needed.
    ///
    /// Callers must also call [`set_as_failed`](Self::set_as_failed)
    /// before handing the response back.
    pub fn add_error(&mut self, category: impl Into<String>, error: ApplicationError) {
        self.errors.entry(category.into()).or_default().push(error);
    }

    /// Adds `error` and marks the invocation failed in one step.
    pub fn fail_with(&mut self, category: impl Into<String>, error: ApplicationError) {
        self.add_error(category, error);
        self.set_as_failed();
    }

    /// True iff at least one error was added, regardless of the flag.
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|bag| !bag.is_empty())
    }

    /// The full error bag.
    pub fn errors(&self) -> &ErrorBag {
        &self.errors
    }

    /// Errors recorded under `category`; empty when there are none.
    pub fn errors_for(&self, category: &str) -> &[ApplicationError] {
        self.errors.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First error in bag order, if any.
    pub fn first_error(&self) -> Option<&ApplicationError> {
        self.errors.values().flatten().next()
    }

    /// Checks the flag/error invariant: never success with errors present.
    pub fn is_consistent(&self) -> bool {
        !(self.is_success() && self.has_errors())
    }
}

/// Renders as `{ "success": bool, "data": {...}, "errors": {...} }`.
impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Response", 3)?;
        state.serialize_field("success", &self.is_success())?;
        state.serialize_field("data", &self.data)?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
