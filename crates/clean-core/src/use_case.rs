//! # Use-Case Protocol
//!
//! How a caller invokes one unit of business logic.
//!
//! ## Invocation State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  START ──► VALIDATING ──┬── valid ───► EXECUTING ──┬──► SUCCESS        │
//! │             is_valid()  │               execute()  │                    │
//! │                         │                          └──► FAILED         │
//! │                         │                                               │
//! │                         └── invalid ─────────────────► FAILED          │
//! │                              (execute() never runs,                     │
//! │                               no collaborator is touched)               │
//! │                                                                         │
//! │  On exit the Response is settled:                                      │
//! │    success with errors  ──► FAILED                                     │
//! │    still PENDING        ──► FAILED                                     │
//! │    FAILED, no errors    ──► errors["generic"] += unreported_failure    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementors write [`is_valid`](UseCase::is_valid) and
//! [`execute`](UseCase::execute); callers only ever call
//! [`invoke`](UseCase::invoke).
//!
//! Collaborator failures are returned as values, caught inside `execute`,
//! and folded into the Response. Nothing a collaborator raises escapes
//! `invoke`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application_error::{ApplicationError, GENERIC_ERROR_KEY};
use crate::request::Request;
use crate::response::{Outcome, Response};

/// Message of the generic error added when a use case fails without
/// saying why.
pub const UNREPORTED_FAILURE: &str = "unreported_failure";

/// A single application operation.
///
/// `invoke` runs to completion before returning; the `&mut Response`
/// borrow makes the use case the only writer for that duration.
#[async_trait]
pub trait UseCase: Send + Sync {
    /// Checks the request, appending one error per violation.
    ///
    /// Returns whether the response is still error-free. Must not touch
    /// the success flag. The default accepts every request.
    fn is_valid(&self, _request: &Request, response: &mut Response) -> bool {
        !response.has_errors()
    }

    /// Domain logic; only called for valid requests.
    ///
    /// Must end with exactly one of `set_as_success` or `set_as_failed`.
    async fn execute(&self, request: &Request, response: &mut Response);

    /// Validates, then executes.
    async fn invoke(&self, request: &Request, response: &mut Response) {
        let use_case = std::any::type_name::<Self>();

        debug!(use_case, "Validating request");
        let valid = self.is_valid(request, response);
        if !valid || response.has_errors() {
            response.set_as_failed();
            debug!(
                use_case,
                categories = response.errors().len(),
                "Request rejected by validation"
            );
            settle(use_case, response);
            return;
        }

        debug!(use_case, "Executing");
        self.execute(request, response).await;
        settle(use_case, response);

        debug!(use_case, outcome = ?response.outcome(), "Use case finished");
    }
}

/// Leaves `response` either succeeded without errors or failed with at
/// least one.
fn settle(use_case: &str, response: &mut Response) {
    if !response.is_consistent() {
        warn!(use_case, "Use case reported success with errors; marking failed");
        response.set_as_failed();
    }
    if response.outcome() == Outcome::Pending {
        warn!(use_case, "Use case set no outcome; marking failed");
        response.set_as_failed();
    }
    if !response.is_success() && !response.has_errors() {
        warn!(use_case, "Use case failed without errors");
        response.add_error(GENERIC_ERROR_KEY, ApplicationError::generic(UNREPORTED_FAILURE));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
