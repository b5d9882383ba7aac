//! # clean-core: Use-Case Protocol for Clean Use Cases
//!
//! This crate defines how any caller (HTTP controller, CLI handler,
//! message consumer) invokes a unit of business logic, and how plain
//! records become typed entities and back. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Clean Use Cases Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Boundary (controller, CLI, consumer)                 │   │
//! │  │   raw input ──► Request        Response ──► transport output    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ invoke(&request, &mut response)        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ clean-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ use_case  │  │  request  │  │  mapper   │  │ enum_type │  │   │
//! │  │   │  UseCase  │  │ response  │  │  Mapper   │  │ ErrorType │  │   │
//! │  │   │ is_valid  │  │collection │  │ Mappable  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ports                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Collaborators (repositories, clients)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`collection`] - Ordered string-keyed container
//! - [`enum_type`] - Closed-set value types (`enum_type!`)
//! - [`application_error`] - Error descriptors and their classification
//! - [`request`] / [`response`] - Invocation input and output
//! - [`mapper`] - Record ⇄ entity conversion (`mappable!`)
//! - [`use_case`] - The validate-then-execute protocol
//! - [`transformer`] - Presentation shaping of response data
//! - [`error`] - Rust error types raised inside the core
//!
//! ## Example Usage
//!
//! ```rust
//! use clean_core::{async_trait, ApplicationError, Request, Response, UseCase};
//!
//! struct Greet;
//!
//! #[async_trait]
//! impl UseCase for Greet {
//!     fn is_valid(&self, request: &Request, response: &mut Response) -> bool {
//!         if !request.has("name") {
//!             response.add_error("name", ApplicationError::validation("name_required"));
//!         }
//!         !response.has_errors()
//!     }
//!
//!     async fn execute(&self, request: &Request, response: &mut Response) {
//!         response.add_data("greeting", format!("hello {}", request.get_str("name", "")));
//!         response.set_as_success();
//!     }
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod application_error;
pub mod collection;
pub mod enum_type;
pub mod error;
pub mod mapper;
pub mod request;
pub mod response;
pub mod transformer;
pub mod use_case;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use application_error::{ApplicationError, ErrorType, GENERIC_ERROR_KEY};
pub use collection::{Collection, Record};
pub use enum_type::EnumType;
pub use error::{InvalidEnumMember, MapperError, MapperResult};
pub use mapper::{FieldValue, Finite, Mappable, Mapper, NonNullField};
pub use request::Request;
pub use response::{ErrorBag, Outcome, Response};
pub use transformer::Transformer;
pub use use_case::{UseCase, UNREPORTED_FAILURE};

// Implementors of UseCase need the attribute macro.
pub use async_trait::async_trait;

/// Paths the exported macros expand against.
#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
