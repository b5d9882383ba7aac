//! # Request
//!
//! Read-only input handed to a use case.
//!
//! The boundary builds one Request per invocation from raw caller input
//! (body fields plus any route-derived identifiers) and drops it once the
//! use case returns. Use cases only ever see `&Request`, and the type has
//! no mutating methods.

use serde::Serialize;
use serde_json::Value;

use crate::collection::{Collection, Record};

/// Caller-supplied input for a single use-case invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Request {
    entries: Collection,
}

impl Request {
    /// Wraps an existing collection.
    pub fn new(entries: Collection) -> Self {
        Request { entries }
    }

    /// A request carrying no input.
    pub fn empty() -> Self {
        Request::default()
    }

    /// Returns the value under `key`, or `default` on a miss.
    pub fn get<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.entries.get_or(key, default)
    }

    /// Returns the string under `key`, or `default` when absent or not a
    /// string.
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.entries.get_str_or(key, default)
    }

    /// Checks whether `key` was supplied.
    pub fn has(&self, key: &str) -> bool {
        self.entries.has(key)
    }

    /// Returns every supplied entry.
    pub fn all(&self) -> &Record {
        self.entries.all()
    }
}

impl From<Collection> for Request {
    fn from(entries: Collection) -> Self {
        Request::new(entries)
    }
}

impl From<Record> for Request {
    fn from(entries: Record) -> Self {
        Request::new(Collection::from(entries))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
