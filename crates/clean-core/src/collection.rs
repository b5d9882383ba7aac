//! # Collection
//!
//! Ordered, string-keyed container used by [`Request`](crate::Request) and
//! [`Response`](crate::Response).
//!
//! ## Lookup Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  collection.get_or("id", &default)                                      │
//! │       │                                                                 │
//! │       ├── key present → stored value, exactly as inserted               │
//! │       │                                                                 │
//! │       └── key absent  → default (never an error, never a panic)         │
//! │                                                                         │
//! │  Typed accessors (get_str, get_i64, ...) return None on a type         │
//! │  mismatch instead of converting "42" into 42.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Plain associative data: the shape records travel in between layers.
pub type Record = Map<String, Value>;

/// Ordered mapping from string keys to heterogeneous values.
///
/// Keys keep insertion order; re-inserting an existing key keeps its
/// original position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    entries: Record,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Collection::default()
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the value stored under `key`, or `default` on a miss.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.entries.get(key).unwrap_or(default)
    }

    /// Returns the string stored under `key`.
    ///
    /// `None` when the key is absent or holds something other than a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Returns the string stored under `key`, or `default`.
    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    /// Returns the integer stored under `key`, or `default`.
    pub fn get_i64_or(&self, key: &str, default: i64) -> i64 {
        self.entries
            .get(key)
            .and_then(Value::as_i64)
            .unwrap_or(default)
    }

    /// Returns the boolean stored under `key`, or `default`.
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.entries
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Removes and returns the value under `key`.
    ///
    /// The relative order of the remaining keys is preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Checks whether `key` is present.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the full ordered mapping.
    pub fn all(&self) -> &Record {
        &self.entries
    }

    /// Consumes the collection and returns the underlying mapping.
    pub fn into_inner(self) -> Record {
        self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

impl From<Record> for Collection {
    fn from(entries: Record) -> Self {
        Collection { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Collection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Collection {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        Value::Object(collection.entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
