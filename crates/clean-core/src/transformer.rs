//! # Transformer
//!
//! Presentation shaping for records already placed in a Response's data
//! payload, e.g. stripping sensitive fields before a boundary renders them.
//! Transformers never see the error bag or the success flag.

use serde_json::Value;

use crate::collection::Record;

/// Re-maps one record for presentation.
pub trait Transformer: Send + Sync {
    /// Transforms a single record.
    fn map(&self, record: Record) -> Record;

    /// Transforms every record, keeping order.
    fn map_multiple(&self, records: Vec<Record>) -> Vec<Record> {
        records.into_iter().map(|record| self.map(record)).collect()
    }

    /// Transforms a JSON value holding one record.
    ///
    /// Non-object values are returned unchanged.
    fn map_value(&self, value: Value) -> Value {
        match value {
            Value::Object(record) => Value::Object(self.map(record)),
            other => other,
        }
    }

    /// Transforms a JSON array of records.
    ///
    /// Non-array values are returned unchanged.
    fn map_multiple_value(&self, value: Value) -> Value {
        match value {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| self.map_value(item)).collect())
            }
            other => other,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
