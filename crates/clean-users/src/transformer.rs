//! # User Transformer
//!
//! Shapes user records for output.

use clean_core::{Record, Transformer};

/// Fields never rendered to a caller.
const HIDDEN_FIELDS: &[&str] = &["password"];

/// Drops credentials from user records.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserTransformer;

impl Transformer for UserTransformer {
    fn map(&self, mut record: Record) -> Record {
        for field in HIDDEN_FIELDS {
            record.shift_remove(*field);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_is_stripped_and_order_kept() {
        let value = json!({
            "id": "u-1",
            "name": "Ada",
            "password": "secret",
            "email": "ada@example.com",
        });

        let shaped = UserTransformer.map_value(value);
        assert_eq!(shaped, json!({ "id": "u-1", "name": "Ada", "email": "ada@example.com" }));

        let keys: Vec<_> = shaped.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["id", "name", "email"]);
    }
}
