//! # Mapper
//!
//! Converts loosely-typed records into typed entities and back, without
//! per-entity glue in the repositories and use cases that call it.
//!
//! ## How Conversion Is Declared
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  mappable!(UserEntity { id: UserId, name: String, age: i64 = 0 })       │
//! │        │                                                                │
//! │        ▼ generates                                                      │
//! │  impl Mappable   from_record: read each declared field by exact name    │
//! │                  to_record:   write each field's to_field()             │
//! │  impl FieldValue so UserEntity can itself nest inside another entity    │
//! │                                                                         │
//! │  Per field, FieldValue decides:                                         │
//! │    String / i64 / Finite    strict JSON type check, no coercion         │
//! │    Option<T: NonNullField>  missing or null → None                      │
//! │    enum_type! / value obj   built recursively from the stored scalar,   │
//! │                             unwrapped back to that scalar on output     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Edge-Case Policy
//! - Keys match field names exactly (no case folding, no snake/camel).
//! - A missing key with a declared default takes the default.
//! - Extra keys in the record are ignored.
//! - `"42"` is never accepted for an `i64` field, nor `42` for a `String`.
//! - `Option<T>` only wraps types that never render as `null`, so `None`
//!   and `Some(_)` always come back as they went in.
//! - Floats are [`Finite`]: JSON has no NaN or infinity to round-trip.
//!
//! ## Usage
//! ```rust
//! use clean_core::{mappable, Mapper};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i64, y: i64, label: Option<String> }
//! mappable!(Point { x: i64, y: i64, label: Option<String> });
//!
//! let record = json!({ "x": 1, "y": 2, "extra": true });
//! let point: Point = Mapper.to_object_from_value(&record).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2, label: None });
//!
//! let back = Mapper.to_array(&point);
//! assert_eq!(back["x"], json!(1));
//! ```

use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::collection::Record;
use crate::enum_type::EnumType;
use crate::error::{MapperError, MapperResult};

// =============================================================================
// Field Protocol
// =============================================================================

/// A type that can be stored in one record field.
///
/// Implementations must be exact inverses: `from_field(f, &v.to_field())`
/// returns a value equal to `v`.
pub trait FieldValue: Sized {
    /// Human-readable name of the expected JSON shape, for errors.
    const EXPECTED: &'static str;

    /// Builds the value from the JSON stored under `field`.
    fn from_field(field: &str, value: &Value) -> MapperResult<Self>;

    /// Renders the value as the JSON stored in a record.
    fn to_field(&self) -> Value;

    /// Called when `field` is absent from the record.
    fn when_missing(field: &str) -> MapperResult<Self> {
        Err(MapperError::missing(field))
    }
}

/// A field type whose [`to_field`](FieldValue::to_field) never produces
/// `null`.
///
/// Required by `Option<T>`: with a `T` that can render as `null`,
/// `Some(null)` and `None` would read back the same.
///
/// ```compile_fail
/// use clean_core::mappable;
/// use serde_json::Value;
///
/// struct Note { extra: Option<Value> }
/// mappable!(Note { extra: Option<Value> });
/// ```
pub trait NonNullField: FieldValue {}

/// Short JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds the TypeMismatch error for `T`.
pub fn mismatch<T: FieldValue>(field: &str, found: &Value) -> MapperError {
    MapperError::TypeMismatch {
        field: field.to_string(),
        expected: T::EXPECTED,
        found: json_type_name(found),
    }
}

/// Field reader used by [`enum_type!`](crate::enum_type) types.
pub fn enum_from_field<T: EnumType>(field: &str, value: &Value) -> MapperResult<T> {
    T::from_json(value).map_err(|err| MapperError::invalid(field, err))
}

impl FieldValue for String {
    const EXPECTED: &'static str = "string";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch::<Self>(field, other)),
        }
    }

    fn to_field(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        value.as_bool().ok_or_else(|| mismatch::<Self>(field, value))
    }

    fn to_field(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(v) => Ok(v),
                None if n.is_u64() => Err(MapperError::invalid(field, format!("{n} is out of range for i64"))),
                None => Err(mismatch::<Self>(field, value)),
            },
            other => Err(mismatch::<Self>(field, other)),
        }
    }

    fn to_field(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for i32 {
    const EXPECTED: &'static str = "integer";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        let wide = i64::from_field(field, value)?;
        i32::try_from(wide).map_err(|_| MapperError::invalid(field, format!("{wide} is out of range for i32")))
    }

    fn to_field(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for u32 {
    const EXPECTED: &'static str = "integer";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        let wide = i64::from_field(field, value)?;
        u32::try_from(wide).map_err(|_| MapperError::invalid(field, format!("{wide} is out of range for u32")))
    }

    fn to_field(&self) -> Value {
        Value::from(*self)
    }
}

/// An `f64` that is neither NaN nor infinite.
///
/// The float field type: every value has an exact JSON number form.
///
/// ```rust
/// use clean_core::Finite;
///
/// assert_eq!(Finite::new(2.5).map(Finite::get), Some(2.5));
/// assert!(Finite::new(f64::NAN).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Finite(f64);

impl Finite {
    /// `None` for NaN and the infinities.
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Finite(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl FieldValue for Finite {
    const EXPECTED: &'static str = "number";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        let raw = value.as_f64().ok_or_else(|| mismatch::<Self>(field, value))?;
        Finite::new(raw).ok_or_else(|| MapperError::invalid(field, format!("{raw} is not finite")))
    }

    fn to_field(&self) -> Value {
        Value::from(self.0)
    }
}

/// Timestamps travel as RFC 3339 strings.
impl FieldValue for DateTime<Utc> {
    const EXPECTED: &'static str = "RFC 3339 timestamp";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        let raw = value.as_str().ok_or_else(|| mismatch::<Self>(field, value))?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|err| MapperError::invalid(field, err))
    }

    fn to_field(&self) -> Value {
        Value::String(self.to_rfc3339())
    }
}

/// Untyped passthrough for free-form fields.
impl FieldValue for Value {
    const EXPECTED: &'static str = "any";

    fn from_field(_field: &str, value: &Value) -> MapperResult<Self> {
        Ok(value.clone())
    }

    fn to_field(&self) -> Value {
        self.clone()
    }
}

/// Missing and `null` both read as `None`.
impl<T: NonNullField> FieldValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_field(field, other).map(Some),
        }
    }

    fn to_field(&self) -> Value {
        match self {
            Some(inner) => inner.to_field(),
            None => Value::Null,
        }
    }

    fn when_missing(_field: &str) -> MapperResult<Self> {
        Ok(None)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn from_field(field: &str, value: &Value) -> MapperResult<Self> {
        let items = value.as_array().ok_or_else(|| mismatch::<Self>(field, value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_field(&format!("{field}[{i}]"), item))
            .collect()
    }

    fn to_field(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_field).collect())
    }
}

impl NonNullField for String {}
impl NonNullField for bool {}
impl NonNullField for i64 {}
impl NonNullField for i32 {}
impl NonNullField for u32 {}
impl NonNullField for Finite {}
impl NonNullField for DateTime<Utc> {}
impl<T: FieldValue> NonNullField for Vec<T> {}

// =============================================================================
// Record Readers
// =============================================================================

/// Reads a required (or `Option`) field by exact name.
pub fn read_field<T: FieldValue>(record: &Record, field: &str) -> MapperResult<T> {
    match record.get(field) {
        Some(value) => T::from_field(field, value),
        None => T::when_missing(field),
    }
}

/// Reads a field, falling back to `default` when the key is absent.
pub fn read_field_or_else<T, F>(record: &Record, field: &str, default: F) -> MapperResult<T>
where
    T: FieldValue,
    F: FnOnce() -> T,
{
    match record.get(field) {
        Some(value) => T::from_field(field, value),
        None => Ok(default()),
    }
}

// =============================================================================
// Mappable Entities
// =============================================================================

/// An entity the [`Mapper`] can build from and flatten into a record.
///
/// Usually implemented with [`mappable!`](crate::mappable).
pub trait Mappable: Sized {
    /// Builds the entity; fails without producing a partial value.
    fn from_record(record: &Record) -> MapperResult<Self>;

    /// Flattens the entity; value objects become their primitive.
    fn to_record(&self) -> Record;
}

/// Implements [`Mappable`] and [`FieldValue`] for a struct from its field
/// list.
///
/// ```rust
/// use clean_core::{mappable, Mapper};
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq)]
/// struct Page { number: i64, size: i64 }
/// mappable!(Page { number: i64, size: i64 = 20 });
///
/// let page: Page = Mapper.to_object_from_value(&json!({ "number": 3 })).unwrap();
/// assert_eq!(page, Page { number: 3, size: 20 });
/// ```
#[macro_export]
macro_rules! mappable {
    (@read $record:ident, $field:ident, $ty:ty) => {
        $crate::mapper::read_field::<$ty>($record, stringify!($field))?
    };
    (@read $record:ident, $field:ident, $ty:ty, $default:expr) => {
        $crate::mapper::read_field_or_else::<$ty, _>($record, stringify!($field), || $default)?
    };
    (
        $name:ident {
            $( $field:ident : $ty:ty $( = $default:expr )? ),+ $(,)?
        }
    ) => {
        impl $crate::Mappable for $name {
            fn from_record(record: &$crate::Record) -> $crate::MapperResult<Self> {
                Ok($name {
                    $( $field: $crate::mappable!(@read record, $field, $ty $(, $default)?), )+
                })
            }

            fn to_record(&self) -> $crate::Record {
                let mut record = $crate::Record::new();
                $(
                    record.insert(
                        stringify!($field).to_string(),
                        $crate::FieldValue::to_field(&self.$field),
                    );
                )+
                record
            }
        }

        impl $crate::FieldValue for $name {
            const EXPECTED: &'static str = "object";

            fn from_field(
                field: &str,
                value: &$crate::__private::serde_json::Value,
            ) -> $crate::MapperResult<Self> {
                match value {
                    $crate::__private::serde_json::Value::Object(record) => {
                        <$name as $crate::Mappable>::from_record(record)
                            .map_err(|err| $crate::MapperError::invalid(field, err))
                    }
                    other => Err($crate::mapper::mismatch::<Self>(field, other)),
                }
            }

            fn to_field(&self) -> $crate::__private::serde_json::Value {
                $crate::__private::serde_json::Value::Object($crate::Mappable::to_record(self))
            }
        }

        impl $crate::NonNullField for $name {}
    };
}

// =============================================================================
// Mapper
// =============================================================================

/// The generic bidirectional converter.
///
/// Stateless; repositories and use cases hold one by value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mapper;

impl Mapper {
    /// Creates a mapper.
    pub fn new() -> Self {
        Mapper
    }

    /// Builds a `T` from `record`.
    pub fn to_object<T: Mappable>(&self, record: &Record) -> MapperResult<T> {
        T::from_record(record).map_err(|err| {
            debug!(
                entity = std::any::type_name::<T>(),
                error = %err,
                "Record failed to map"
            );
            err
        })
    }

    /// Builds a `T` from a JSON value that must be an object.
    pub fn to_object_from_value<T: Mappable>(&self, value: &Value) -> MapperResult<T> {
        match value {
            Value::Object(record) => self.to_object(record),
            other => Err(MapperError::NotARecord {
                found: json_type_name(other),
            }),
        }
    }

    /// Flattens `entity` into a record.
    pub fn to_array<T: Mappable>(&self, entity: &T) -> Record {
        entity.to_record()
    }

    /// Builds one `T` per record, keeping input order.
    ///
    /// All-or-nothing: the first failure is returned with its index.
    pub fn to_multiple_object<T, I>(&self, records: I) -> MapperResult<Vec<T>>
    where
        T: Mappable,
        I: IntoIterator,
        I::Item: Borrow<Record>,
    {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                self.to_object(record.borrow())
                    .map_err(|err| err.at_index(index))
            })
            .collect()
    }

    /// Builds one `T` per element of a JSON array.
    pub fn to_multiple_object_from_value<T: Mappable>(&self, value: &Value) -> MapperResult<Vec<T>> {
        let items = value.as_array().ok_or(MapperError::NotARecord {
            found: json_type_name(value),
        })?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.to_object_from_value(item)
                    .map_err(|err| err.at_index(index))
            })
            .collect()
    }

    /// Flattens every entity, keeping input order.
    pub fn to_multiple_array<'a, T, I>(&self, entities: I) -> Vec<Record>
    where
        T: Mappable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        entities.into_iter().map(|entity| self.to_array(entity)).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    crate::enum_type! {
        enum Status: &'static str {
            Active("ACTIVE") = "active",
            Blocked("BLOCKED") = "blocked",
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Address {
        city: String,
        zip: String,
    }

    crate::mappable!(Address { city: String, zip: String });

    #[derive(Debug, Clone, PartialEq)]
    struct Account {
        id: String,
        age: i64,
        status: Status,
        nickname: Option<String>,
        tags: Vec<String>,
        address: Address,
        retries: u32,
        joined_at: DateTime<Utc>,
    }

    crate::mappable!(Account {
        id: String,
        age: i64,
        status: Status,
        nickname: Option<String>,
        tags: Vec<String>,
        address: Address,
        retries: u32 = 3,
        joined_at: DateTime<Utc>,
    });

    fn account_record() -> Record {
        json!({
            "id": "acc-1",
            "age": 37,
            "status": "active",
            "nickname": "ada",
            "tags": ["admin", "beta"],
            "address": { "city": "London", "zip": "N1" },
            "retries": 1,
            "joined_at": "2024-03-01T10:15:00+00:00"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn account() -> Account {
        Account {
            id: "acc-1".to_string(),
            age: 37,
            status: Status::Active,
            nickname: Some("ada".to_string()),
            tags: vec!["admin".to_string(), "beta".to_string()],
            address: Address {
                city: "London".to_string(),
                zip: "N1".to_string(),
            },
            retries: 1,
            joined_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap(),
        }
    }

    #[test]
    fn test_to_object_builds_nested_value_types() {
        let entity: Account = Mapper.to_object(&account_record()).unwrap();
        assert_eq!(entity, account());
    }

    #[test]
    fn test_round_trip_preserves_entity() {
        let original = account();
        let record = Mapper.to_array(&original);
        let rebuilt: Account = Mapper.to_object(&record).unwrap();

        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_to_array_unwraps_value_types_to_primitives() {
        let record = Mapper.to_array(&account());

        assert_eq!(record["status"], json!("active"));
        assert_eq!(record["address"], json!({ "city": "London", "zip": "N1" }));
        assert_eq!(record["joined_at"], json!("2024-03-01T10:15:00+00:00"));
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["id", "age", "status", "nickname", "tags", "address", "retries", "joined_at"]
        );
    }

    #[test]
    fn test_missing_required_key_fails() {
        let mut record = account_record();
        record.remove("age");

        let err = Mapper.to_object::<Account>(&record).unwrap_err();
        assert_eq!(err, MapperError::missing("age"));
    }

    #[test]
    fn test_key_lookup_is_name_exact() {
        let mut record = account_record();
        let age = record.remove("age").unwrap();
        record.insert("Age".to_string(), age);

        assert_eq!(
            Mapper.to_object::<Account>(&record).unwrap_err(),
            MapperError::missing("age")
        );
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let mut record = account_record();
        record.insert("legacy_flag".to_string(), json!(true));

        let entity: Account = Mapper.to_object(&record).unwrap();
        assert_eq!(entity, account());
    }

    #[test]
    fn test_defaults_fill_missing_keys() {
        let mut record = account_record();
        record.remove("retries");
        record.remove("nickname");

        let entity: Account = Mapper.to_object(&record).unwrap();
        assert_eq!(entity.retries, 3);
        assert_eq!(entity.nickname, None);
    }

    #[test]
    fn test_no_numeric_string_coercion() {
        let mut record = account_record();
        record.insert("age".to_string(), json!("37"));
        assert_eq!(
            Mapper.to_object::<Account>(&record).unwrap_err(),
            MapperError::TypeMismatch {
                field: "age".to_string(),
                expected: "integer",
                found: "string",
            }
        );

        let mut record = account_record();
        record.insert("id".to_string(), json!(1));
        assert!(matches!(
            Mapper.to_object::<Account>(&record),
            Err(MapperError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_nested_value_fails() {
        let mut record = account_record();
        record.insert("status".to_string(), json!("deleted"));
        assert!(matches!(
            Mapper.to_object::<Account>(&record),
            Err(MapperError::InvalidValue { ref field, .. }) if field == "status"
        ));

        let mut record = account_record();
        record.insert("address".to_string(), json!({ "city": "Paris" }));
        assert!(matches!(
            Mapper.to_object::<Account>(&record),
            Err(MapperError::InvalidValue { ref field, .. }) if field == "address"
        ));
    }

    #[test]
    fn test_integer_range_is_checked() {
        let mut record = account_record();
        record.insert("retries".to_string(), json!(-1));
        assert!(matches!(
            Mapper.to_object::<Account>(&record),
            Err(MapperError::InvalidValue { ref field, .. }) if field == "retries"
        ));
    }

    #[test]
    fn test_oversized_integer_is_out_of_range() {
        let mut record = account_record();
        record.insert("age".to_string(), json!(u64::MAX));
        match Mapper.to_object::<Account>(&record) {
            Err(MapperError::InvalidValue { field, reason }) => {
                assert_eq!(field, "age");
                assert!(reason.contains("out of range for i64"), "{reason}");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        ratio: Finite,
        offset: Option<Finite>,
        small: i32,
        count: u32,
        payload: Value,
        statuses: Vec<Status>,
        history: Vec<Address>,
    }

    crate::mappable!(Sample {
        ratio: Finite,
        offset: Option<Finite>,
        small: i32,
        count: u32,
        payload: Value,
        statuses: Vec<Status>,
        history: Vec<Address>,
    });

    fn finite(value: f64) -> Finite {
        Finite::new(value).unwrap()
    }

    fn sample() -> Sample {
        Sample {
            ratio: finite(0.25),
            offset: None,
            small: 0,
            count: 0,
            payload: Value::Null,
            statuses: vec![Status::Blocked, Status::Active],
            history: vec![Address {
                city: "Paris".to_string(),
                zip: "75001".to_string(),
            }],
        }
    }

    fn assert_round_trips(original: &Sample) {
        let record = Mapper.to_array(original);
        let rebuilt: Sample = Mapper.to_object(&record).unwrap();
        assert_eq!(&rebuilt, original, "record was {record:?}");
    }

    #[test]
    fn test_every_field_type_round_trips() {
        assert_round_trips(&sample());

        let edges = [
            (f64::MAX, i32::MIN, u32::MAX),
            (f64::MIN_POSITIVE, i32::MAX, 0),
            (-0.0, -1, 1),
            (f64::MIN, 0, u32::MAX - 1),
        ];
        for (ratio, small, count) in edges {
            assert_round_trips(&Sample {
                ratio: finite(ratio),
                offset: Some(finite(-ratio)),
                small,
                count,
                payload: json!({ "a": [null, 1.5, "x"] }),
                statuses: vec![],
                history: vec![],
            });
        }
    }

    #[test]
    fn test_optional_field_keeps_none_and_some_apart() {
        let none = Mapper.to_array(&sample());
        assert_eq!(none["offset"], Value::Null);

        let some = Sample {
            offset: Some(finite(0.0)),
            ..sample()
        };
        let rebuilt: Sample = Mapper.to_object(&Mapper.to_array(&some)).unwrap();
        assert_eq!(rebuilt.offset, Some(finite(0.0)));
    }

    #[test]
    fn test_finite_rejects_nan_and_infinities() {
        assert!(Finite::new(f64::NAN).is_none());
        assert!(Finite::new(f64::INFINITY).is_none());
        assert!(Finite::new(f64::NEG_INFINITY).is_none());
        assert_eq!(finite(-2.5).get(), -2.5);

        let mut record = Mapper.to_array(&sample());
        record.insert("ratio".to_string(), json!("0.5"));
        assert!(matches!(
            Mapper.to_object::<Sample>(&record),
            Err(MapperError::TypeMismatch { ref field, .. }) if field == "ratio"
        ));
    }

    #[test]
    fn test_narrow_integers_reject_out_of_range() {
        let cases = [
            ("small", json!(i64::from(i32::MAX) + 1)),
            ("small", json!(i64::from(i32::MIN) - 1)),
            ("count", json!(-1)),
            ("count", json!(u64::from(u32::MAX) + 1)),
        ];
        for (key, raw) in cases {
            let mut record = Mapper.to_array(&sample());
            record.insert(key.to_string(), raw.clone());
            assert!(
                matches!(
                    Mapper.to_object::<Sample>(&record),
                    Err(MapperError::InvalidValue { ref field, .. }) if field == key
                ),
                "{key} = {raw}"
            );
        }
    }

    #[test]
    fn test_nested_list_errors_name_the_element() {
        let mut record = Mapper.to_array(&sample());
        record.insert("statuses".to_string(), json!(["active", "archived"]));
        assert!(matches!(
            Mapper.to_object::<Sample>(&record),
            Err(MapperError::InvalidValue { ref field, .. }) if field == "statuses[1]"
        ));
    }

    #[test]
    fn test_to_multiple_object_preserves_order() {
        let records: Vec<Record> = ["a", "b", "c"]
            .iter()
            .map(|city| {
                json!({ "city": city, "zip": "00000" })
                    .as_object()
                    .cloned()
                    .unwrap()
            })
            .collect();

        let addresses: Vec<Address> = Mapper.to_multiple_object(&records).unwrap();
        let cities: Vec<&str> = addresses.iter().map(|a| a.city.as_str()).collect();
        assert_eq!(cities, vec!["a", "b", "c"]);

        let back = Mapper.to_multiple_array(&addresses);
        assert_eq!(back, records);
    }

    #[test]
    fn test_to_multiple_object_reports_failing_index() {
        let value = json!([
            { "city": "a", "zip": "1" },
            { "city": "b" },
        ]);

        let err = Mapper
            .to_multiple_object_from_value::<Address>(&value)
            .unwrap_err();
        assert_eq!(err, MapperError::missing("zip").at_index(1));
    }

    #[test]
    fn test_non_object_input_is_rejected() {
        assert_eq!(
            Mapper.to_object_from_value::<Address>(&json!(["x"])).unwrap_err(),
            MapperError::NotARecord { found: "array" }
        );
    }
}
