//! # Enum-Style Value Types
//!
//! Closed-set value wrappers: every instance pairs a declared member name
//! with an underlying value, and construction fails for anything outside
//! the declared set.
//!
//! ## Declaring a Value Type
//! ```rust
//! use clean_core::{enum_type, EnumType};
//!
//! enum_type! {
//!     /// Account tier code.
//!     pub enum Tier: &'static str {
//!         Bronze("BRONZE") = "bronze",
//!         Gold("GOLD") = "gold",
//!     }
//! }
//!
//! let tier = Tier::from_name("GOLD").unwrap();
//! assert_eq!(tier.value(), "gold");
//! assert_eq!(tier.to_string(), "gold");
//! assert!(Tier::from_name("PLATINUM").is_err());
//! ```
//!
//! ## Construction Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  from_name("GOLD")      ──► lookup by declared name  ─┐                │
//! │  try_from_value("gold") ──► lookup by value          ─┼──► Tier::Gold  │
//! │  "gold".parse()         ──► lookup by Display(value) ─┤                │
//! │  from_json(&json!("gold")) ► lookup by JSON value    ─┘                │
//! │                                                                         │
//! │  Any miss ──► InvalidEnumMember { enum_name: "Tier", given }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Equality, hashing and ordering all follow the underlying value, so the
//! types work as `BTreeMap`/`HashMap` keys. Two members declared with the
//! same value are interchangeable.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;
use serde_json::Value;

use crate::error::InvalidEnumMember;

/// Behaviour shared by every closed-set value type.
///
/// Implemented by the [`enum_type!`](crate::enum_type) macro; hand-written
/// impls only need `members`, `name` and `value`.
pub trait EnumType: Copy + Eq + Ord + Hash + Debug + Display + 'static {
    /// The underlying primitive.
    type Value: Copy + Eq + Ord + Hash + Debug + Display + Serialize + Into<Value> + 'static;

    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    /// Every declared member, in declaration order.
    fn members() -> &'static [Self];

    /// The declared member name.
    fn name(&self) -> &'static str;

    /// The underlying value.
    fn value(&self) -> Self::Value;

    /// Looks a member up by its declared name.
    fn from_name(name: &str) -> Result<Self, InvalidEnumMember> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.name() == name)
            .ok_or_else(|| InvalidEnumMember::new(Self::TYPE_NAME, name))
    }

    /// Looks a member up by its underlying value.
    fn try_from_value(value: Self::Value) -> Result<Self, InvalidEnumMember> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.value() == value)
            .ok_or_else(|| InvalidEnumMember::new(Self::TYPE_NAME, value.to_string()))
    }

    /// Looks a member up by the string form of its value.
    fn parse_value(raw: &str) -> Result<Self, InvalidEnumMember> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.value().to_string() == raw)
            .ok_or_else(|| InvalidEnumMember::new(Self::TYPE_NAME, raw))
    }

    /// Looks a member up by the JSON form of its value.
    ///
    /// Strict: `json!("1")` never matches a member whose value is `1`.
    fn from_json(raw: &Value) -> Result<Self, InvalidEnumMember> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.to_json() == *raw)
            .ok_or_else(|| InvalidEnumMember::new(Self::TYPE_NAME, raw.to_string()))
    }

    /// The underlying value as JSON.
    fn to_json(&self) -> Value {
        self.value().into()
    }
}

/// Declares a closed-set value type.
///
/// Generates the enum plus `EnumType`, `Display`, `FromStr`, value-based
/// `Eq`/`Hash`/`Ord`, serde and mapper field impls. See the [module docs](crate::enum_type).
#[macro_export]
macro_rules! enum_type {
    (
        $(#[$outer:meta])*
        $vis:vis enum $name:ident: $value_ty:ty {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident($member_name:literal) = $value:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $crate::EnumType for $name {
            type Value = $value_ty;

            const TYPE_NAME: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $member_name,)+
                }
            }

            fn value(&self) -> $value_ty {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::EnumType::value(self) == $crate::EnumType::value(other)
            }
        }

        impl ::std::cmp::Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&$crate::EnumType::value(self), state)
            }
        }

        impl ::std::cmp::PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(::std::cmp::Ord::cmp(self, other))
            }
        }

        impl ::std::cmp::Ord for $name {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                ::std::cmp::Ord::cmp(
                    &$crate::EnumType::value(self),
                    &$crate::EnumType::value(other),
                )
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&$crate::EnumType::value(self), f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::InvalidEnumMember;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as $crate::EnumType>::parse_value(s)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(
                    &$crate::EnumType::value(self),
                    serializer,
                )
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let raw = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::EnumType>::from_json(&raw)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }

        impl $crate::FieldValue for $name {
            const EXPECTED: &'static str = stringify!($name);

            fn from_field(field: &str, value: &$crate::__private::serde_json::Value) -> $crate::MapperResult<Self> {
                $crate::mapper::enum_from_field(field, value)
            }

            fn to_field(&self) -> $crate::__private::serde_json::Value {
                $crate::EnumType::to_json(self)
            }
        }

        impl $crate::NonNullField for $name {}
    };
}

// =============================================================================
// Unit Tests
// =============================================================================
